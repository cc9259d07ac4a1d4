use std::collections::BTreeMap;

use axum::{
    extract::rejection::JsonRejection,
    http::Method,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::{method_not_allowed, ApiFailure, Failure};
use crate::util::resp::{ok, Envelope};

#[derive(Debug, Deserialize, Serialize)]
struct EchoPayload {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
}

impl EchoPayload {
    fn validate(&self) -> BTreeMap<String, String> {
        let mut errors = BTreeMap::new();
        if self.name.trim().is_empty() {
            errors.insert("name".to_string(), "must not be blank".to_string());
        }
        if !self.email.contains('@') {
            errors.insert(
                "email".to_string(),
                "must be a well-formed email address".to_string(),
            );
        }
        errors
    }
}

pub fn router() -> Router {
    Router::new().route("/test/echo", post(echo).fallback(method_not_allowed))
}

async fn echo(
    method: Method,
    payload: Result<Json<EchoPayload>, JsonRejection>,
) -> Result<Envelope<EchoPayload>, Failure> {
    let Json(payload) = match payload {
        Ok(p) => p,
        Err(rejection) => {
            let errors = BTreeMap::from([("body".to_string(), rejection.body_text())]);
            return Err(ApiFailure::Validation(errors).on(&method));
        }
    };

    let errors = payload.validate();
    if !errors.is_empty() {
        return Err(ApiFailure::Validation(errors).on(&method));
    }
    Ok(ok(payload, &method, "Payload accepted"))
}

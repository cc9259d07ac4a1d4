use std::collections::BTreeMap;

use axum::{
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use crate::util::resp::err_status_json;

/// Handler failures, rendered as error envelopes.
#[derive(Debug, Error)]
pub enum ApiFailure {
    #[error("An unexpected error occurred: {0}")]
    Internal(String),
    /// Field name -> reason.
    #[error("Validation failed")]
    Validation(BTreeMap<String, String>),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Request method '{0}' is not supported")]
    MethodNotAllowed(String),
}

impl ApiFailure {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiFailure::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiFailure::Validation(_) => StatusCode::BAD_REQUEST,
            ApiFailure::NotFound(_) => StatusCode::NOT_FOUND,
            ApiFailure::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    pub fn on(self, method: &Method) -> Failure {
        Failure {
            method: method.clone(),
            failure: self,
        }
    }
}

/// An [`ApiFailure`] together with the verb of the request that hit it.
#[derive(Debug)]
pub struct Failure {
    method: Method,
    failure: ApiFailure,
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        let status = self.failure.status();
        if status.is_server_error() {
            error!(method = %self.method, "{}", self.failure);
        } else {
            warn!(method = %self.method, status = status.as_u16(), "{}", self.failure);
        }

        let (status, mut body) = err_status_json(status, &self.method, self.failure.to_string());
        if let ApiFailure::Validation(errors) = self.failure {
            body.0.add_metadata("validationErrors", serde_json::json!(errors));
        }
        (status, body).into_response()
    }
}

pub async fn not_found(method: Method, uri: Uri) -> Failure {
    ApiFailure::NotFound(uri.path().to_string()).on(&method)
}

pub async fn method_not_allowed(method: Method) -> Failure {
    ApiFailure::MethodNotAllowed(method.to_string()).on(&method)
}

use std::collections::HashMap;

use axum::{
    http::{Method, StatusCode},
    Json,
};
use envelope_v1::ApiResponse;
use serde_json::Value;

pub type Envelope<T> = (StatusCode, Json<ApiResponse<T>>);

pub fn ok<T>(data: T, method: &Method, message: &str) -> Envelope<T> {
    (
        StatusCode::OK,
        Json(ApiResponse::success(data, method.as_str(), message)),
    )
}

pub fn created<T>(data: T, method: &Method, message: &str) -> Envelope<T> {
    (
        StatusCode::CREATED,
        Json(ApiResponse::created(data, method.as_str(), message)),
    )
}

// envelope code stays 204; the status line is 200 because a 204 response
// cannot carry a body
pub fn no_content<T>(method: &Method, message: &str) -> Envelope<T> {
    (
        StatusCode::OK,
        Json(ApiResponse::no_content(method.as_str(), message)),
    )
}

pub fn status<T>(data: T, status: StatusCode, method: &Method, message: &str) -> Envelope<T> {
    (
        status,
        Json(ApiResponse::with_status(
            Some(data),
            status.as_u16(),
            method.as_str(),
            message,
        )),
    )
}

pub fn ok_with_metadata<T>(
    data: T,
    method: &Method,
    message: &str,
    metadata: HashMap<String, Value>,
) -> Envelope<T> {
    let mut resp = ApiResponse::success(data, method.as_str(), message);
    resp.metadata.extend(metadata);
    (StatusCode::OK, Json(resp))
}

pub fn err_status_json(status: StatusCode, method: &Method, message: impl Into<String>) -> Envelope<Value> {
    (
        status,
        Json(ApiResponse::error(status.as_u16(), method.as_str(), message)),
    )
}

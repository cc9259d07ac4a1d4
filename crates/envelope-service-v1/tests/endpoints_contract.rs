use envelope_service_v1::build_app;
use envelope_v1::{
    extract_data, extract_error_message, extract_metadata, is_api_response, ApiFetch, ApiResponse,
    RequestOptions,
};
use serde::Deserialize;
use serde_json::{json, Value};

async fn spawn_service() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind service");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, build_app()).await.expect("serve");
    });
    format!("http://{addr}")
}

async fn raw(base: &str, method: reqwest::Method, path: &str) -> (u16, Value) {
    let resp = reqwest::Client::new()
        .request(method, format!("{base}{path}"))
        .send()
        .await
        .expect("send");
    let status = resp.status().as_u16();
    let body: Value = resp.json().await.expect("json body");
    (status, body)
}

#[derive(Debug, Deserialize)]
struct TestUser {
    name: String,
    email: String,
    roles: Vec<String>,
}

#[tokio::test]
async fn success_endpoint() {
    let base = spawn_service().await;
    let r: ApiResponse<String> = ApiFetch::new()
        .fetch(&format!("{base}/api/test/success"), None)
        .await;

    assert_eq!(r.code, 200);
    assert_eq!(r.method, "GET");
    assert!(r.is_success());
    assert_eq!(r.message, "Operation completed successfully");
    assert_eq!(
        extract_data(&r).map(String::as_str),
        Some("This is a successful response")
    );
    assert!(r.metadata.is_empty());
    assert_eq!(r.timestamp.len(), "2026-10-19 08:00:00".len());
}

#[tokio::test]
async fn data_endpoint_returns_typed_payload() {
    let base = spawn_service().await;
    let r: ApiResponse<TestUser> = ApiFetch::new()
        .fetch(&format!("{base}/api/test/data"), None)
        .await;

    let user = r.into_data().expect("user payload");
    assert_eq!(user.name, "Test User");
    assert_eq!(user.email, "test@example.com");
    assert_eq!(user.roles, vec!["USER", "ADMIN"]);
}

#[tokio::test]
async fn metadata_endpoint() {
    let base = spawn_service().await;
    let r: ApiResponse<String> = ApiFetch::new()
        .fetch(&format!("{base}/api/test/metadata"), None)
        .await;

    assert_eq!(extract_metadata(&r, "version"), Some(&json!("1.0.0")));
    assert_eq!(extract_metadata(&r, "server"), Some(&json!("Test Server")));
    assert!(extract_metadata(&r, "timestamp").is_some_and(Value::is_i64));
    assert_eq!(extract_metadata(&r, "missing"), None);
}

#[tokio::test]
async fn create_endpoint_is_201() {
    let base = spawn_service().await;
    let (status, body) = raw(&base, reqwest::Method::POST, "/api/test/create").await;

    assert_eq!(status, 201);
    assert_eq!(body["code"], 201);
    assert_eq!(body["method"], "POST");
    assert_eq!(body["data"], "Resource created");
}

#[tokio::test]
async fn delete_endpoint_reports_204_without_data() {
    let base = spawn_service().await;
    let r: ApiResponse<Value> = ApiFetch::new()
        .fetch(
            &format!("{base}/api/test/delete"),
            Some(RequestOptions::method("DELETE")),
        )
        .await;

    assert_eq!(r.code, 204);
    assert_eq!(r.method, "DELETE");
    assert!(r.is_success());
    assert!(r.data.is_none());
    assert_eq!(r.message, "Resource deleted successfully");
}

#[tokio::test]
async fn custom_status_endpoint_is_202() {
    let base = spawn_service().await;
    let (status, body) = raw(&base, reqwest::Method::GET, "/api/test/custom-status").await;

    assert_eq!(status, 202);
    assert_eq!(body["code"], 202);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Request accepted for processing");
}

#[tokio::test]
async fn error_endpoint_is_an_envelope() {
    let base = spawn_service().await;
    let r: ApiResponse<String> = ApiFetch::new()
        .fetch(&format!("{base}/api/test/error"), None)
        .await;

    assert_eq!(r.code, 500);
    assert!(r.is_error());
    assert!(r.data.is_none());
    assert_eq!(
        extract_error_message(&r),
        "An unexpected error occurred: This is a test exception"
    );
}

#[tokio::test]
async fn every_body_is_structurally_an_envelope() {
    let base = spawn_service().await;
    let cases = [
        (reqwest::Method::GET, "/api/test/success"),
        (reqwest::Method::GET, "/api/test/data"),
        (reqwest::Method::GET, "/api/test/metadata"),
        (reqwest::Method::POST, "/api/test/create"),
        (reqwest::Method::DELETE, "/api/test/delete"),
        (reqwest::Method::GET, "/api/test/custom-status"),
        (reqwest::Method::GET, "/api/test/error"),
        (reqwest::Method::GET, "/api/nowhere"),
        (reqwest::Method::PATCH, "/api/test/success"),
    ];
    for (method, path) in cases {
        let (_, body) = raw(&base, method.clone(), path).await;
        assert!(is_api_response(&body), "{method} {path} -> {body}");
    }
}

#[tokio::test]
async fn unknown_route_is_404_envelope() {
    let base = spawn_service().await;
    let (status, body) = raw(&base, reqwest::Method::GET, "/api/nowhere").await;

    assert_eq!(status, 404);
    assert_eq!(body["code"], 404);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Resource not found: /api/nowhere");
    assert_eq!(body["data"], Value::Null);
}

#[tokio::test]
async fn wrong_method_is_405_envelope() {
    let base = spawn_service().await;
    let (status, body) = raw(&base, reqwest::Method::PATCH, "/api/test/success").await;

    assert_eq!(status, 405);
    assert_eq!(body["method"], "PATCH");
    assert_eq!(body["message"], "Request method 'PATCH' is not supported");
}

#[tokio::test]
async fn echo_accepts_valid_payload() {
    let base = spawn_service().await;
    let opts = RequestOptions::method("POST")
        .json(&json!({"name": "Ada", "email": "ada@example.com"}));
    let r: ApiResponse<Value> = ApiFetch::new()
        .fetch(&format!("{base}/api/test/echo"), Some(opts))
        .await;

    assert!(r.is_success());
    assert_eq!(r.message, "Payload accepted");
    assert_eq!(r.data(), Some(&json!({"name": "Ada", "email": "ada@example.com"})));
}

#[tokio::test]
async fn echo_reports_field_errors_in_metadata() {
    let base = spawn_service().await;
    let opts = RequestOptions::method("POST").json(&json!({"name": "", "email": "nope"}));
    let r: ApiResponse<Value> = ApiFetch::new()
        .fetch(&format!("{base}/api/test/echo"), Some(opts))
        .await;

    assert_eq!(r.code, 400);
    assert_eq!(r.message, "Validation failed");
    let errors = extract_metadata(&r, "validationErrors").expect("validation errors");
    assert_eq!(errors["name"], "must not be blank");
    assert!(errors.get("email").is_some());
}

#[tokio::test]
async fn echo_rejects_malformed_json_as_envelope() {
    let base = spawn_service().await;
    let opts = RequestOptions::method("POST")
        .header("content-type", "application/json")
        .body("{not json");
    let r: ApiResponse<Value> = ApiFetch::new()
        .fetch(&format!("{base}/api/test/echo"), Some(opts))
        .await;

    assert_eq!(r.code, 400);
    assert_eq!(r.method, "POST");
    let errors = extract_metadata(&r, "validationErrors").expect("validation errors");
    assert!(errors.get("body").and_then(Value::as_str).is_some());
}

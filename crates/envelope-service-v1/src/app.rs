use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::error::not_found;

pub fn build_app() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods(Any);

    Router::new()
        .merge(crate::routes::router())
        .fallback(not_found)
        .layer(cors)
}

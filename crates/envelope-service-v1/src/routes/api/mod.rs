use axum::Router;

mod echo;

pub fn router() -> Router {
    Router::new()
        .merge(test::router())
        .merge(echo::router())
}

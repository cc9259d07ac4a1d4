//! Demo producer for the standard response envelope.

pub mod app;
pub mod error;
mod routes;
pub mod util;

pub use app::build_app;

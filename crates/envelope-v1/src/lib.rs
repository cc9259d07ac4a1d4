//! Standard API response envelope shared by producers and consumers.

pub mod accessors;
pub mod dto;
#[cfg(feature = "fetch")]
pub mod fetch;
pub mod shape;
pub mod time;

pub use accessors::{
    extract_data, extract_error_message, extract_metadata, is_error, is_success,
    UNKNOWN_ERROR_MESSAGE,
};
pub use dto::ApiResponse;
#[cfg(feature = "fetch")]
pub use fetch::{api_fetch, ApiFetch, RequestOptions};
pub use shape::is_api_response;

use serde_json::Value;

use crate::dto::ApiResponse;

pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

/// `success` is set AND `code` is in [200, 300).
pub fn is_success<T>(response: &ApiResponse<T>) -> bool {
    response.success && response.code >= 200 && response.code < 300
}

pub fn is_error<T>(response: &ApiResponse<T>) -> bool {
    !response.success || response.code < 200 || response.code >= 300
}

/// Payload of a successful response; `None` for any failure, even when the
/// failed envelope happens to carry data.
pub fn extract_data<T>(response: &ApiResponse<T>) -> Option<&T> {
    if is_success(response) {
        response.data.as_ref()
    } else {
        None
    }
}

pub fn extract_error_message<T>(response: &ApiResponse<T>) -> &str {
    if response.message.is_empty() {
        UNKNOWN_ERROR_MESSAGE
    } else {
        &response.message
    }
}

pub fn extract_metadata<'a, T>(response: &'a ApiResponse<T>, key: &str) -> Option<&'a Value> {
    response.metadata.get(key)
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        is_success(self)
    }

    pub fn is_error(&self) -> bool {
        is_error(self)
    }

    pub fn data(&self) -> Option<&T> {
        extract_data(self)
    }

    /// Owning form of [`extract_data`].
    pub fn into_data(self) -> Option<T> {
        if is_success(&self) {
            self.data
        } else {
            None
        }
    }

    pub fn error_message(&self) -> &str {
        extract_error_message(self)
    }

    pub fn metadata_value(&self, key: &str) -> Option<&Value> {
        extract_metadata(self, key)
    }
}

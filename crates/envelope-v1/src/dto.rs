use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::time::{now_iso_utc, now_local_text};

/// Standard response envelope shared by producer and consumer.
///
/// Field names are the wire contract. `data` is always serialized, as `null`
/// when there is no payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// HTTP-style status code. Kept wider than `u16` so out-of-range
    /// producer codes still decode.
    pub code: i32,
    /// Verb of the originating request (GET, POST, ...).
    pub method: String,
    /// When the envelope was built, as text.
    pub timestamp: String,
    pub success: bool,
    /// Null or missing on the wire decodes to an empty string.
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    pub data: Option<T>,
    /// Auxiliary information (version, server id, ...) outside the payload.
    /// Null or missing on the wire decodes to an empty map.
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: HashMap<String, Value>,
}

fn null_as_default<'de, D, V>(deserializer: D) -> Result<V, D::Error>
where
    D: Deserializer<'de>,
    V: Default + Deserialize<'de>,
{
    Ok(Option::<V>::deserialize(deserializer)?.unwrap_or_default())
}

pub const FALLBACK_CODE: i32 = 500;
pub const DEFAULT_METHOD: &str = "GET";

impl<T> ApiResponse<T> {
    /// Producer-side envelope with an explicit code; `success` follows the
    /// code's 2xx-ness.
    pub fn with_status(
        data: Option<T>,
        code: u16,
        method: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: i32::from(code),
            method: method.into(),
            timestamp: now_local_text(),
            success: (200..300).contains(&code),
            message: message.into(),
            data,
            metadata: HashMap::new(),
        }
    }

    /// 200 OK with a payload.
    pub fn success(data: T, method: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_status(Some(data), 200, method, message)
    }

    /// 201 Created with a payload.
    pub fn created(data: T, method: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_status(Some(data), 201, method, message)
    }

    /// 204 No Content: successful, no payload.
    pub fn no_content(method: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_status(None, 204, method, message)
    }

    /// Failure reported by the producer. Never carries data.
    pub fn error(code: u16, method: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            ..Self::with_status(None, code, method, message)
        }
    }

    /// Envelope synthesized on the consumer side when the request itself
    /// failed before any envelope was received. An empty method counts as
    /// no method.
    pub fn fallback(method: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            code: FALLBACK_CODE,
            method: method
                .filter(|m| !m.is_empty())
                .unwrap_or(DEFAULT_METHOD)
                .to_string(),
            timestamp: now_iso_utc(),
            success: false,
            message: message.into(),
            data: None,
            metadata: HashMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.add_metadata(key, value);
        self
    }

    pub fn add_metadata(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.metadata.insert(key.into(), value.into());
    }
}

use serde_json::Value;

/// Keys every envelope object must carry.
pub const ENVELOPE_KEYS: [&str; 7] = [
    "code",
    "method",
    "timestamp",
    "success",
    "message",
    "data",
    "metadata",
];

/// Shallow structural check: `value` is an object holding every envelope key.
///
/// Only key presence is checked, not field types. Anything that is not an
/// object (including `Value::Null`) is rejected.
pub fn is_api_response(value: &Value) -> bool {
    match value.as_object() {
        Some(obj) => ENVELOPE_KEYS.iter().all(|k| obj.contains_key(*k)),
        None => false,
    }
}

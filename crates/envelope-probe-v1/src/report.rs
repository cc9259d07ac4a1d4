use envelope_v1::{extract_data, extract_error_message, extract_metadata, ApiResponse};
use serde_json::Value;

use crate::config::{ProbeSpec, View};

fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Heading plus lines for the extracted part of an envelope.
pub fn render_view(spec: &ProbeSpec, resp: &ApiResponse<Value>) -> (&'static str, Vec<String>) {
    match spec.view {
        View::Data => {
            let lines = match extract_data(resp) {
                Some(Value::Object(fields)) => fields
                    .iter()
                    .map(|(k, v)| match v {
                        Value::Array(items) => format!(
                            "{k}: {}",
                            items.iter().map(plain).collect::<Vec<_>>().join(", ")
                        ),
                        other => format!("{k}: {}", plain(other)),
                    })
                    .collect(),
                Some(other) => vec![plain(other)],
                None => vec!["(no data)".to_string()],
            };
            ("Extracted Data", lines)
        }
        View::Metadata => {
            let lines = spec
                .metadata_keys
                .iter()
                .map(|k| match extract_metadata(resp, k) {
                    Some(v) => format!("{k}: {}", plain(v)),
                    None => format!("{k}: (absent)"),
                })
                .collect();
            ("Extracted Metadata", lines)
        }
        View::Error => ("Error Message", vec![extract_error_message(resp).to_string()]),
    }
}

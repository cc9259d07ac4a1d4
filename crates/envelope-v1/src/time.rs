use chrono::{Local, SecondsFormat, Utc};

/// Producer timestamp, e.g. `2026-10-19 08:00:00`.
pub fn now_local_text() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Consumer-side timestamp, e.g. `2026-10-19T08:00:00.000Z`.
pub fn now_iso_utc() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn now_unix_millis() -> i64 {
    Utc::now().timestamp_millis()
}

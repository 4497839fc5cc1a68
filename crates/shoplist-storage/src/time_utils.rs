use chrono::Utc;

/// Get current timestamp in milliseconds.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Get current timestamp in whole seconds.
pub fn now_secs() -> i64 {
    Utc::now().timestamp()
}

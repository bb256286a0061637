use chrono::{DateTime, Utc};

/// Current wall-clock time in milliseconds since the unix epoch.
pub fn time_millis() -> i64 {
    let time: DateTime<chrono::Utc> = Utc::now();
    time.timestamp_millis()
}

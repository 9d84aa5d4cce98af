//! Time helpers
//!
//! All record timestamps are Unix millis `i64`; conversion happens at the
//! edges, repositories and models only see integers.

/// Current time as Unix millis
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

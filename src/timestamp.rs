//! Timestamp encoding.

use chrono::{DateTime, FixedOffset};

/// Writes a timestamp as ISO 8601 with microseconds and a `+HH:MM` offset.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use prettifier::timestamp::encode_timestamp;
/// let ts = NaiveDate::from_ymd_opt(2000, 1, 1)
///     .unwrap()
///     .and_hms_opt(0, 0, 0)
///     .unwrap()
///     .and_utc()
///     .fixed_offset();
/// assert_eq!(encode_timestamp(&ts), "2000-01-01T00:00:00.000000+00:00");
/// ```
pub fn encode_timestamp(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp.format("%Y-%m-%dT%H:%M:%S%.6f%:z").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn keeps_offset_and_microseconds() {
        let offset = FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap();
        let ts = NaiveDate::from_ymd_opt(2021, 6, 15)
            .unwrap()
            .and_hms_micro_opt(12, 30, 45, 123_456)
            .unwrap()
            .and_local_timezone(offset)
            .unwrap();
        assert_eq!(encode_timestamp(&ts), "2021-06-15T12:30:45.123456+05:30");
    }
}

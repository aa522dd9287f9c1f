use time::macros::format_description;
use time::OffsetDateTime;

/// Seconds in one day.
pub const SECS_PER_DAY: i64 = 24 * 60 * 60;

/// Format unix seconds as a UTC calendar day (`YYYY-MM-DD`).
///
/// Timestamps outside the representable range render as the raw number.
pub fn format_date(unix_secs: i64) -> String {
    OffsetDateTime::from_unix_timestamp(unix_secs)
        .ok()
        .and_then(|ts| ts.format(format_description!("[year]-[month]-[day]")).ok())
        .unwrap_or_else(|| unix_secs.to_string())
}

/// Format unix seconds as `MM-DD HH:MM` (UTC) for axis labels.
pub fn format_axis_label(unix_secs: i64) -> String {
    OffsetDateTime::from_unix_timestamp(unix_secs)
        .ok()
        .and_then(|ts| {
            ts.format(format_description!("[month]-[day] [hour]:[minute]"))
                .ok()
        })
        .unwrap_or_else(|| unix_secs.to_string())
}

/// Current wall-clock time in unix seconds.
pub fn now_unix() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_epoch() {
        assert_eq!(format_date(0), "1970-01-01");
        assert_eq!(format_axis_label(3_600), "01-01 01:00");
    }

    #[test]
    fn out_of_range_falls_back_to_number() {
        assert_eq!(format_date(i64::MAX), i64::MAX.to_string());
    }
}

use chrono::{DateTime, Local, TimeZone};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Record a log line received from the controlled process and return the
/// line as written.
pub fn record(content: &str) -> String {
    let line = format_entry(&Local::now(), content);
    tracing::info!("{line}");
    line
}

fn format_entry<Tz>(at: &DateTime<Tz>, content: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("[{}] Received: {}", at.format(TIMESTAMP_FORMAT), content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn entry_carries_second_resolution_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();

        assert_eq!(
            format_entry(&at, "step 3 done"),
            "[2024-03-09 07:05:01] Received: step 3 done"
        );
    }

    #[test]
    fn record_returns_the_logged_line() {
        let line = record("hello");

        assert!(line.starts_with('['));
        assert!(line.ends_with("] Received: hello"));
    }
}

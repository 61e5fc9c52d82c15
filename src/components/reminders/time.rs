use super::models::{EventWindow, ReminderRecord};
use chrono::{Duration, NaiveDateTime, NaiveTime};

/// Start used when an annotation has no time (09:00)
pub fn default_start() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default()
}

/// End used when an annotation has no time (10:00)
pub fn default_end() -> NaiveTime {
    NaiveTime::from_hms_opt(10, 0, 0).unwrap_or_default()
}

/// Compute the absolute start and end for a record.
///
/// - no start: 09:00 to 10:00
/// - start only: start to start + 1 hour (may roll into the next day)
/// - start and end: taken as written
pub fn event_window(record: &ReminderRecord) -> EventWindow {
    match record.start_time {
        None => EventWindow {
            start: record.date.and_time(default_start()),
            end: record.date.and_time(default_end()),
        },
        Some(start_time) => {
            let start = record.date.and_time(start_time);
            let end = match record.end_time {
                Some(end_time) => record.date.and_time(end_time),
                None => start + Duration::hours(1),
            };
            EventWindow { start, end }
        }
    }
}

/// True when the window starts strictly before `now`
pub fn is_expired(window: &EventWindow, now: NaiveDateTime) -> bool {
    window.start < now
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(start: Option<&str>, end: Option<&str>) -> ReminderRecord {
        let parse = |s: &str| NaiveTime::parse_from_str(s, "%H:%M").unwrap();
        ReminderRecord {
            date: NaiveDate::from_ymd_opt(2099, 3, 14).unwrap(),
            start_time: start.map(parse),
            end_time: end.map(parse),
            title: "Test".to_string(),
            alert_minutes: 30,
            should_delete: false,
        }
    }

    fn fmt(dt: NaiveDateTime) -> String {
        dt.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    #[test]
    fn test_default_window() {
        let window = event_window(&record(None, None));
        assert_eq!(fmt(window.start), "2099-03-14 09:00:00");
        assert_eq!(fmt(window.end), "2099-03-14 10:00:00");
    }

    #[test]
    fn test_end_derived_from_start() {
        let window = event_window(&record(Some("14:30"), None));
        assert_eq!(fmt(window.start), "2099-03-14 14:30:00");
        assert_eq!(fmt(window.end), "2099-03-14 15:30:00");

        // Keeps the minute and pads the hour
        let window = event_window(&record(Some("08:05"), None));
        assert_eq!(window.end.format("%H:%M").to_string(), "09:05");
    }

    #[test]
    fn test_end_derived_rolls_over_midnight() {
        let window = event_window(&record(Some("23:30"), None));
        assert_eq!(fmt(window.end), "2099-03-15 00:30:00");
    }

    #[test]
    fn test_explicit_end() {
        let window = event_window(&record(Some("10:00"), Some("11:45")));
        assert_eq!(fmt(window.start), "2099-03-14 10:00:00");
        assert_eq!(fmt(window.end), "2099-03-14 11:45:00");
    }

    #[test]
    fn test_is_expired() {
        let window = event_window(&record(Some("10:00"), None));
        let before = window.start - Duration::minutes(1);
        let after = window.start + Duration::seconds(1);

        assert!(!is_expired(&window, before));
        // Starting exactly now is not in the past
        assert!(!is_expired(&window, window.start));
        assert!(is_expired(&window, after));
    }
}

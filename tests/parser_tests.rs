use chrono::{NaiveDate, NaiveTime};
use reminder_sync::components::reminders::parse_reminders;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// Annotation with only a date and a title gets all defaults
#[test]
fn test_default_alert_and_no_time() {
    let records = parse_reminders("@reminder: 2099-01-01 Meeting");

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.date, date(2099, 1, 1));
    assert_eq!(record.start_time, None);
    assert_eq!(record.end_time, None);
    assert_eq!(record.title, "Meeting");
    assert_eq!(record.alert_minutes, 30);
    assert!(!record.should_delete);
}

/// Explicit range, alert and delete marker together
#[test]
fn test_explicit_alert_and_delete() {
    let records = parse_reminders("@reminder: 2099-01-01 10:00-11:00 Sync !5 !delete");

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.start_time, Some(time(10, 0)));
    assert_eq!(record.end_time, Some(time(11, 0)));
    assert_eq!(record.title, "Sync");
    assert_eq!(record.alert_minutes, 5);
    assert!(record.should_delete);
}

#[test]
fn test_full_annotation() {
    let records = parse_reminders("@reminder: 2024-05-01 09:00-10:00 Dentist !15\n");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].date, date(2024, 5, 1));
    assert_eq!(records[0].start_time, Some(time(9, 0)));
    assert_eq!(records[0].end_time, Some(time(10, 0)));
    assert_eq!(records[0].title, "Dentist");
    assert_eq!(records[0].alert_minutes, 15);
    assert!(!records[0].should_delete);
}

#[test]
fn test_start_without_end() {
    let records = parse_reminders("@reminder: 2099-02-03 14:30 Standup");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].start_time, Some(time(14, 30)));
    assert_eq!(records[0].end_time, None);
    assert_eq!(records[0].title, "Standup");
}

/// Records come out in the order their annotations appear
#[test]
fn test_extraction_preserves_order() {
    let text = "Some notes\n\
                @reminder: 2099-01-01 First\n\
                more text in between\n\
                @reminder: 2099-01-02 14:30 Second !0\n";

    let records = parse_reminders(text);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].title, "First");
    assert_eq!(records[0].date, date(2099, 1, 1));
    assert_eq!(records[1].title, "Second");
    assert_eq!(records[1].date, date(2099, 1, 2));
    assert_eq!(records[1].start_time, Some(time(14, 30)));
    assert_eq!(records[1].alert_minutes, 0);
    assert_eq!(records[1].alarm(), None);
}

#[test]
fn test_malformed_date_yields_nothing() {
    assert!(parse_reminders("@reminder: not-a-date Foo").is_empty());
    // Matches the shape but is not a real date
    assert!(parse_reminders("@reminder: 2099-13-45 Party").is_empty());
}

#[test]
fn test_impossible_time_is_skipped() {
    assert!(parse_reminders("@reminder: 2099-01-01 25:61 Party").is_empty());
}

#[test]
fn test_malformed_annotation_does_not_hide_others() {
    let text = "@reminder: not-a-date Foo\n@reminder: 2099-01-01 Bar\n";
    let records = parse_reminders(text);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "Bar");
}

#[test]
fn test_blank_title_is_skipped() {
    assert!(parse_reminders("@reminder: 2099-01-01 \n\n").is_empty());
}

#[test]
fn test_oversized_alert_is_skipped() {
    assert!(parse_reminders("@reminder: 2099-01-01 Meeting !99999999999").is_empty());
}

/// Only surrounding whitespace is trimmed
#[test]
fn test_title_trimming() {
    let records = parse_reminders("@reminder:   2099-01-01    Lunch with  Ann   ");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "Lunch with  Ann");
}

#[test]
fn test_marker_without_space() {
    let records = parse_reminders("@reminder:2099-01-01 NoSpace");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "NoSpace");
}

#[test]
fn test_title_keeps_quotes_and_symbols() {
    let records = parse_reminders(r#"@reminder: 2099-01-01 Call "Bob" & co."#);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, r#"Call "Bob" & co."#);
}

#[test]
fn test_delete_marker_positions() {
    // Directly after the title
    let records = parse_reminders("@reminder: 2099-01-01 Cleanup !delete");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "Cleanup");
    assert_eq!(records[0].alert_minutes, 30);
    assert!(records[0].should_delete);

    // Glued to the alert marker
    let records = parse_reminders("@reminder: 2099-01-01 Sync !5!delete");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].alert_minutes, 5);
    assert!(records[0].should_delete);
}

#[test]
fn test_text_without_annotations() {
    assert!(parse_reminders("").is_empty());
    assert!(parse_reminders("just a note\nreminder: 2099-01-01 not marked\n").is_empty());
}

use super::models::{ReminderRecord, DEFAULT_ALERT_MINUTES};
use chrono::{NaiveDate, NaiveTime};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use tracing::debug;

/// Token that opens an annotation
pub const MARKER: &str = "@reminder:";

/// Literal that flags an annotation as a delete request
pub const DELETE_MARKER: &str = "!delete";

lazy_static! {
    // marker, date, optional "HH:MM" with optional "-HH:MM", title up to the
    // first '!', optional "!N" alert, optional "!delete", then newline or end
    static ref ANNOTATION: Regex = Regex::new(&format!(
        r"{}\s*([0-9-]+)(?:\s+([0-9]{{2}}:[0-9]{{2}})(?:-([0-9]{{2}}:[0-9]{{2}}))?)?\s+([^!]+?)(?:\s+!([0-9]+))?\s*(?:{})?(?:\n|$)",
        regex::escape(MARKER),
        regex::escape(DELETE_MARKER),
    ))
    .expect("annotation pattern is valid");
}

/// Extract every reminder annotation from a document, in order of appearance.
///
/// Annotations that match the pattern but carry an impossible date or time,
/// an oversized alert, or a blank title are dropped without error.
pub fn parse_reminders(content: &str) -> Vec<ReminderRecord> {
    ANNOTATION
        .captures_iter(content)
        .filter_map(|caps| {
            let record = record_from_captures(&caps);
            if record.is_none() {
                debug!("Skipping malformed annotation: {:?}", &caps[0]);
            }
            record
        })
        .collect()
}

fn record_from_captures(caps: &Captures<'_>) -> Option<ReminderRecord> {
    let full_match = caps.get(0)?.as_str();

    let date = NaiveDate::parse_from_str(caps.get(1)?.as_str(), "%Y-%m-%d").ok()?;

    let start_time = match caps.get(2) {
        Some(m) => Some(parse_clock(m.as_str())?),
        None => None,
    };
    let end_time = match caps.get(3) {
        Some(m) => Some(parse_clock(m.as_str())?),
        None => None,
    };

    let title = caps.get(4)?.as_str().trim();
    if title.is_empty() {
        return None;
    }

    let alert_minutes = match caps.get(5) {
        Some(m) => m.as_str().parse::<u32>().ok()?,
        None => DEFAULT_ALERT_MINUTES,
    };

    Some(ReminderRecord {
        date,
        start_time,
        end_time,
        title: title.to_string(),
        alert_minutes,
        // Scan the whole span, not just the trailing slot
        should_delete: full_match.contains(DELETE_MARKER),
    })
}

/// Parse a strict `HH:MM` wall-clock time
fn parse_clock(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").ok()
}

use super::CalendarBackend;
use crate::error::{backend_error, SyncResult};
use crate::utils::text::applescript_string;
use async_trait::async_trait;
use chrono::{Datelike, NaiveDateTime, Timelike};
use tokio::process::Command;
use tracing::{debug, error};

/// Drives the macOS Calendar application through `osascript`
#[derive(Debug, Clone)]
pub struct AppleScriptBackend {
    program: String,
}

impl Default for AppleScriptBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl AppleScriptBackend {
    /// Create a backend that runs the system `osascript`
    pub fn new() -> Self {
        Self {
            program: "osascript".to_string(),
        }
    }

    /// Run a script and return its trimmed standard output
    async fn run_script(&self, script: &str) -> SyncResult<String> {
        debug!("Running AppleScript:\n{}", script);

        // Script goes in as a single argv entry, no shell quoting involved
        let output = Command::new(&self.program)
            .arg("-e")
            .arg(script)
            .output()
            .await
            .map_err(|e| backend_error(&format!("Failed to run {}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            error!("AppleScript failed ({}): {}", output.status, stderr);
            return Err(backend_error(&format!(
                "{} exited with {}: {}",
                self.program, output.status, stderr
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Statements assigning `dt` to the AppleScript variable `var`.
///
/// The day is reset to 1 first so that setting the month never overflows
/// into the following one (e.g. the 31st carried into a 30-day month).
fn date_statements(var: &str, dt: NaiveDateTime) -> String {
    format!(
        "set {var} to current date\n\
         set day of {var} to 1\n\
         set year of {var} to {year}\n\
         set month of {var} to {month}\n\
         set day of {var} to {day}\n\
         set time of {var} to {seconds}",
        var = var,
        year = dt.year(),
        month = dt.month(),
        day = dt.day(),
        seconds = dt.num_seconds_from_midnight(),
    )
}

/// Wrap statements so they run inside the named calendar
fn in_calendar(calendar: &str, body: &str) -> String {
    format!(
        "tell application \"Calendar\"\n\
         tell calendar {}\n\
         {}\n\
         end tell\n\
         end tell",
        applescript_string(calendar),
        body
    )
}

/// `every event whose ...` filter for the identifying triple
fn matching_events(summary: &str, start: NaiveDateTime, end: NaiveDateTime) -> String {
    format!(
        "{}\n{}\nset matchingEvents to (every event whose summary = {} and start date = startDate and end date = endDate)",
        date_statements("startDate", start),
        date_statements("endDate", end),
        applescript_string(summary)
    )
}

pub(crate) fn list_calendars_script() -> String {
    "tell application \"Calendar\"\n\
     set output to \"\"\n\
     repeat with c in calendars\n\
     set output to output & (name of c) & linefeed\n\
     end repeat\n\
     return output\n\
     end tell"
        .to_string()
}

pub(crate) fn find_event_script(
    calendar: &str,
    summary: &str,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> String {
    in_calendar(
        calendar,
        &format!(
            "{}\nreturn (count of matchingEvents) > 0",
            matching_events(summary, start, end)
        ),
    )
}

pub(crate) fn create_event_script(
    calendar: &str,
    summary: &str,
    start: NaiveDateTime,
    end: NaiveDateTime,
    alert_minutes: Option<u32>,
) -> String {
    let mut body = format!(
        "{}\n{}\nset newEvent to make new event at end of events with properties {{summary:{}, start date:startDate, end date:endDate}}",
        date_statements("startDate", start),
        date_statements("endDate", end),
        applescript_string(summary)
    );

    if let Some(minutes) = alert_minutes {
        body.push_str(&format!(
            "\ntell newEvent\n\
             make new sound alarm at end of sound alarms with properties {{trigger interval:-{}}}\n\
             end tell",
            minutes
        ));
    }

    in_calendar(calendar, &body)
}

pub(crate) fn delete_event_script(
    calendar: &str,
    summary: &str,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> String {
    in_calendar(
        calendar,
        &format!(
            "{}\nrepeat with evt in matchingEvents\ndelete evt\nend repeat",
            matching_events(summary, start, end)
        ),
    )
}

#[async_trait]
impl CalendarBackend for AppleScriptBackend {
    async fn list_calendar_names(&self) -> SyncResult<Vec<String>> {
        let output = self.run_script(&list_calendars_script()).await?;
        Ok(output
            .lines()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect())
    }

    async fn find_event(
        &self,
        calendar: &str,
        summary: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> SyncResult<bool> {
        let output = self
            .run_script(&find_event_script(calendar, summary, start, end))
            .await?;
        Ok(output == "true")
    }

    async fn create_event(
        &self,
        calendar: &str,
        summary: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
        alert_minutes: Option<u32>,
    ) -> SyncResult<()> {
        self.run_script(&create_event_script(calendar, summary, start, end, alert_minutes))
            .await?;
        Ok(())
    }

    async fn delete_event(
        &self,
        calendar: &str,
        summary: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> SyncResult<()> {
        self.run_script(&delete_event_script(calendar, summary, start, end))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2099, 1, 31)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_date_statements_reset_day_first() {
        let script = date_statements("startDate", at(14, 30));
        let lines: Vec<&str> = script.lines().map(str::trim).collect();
        assert_eq!(lines[1], "set day of startDate to 1");
        assert_eq!(lines[2], "set year of startDate to 2099");
        assert_eq!(lines[3], "set month of startDate to 1");
        assert_eq!(lines[4], "set day of startDate to 31");
        assert_eq!(lines[5], "set time of startDate to 52200");
    }

    #[test]
    fn test_scripts_escape_title_and_calendar() {
        let script = create_event_script(r#"Work "main""#, r#"Call "Bob""#, at(9, 0), at(10, 0), None);
        assert!(script.contains(r#"tell calendar "Work \"main\"""#));
        assert!(script.contains(r#"summary:"Call \"Bob\"""#));

        let script = find_event_script("Home", r#"a\b"#, at(9, 0), at(10, 0));
        assert!(script.contains(r#"summary = "a\\b""#));
    }

    #[test]
    fn test_create_script_alarm_is_optional() {
        let with_alarm = create_event_script("Home", "Dentist", at(9, 0), at(10, 0), Some(15));
        assert!(with_alarm.contains("trigger interval:-15"));

        let without_alarm = create_event_script("Home", "Dentist", at(9, 0), at(10, 0), None);
        assert!(!without_alarm.contains("sound alarm"));
    }

    #[test]
    fn test_delete_script_removes_every_match() {
        let script = delete_event_script("Home", "Dentist", at(9, 0), at(10, 0));
        assert!(script.contains("every event whose summary = \"Dentist\""));
        assert!(script.contains("repeat with evt in matchingEvents"));
    }
}

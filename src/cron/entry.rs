//! Cron entry model.

use chrono::{NaiveDateTime, NaiveTime, TimeDelta};

use crate::error::{CronsmithError, Result};

/// A single crontab entry: five time fields plus the command.
///
/// Time fields are kept as raw strings so entries the tool did not create
/// round-trip untouched. Entries constructed by [`CronEntry::daily`] use
/// zero-padded numbers, matching the `00 12 * * *` form of the classic
/// provisioning script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronEntry {
    pub minute: String,
    pub hour: String,
    pub day_of_month: String,
    pub month: String,
    pub day_of_week: String,
    pub command: String,
}

impl CronEntry {
    /// Create an entry that runs every day at the given time.
    pub fn daily(hour: u8, minute: u8, command: &str) -> Self {
        Self {
            minute: format!("{:02}", minute),
            hour: format!("{:02}", hour),
            day_of_month: "*".to_string(),
            month: "*".to_string(),
            day_of_week: "*".to_string(),
            command: command.to_string(),
        }
    }

    /// Parse a crontab line.
    ///
    /// Comments and empty lines are not entries; callers filter those out.
    pub fn parse(line: &str) -> Result<Self> {
        let mut fields = line.split_whitespace();
        let invalid = || CronsmithError::InvalidCronEntry {
            line: line.to_string(),
        };

        let minute = fields.next().ok_or_else(invalid)?.to_string();
        let hour = fields.next().ok_or_else(invalid)?.to_string();
        let day_of_month = fields.next().ok_or_else(invalid)?.to_string();
        let month = fields.next().ok_or_else(invalid)?.to_string();
        let day_of_week = fields.next().ok_or_else(invalid)?.to_string();

        let command = fields.collect::<Vec<_>>().join(" ");
        if command.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            minute,
            hour,
            day_of_month,
            month,
            day_of_week,
            command,
        })
    }

    /// Render in crontab syntax.
    pub fn to_line(&self) -> String {
        format!(
            "{} {} {} {} {} {}",
            self.minute, self.hour, self.day_of_month, self.month, self.day_of_week, self.command
        )
    }

    /// Whether two entries mean the same thing.
    ///
    /// Numeric fields compare by value (`0` equals `00`), so a hand-edited
    /// entry still counts as present.
    pub fn same_as(&self, other: &Self) -> bool {
        field_eq(&self.minute, &other.minute)
            && field_eq(&self.hour, &other.hour)
            && self.day_of_month == other.day_of_month
            && self.month == other.month
            && self.day_of_week == other.day_of_week
            && self.command == other.command
    }

    /// Next time this entry fires after `now`.
    ///
    /// Only defined for daily entries with numeric minute/hour; anything
    /// with restricted day fields returns `None`.
    pub fn next_run_after(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        if self.day_of_month != "*" || self.month != "*" || self.day_of_week != "*" {
            return None;
        }
        let minute: u32 = self.minute.parse().ok()?;
        let hour: u32 = self.hour.parse().ok()?;
        let time = NaiveTime::from_hms_opt(hour, minute, 0)?;

        let today = now.date().and_time(time);
        if today > now {
            Some(today)
        } else {
            Some(today + TimeDelta::days(1))
        }
    }
}

/// Compare two cron time fields, numerically when both are numbers.
fn field_eq(a: &str, b: &str) -> bool {
    match (a.parse::<u32>(), b.parse::<u32>()) {
        (Ok(x), Ok(y)) => x == y,
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn noon_entry() -> CronEntry {
        CronEntry::daily(12, 0, "cd /srv/backup; python3 main.py")
    }

    #[test]
    fn daily_renders_padded_schedule() {
        assert_eq!(
            noon_entry().to_line(),
            "00 12 * * * cd /srv/backup; python3 main.py"
        );
    }

    #[test]
    fn parse_round_trips() {
        let line = "00 12 * * * cd /srv/backup; python3 main.py";
        let entry = CronEntry::parse(line).unwrap();
        assert_eq!(entry, noon_entry());
        assert_eq!(entry.to_line(), line);
    }

    #[test]
    fn parse_preserves_command_spacing_fields() {
        let entry = CronEntry::parse("*/5 2 1 jan mon echo hi there").unwrap();
        assert_eq!(entry.minute, "*/5");
        assert_eq!(entry.day_of_week, "mon");
        assert_eq!(entry.command, "echo hi there");
    }

    #[test]
    fn parse_rejects_short_lines() {
        assert!(CronEntry::parse("").is_err());
        assert!(CronEntry::parse("0 12 * *").is_err());
        assert!(CronEntry::parse("0 12 * * *").is_err());
    }

    #[test]
    fn same_as_ignores_zero_padding() {
        let a = CronEntry::daily(12, 0, "python3 main.py");
        let b = CronEntry::parse("0 12 * * * python3 main.py").unwrap();
        assert!(a.same_as(&b));
    }

    #[test]
    fn same_as_distinguishes_commands() {
        let a = CronEntry::daily(12, 0, "python3 main.py");
        let b = CronEntry::daily(12, 0, "python3 other.py");
        assert!(!a.same_as(&b));
    }

    #[test]
    fn next_run_later_today() {
        let now = NaiveDate::from_ymd_opt(2024, 5, 10)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let next = noon_entry().next_run_after(now).unwrap();
        assert_eq!(next.date(), now.date());
        assert_eq!(next.time(), NaiveTime::from_hms_opt(12, 0, 0).unwrap());
    }

    #[test]
    fn next_run_rolls_to_tomorrow() {
        let now = NaiveDate::from_ymd_opt(2024, 5, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let next = noon_entry().next_run_after(now).unwrap();
        assert_eq!(next.date(), NaiveDate::from_ymd_opt(2024, 5, 11).unwrap());
    }

    #[test]
    fn next_run_undefined_for_restricted_days() {
        let entry = CronEntry::parse("0 12 * * mon python3 main.py").unwrap();
        let now = NaiveDate::from_ymd_opt(2024, 5, 10)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        assert!(entry.next_run_after(now).is_none());
    }
}

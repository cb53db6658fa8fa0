use anyhow::{anyhow, Result};
use sched_core::date::CalendarDate;
use sched_core::recurrence;

use crate::cli::NextDateCommand;

pub fn next_date(command: &NextDateCommand) -> Result<CalendarDate> {
    let now = match command.now.as_deref().map(str::trim) {
        Some(now) if !now.is_empty() => now
            .parse::<CalendarDate>()
            .map_err(|_| anyhow!("invalid now date: '{}'", now))?,
        _ => CalendarDate::today(),
    };

    Ok(recurrence::next_date(now, &command.date, &command.repeat)?)
}

/// Body printed on failure when `--json` is given.
pub fn error_json(err: &anyhow::Error) -> serde_json::Value {
    serde_json::json!({ "error": err.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sched_core::error::RuleError;

    fn command(now: Option<&str>, date: &str, repeat: &str) -> NextDateCommand {
        NextDateCommand {
            date: date.to_string(),
            repeat: repeat.to_string(),
            now: now.map(str::to_string),
            json: false,
        }
    }

    #[test]
    fn test_uses_given_now() {
        let next = next_date(&command(Some("20240115"), "20240101", "d 7")).unwrap();
        assert_eq!(next.to_string(), "20240122");
    }

    #[test]
    fn test_rule_error_is_kept() {
        let err = next_date(&command(Some("20240115"), "20240101", "d 0")).unwrap_err();
        assert!(matches!(err.downcast_ref::<RuleError>(), Some(RuleError::InvalidInterval(_))));
        assert_eq!(error_json(&err)["error"], "invalid day interval: 0");
    }

    #[test]
    fn test_bad_now_is_rejected() {
        assert!(next_date(&command(Some("15.01.2024"), "20240101", "y")).is_err());
    }
}

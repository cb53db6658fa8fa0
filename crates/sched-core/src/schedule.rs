//! Date policy applied when a task is created or edited.

use crate::date::CalendarDate;
use crate::error::RuleError;
use crate::recurrence::next_date;

/// Decides the date a task is stored with.
///
/// # Behavior
/// - Missing or empty `date` means `today`
/// - A recurring task always has its rule validated; if its date is already
///   in the past it moves to the next occurrence after `today`
/// - A one-off task dated in the past is moved to `today`
/// - Any date that is today or later is kept as given
pub fn resolve_task_date(
    today: CalendarDate,
    date: Option<&str>,
    repeat: &str,
) -> Result<CalendarDate, RuleError> {
    let raw = match date.map(str::trim) {
        Some(d) if !d.is_empty() => d.to_string(),
        _ => today.to_string(),
    };
    let date: CalendarDate = raw
        .parse()
        .map_err(|_| RuleError::InvalidStartDate(raw.clone()))?;

    if repeat.trim().is_empty() {
        return Ok(if today.is_after(date) { today } else { date });
    }

    let next = next_date(today, &raw, repeat)?;
    Ok(if today.is_after(date) { next } else { date })
}

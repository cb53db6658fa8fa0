use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::date::CalendarDate;
use crate::error::RuleError;

/// Upper bound on the number of days examined for a weekly rule.
pub const WEEKLY_SEARCH_LIMIT: usize = 1000;
/// Upper bound on the number of days examined for a monthly rule (~5.5 years).
pub const MONTHLY_SEARCH_LIMIT: usize = 2000;

const MAX_DAY_INTERVAL: i32 = 400;

/// Set of ISO weekdays (Monday = 1 .. Sunday = 7), stored as a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub(crate) fn insert(&mut self, weekday: u8) {
        debug_assert!((1..=7).contains(&weekday));
        self.0 |= 1 << weekday;
    }

    pub fn contains(&self, weekday: u8) -> bool {
        weekday <= 7 && self.0 & (1 << weekday) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (1..=7).filter(move |d| self.contains(*d))
    }
}

/// Days of the month a monthly rule fires on.
///
/// Positive days (1..=31) are matched literally. `-1` and `-2` are resolved
/// against the length of each candidate month: last and second-to-last day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonthDaySet {
    days: u32,
    from_end: u8,
}

impl MonthDaySet {
    pub(crate) fn insert(&mut self, day: i32) {
        debug_assert!((-2..=31).contains(&day) && day != 0);
        if day > 0 {
            self.days |= 1 << day;
        } else {
            self.from_end |= 1 << -day;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.days == 0 && self.from_end == 0
    }

    /// Whether `date` falls on one of the configured days.
    pub fn matches(&self, date: &CalendarDate) -> bool {
        let day = date.day();
        if self.days & (1 << day) != 0 {
            return true;
        }
        let last = date.last_day_of_month();
        self.iter_from_end().any(|offset| last + 1 - offset == day)
    }

    fn iter_from_end(&self) -> impl Iterator<Item = u32> + '_ {
        (1..=2).filter(move |k| self.from_end & (1 << k) != 0)
    }

    /// Configured days as signed values, positive days first.
    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        (1..=31)
            .filter(move |d| self.days & (1 << d) != 0)
            .chain(self.iter_from_end().map(|k| -(k as i32)))
    }
}

/// Set of months (January = 1 .. December = 12), stored as a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonthSet(u16);

impl MonthSet {
    const ALL: u16 = 0b1_1111_1111_1110;

    pub fn all() -> Self {
        Self(Self::ALL)
    }

    pub(crate) fn insert(&mut self, month: u32) {
        debug_assert!((1..=12).contains(&month));
        self.0 |= 1 << month;
    }

    pub fn contains(&self, month: u32) -> bool {
        month <= 12 && self.0 & (1 << month) != 0
    }

    pub fn is_all(&self) -> bool {
        self.0 == Self::ALL
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        (1..=12).filter(move |m| self.contains(*m))
    }
}

/// A parsed repeat rule.
///
/// Grammar (tokens separated by whitespace, lists by commas):
///
/// - `d <interval>`: every `interval` days, 1..=400
/// - `y`: every year on the same month and day
/// - `w <weekdays>`: on the listed ISO weekdays
/// - `m <days> [<months>]`: on the listed days of the listed months
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecurrenceRule {
    Daily { interval: u16 },
    Yearly,
    Weekly(WeekdaySet),
    Monthly { days: MonthDaySet, months: MonthSet },
}

impl FromStr for RecurrenceRule {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        let (kind, params) = tokens.split_first().ok_or(RuleError::EmptyRule)?;

        match *kind {
            "d" => parse_daily(params, s),
            "y" if params.is_empty() => Ok(RecurrenceRule::Yearly),
            "y" => Err(RuleError::InvalidYearlyRule(s.trim().to_string())),
            "w" => parse_weekly(params, s),
            "m" => parse_monthly(params, s),
            other => Err(RuleError::UnsupportedRuleKind(other.to_string())),
        }
    }
}

fn parse_daily(params: &[&str], rule: &str) -> Result<RecurrenceRule, RuleError> {
    let [interval] = params else {
        return Err(RuleError::InvalidInterval(rule.trim().to_string()));
    };
    let value: i32 = interval
        .parse()
        .map_err(|_| RuleError::InvalidInterval(interval.to_string()))?;
    if !(1..=MAX_DAY_INTERVAL).contains(&value) {
        return Err(RuleError::InvalidInterval(interval.to_string()));
    }
    // 1..=400 always fits
    Ok(RecurrenceRule::Daily { interval: value as u16 })
}

fn parse_weekly(params: &[&str], rule: &str) -> Result<RecurrenceRule, RuleError> {
    let list = match params {
        [] => return Err(RuleError::MissingWeekdays),
        [list] => *list,
        _ => return Err(RuleError::InvalidWeekday(rule.trim().to_string())),
    };

    let mut weekdays = WeekdaySet::default();
    for value in parse_list(list, |d| (1..=7).contains(&d), RuleError::InvalidWeekday)? {
        weekdays.insert(value as u8);
    }
    if weekdays.is_empty() {
        return Err(RuleError::MissingWeekdays);
    }
    Ok(RecurrenceRule::Weekly(weekdays))
}

fn parse_monthly(params: &[&str], rule: &str) -> Result<RecurrenceRule, RuleError> {
    let (day_list, month_list) = match params {
        [] => return Err(RuleError::InvalidMonthDay(rule.trim().to_string())),
        [days] => (*days, None),
        [days, months] => (*days, Some(*months)),
        _ => return Err(RuleError::InvalidMonth(rule.trim().to_string())),
    };

    let mut days = MonthDaySet::default();
    let valid_day = |d: i32| (-2..=31).contains(&d) && d != 0;
    for value in parse_list(day_list, valid_day, RuleError::InvalidMonthDay)? {
        days.insert(value);
    }

    let months = match month_list {
        Some(list) => {
            let mut months = MonthSet::default();
            for value in parse_list(list, |m| (1..=12).contains(&m), RuleError::InvalidMonth)? {
                months.insert(value as u32);
            }
            months
        }
        None => MonthSet::all(),
    };

    Ok(RecurrenceRule::Monthly { days, months })
}

/// Parses a comma separated list of integers, rejecting the first item that
/// is not a number or falls outside `valid`.
fn parse_list(
    list: &str,
    valid: impl Fn(i32) -> bool,
    error: impl Fn(String) -> RuleError,
) -> Result<Vec<i32>, RuleError> {
    list.split(',')
        .map(|item| match item.parse::<i32>() {
            Ok(value) if valid(value) => Ok(value),
            _ => Err(error(item.to_string())),
        })
        .collect()
}

impl RecurrenceRule {
    /// Finds the first date produced by this rule that falls strictly after
    /// `now`, progressing only forward from `start`.
    ///
    /// # Arguments
    /// * `now` - Reference date; the result is always after it
    /// * `start` - The task's current date, where the search begins
    ///
    /// # Returns
    /// * `Result<CalendarDate, RuleError>` - The next date, or `NoMatchFound`
    ///
    /// # Behavior
    /// - Daily and yearly rules step from `start` by whole intervals; the result
    ///   is always at least one interval past `start`
    /// - Weekly and monthly rules examine single days beginning at `start`
    ///   (inclusive), skipping days that are not after `now`, and give up after
    ///   [`WEEKLY_SEARCH_LIMIT`] / [`MONTHLY_SEARCH_LIMIT`] examined days
    pub fn next_after(&self, now: CalendarDate, start: CalendarDate) -> Result<CalendarDate, RuleError> {
        match self {
            RecurrenceRule::Daily { interval } => {
                let interval = u64::from(*interval);
                self.step_until_after(now, start, |date| date.add_days(interval))
            }
            RecurrenceRule::Yearly => self.step_until_after(now, start, CalendarDate::add_year),
            RecurrenceRule::Weekly(weekdays) => {
                self.scan_days(now, start, WEEKLY_SEARCH_LIMIT, |date| {
                    weekdays.contains(date.iso_weekday())
                })
            }
            RecurrenceRule::Monthly { days, months } => {
                self.scan_days(now, start, MONTHLY_SEARCH_LIMIT, |date| {
                    months.contains(date.month()) && days.matches(date)
                })
            }
        }
    }

    fn step_until_after(
        &self,
        now: CalendarDate,
        start: CalendarDate,
        step: impl Fn(&CalendarDate) -> Option<CalendarDate>,
    ) -> Result<CalendarDate, RuleError> {
        let mut candidate = start;
        loop {
            candidate = step(&candidate).ok_or_else(|| self.no_match())?;
            if candidate.is_after(now) {
                return Ok(candidate);
            }
        }
    }

    fn scan_days(
        &self,
        now: CalendarDate,
        start: CalendarDate,
        limit: usize,
        matches: impl Fn(&CalendarDate) -> bool,
    ) -> Result<CalendarDate, RuleError> {
        // Days up to and including `now` can never be accepted, so the budget
        // is only spent on days after it.
        let mut candidate = if now.is_after(start) {
            now.succ().ok_or_else(|| self.no_match())?
        } else {
            start
        };

        for _ in 0..limit {
            if candidate.is_after(now) && matches(&candidate) {
                return Ok(candidate);
            }
            candidate = candidate.succ().ok_or_else(|| self.no_match())?;
        }
        Err(self.no_match())
    }

    fn no_match(&self) -> RuleError {
        RuleError::NoMatchFound(self.to_string())
    }
}

impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecurrenceRule::Daily { interval } => write!(f, "d {interval}"),
            RecurrenceRule::Yearly => write!(f, "y"),
            RecurrenceRule::Weekly(weekdays) => write!(f, "w {}", join(weekdays.iter())),
            RecurrenceRule::Monthly { days, months } => {
                write!(f, "m {}", join(days.iter()))?;
                if !months.is_all() {
                    write!(f, " {}", join(months.iter()))?;
                }
                Ok(())
            }
        }
    }
}

fn join<T: ToString>(values: impl Iterator<Item = T>) -> String {
    values.map(|v| v.to_string()).collect::<Vec<_>>().join(",")
}

/// Computes the next date for a task stored with `date` and `repeat`.
///
/// The start date is validated before the rule, so a task with both a broken
/// date and a broken rule reports `InvalidStartDate`. The rule is parsed fresh
/// on every call.
pub fn next_date(now: CalendarDate, date: &str, repeat: &str) -> Result<CalendarDate, RuleError> {
    let start: CalendarDate = date
        .parse()
        .map_err(|_| RuleError::InvalidStartDate(date.to_string()))?;
    let rule: RecurrenceRule = repeat.parse()?;
    let next = rule.next_after(now, start)?;

    debug!(%now, %start, %rule, %next, "resolved next date");
    Ok(next)
}

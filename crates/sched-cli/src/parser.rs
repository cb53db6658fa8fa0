use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate, TimeZone};
use chrono_english::{parse_date_string, Dialect};

/// Turns a user supplied date into the `YYYYMMDD` form stored by the core.
///
/// Eight digits are passed through untouched so the core reports malformed
/// dates itself. `DD.MM.YYYY` and phrases like "tomorrow" or "next friday"
/// are converted.
pub fn parse_task_date<Tz: TimeZone>(input: &str, now: DateTime<Tz>) -> Result<String>
where
    Tz::Offset: Copy + std::fmt::Display,
{
    let input = input.trim();
    if input.len() == 8 && input.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(input.to_string());
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%d.%m.%Y") {
        return Ok(date.format("%Y%m%d").to_string());
    }
    parse_date_string(input, now, Dialect::Uk)
        .map(|date| date.format("%Y%m%d").to_string())
        .map_err(|e| anyhow::anyhow!("Failed to parse date '{}': {}", input, e))
}

pub fn parse_local_date(input: &str) -> Result<String> {
    parse_task_date(input, Local::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    fn noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[rstest]
    #[case("20240301", "20240301")]
    #[case("20241301", "20241301")]
    #[case("01.03.2024", "20240301")]
    #[case(" 29.02.2024 ", "20240229")]
    #[case("tomorrow", "20240116")]
    fn test_parse_task_date(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(parse_task_date(input, noon(2024, 1, 15)).unwrap(), expected);
    }

    #[test]
    fn test_unparseable_date() {
        assert!(parse_task_date("whenever", noon(2024, 1, 15)).is_err());
    }
}

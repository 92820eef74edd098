use crate::error::{Result, TaskError};
use chrono::{DateTime, Datelike, Duration, Local, Months, NaiveDate, NaiveDateTime, TimeZone};

/// Used both for display and as the first accepted deadline format.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";
const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn format_timestamp(time: &DateTime<Local>) -> String {
    time.format(DATE_TIME_FORMAT).to_string()
}

/// Human-readable duration. Negative durations render as their absolute value.
pub fn format_duration(d: Duration) -> String {
    let d = d.abs();
    let hours = d.num_hours();
    let minutes = d.num_minutes() % 60;

    if hours >= 48 {
        let days = hours / 24;
        let remaining_hours = hours % 24;
        if remaining_hours == 0 && minutes == 0 {
            format!("{days} days")
        } else {
            format!("{days} days {remaining_hours} hours")
        }
    } else if hours > 0 {
        if minutes == 0 {
            format!("{hours} hours")
        } else {
            format!("{hours} hours {minutes} minutes")
        }
    } else {
        format!("{minutes} minutes")
    }
}

pub fn parse_id(input: &str) -> Result<u32> {
    input
        .trim()
        .parse()
        .map_err(|_| TaskError::InvalidId(input.trim().to_string()))
}

pub fn parse_deadline(input: &str) -> Result<DateTime<Local>> {
    parse_deadline_at(input, Local::now())
}

/// Parses a deadline relative to `now`.
///
/// Empty input means one year from `now`. Otherwise the formats
/// `YYYY-MM-DD HH:MM`, `YYYY-MM-DD`, `MM-DD HH:MM` and `MM-DD` are tried in
/// that order; the month-day forms take the year of `now` and date-only forms
/// land on 23:59 of that day.
pub fn parse_deadline_at(input: &str, now: DateTime<Local>) -> Result<DateTime<Local>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(now
            .checked_add_months(Months::new(12))
            .unwrap_or_else(|| now + Duration::days(365)));
    }

    let with_year = format!("{}-{input}", now.year());
    let naive = parse_naive(input).or_else(|| parse_naive(&with_year));

    naive
        .and_then(|n| Local.from_local_datetime(&n).earliest())
        .ok_or_else(|| TaskError::InvalidDateFormat(input.to_string()))
}

fn parse_naive(input: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(input, DATE_TIME_FORMAT)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(input, DATE_FORMAT)
                .ok()
                .and_then(|d| d.and_hms_opt(23, 59, 0))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert_eq!(parse_id(" 7 \n").unwrap(), 7);
        for input in ["abc", "-7", "", "1.5"] {
            assert!(matches!(parse_id(input), Err(TaskError::InvalidId(_))));
        }
    }

    #[test]
    fn test_format_duration() {
        let cases = [
            (Duration::minutes(5), "5 minutes"),
            (Duration::hours(2), "2 hours"),
            (Duration::hours(2) + Duration::minutes(30), "2 hours 30 minutes"),
            (Duration::hours(48), "2 days"),
            (Duration::hours(49) + Duration::minutes(10), "2 days 1 hours"),
            (Duration::hours(24), "24 hours"),
            (-Duration::hours(2), "2 hours"),
        ];
        for (d, expected) in cases {
            assert_eq!(format_duration(d), expected, "duration {d:?}");
        }
    }

    #[test]
    fn test_format_duration_edge_cases() {
        let cases = [
            (Duration::zero(), "0 minutes"),
            (-Duration::minutes(5), "5 minutes"),
            (-(Duration::hours(2) + Duration::minutes(30)), "2 hours 30 minutes"),
            (Duration::days(3) + Duration::hours(5), "3 days 5 hours"),
            (Duration::days(2) + Duration::minutes(59), "2 days 0 hours"),
            (Duration::seconds(59), "0 minutes"),
        ];
        for (d, expected) in cases {
            assert_eq!(format_duration(d), expected, "duration {d:?}");
        }
    }

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_parse_full_date_time() {
        let got = parse_deadline("2024-12-31 23:59").unwrap();
        assert_eq!(got, local(2024, 12, 31, 23, 59));
    }

    #[test]
    fn test_parse_date_only_defaults_to_end_of_day() {
        let got = parse_deadline("2024-12-31").unwrap();
        assert_eq!(got, local(2024, 12, 31, 23, 59));
    }

    #[test]
    fn test_parse_month_day_uses_current_year() {
        let now = local(2025, 3, 10, 9, 0);
        assert_eq!(
            parse_deadline_at("12-31 08:15", now).unwrap(),
            local(2025, 12, 31, 8, 15)
        );
        assert_eq!(
            parse_deadline_at("04-01", now).unwrap(),
            local(2025, 4, 1, 23, 59)
        );
    }

    #[test]
    fn test_parse_empty_is_one_year_ahead() {
        let now = local(2025, 3, 10, 9, 0);
        assert_eq!(parse_deadline_at("", now).unwrap(), local(2026, 3, 10, 9, 0));

        let got = parse_deadline("").unwrap();
        let ahead = got - Local::now();
        assert!(ahead > Duration::days(364) && ahead <= Duration::days(366));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let got = parse_deadline("  2024-06-01 12:00 \n").unwrap();
        assert_eq!(got.hour(), 12);
    }

    #[test]
    fn test_parse_invalid_formats() {
        for input in [
            "invalid",
            "2024/12/31",
            "31-12-2024",
            "2024-13-01",
            "2024-12-32",
            "2024-02-30",
            "notadate",
        ] {
            assert!(
                matches!(parse_deadline(input), Err(TaskError::InvalidDateFormat(_))),
                "{input} should not parse"
            );
        }
        assert_eq!(
            parse_deadline(" someday ").unwrap_err().to_string(),
            "invalid date format: someday"
        );
    }
}

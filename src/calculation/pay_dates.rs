//! Pay-period and pay-date resolution.
//!
//! Work is performed over a full calendar month and paid in the following
//! month, on a day selected by a configurable pay-day code. An unresolvable
//! code falls back to the documented default day and logs; it never aborts
//! a run.

use chrono::{Days, NaiveDate};
use tracing::warn;

use crate::codes::{CodeLookup, PAY_DAY_GROUP};
use crate::error::{PayrollError, PayrollResult};
use crate::models::PayPeriod;

/// The default pay day of month used when a pay-day code cannot be resolved.
pub const DEFAULT_PAY_DAY: u32 = 10;

/// Resolves a "YYYY-MM" period token and a pay-day code into a [`PayPeriod`].
///
/// The work range is always the full month of the token. The pay date is in
/// the *following* month: the pay-day code resolves to a day-of-month through
/// the code lookup (group `SALARY_PAY_DAY`, extra key `dayOfMonth`), where 0
/// means the last day of that month. A missing code, missing day value, or a
/// day that does not exist in the target month falls back to day 10 with a
/// logged warning.
///
/// # Errors
///
/// Returns [`PayrollError::InvalidPeriod`] for tokens that are not strictly
/// "YYYY-MM" with a month in 1..=12.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::resolve_pay_period;
/// use payroll_engine::codes::CodeTable;
/// use chrono::NaiveDate;
///
/// let codes = CodeTable::new();
/// let period = resolve_pay_period("2025-01", "TENTH", &codes).unwrap();
///
/// assert_eq!(period.work_start, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
/// assert_eq!(period.work_end, NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
/// // Empty table: the default day 10 applies.
/// assert_eq!(period.pay_date, NaiveDate::from_ymd_opt(2025, 2, 10).unwrap());
/// ```
pub fn resolve_pay_period(
    period: &str,
    pay_day_code: &str,
    codes: &dyn CodeLookup,
) -> PayrollResult<PayPeriod> {
    let (year, month) = parse_period_token(period)?;

    let work_start = first_of_month(year, month).ok_or_else(|| PayrollError::InvalidPeriod {
        token: period.to_string(),
    })?;
    let work_end = last_of_month(year, month).ok_or_else(|| PayrollError::InvalidPeriod {
        token: period.to_string(),
    })?;

    let (pay_year, pay_month) = next_month(year, month);
    let pay_month_last = last_of_month(pay_year, pay_month).ok_or_else(|| {
        PayrollError::InvalidPeriod {
            token: period.to_string(),
        }
    })?;

    let day = resolve_pay_day(pay_day_code, codes);
    let pay_date = if day == 0 {
        pay_month_last
    } else {
        match NaiveDate::from_ymd_opt(pay_year, pay_month, day) {
            Some(date) => date,
            None => {
                warn!(
                    pay_day_code,
                    day, pay_year, pay_month, "pay day does not exist in pay month, using default"
                );
                // Day 10 exists in every month.
                work_end + Days::new(u64::from(DEFAULT_PAY_DAY))
            }
        }
    };

    Ok(PayPeriod {
        period: period.to_string(),
        work_start,
        work_end,
        pay_date,
    })
}

/// Parses a strict "YYYY-MM" token.
fn parse_period_token(token: &str) -> PayrollResult<(i32, u32)> {
    let invalid = || PayrollError::InvalidPeriod {
        token: token.to_string(),
    };

    let (year_part, month_part) = token.split_once('-').ok_or_else(invalid)?;
    if year_part.len() != 4
        || month_part.len() != 2
        || !year_part.bytes().all(|b| b.is_ascii_digit())
        || !month_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }

    let year: i32 = year_part.parse().map_err(|_| invalid())?;
    let month: u32 = month_part.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }

    Ok((year, month))
}

fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 { (year + 1, 1) } else { (year, month + 1) }
}

fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

fn last_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = next_month(year, month);
    first_of_month(next_year, next_month)?.pred_opt()
}

/// Resolves a pay-day code to a day-of-month, falling back to the default.
fn resolve_pay_day(pay_day_code: &str, codes: &dyn CodeLookup) -> u32 {
    let Some(entry) = codes.get_code(PAY_DAY_GROUP, pay_day_code) else {
        warn!(pay_day_code, "pay-day code not found, using default day");
        return DEFAULT_PAY_DAY;
    };

    match entry.day_of_month() {
        Some(day) if day <= 31 => day,
        Some(day) => {
            warn!(pay_day_code, day, "pay-day value out of range, using default day");
            DEFAULT_PAY_DAY
        }
        None => {
            warn!(pay_day_code, "pay-day code has no dayOfMonth, using default day");
            DEFAULT_PAY_DAY
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::{CodeEntry, CodeTable};
    use serde_json::json;

    fn table_with_day(code: &str, day: serde_json::Value) -> CodeTable {
        let mut table = CodeTable::new();
        table.insert(
            CodeEntry::new(PAY_DAY_GROUP, code, "test code")
                .with_extra(json!({ "dayOfMonth": day })),
        );
        table
    }

    #[test]
    fn test_work_range_spans_full_month() {
        let codes = CodeTable::new();
        let period = resolve_pay_period("2025-01", "TENTH", &codes).unwrap();

        assert_eq!(period.period, "2025-01");
        assert_eq!(period.work_start, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(period.work_end, NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
    }

    #[test]
    fn test_pay_day_ten_falls_in_following_month() {
        let codes = table_with_day("TENTH", json!(10));
        let period = resolve_pay_period("2025-01", "TENTH", &codes).unwrap();

        assert_eq!(period.pay_date, NaiveDate::from_ymd_opt(2025, 2, 10).unwrap());
    }

    #[test]
    fn test_pay_day_zero_is_last_day_of_following_month() {
        let codes = table_with_day("END_OF_MONTH", json!(0));
        let period = resolve_pay_period("2025-01", "END_OF_MONTH", &codes).unwrap();

        // February 2025 is not a leap month.
        assert_eq!(period.pay_date, NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
    }

    #[test]
    fn test_pay_day_zero_in_leap_year() {
        let codes = table_with_day("END_OF_MONTH", json!(0));
        let period = resolve_pay_period("2024-01", "END_OF_MONTH", &codes).unwrap();

        assert_eq!(period.pay_date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_december_rolls_into_next_year() {
        let codes = table_with_day("FIFTEENTH", json!(15));
        let period = resolve_pay_period("2025-12", "FIFTEENTH", &codes).unwrap();

        assert_eq!(period.work_end, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
        assert_eq!(period.pay_date, NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
    }

    #[test]
    fn test_missing_code_falls_back_to_default_day() {
        let codes = CodeTable::new();
        let period = resolve_pay_period("2025-03", "UNKNOWN_CODE", &codes).unwrap();

        assert_eq!(period.pay_date, NaiveDate::from_ymd_opt(2025, 4, 10).unwrap());
    }

    #[test]
    fn test_code_without_day_falls_back_to_default_day() {
        let mut table = CodeTable::new();
        table.insert(CodeEntry::new(PAY_DAY_GROUP, "NO_DAY", "no day configured"));
        let period = resolve_pay_period("2025-03", "NO_DAY", &table).unwrap();

        assert_eq!(period.pay_date, NaiveDate::from_ymd_opt(2025, 4, 10).unwrap());
    }

    #[test]
    fn test_day_out_of_range_falls_back_to_default_day() {
        let codes = table_with_day("HUGE", json!(42));
        let period = resolve_pay_period("2025-03", "HUGE", &codes).unwrap();

        assert_eq!(period.pay_date, NaiveDate::from_ymd_opt(2025, 4, 10).unwrap());
    }

    #[test]
    fn test_day_not_in_pay_month_falls_back_to_default_day() {
        // January work pays in February, which has no 31st.
        let codes = table_with_day("THIRTY_FIRST", json!(31));
        let period = resolve_pay_period("2025-01", "THIRTY_FIRST", &codes).unwrap();

        assert_eq!(period.pay_date, NaiveDate::from_ymd_opt(2025, 2, 10).unwrap());
    }

    #[test]
    fn test_day_of_month_as_string_is_accepted() {
        let codes = table_with_day("TENTH", json!("10"));
        let period = resolve_pay_period("2025-01", "TENTH", &codes).unwrap();

        assert_eq!(period.pay_date, NaiveDate::from_ymd_opt(2025, 2, 10).unwrap());
    }

    #[test]
    fn test_malformed_tokens_are_rejected() {
        let codes = CodeTable::new();
        for token in ["2025/01", "2025-13", "2025-00", "garbage", "25-01", "2025-1", ""] {
            let result = resolve_pay_period(token, "TENTH", &codes);
            match result {
                Err(PayrollError::InvalidPeriod { token: t }) => assert_eq!(t, token),
                other => panic!("Expected InvalidPeriod for {:?}, got {:?}", token, other),
            }
        }
    }
}

//! Pay period model.
//!
//! This module contains the [`PayPeriod`] type produced by the pay-period
//! resolver: the work date range for a "YYYY-MM" token plus the statutory
//! pay date in the following month.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A resolved pay period: the work range of one calendar month and the
/// statutory pay date in the following month.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod {
///     period: "2025-01".to_string(),
///     work_start: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     work_end: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
///     pay_date: NaiveDate::from_ymd_opt(2025, 2, 10).unwrap(),
/// };
///
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()));
/// assert!(!period.contains_date(period.pay_date));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The "YYYY-MM" token this period was resolved from.
    pub period: String,
    /// First day of the work month (inclusive).
    pub work_start: NaiveDate,
    /// Last day of the work month (inclusive).
    pub work_end: NaiveDate,
    /// The statutory pay date, always in the month after `work_end`.
    pub pay_date: NaiveDate,
}

impl PayPeriod {
    /// Checks if a given date falls within the work range.
    ///
    /// The check is inclusive of both `work_start` and `work_end`.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.work_start && date <= self.work_end
    }
}

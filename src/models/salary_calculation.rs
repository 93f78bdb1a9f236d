//! Salary calculation record and lifecycle status.
//!
//! A [`SalaryCalculation`] is the unit the engine produces: one record per
//! (consultant, period) pair, replaced wholesale on recalculation.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PayPeriod;

/// The lifecycle status of a salary calculation.
///
/// Records progress strictly forward: `Pending → Calculated → Approved → Paid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CalculationStatus {
    /// Created but amounts not yet finalized.
    Pending,
    /// Amounts and tax computed.
    Calculated,
    /// Approved for payment by an administrator.
    Approved,
    /// Payment recorded.
    Paid,
}

/// One salary calculation for a (consultant, period) pair.
///
/// Created together with its tax line items as a unit; recomputing a period
/// deletes the prior record before inserting the new one, so at most one
/// record exists per pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryCalculation {
    /// Surrogate identifier for this calculation.
    pub id: Uuid,
    /// The consultant this calculation is for.
    pub consultant_id: i64,
    /// The compensation profile the calculation was based on.
    pub profile_id: Uuid,
    /// The "YYYY-MM" period token.
    pub period: String,
    /// First day of the work month.
    pub work_start: NaiveDate,
    /// Last day of the work month.
    pub work_end: NaiveDate,
    /// The statutory pay date.
    pub pay_date: NaiveDate,
    /// Base pay (rate × completed sessions for freelance, monthly base for
    /// regular).
    pub base_amount: Decimal,
    /// Additional option pay from matching consultation types.
    pub option_amount: Decimal,
    /// Gross pay before tax: base + option.
    pub gross_amount: Decimal,
    /// Total tax across the calculation's line items; zero until the tax
    /// engine has run.
    pub tax_amount: Decimal,
    /// Number of completed sessions in the work range.
    pub session_count: u32,
    /// Total session hours in the work range.
    pub total_hours: Decimal,
    /// Lifecycle status.
    pub status: CalculationStatus,
    /// Human-readable calculation breakdown.
    pub detail: String,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl SalaryCalculation {
    /// Creates a new pending calculation for the given profile and period.
    pub fn new(
        consultant_id: i64,
        profile_id: Uuid,
        pay_period: &PayPeriod,
        base_amount: Decimal,
        option_amount: Decimal,
        session_count: u32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            consultant_id,
            profile_id,
            period: pay_period.period.clone(),
            work_start: pay_period.work_start,
            work_end: pay_period.work_end,
            pay_date: pay_period.pay_date,
            base_amount,
            option_amount,
            gross_amount: base_amount + option_amount,
            tax_amount: Decimal::ZERO,
            session_count,
            total_hours: Decimal::ZERO,
            status: CalculationStatus::Pending,
            detail: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Net pay after tax: gross − total tax.
    pub fn net_amount(&self) -> Decimal {
        self.gross_amount - self.tax_amount
    }

    /// Marks amounts as finalized.
    pub fn mark_calculated(&mut self) {
        self.status = CalculationStatus::Calculated;
        self.updated_at = Utc::now();
    }

    /// Marks the calculation as approved for payment.
    pub fn approve(&mut self) {
        self.status = CalculationStatus::Approved;
        self.updated_at = Utc::now();
    }

    /// Marks the calculation as paid.
    pub fn mark_paid(&mut self) {
        self.status = CalculationStatus::Paid;
        self.updated_at = Utc::now();
    }

    /// Returns true if payment may be recorded (only approved calculations
    /// are payable).
    pub fn is_payable(&self) -> bool {
        self.status == CalculationStatus::Approved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn pay_period() -> PayPeriod {
        PayPeriod {
            period: "2025-01".to_string(),
            work_start: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            work_end: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            pay_date: NaiveDate::from_ymd_opt(2025, 2, 10).unwrap(),
        }
    }

    fn calculation() -> SalaryCalculation {
        SalaryCalculation::new(1, Uuid::new_v4(), &pay_period(), dec("90000"), dec("5000"), 3)
    }

    #[test]
    fn test_new_calculation_sums_gross() {
        let calc = calculation();
        assert_eq!(calc.gross_amount, dec("95000"));
        assert_eq!(calc.base_amount, dec("90000"));
        assert_eq!(calc.option_amount, dec("5000"));
        assert_eq!(calc.session_count, 3);
        assert_eq!(calc.status, CalculationStatus::Pending);
        assert_eq!(calc.tax_amount, Decimal::ZERO);
    }

    #[test]
    fn test_new_calculation_copies_period_dates() {
        let calc = calculation();
        assert_eq!(calc.period, "2025-01");
        assert_eq!(calc.work_start, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(calc.work_end, NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
        assert_eq!(calc.pay_date, NaiveDate::from_ymd_opt(2025, 2, 10).unwrap());
    }

    #[test]
    fn test_net_amount_subtracts_tax() {
        let mut calc = calculation();
        calc.tax_amount = dec("3135");
        assert_eq!(calc.net_amount(), dec("91865"));
    }

    #[test]
    fn test_lifecycle_transitions() {
        let mut calc = calculation();
        assert!(!calc.is_payable());

        calc.mark_calculated();
        assert_eq!(calc.status, CalculationStatus::Calculated);
        assert!(!calc.is_payable());

        calc.approve();
        assert_eq!(calc.status, CalculationStatus::Approved);
        assert!(calc.is_payable());

        calc.mark_paid();
        assert_eq!(calc.status, CalculationStatus::Paid);
        assert!(!calc.is_payable());
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&CalculationStatus::Pending).unwrap(),
            "\"PENDING\""
        );
        assert_eq!(
            serde_json::to_string(&CalculationStatus::Calculated).unwrap(),
            "\"CALCULATED\""
        );
        assert_eq!(
            serde_json::to_string(&CalculationStatus::Approved).unwrap(),
            "\"APPROVED\""
        );
        assert_eq!(
            serde_json::to_string(&CalculationStatus::Paid).unwrap(),
            "\"PAID\""
        );
    }

    #[test]
    fn test_calculation_round_trip() {
        let calc = calculation();
        let json = serde_json::to_string(&calc).unwrap();
        let back: SalaryCalculation = serde_json::from_str(&json).unwrap();
        assert_eq!(calc, back);
    }
}

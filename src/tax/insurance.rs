//! Insurance contribution estimates.
//!
//! The four statutory insurance lines (national pension, health insurance,
//! long-term care, employment insurance) are never part of a calculation's
//! tax line items; they are estimated by the statistics path only, gated by
//! an annual-income floor.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::round_currency;

/// The annual income below which every insurance contribution is zero.
pub const INSURANCE_INCOME_FLOOR: i64 = 12_000_000;

fn pension_rate() -> Decimal {
    Decimal::new(45, 3) // 4.5%
}

fn health_rate() -> Decimal {
    Decimal::new(3545, 5) // 3.545%
}

fn long_term_care_rate() -> Decimal {
    Decimal::new(545, 5) // 0.545%
}

fn employment_rate() -> Decimal {
    Decimal::new(9, 3) // 0.9%
}

/// Estimated insurance contributions on one income base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InsuranceContributions {
    /// National pension at 4.5%.
    pub national_pension: Decimal,
    /// Health insurance at 3.545%.
    pub health_insurance: Decimal,
    /// Long-term care at 0.545%.
    pub long_term_care: Decimal,
    /// Employment insurance at 0.9%.
    pub employment_insurance: Decimal,
}

impl InsuranceContributions {
    /// Sum of the four contribution lines.
    pub fn total(&self) -> Decimal {
        self.national_pension + self.health_insurance + self.long_term_care
            + self.employment_insurance
    }

    /// Adds another set of contributions line by line.
    pub fn add(&mut self, other: &InsuranceContributions) {
        self.national_pension += other.national_pension;
        self.health_insurance += other.health_insurance;
        self.long_term_care += other.long_term_care;
        self.employment_insurance += other.employment_insurance;
    }
}

/// Applies the four insurance rates to an income base without any floor
/// gating. Amounts are rounded half-up to whole currency units.
pub fn contributions_on(base: Decimal) -> InsuranceContributions {
    InsuranceContributions {
        national_pension: round_currency(base * pension_rate()),
        health_insurance: round_currency(base * health_rate()),
        long_term_care: round_currency(base * long_term_care_rate()),
        employment_insurance: round_currency(base * employment_rate()),
    }
}

/// Estimates annual insurance contributions for an annual income.
///
/// Below the [`INSURANCE_INCOME_FLOOR`] every contribution is exactly zero.
///
/// # Example
///
/// ```
/// use payroll_engine::tax::{INSURANCE_INCOME_FLOOR, estimate_insurance};
/// use rust_decimal::Decimal;
///
/// let floor = Decimal::from(INSURANCE_INCOME_FLOOR);
/// let at_floor = estimate_insurance(floor);
/// assert_eq!(at_floor.national_pension, Decimal::from(540_000));
///
/// let below = estimate_insurance(floor - Decimal::ONE);
/// assert_eq!(below.total(), Decimal::ZERO);
/// ```
pub fn estimate_insurance(annual_income: Decimal) -> InsuranceContributions {
    if annual_income < Decimal::from(INSURANCE_INCOME_FLOOR) {
        return InsuranceContributions::default();
    }
    contributions_on(annual_income)
}

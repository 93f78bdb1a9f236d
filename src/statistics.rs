//! Aggregate period statistics.
//!
//! Pure functions over stored calculation records; the engine surfaces them
//! per period. The insurance estimate lives here and only here: the
//! per-calculation tax line items never include insurance.

use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::models::{SalaryCalculation, TaxLineItem};
use crate::tax::{INSURANCE_INCOME_FLOOR, InsuranceContributions, contributions_on};

/// Aggregate salary figures for one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyStatistics {
    /// The "YYYY-MM" period token.
    pub period: String,
    /// Number of calculations in the period.
    pub total_calculations: usize,
    /// Sum of gross pay.
    pub total_gross: Decimal,
    /// Sum of total tax.
    pub total_tax: Decimal,
    /// Sum of net pay.
    pub total_net: Decimal,
    /// Average gross pay, zero when the period has no calculations.
    pub average_gross: Decimal,
}

/// Tax totals by type plus the insurance aggregate for one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxStatistics {
    /// The "YYYY-MM" period token.
    pub period: String,
    /// Total tax amount per tax type code.
    pub tax_by_type: HashMap<String, Decimal>,
    /// Sum across all tax line items.
    pub total_tax: Decimal,
    /// Estimated monthly insurance contributions across the period's
    /// calculations.
    pub insurance: InsuranceContributions,
}

/// Computes salary statistics for one period's calculations.
pub fn monthly_statistics(period: &str, calculations: &[SalaryCalculation]) -> MonthlyStatistics {
    let total_gross: Decimal = calculations.iter().map(|c| c.gross_amount).sum();
    let total_tax: Decimal = calculations.iter().map(|c| c.tax_amount).sum();
    let average_gross = if calculations.is_empty() {
        Decimal::ZERO
    } else {
        (total_gross / Decimal::from(calculations.len()))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    };

    MonthlyStatistics {
        period: period.to_string(),
        total_calculations: calculations.len(),
        total_gross,
        total_tax,
        total_net: total_gross - total_tax,
        average_gross,
    }
}

/// Computes tax statistics for one period.
///
/// A calculation contributes to the insurance aggregate only when its
/// annualized gross (gross × 12) reaches the statutory income floor; below
/// it all four insurance lines contribute exactly zero.
pub fn tax_statistics(
    period: &str,
    calculations: &[SalaryCalculation],
    items: &[TaxLineItem],
) -> TaxStatistics {
    let mut tax_by_type: HashMap<String, Decimal> = HashMap::new();
    for item in items {
        *tax_by_type.entry(item.tax_type.clone()).or_insert(Decimal::ZERO) += item.tax_amount;
    }

    let mut insurance = InsuranceContributions::default();
    let floor = Decimal::from(INSURANCE_INCOME_FLOOR);
    for calculation in calculations {
        let annualized = calculation.gross_amount * Decimal::from(12);
        if annualized >= floor {
            insurance.add(&contributions_on(calculation.gross_amount));
        }
    }

    TaxStatistics {
        period: period.to_string(),
        total_tax: tax_by_type.values().copied().sum(),
        tax_by_type,
        insurance,
    }
}

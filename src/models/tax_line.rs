//! Tax line item model.
//!
//! Each [`TaxLineItem`] is one component of the total tax on a salary
//! calculation (withholding, VAT, income tax). Items are created by the tax
//! engine and attached to their calculation once it has been persisted.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One tax component of a salary calculation.
///
/// The amount is `rate × taxable_amount` rounded half-up to whole currency
/// units, except for bracket-computed income tax where the amount is set
/// directly and the rate carries the effective rate.
///
/// # Example
///
/// ```
/// use payroll_engine::models::TaxLineItem;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let item = TaxLineItem::new(
///     "WITHHOLDING_TAX",
///     "Withholding Tax",
///     Decimal::from_str("0.033").unwrap(),
///     Decimal::from_str("1000000").unwrap(),
///     "Freelance withholding 3.3%",
/// );
/// assert_eq!(item.tax_amount, Decimal::from_str("33000").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxLineItem {
    /// Surrogate identifier for this line item.
    pub id: Uuid,
    /// The owning calculation; assigned after the calculation is persisted.
    pub calculation_id: Option<Uuid>,
    /// The tax type code (e.g. "WITHHOLDING_TAX", "VAT", "INCOME_TAX").
    pub tax_type: String,
    /// Display name for the tax type.
    pub name: String,
    /// The tax rate as a fraction (e.g. 0.033).
    pub rate: Decimal,
    /// The taxable base amount.
    pub taxable_amount: Decimal,
    /// The computed tax amount in whole currency units.
    pub tax_amount: Decimal,
    /// Human-readable description.
    pub description: String,
    /// Whether the line item is active.
    pub active: bool,
}

impl TaxLineItem {
    /// Creates a line item whose amount is `rate × taxable_amount`, rounded
    /// half-up to whole currency units.
    pub fn new(
        tax_type: impl Into<String>,
        name: impl Into<String>,
        rate: Decimal,
        taxable_amount: Decimal,
        description: impl Into<String>,
    ) -> Self {
        let tax_amount = round_currency(rate * taxable_amount);
        Self {
            id: Uuid::new_v4(),
            calculation_id: None,
            tax_type: tax_type.into(),
            name: name.into(),
            rate,
            taxable_amount,
            tax_amount,
            description: description.into(),
            active: true,
        }
    }

    /// Creates a line item with an explicitly computed amount, recording the
    /// effective rate rather than deriving the amount from it.
    pub fn with_amount(
        tax_type: impl Into<String>,
        name: impl Into<String>,
        rate: Decimal,
        taxable_amount: Decimal,
        tax_amount: Decimal,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            calculation_id: None,
            tax_type: tax_type.into(),
            name: name.into(),
            rate,
            taxable_amount,
            tax_amount,
            description: description.into(),
            active: true,
        }
    }

    /// Attaches the line item to a persisted calculation.
    pub fn attach_to(&mut self, calculation_id: Uuid) {
        self.calculation_id = Some(calculation_id);
    }
}

/// Rounds a monetary amount half-up to whole currency units.
pub(crate) fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

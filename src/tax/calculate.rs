//! The tax engine's public entry point.
//!
//! `calculate_tax` produces the ordered tax line items for one gross amount
//! under the regime selected by employment type and business-registration
//! status. The rules apply exactly; there is no partial application.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::error::{PayrollError, PayrollResult};
use crate::models::{EmploymentType, TaxLineItem};

use super::brackets::progressive_income_tax;

/// Tax type code for freelance withholding.
pub const WITHHOLDING_TAX_TYPE: &str = "WITHHOLDING_TAX";

/// Tax type code for value-added tax.
pub const VAT_TYPE: &str = "VAT";

/// Tax type code for progressive income tax.
pub const INCOME_TAX_TYPE: &str = "INCOME_TAX";

/// The flat withholding rate applied to all freelance compensation.
pub fn withholding_rate() -> Decimal {
    Decimal::new(33, 3) // 0.033
}

/// The VAT rate applied to business-registered freelancers.
pub fn vat_rate() -> Decimal {
    Decimal::new(10, 2) // 0.10
}

/// Computes the tax line items for a gross amount.
///
/// * `Freelance`, not business-registered: one withholding item at 3.3%.
/// * `Freelance`, business-registered: withholding at 3.3% **and** VAT at 10%.
/// * `Regular`: one income-tax item computed over the marginal bracket table,
///   with the effective rate (tax ÷ gross, 4 decimal places) recorded on the
///   line.
///
/// Never fails for valid, non-negative gross amounts; a zero gross yields
/// line items with zero amounts.
///
/// # Errors
///
/// Returns [`PayrollError::InvalidAmount`] for a negative gross amount, with
/// no line items produced.
///
/// # Example
///
/// ```
/// use payroll_engine::models::EmploymentType;
/// use payroll_engine::tax::calculate_tax;
/// use rust_decimal::Decimal;
///
/// let items = calculate_tax(EmploymentType::Freelance, true, Decimal::from(1_000_000)).unwrap();
/// assert_eq!(items.len(), 2);
/// let total: Decimal = items.iter().map(|i| i.tax_amount).sum();
/// assert_eq!(total, Decimal::from(133_000));
/// ```
pub fn calculate_tax(
    employment_type: EmploymentType,
    business_registered: bool,
    gross: Decimal,
) -> PayrollResult<Vec<TaxLineItem>> {
    if gross < Decimal::ZERO {
        return Err(PayrollError::InvalidAmount { amount: gross });
    }

    debug!(%employment_type, business_registered, %gross, "calculating tax");

    let items = match employment_type {
        EmploymentType::Freelance => freelance_tax(gross, business_registered),
        EmploymentType::Regular => regular_tax(gross),
    };

    Ok(items)
}

fn freelance_tax(gross: Decimal, business_registered: bool) -> Vec<TaxLineItem> {
    let mut items = vec![TaxLineItem::new(
        WITHHOLDING_TAX_TYPE,
        "Withholding Tax",
        withholding_rate(),
        gross,
        "Freelance withholding 3.3%",
    )];

    if business_registered {
        items.push(TaxLineItem::new(
            VAT_TYPE,
            "VAT",
            vat_rate(),
            gross,
            "Business-registered freelancer VAT 10%",
        ));
    }

    items
}

fn regular_tax(gross: Decimal) -> Vec<TaxLineItem> {
    let tax = progressive_income_tax(gross);
    let effective_rate = if gross > Decimal::ZERO {
        (tax / gross).round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
    } else {
        Decimal::ZERO
    };

    vec![TaxLineItem::with_amount(
        INCOME_TAX_TYPE,
        "Income Tax",
        effective_rate,
        gross,
        tax,
        "Regular income tax (progressive brackets)",
    )]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn total(items: &[TaxLineItem]) -> Decimal {
        items.iter().map(|i| i.tax_amount).sum()
    }

    /// TX-001: freelance without business registration
    #[test]
    fn test_freelance_unregistered_has_single_withholding_item() {
        let items = calculate_tax(EmploymentType::Freelance, false, dec("1000000")).unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].tax_type, WITHHOLDING_TAX_TYPE);
        assert_eq!(items[0].rate, dec("0.033"));
        assert_eq!(items[0].taxable_amount, dec("1000000"));
        assert_eq!(items[0].tax_amount, dec("33000"));
    }

    /// TX-002: business-registered freelance adds VAT
    #[test]
    fn test_freelance_registered_adds_vat() {
        let items = calculate_tax(EmploymentType::Freelance, true, dec("1000000")).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].tax_type, WITHHOLDING_TAX_TYPE);
        assert_eq!(items[0].tax_amount, dec("33000"));
        assert_eq!(items[1].tax_type, VAT_TYPE);
        assert_eq!(items[1].rate, dec("0.10"));
        assert_eq!(items[1].tax_amount, dec("100000"));
        assert_eq!(total(&items), dec("133000"));
    }

    /// TX-003: regular employment at the first bracket boundary
    #[test]
    fn test_regular_first_bracket_boundary() {
        let items = calculate_tax(EmploymentType::Regular, false, dec("12000000")).unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].tax_type, INCOME_TAX_TYPE);
        assert_eq!(items[0].tax_amount, dec("720000"));
        assert_eq!(items[0].rate, dec("0.0600"));
    }

    /// TX-004: regular employment across two brackets
    #[test]
    fn test_regular_second_bracket_boundary() {
        let items = calculate_tax(EmploymentType::Regular, false, dec("46000000")).unwrap();
        assert_eq!(total(&items), dec("5820000"));
    }

    #[test]
    fn test_regular_ignores_business_registration() {
        let registered = calculate_tax(EmploymentType::Regular, true, dec("46000000")).unwrap();
        let unregistered = calculate_tax(EmploymentType::Regular, false, dec("46000000")).unwrap();

        assert_eq!(registered.len(), 1);
        assert_eq!(total(&registered), total(&unregistered));
    }

    #[test]
    fn test_negative_gross_is_rejected() {
        let result = calculate_tax(EmploymentType::Freelance, false, dec("-1"));
        match result {
            Err(PayrollError::InvalidAmount { amount }) => assert_eq!(amount, dec("-1")),
            other => panic!("Expected InvalidAmount, got {:?}", other),
        }

        let result = calculate_tax(EmploymentType::Regular, false, dec("-0.01"));
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_gross_yields_zero_amounts() {
        let items = calculate_tax(EmploymentType::Freelance, true, Decimal::ZERO).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(total(&items), Decimal::ZERO);

        let items = calculate_tax(EmploymentType::Regular, false, Decimal::ZERO).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].tax_amount, Decimal::ZERO);
        assert_eq!(items[0].rate, Decimal::ZERO);
    }

    #[test]
    fn test_withholding_rounds_half_up() {
        // 0.033 × 12,345 = 407.385 → 407
        let items = calculate_tax(EmploymentType::Freelance, false, dec("12345")).unwrap();
        assert_eq!(items[0].tax_amount, dec("407"));
    }

    #[test]
    fn test_items_are_not_attached_yet() {
        let items = calculate_tax(EmploymentType::Freelance, true, dec("1000000")).unwrap();
        assert!(items.iter().all(|i| i.calculation_id.is_none()));
        assert!(items.iter().all(|i| i.active));
    }

    proptest! {
        #[test]
        fn prop_freelance_line_count_follows_registration(
            gross in 0i64..1_000_000_000,
            registered in proptest::bool::ANY,
        ) {
            let items =
                calculate_tax(EmploymentType::Freelance, registered, Decimal::from(gross)).unwrap();
            prop_assert_eq!(items.len(), if registered { 2 } else { 1 });
        }

        #[test]
        fn prop_taxable_base_is_gross_on_every_item(gross in 0i64..1_000_000_000) {
            let gross = Decimal::from(gross);
            let items = calculate_tax(EmploymentType::Freelance, true, gross).unwrap();
            prop_assert!(items.iter().all(|i| i.taxable_amount == gross));
        }
    }
}

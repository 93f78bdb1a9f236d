//! Rendering of human-readable calculation breakdowns.
//!
//! The breakdown is stored as free text on the calculation record and shown
//! verbatim in the back office, so the format here is the contract.

use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Write;

use crate::models::TaxLineItem;

use super::base_pay::BasePayResult;
use super::option_pay::OptionPayResult;

/// Renders the breakdown for a freelance calculation.
pub fn render_freelance_detail(
    base: &BasePayResult,
    session_count: u32,
    options: &OptionPayResult,
    taxes: &[TaxLineItem],
) -> String {
    let mut detail = String::new();
    let _ = writeln!(detail, "=== Base Pay ===");
    let _ = writeln!(
        detail,
        "{} completed sessions x {} = {}",
        session_count, base.rate, base.amount
    );

    if !options.lines.is_empty() {
        let _ = writeln!(detail, "=== Option Pay ===");
        for line in &options.lines {
            let _ = writeln!(
                detail,
                "{}: {} sessions x {} = {}",
                line.consultation_type, line.sessions, line.rate, line.amount
            );
        }
    }

    let gross = base.amount + options.amount;
    append_tax_section(&mut detail, gross, taxes);
    detail
}

/// Renders the breakdown for a regular-employment calculation.
pub fn render_regular_detail(base_salary: Decimal, taxes: &[TaxLineItem]) -> String {
    let mut detail = String::new();
    let _ = writeln!(detail, "=== Base Pay ===");
    let _ = writeln!(detail, "Monthly base salary: {}", base_salary);

    append_tax_section(&mut detail, base_salary, taxes);
    detail
}

fn append_tax_section(detail: &mut String, gross: Decimal, taxes: &[TaxLineItem]) {
    let total_tax: Decimal = taxes.iter().map(|t| t.tax_amount).sum();

    let _ = writeln!(detail, "=== Tax ===");
    let _ = writeln!(detail, "Gross pay: {}", gross);
    let _ = writeln!(detail, "Total tax: {}", total_tax);
    let _ = writeln!(detail, "Net pay: {}", gross - total_tax);
    for tax in taxes {
        let _ = writeln!(
            detail,
            "- {} ({}%): {}",
            tax.name,
            percent(tax.rate),
            tax.tax_amount
        );
    }
}

fn percent(rate: Decimal) -> Decimal {
    (rate * Decimal::from(100))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}

//! Progressive income tax brackets for regular employment.
//!
//! The bracket table is applied to the gross amount as if it were annual
//! income. The numbers are reproduced exactly as defined by the back office
//! and are a simplified model, not a statement of any jurisdiction's tax law.

use rust_decimal::Decimal;

use crate::models::round_currency;

/// Marginal brackets as (cumulative income ceiling, marginal rate).
///
/// Income above the last ceiling is taxed at the top rate.
fn bracket_table() -> [(Decimal, Decimal); 6] {
    [
        (Decimal::from(12_000_000_i64), Decimal::new(6, 2)),
        (Decimal::from(46_000_000_i64), Decimal::new(15, 2)),
        (Decimal::from(88_000_000_i64), Decimal::new(24, 2)),
        (Decimal::from(150_000_000_i64), Decimal::new(35, 2)),
        (Decimal::from(300_000_000_i64), Decimal::new(38, 2)),
        (Decimal::from(500_000_000_i64), Decimal::new(40, 2)),
    ]
}

/// The marginal rate above the last bracket ceiling.
fn top_rate() -> Decimal {
    Decimal::new(42, 2)
}

/// Computes progressive income tax over the bracket table.
///
/// Each bracket taxes only the slice of income that falls within it; the
/// result is rounded half-up to whole currency units at the end.
///
/// # Example
///
/// ```
/// use payroll_engine::tax::progressive_income_tax;
/// use rust_decimal::Decimal;
///
/// // The entire first bracket at 6%.
/// let tax = progressive_income_tax(Decimal::from(12_000_000));
/// assert_eq!(tax, Decimal::from(720_000));
/// ```
pub fn progressive_income_tax(gross: Decimal) -> Decimal {
    let mut tax = Decimal::ZERO;
    let mut lower = Decimal::ZERO;

    for (ceiling, rate) in bracket_table() {
        if gross <= lower {
            break;
        }
        let slice = gross.min(ceiling) - lower;
        tax += slice * rate;
        lower = ceiling;
    }

    if gross > lower {
        tax += (gross - lower) * top_rate();
    }

    round_currency(tax)
}

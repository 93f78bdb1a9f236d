//! Option pay calculation.
//!
//! Certain consultation types carry a flat bonus per completed session,
//! configured in the code table. The bonus table is resolved once per
//! calculation run; session types with no matching entry contribute zero.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::warn;

use crate::codes::{CodeLookup, OPTION_TYPE_GROUP};
use crate::models::Session;

/// One consultation type's contribution to option pay.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionPayLine {
    /// The consultation type code.
    pub consultation_type: String,
    /// Number of completed sessions of this type.
    pub sessions: u32,
    /// The flat bonus per session.
    pub rate: Decimal,
    /// `rate × sessions`.
    pub amount: Decimal,
}

/// The result of an option pay calculation.
#[derive(Debug, Clone, Default)]
pub struct OptionPayResult {
    /// Total option pay across all matching sessions.
    pub amount: Decimal,
    /// Per-type breakdown, sorted by consultation type.
    pub lines: Vec<OptionPayLine>,
}

/// Resolves the per-consultation-type bonus table from the code lookup.
///
/// When the `SALARY_OPTION_TYPE` group is empty the documented defaults
/// apply (INITIAL_CONSULTATION 5,000 and FAMILY_CONSULTATION 3,000), logged
/// as a fallback. Entries without a parseable `baseAmount` are skipped.
pub fn option_rates(codes: &dyn CodeLookup) -> HashMap<String, Decimal> {
    let mut rates = HashMap::new();

    for entry in codes.codes_in_group(OPTION_TYPE_GROUP) {
        match entry.base_amount() {
            Some(amount) => {
                rates.insert(entry.value.clone(), amount);
            }
            None => {
                warn!(option_type = %entry.value, "option code has no baseAmount, skipping");
            }
        }
    }

    if rates.is_empty() {
        warn!("no option bonuses configured, using built-in defaults");
        rates.insert("INITIAL_CONSULTATION".to_string(), Decimal::from(5_000));
        rates.insert("FAMILY_CONSULTATION".to_string(), Decimal::from(3_000));
    }

    rates
}

/// Computes option pay for a run's completed sessions.
///
/// Every completed session whose consultation type matches an entry in the
/// bonus table adds that entry's flat amount; sessions without a type, or
/// with a type not in the table, contribute zero.
pub fn calculate_option_pay(
    sessions: &[Session],
    rates: &HashMap<String, Decimal>,
) -> OptionPayResult {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for session in sessions {
        let Some(consultation_type) = session.consultation_type.as_deref() else {
            continue;
        };
        if rates.contains_key(consultation_type) {
            *counts.entry(consultation_type).or_insert(0) += 1;
        }
    }

    let mut lines: Vec<OptionPayLine> = counts
        .into_iter()
        .filter_map(|(consultation_type, sessions)| {
            let rate = *rates.get(consultation_type)?;
            Some(OptionPayLine {
                consultation_type: consultation_type.to_string(),
                sessions,
                rate,
                amount: rate * Decimal::from(sessions),
            })
        })
        .collect();
    lines.sort_by(|a, b| a.consultation_type.cmp(&b.consultation_type));

    OptionPayResult {
        amount: lines.iter().map(|l| l.amount).sum(),
        lines,
    }
}

//! Base pay calculation for freelance consultants.
//!
//! The per-session rate comes from the consultant's profile when configured,
//! otherwise from the grade-based default in the code table, with a final
//! documented fallback so a missing configuration never aborts a run.

use rust_decimal::Decimal;
use tracing::warn;

use crate::codes::{CodeLookup, FREELANCE_RATE_GROUP};
use crate::models::CompensationProfile;

/// The documented fallback session rate when neither the profile nor the
/// code table yields one.
pub const DEFAULT_FREELANCE_RATE: i64 = 30_000;

/// The grade assumed when the consultant directory has none on record.
const DEFAULT_GRADE: &str = "CONSULTANT_JUNIOR";

/// Where the applied session rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateSource {
    /// The profile's configured base rate.
    Profile,
    /// The grade-based default resolved from the code table.
    GradeDefault,
    /// The built-in fallback rate.
    Fallback,
}

/// The result of a base pay calculation.
#[derive(Debug, Clone)]
pub struct BasePayResult {
    /// The per-session rate that was applied.
    pub rate: Decimal,
    /// `rate × session_count`.
    pub amount: Decimal,
    /// Where the rate came from.
    pub source: RateSource,
}

/// Computes base pay for a freelance consultant.
///
/// Rate priority:
/// 1. The profile's configured `base_rate`.
/// 2. The grade default from the code table: group `FREELANCE_BASE_RATE`,
///    key `<grade>_RATE` with the `CONSULTANT_` prefix stripped (e.g. grade
///    `CONSULTANT_SENIOR` → `SENIOR_RATE`), extra key `rate`.
/// 3. The built-in fallback of 30,000, logged as a fallback.
pub fn calculate_base_pay(
    profile: &CompensationProfile,
    grade: Option<&str>,
    session_count: u32,
    codes: &dyn CodeLookup,
) -> BasePayResult {
    let (rate, source) = match profile.base_rate {
        Some(rate) => (rate, RateSource::Profile),
        None => grade_default_rate(grade, codes),
    };

    BasePayResult {
        rate,
        amount: rate * Decimal::from(session_count),
        source,
    }
}

fn grade_default_rate(grade: Option<&str>, codes: &dyn CodeLookup) -> (Decimal, RateSource) {
    let grade = grade.unwrap_or(DEFAULT_GRADE);
    let rate_code = format!("{}_RATE", grade.trim_start_matches("CONSULTANT_"));

    match codes
        .get_code(FREELANCE_RATE_GROUP, &rate_code)
        .and_then(|entry| entry.rate())
    {
        Some(rate) => (rate, RateSource::GradeDefault),
        None => {
            warn!(grade, %rate_code, "no base rate configured for grade, using fallback");
            (Decimal::from(DEFAULT_FREELANCE_RATE), RateSource::Fallback)
        }
    }
}

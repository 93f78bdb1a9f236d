//! Code entry types and the lookup contract.
//!
//! A [`CodeEntry`] carries a free-form JSON `extra` payload; the typed
//! accessors tolerate both number and string encodings because the back
//! office's code table stores both.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use std::str::FromStr;

/// Code group for pay-day rules (extra key: `dayOfMonth`).
pub const PAY_DAY_GROUP: &str = "SALARY_PAY_DAY";

/// Code group for grade-based freelance base rates (extra key: `rate`).
pub const FREELANCE_RATE_GROUP: &str = "FREELANCE_BASE_RATE";

/// Code group for per-consultation-type option bonuses (extra key:
/// `baseAmount`).
pub const OPTION_TYPE_GROUP: &str = "SALARY_OPTION_TYPE";

/// A single configuration code resolved from the code table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CodeEntry {
    /// The code group (e.g. "SALARY_PAY_DAY").
    pub group: String,
    /// The code value within the group (e.g. "TENTH").
    pub value: String,
    /// Human-readable display value.
    pub display_name: String,
    /// Free-form extra data attached to the code.
    #[serde(default)]
    pub extra: Option<Value>,
}

impl CodeEntry {
    /// Creates a code entry with no extra data.
    pub fn new(
        group: impl Into<String>,
        value: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            value: value.into(),
            display_name: display_name.into(),
            extra: None,
        }
    }

    /// Attaches extra data to the entry.
    pub fn with_extra(mut self, extra: Value) -> Self {
        self.extra = Some(extra);
        self
    }

    fn extra_field(&self, key: &str) -> Option<&Value> {
        self.extra.as_ref()?.get(key)
    }

    /// The `dayOfMonth` extra field, accepting integer or string encodings.
    pub fn day_of_month(&self) -> Option<u32> {
        match self.extra_field("dayOfMonth")? {
            Value::Number(n) => n.as_u64().and_then(|d| u32::try_from(d).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// The `rate` extra field as a decimal amount.
    pub fn rate(&self) -> Option<Decimal> {
        decimal_field(self.extra_field("rate")?)
    }

    /// The `baseAmount` extra field as a decimal amount.
    pub fn base_amount(&self) -> Option<Decimal> {
        decimal_field(self.extra_field("baseAmount")?)
    }
}

fn decimal_field(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(Decimal::from(i))
            } else {
                // Non-integral numbers go through their decimal rendering to
                // avoid binary float artifacts.
                Decimal::from_str(&n.to_string()).ok()
            }
        }
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

/// Resolves configuration codes from an externally managed table.
///
/// Lookups are synchronous and infallible at the contract level: a missing
/// code is `None`, and callers substitute their documented defaults.
pub trait CodeLookup: Send + Sync {
    /// Resolves a single code by group and value.
    fn get_code(&self, group: &str, value: &str) -> Option<CodeEntry>;

    /// Lists every code in a group.
    fn codes_in_group(&self, group: &str) -> Vec<CodeEntry>;
}

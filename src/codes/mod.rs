//! Code table configuration for the payroll engine.
//!
//! Externally managed configuration values (pay-day rules, grade base rates,
//! per-consultation-type option bonuses) are modeled as a keyed code lookup
//! so the engine stays deterministic and testable with an injected fake.

mod loader;
mod types;

pub use loader::CodeTable;
pub use types::{
    CodeEntry, CodeLookup, FREELANCE_RATE_GROUP, OPTION_TYPE_GROUP, PAY_DAY_GROUP,
};

//! Calculation logic for the payroll engine.
//!
//! This module contains the calculation functions the salary engine composes:
//! pay-period and pay-date resolution from the configurable pay-day rule,
//! base pay from the profile rate or grade default, option pay from
//! per-consultation-type bonuses, and the rendered calculation breakdown.

mod base_pay;
mod detail;
mod option_pay;
mod pay_dates;

pub use base_pay::{BasePayResult, DEFAULT_FREELANCE_RATE, RateSource, calculate_base_pay};
pub use detail::{render_freelance_detail, render_regular_detail};
pub use option_pay::{OptionPayLine, OptionPayResult, calculate_option_pay, option_rates};
pub use pay_dates::{DEFAULT_PAY_DAY, resolve_pay_period};

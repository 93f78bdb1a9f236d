//! Tax calculation logic for the payroll engine.
//!
//! This module computes the tax line items for a salary calculation: flat
//! withholding (plus VAT for business-registered freelancers) or progressive
//! bracket income tax for regular employees, and the insurance-contribution
//! estimates used by the statistics path.

mod brackets;
mod calculate;
mod insurance;

pub use brackets::progressive_income_tax;
pub use calculate::{
    INCOME_TAX_TYPE, VAT_TYPE, WITHHOLDING_TAX_TYPE, calculate_tax, vat_rate, withholding_rate,
};
pub use insurance::{
    INSURANCE_INCOME_FLOOR, InsuranceContributions, contributions_on, estimate_insurance,
};

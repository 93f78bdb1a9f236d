//! Payroll and Tax Calculation Engine
//!
//! This crate computes consultant compensation for a counseling-center back
//! office: gross pay from completed sessions, statutory pay dates from
//! configurable pay-day rules, per-regime tax line items, and the downstream
//! expense transaction emitted to the financial ledger.

#![warn(missing_docs)]

pub mod calculation;
pub mod codes;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod models;
pub mod statistics;
pub mod store;
pub mod tax;

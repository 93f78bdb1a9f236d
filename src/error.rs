//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during salary and tax calculation.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::models::CalculationStatus;

/// The main error type for the payroll engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::PayrollError;
///
/// let error = PayrollError::InvalidPeriod {
///     token: "2025/01".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid period token: 2025/01 (expected YYYY-MM)");
/// ```
#[derive(Debug, Error)]
pub enum PayrollError {
    /// A period token could not be parsed as "YYYY-MM".
    #[error("Invalid period token: {token} (expected YYYY-MM)")]
    InvalidPeriod {
        /// The token that failed to parse.
        token: String,
    },

    /// A monetary amount was negative where only non-negative values are valid.
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The offending amount.
        amount: Decimal,
    },

    /// No active compensation profile exists for the consultant.
    #[error("No active compensation profile for consultant {consultant_id}")]
    ProfileNotFound {
        /// The consultant whose profile was requested.
        consultant_id: i64,
    },

    /// The active profile's employment type does not match the requested
    /// calculation path.
    #[error(
        "Compensation profile for consultant {consultant_id} is {actual}, expected {expected}"
    )]
    ProfileTypeMismatch {
        /// The consultant whose profile was checked.
        consultant_id: i64,
        /// The employment type the operation requires.
        expected: String,
        /// The employment type the active profile actually has.
        actual: String,
    },

    /// No salary calculation exists with the given id.
    #[error("Salary calculation not found: {id}")]
    CalculationNotFound {
        /// The calculation id that was requested.
        id: Uuid,
    },

    /// A calculation was not in a payable state when payment was recorded.
    #[error("Salary calculation {id} is not payable (status: {status:?})")]
    NotPayable {
        /// The calculation id.
        id: Uuid,
        /// The status the calculation was actually in.
        status: CalculationStatus,
    },

    /// Code table file was not found at the specified path.
    #[error("Code table file not found: {path}")]
    CodeTableNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Code table file could not be parsed.
    #[error("Failed to parse code table file '{path}': {message}")]
    CodeTableParse {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A persistence collaborator reported a failure.
    #[error("Store error: {message}")]
    Store {
        /// A description of the storage failure.
        message: String,
    },

    /// The ledger collaborator rejected or failed an expense transaction.
    ///
    /// Calculation operations catch and log this; it never aborts a run.
    #[error("Ledger emission failed: {message}")]
    Emission {
        /// A description of the emission failure.
        message: String,
    },
}

/// A type alias for Results that return PayrollError.
pub type PayrollResult<T> = Result<T, PayrollError>;

//! Expense transaction emission to the financial ledger.
//!
//! On successful calculation the engine emits one expense record to the
//! external ledger collaborator. Emission is best-effort: a failure is
//! logged and never invalidates the calculation already persisted.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{PayrollError, PayrollResult};
use crate::models::{CompensationProfile, EmploymentType, SalaryCalculation};

/// An expense transaction submitted to the ledger collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseTransactionRequest {
    /// Always "EXPENSE" for salary payments.
    pub transaction_type: String,
    /// The ledger category, always "salary".
    pub category: String,
    /// Subcategory derived from the employment type.
    pub subcategory: String,
    /// The gross pay amount.
    pub amount: Decimal,
    /// The amount excluding the withheld taxes.
    pub amount_before_tax: Decimal,
    /// The withholding/VAT total, where applicable.
    pub tax_amount: Decimal,
    /// Description naming the consultant and period.
    pub description: String,
    /// The transaction date (the calculation's pay date).
    pub transaction_date: chrono::NaiveDate,
    /// The calculation the expense originates from.
    pub related_entity_id: Uuid,
    /// Always "SALARY_CALCULATION".
    pub related_entity_type: String,
}

/// The external ledger collaborator.
///
/// Calls are fire-and-forget from the engine's perspective: the engine logs
/// the outcome and a failure never rolls back the calculation.
pub trait LedgerClient: Send + Sync {
    /// Submits an expense transaction, returning the ledger's transaction id.
    fn create_expense_transaction(
        &self,
        request: &ExpenseTransactionRequest,
    ) -> PayrollResult<i64>;
}

/// Maps an employment type to the ledger subcategory.
pub fn salary_subcategory(employment_type: EmploymentType) -> &'static str {
    match employment_type {
        EmploymentType::Freelance => "freelance_salary",
        EmploymentType::Regular => "regular_salary",
    }
}

/// Builds the expense request for a persisted salary calculation.
///
/// The tax fields carry the withholding/VAT total for freelance pay; regular
/// pay has neither, so its tax fields are zero and the full gross is the
/// before-tax amount.
pub fn build_salary_expense_request(
    calculation: &SalaryCalculation,
    profile: &CompensationProfile,
    consultant_name: &str,
) -> ExpenseTransactionRequest {
    let tax_amount = match profile.employment_type {
        EmploymentType::Freelance => calculation.tax_amount,
        EmploymentType::Regular => Decimal::ZERO,
    };

    ExpenseTransactionRequest {
        transaction_type: "EXPENSE".to_string(),
        category: "salary".to_string(),
        subcategory: salary_subcategory(profile.employment_type).to_string(),
        amount: calculation.gross_amount,
        amount_before_tax: calculation.gross_amount - tax_amount,
        tax_amount,
        description: format!(
            "{} salary payment - {} ({})",
            consultant_name, calculation.period, profile.employment_type
        ),
        transaction_date: calculation.pay_date,
        related_entity_id: calculation.id,
        related_entity_type: "SALARY_CALCULATION".to_string(),
    }
}

/// In-memory [`LedgerClient`] used by tests.
///
/// Records every submitted request and can be switched into a failing mode
/// to exercise the engine's best-effort emission path.
#[derive(Debug, Default)]
pub struct RecordingLedger {
    transactions: Mutex<Vec<ExpenseTransactionRequest>>,
    next_id: AtomicI64,
    failing: AtomicBool,
}

impl RecordingLedger {
    /// Creates a ledger that accepts every transaction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a ledger that rejects every transaction.
    pub fn failing() -> Self {
        let ledger = Self::default();
        ledger.failing.store(true, Ordering::SeqCst);
        ledger
    }

    /// Switches the failing mode on or off.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Returns the recorded transactions.
    pub fn transactions(&self) -> Vec<ExpenseTransactionRequest> {
        self.transactions
            .lock()
            .map(|t| t.clone())
            .unwrap_or_default()
    }
}

impl LedgerClient for RecordingLedger {
    fn create_expense_transaction(
        &self,
        request: &ExpenseTransactionRequest,
    ) -> PayrollResult<i64> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(PayrollError::Emission {
                message: "ledger collaborator unavailable".to_string(),
            });
        }

        let mut transactions = self.transactions.lock().map_err(|_| PayrollError::Store {
            message: "ledger lock poisoned".to_string(),
        })?;
        transactions.push(request.clone());
        Ok(self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

//! The salary calculation engine.
//!
//! [`SalaryEngine`] orchestrates one calculation run per invocation: it
//! resolves the pay period, checks the consultant's active profile, replaces
//! any prior calculation for the (consultant, period) pair, aggregates
//! completed sessions, runs the tax engine, and emits the downstream expense
//! transaction best-effort.
//!
//! Runs for different pairs are independent; serializing duplicate runs for
//! the same pair is the calculation store's obligation.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    calculate_base_pay, calculate_option_pay, option_rates, render_freelance_detail,
    render_regular_detail, resolve_pay_period,
};
use crate::codes::CodeLookup;
use crate::error::{PayrollError, PayrollResult};
use crate::ledger::{LedgerClient, build_salary_expense_request};
use crate::models::{
    CompensationProfile, EmploymentType, SalaryCalculation, TaxLineItem,
};
use crate::statistics::{self, MonthlyStatistics, TaxStatistics};
use crate::store::{CalculationStore, ProfileStore, SessionSource};
use crate::tax::calculate_tax;

/// The salary calculation engine.
///
/// Holds its collaborators behind `Arc`s so runs for different consultants
/// may execute concurrently; the engine itself keeps no mutable state.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use payroll_engine::codes::CodeTable;
/// use payroll_engine::engine::SalaryEngine;
/// use payroll_engine::ledger::RecordingLedger;
/// use payroll_engine::store::{
///     InMemoryCalculationStore, InMemoryProfileStore, InMemorySessionSource,
/// };
///
/// let engine = SalaryEngine::new(
///     Arc::new(InMemoryProfileStore::new()),
///     Arc::new(InMemorySessionSource::new()),
///     Arc::new(InMemoryCalculationStore::new()),
///     Arc::new(CodeTable::new()),
///     Arc::new(RecordingLedger::new()),
/// );
///
/// // No active profile yet: the run is rejected before anything is written.
/// assert!(engine.calculate_freelance_salary(1, "2025-01", "TENTH").is_err());
/// ```
pub struct SalaryEngine {
    profiles: Arc<dyn ProfileStore>,
    sessions: Arc<dyn SessionSource>,
    calculations: Arc<dyn CalculationStore>,
    codes: Arc<dyn CodeLookup>,
    ledger: Arc<dyn LedgerClient>,
}

impl SalaryEngine {
    /// Creates an engine over the given collaborators.
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        sessions: Arc<dyn SessionSource>,
        calculations: Arc<dyn CalculationStore>,
        codes: Arc<dyn CodeLookup>,
        ledger: Arc<dyn LedgerClient>,
    ) -> Self {
        Self {
            profiles,
            sessions,
            calculations,
            codes,
            ledger,
        }
    }

    /// Calculates freelance salary for one consultant and period.
    ///
    /// Base pay is the session rate times the completed-session count within
    /// the work month; option pay adds the configured flat bonus for every
    /// completed session whose consultation type matches. Recomputing a
    /// period replaces the prior record wholesale.
    ///
    /// # Errors
    ///
    /// * [`PayrollError::InvalidPeriod`] for a malformed period token.
    /// * [`PayrollError::ProfileNotFound`] when no active profile exists.
    /// * [`PayrollError::ProfileTypeMismatch`] when the active profile is not
    ///   freelance.
    ///
    /// All of these are checked before any write; on error no durable record
    /// is added for the period.
    pub fn calculate_freelance_salary(
        &self,
        consultant_id: i64,
        period: &str,
        pay_day_code: &str,
    ) -> PayrollResult<SalaryCalculation> {
        let pay_period = resolve_pay_period(period, pay_day_code, self.codes.as_ref())?;
        let profile = self.require_profile(consultant_id, EmploymentType::Freelance)?;

        self.replace_existing(consultant_id, period)?;

        let session_count = self
            .sessions
            .count_completed_sessions(consultant_id, &pay_period)?;
        let grade = self.profiles.consultant_grade(consultant_id);
        let base = calculate_base_pay(
            &profile,
            grade.as_deref(),
            session_count,
            self.codes.as_ref(),
        );

        let completed = self
            .sessions
            .list_completed_sessions(consultant_id, &pay_period)?;
        let rates = option_rates(self.codes.as_ref());
        let options = calculate_option_pay(&completed, &rates);

        info!(
            consultant_id,
            period,
            session_count,
            base_amount = %base.amount,
            option_amount = %options.amount,
            "calculating freelance salary"
        );

        let mut calculation = SalaryCalculation::new(
            consultant_id,
            profile.id,
            &pay_period,
            base.amount,
            options.amount,
            session_count,
        );
        calculation.mark_calculated();
        self.calculations.save(&calculation)?;

        let items = calculate_tax(
            EmploymentType::Freelance,
            profile.business_registered,
            calculation.gross_amount,
        )?;
        self.attach_tax(&mut calculation, items.clone())?;

        calculation.detail = render_freelance_detail(&base, session_count, &options, &items);
        calculation.updated_at = Utc::now();
        self.calculations.save(&calculation)?;

        self.emit_expense(&calculation, &profile);

        Ok(calculation)
    }

    /// Calculates regular-employment salary for one consultant and period.
    ///
    /// Gross pay is the supplied monthly base salary; there is no session
    /// aggregation and option pay is always zero. Tax uses the progressive
    /// bracket regime.
    ///
    /// # Errors
    ///
    /// In addition to the freelance path's validation errors, a negative
    /// `base_salary` is rejected with [`PayrollError::InvalidAmount`] before
    /// any write.
    pub fn calculate_regular_salary(
        &self,
        consultant_id: i64,
        period: &str,
        base_salary: Decimal,
        pay_day_code: &str,
    ) -> PayrollResult<SalaryCalculation> {
        if base_salary < Decimal::ZERO {
            return Err(PayrollError::InvalidAmount {
                amount: base_salary,
            });
        }

        let pay_period = resolve_pay_period(period, pay_day_code, self.codes.as_ref())?;
        let profile = self.require_profile(consultant_id, EmploymentType::Regular)?;

        self.replace_existing(consultant_id, period)?;

        info!(
            consultant_id,
            period,
            %base_salary,
            "calculating regular salary"
        );

        let mut calculation = SalaryCalculation::new(
            consultant_id,
            profile.id,
            &pay_period,
            base_salary,
            Decimal::ZERO,
            0,
        );
        calculation.mark_calculated();
        self.calculations.save(&calculation)?;

        let items = calculate_tax(EmploymentType::Regular, false, calculation.gross_amount)?;
        self.attach_tax(&mut calculation, items.clone())?;

        calculation.detail = render_regular_detail(base_salary, &items);
        calculation.updated_at = Utc::now();
        self.calculations.save(&calculation)?;

        self.emit_expense(&calculation, &profile);

        Ok(calculation)
    }

    /// Removes zero-gross duplicates left over from before the idempotency
    /// guard existed.
    ///
    /// For every consultant, calculations are grouped by period; where a
    /// period holds more than one record, every record with a gross of
    /// exactly zero is deleted. Returns the number of deleted records.
    pub fn cleanup_duplicate_calculations(&self) -> PayrollResult<usize> {
        let mut deleted = 0;

        for consultant_id in self.calculations.distinct_consultant_ids()? {
            let mut by_period: HashMap<String, Vec<SalaryCalculation>> = HashMap::new();
            for calculation in self.calculations.find_by_consultant(consultant_id)? {
                by_period
                    .entry(calculation.period.clone())
                    .or_default()
                    .push(calculation);
            }

            for (period, group) in by_period {
                if group.len() <= 1 {
                    continue;
                }
                for calculation in group.iter().filter(|c| c.gross_amount == Decimal::ZERO) {
                    warn!(
                        consultant_id,
                        %period,
                        calculation_id = %calculation.id,
                        "removing zero-gross duplicate calculation"
                    );
                    self.calculations.delete(calculation.id)?;
                    deleted += 1;
                }
            }
        }

        info!(deleted, "duplicate calculation cleanup finished");
        Ok(deleted)
    }

    /// Approves a calculation for payment.
    pub fn approve_calculation(&self, id: Uuid) -> PayrollResult<SalaryCalculation> {
        let mut calculation = self
            .calculations
            .find_by_id(id)?
            .ok_or(PayrollError::CalculationNotFound { id })?;

        calculation.approve();
        self.calculations.save(&calculation)?;
        Ok(calculation)
    }

    /// Records payment of an approved calculation.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::NotPayable`] unless the calculation is in the
    /// approved state.
    pub fn mark_as_paid(&self, id: Uuid) -> PayrollResult<SalaryCalculation> {
        let mut calculation = self
            .calculations
            .find_by_id(id)?
            .ok_or(PayrollError::CalculationNotFound { id })?;

        if !calculation.is_payable() {
            return Err(PayrollError::NotPayable {
                id,
                status: calculation.status,
            });
        }

        calculation.mark_paid();
        self.calculations.save(&calculation)?;
        Ok(calculation)
    }

    /// Lists a consultant's calculations, newest first.
    pub fn calculations_for_consultant(
        &self,
        consultant_id: i64,
    ) -> PayrollResult<Vec<SalaryCalculation>> {
        self.calculations.find_by_consultant(consultant_id)
    }

    /// Returns the calculation for a (consultant, period) pair, if any.
    pub fn calculation_for_period(
        &self,
        consultant_id: i64,
        period: &str,
    ) -> PayrollResult<Option<SalaryCalculation>> {
        self.calculations
            .find_by_consultant_and_period(consultant_id, period)
    }

    /// Lists the tax line items attached to a calculation.
    pub fn tax_line_items(&self, calculation_id: Uuid) -> PayrollResult<Vec<TaxLineItem>> {
        self.calculations.tax_line_items(calculation_id)
    }

    /// Aggregate salary statistics for one period.
    pub fn monthly_statistics(&self, period: &str) -> PayrollResult<MonthlyStatistics> {
        let calculations = self.calculations.find_by_period(period)?;
        Ok(statistics::monthly_statistics(period, &calculations))
    }

    /// Tax totals by type and the insurance aggregate for one period.
    pub fn tax_statistics(&self, period: &str) -> PayrollResult<TaxStatistics> {
        let calculations = self.calculations.find_by_period(period)?;
        let mut items = Vec::new();
        for calculation in &calculations {
            items.extend(self.calculations.tax_line_items(calculation.id)?);
        }
        Ok(statistics::tax_statistics(period, &calculations, &items))
    }

    /// Resolves the consultant's active profile and checks its type.
    fn require_profile(
        &self,
        consultant_id: i64,
        expected: EmploymentType,
    ) -> PayrollResult<CompensationProfile> {
        let profile = self
            .profiles
            .active_profile(consultant_id)?
            .ok_or(PayrollError::ProfileNotFound { consultant_id })?;

        if profile.employment_type != expected {
            return Err(PayrollError::ProfileTypeMismatch {
                consultant_id,
                expected: expected.to_string(),
                actual: profile.employment_type.to_string(),
            });
        }

        Ok(profile)
    }

    /// The idempotency guard: deletes any prior calculation for the pair.
    ///
    /// A full replace rather than a merge; the second run's values win.
    fn replace_existing(&self, consultant_id: i64, period: &str) -> PayrollResult<()> {
        if let Some(existing) = self
            .calculations
            .find_by_consultant_and_period(consultant_id, period)?
        {
            warn!(
                consultant_id,
                period,
                calculation_id = %existing.id,
                "replacing existing calculation for period"
            );
            self.calculations.delete(existing.id)?;
        }
        Ok(())
    }

    /// Persists the tax line items and totals them onto the calculation.
    fn attach_tax(
        &self,
        calculation: &mut SalaryCalculation,
        items: Vec<TaxLineItem>,
    ) -> PayrollResult<()> {
        let mut total_tax = Decimal::ZERO;
        for mut item in items {
            item.attach_to(calculation.id);
            self.calculations.save_tax_line_item(&item)?;
            total_tax += item.tax_amount;
        }
        calculation.tax_amount = total_tax;
        Ok(())
    }

    /// Best-effort expense emission; failures are logged and swallowed.
    fn emit_expense(&self, calculation: &SalaryCalculation, profile: &CompensationProfile) {
        let consultant_name = self
            .profiles
            .consultant_name(calculation.consultant_id)
            .unwrap_or_else(|| format!("consultant {}", calculation.consultant_id));
        let request = build_salary_expense_request(calculation, profile, &consultant_name);

        match self.ledger.create_expense_transaction(&request) {
            Ok(transaction_id) => {
                info!(
                    transaction_id,
                    consultant_id = calculation.consultant_id,
                    amount = %request.amount,
                    "salary expense transaction created"
                );
            }
            Err(error) => {
                warn!(
                    consultant_id = calculation.consultant_id,
                    %error,
                    "salary expense emission failed, calculation remains valid"
                );
            }
        }
    }
}

//! The calculation store contract.

use std::sync::Mutex;

use uuid::Uuid;

use crate::error::PayrollResult;
use crate::models::{SalaryCalculation, TaxLineItem};

use super::lock;

/// Persistence for salary calculations and their tax line items.
///
/// The engine's delete-then-insert idempotency guard relies on this
/// collaborator serializing the delete-and-recreate sequence per
/// (consultant, period) pair; concurrent duplicate runs for the same pair
/// resolve as last-writer-wins.
pub trait CalculationStore: Send + Sync {
    /// Finds a calculation by its id.
    fn find_by_id(&self, id: Uuid) -> PayrollResult<Option<SalaryCalculation>>;

    /// Finds the calculation for a (consultant, period) pair, if one exists.
    fn find_by_consultant_and_period(
        &self,
        consultant_id: i64,
        period: &str,
    ) -> PayrollResult<Option<SalaryCalculation>>;

    /// Lists all calculations for a consultant, newest first.
    fn find_by_consultant(&self, consultant_id: i64) -> PayrollResult<Vec<SalaryCalculation>>;

    /// Lists all calculations for a period.
    fn find_by_period(&self, period: &str) -> PayrollResult<Vec<SalaryCalculation>>;

    /// Lists every consultant id that has at least one calculation.
    fn distinct_consultant_ids(&self) -> PayrollResult<Vec<i64>>;

    /// Inserts or replaces a calculation by id.
    fn save(&self, calculation: &SalaryCalculation) -> PayrollResult<()>;

    /// Deletes a calculation and its tax line items.
    fn delete(&self, id: Uuid) -> PayrollResult<()>;

    /// Persists a tax line item.
    fn save_tax_line_item(&self, item: &TaxLineItem) -> PayrollResult<()>;

    /// Lists the tax line items attached to a calculation.
    fn tax_line_items(&self, calculation_id: Uuid) -> PayrollResult<Vec<TaxLineItem>>;
}

/// In-memory [`CalculationStore`] used by tests.
#[derive(Debug, Default)]
pub struct InMemoryCalculationStore {
    calculations: Mutex<Vec<SalaryCalculation>>,
    tax_items: Mutex<Vec<TaxLineItem>>,
}

impl InMemoryCalculationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored calculations, across all consultants.
    pub fn calculation_count(&self) -> usize {
        self.calculations.lock().map(|c| c.len()).unwrap_or(0)
    }
}

impl CalculationStore for InMemoryCalculationStore {
    fn find_by_id(&self, id: Uuid) -> PayrollResult<Option<SalaryCalculation>> {
        let calculations = lock(&self.calculations)?;
        Ok(calculations.iter().find(|c| c.id == id).cloned())
    }

    fn find_by_consultant_and_period(
        &self,
        consultant_id: i64,
        period: &str,
    ) -> PayrollResult<Option<SalaryCalculation>> {
        let calculations = lock(&self.calculations)?;
        Ok(calculations
            .iter()
            .find(|c| c.consultant_id == consultant_id && c.period == period)
            .cloned())
    }

    fn find_by_consultant(&self, consultant_id: i64) -> PayrollResult<Vec<SalaryCalculation>> {
        let calculations = lock(&self.calculations)?;
        let mut found: Vec<SalaryCalculation> = calculations
            .iter()
            .filter(|c| c.consultant_id == consultant_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    fn find_by_period(&self, period: &str) -> PayrollResult<Vec<SalaryCalculation>> {
        let calculations = lock(&self.calculations)?;
        Ok(calculations
            .iter()
            .filter(|c| c.period == period)
            .cloned()
            .collect())
    }

    fn distinct_consultant_ids(&self) -> PayrollResult<Vec<i64>> {
        let calculations = lock(&self.calculations)?;
        let mut ids: Vec<i64> = calculations.iter().map(|c| c.consultant_id).collect();
        ids.sort_unstable();
        ids.dedup();
        Ok(ids)
    }

    fn save(&self, calculation: &SalaryCalculation) -> PayrollResult<()> {
        let mut calculations = lock(&self.calculations)?;
        calculations.retain(|c| c.id != calculation.id);
        calculations.push(calculation.clone());
        Ok(())
    }

    fn delete(&self, id: Uuid) -> PayrollResult<()> {
        lock(&self.calculations)?.retain(|c| c.id != id);
        lock(&self.tax_items)?.retain(|t| t.calculation_id != Some(id));
        Ok(())
    }

    fn save_tax_line_item(&self, item: &TaxLineItem) -> PayrollResult<()> {
        let mut items = lock(&self.tax_items)?;
        items.retain(|t| t.id != item.id);
        items.push(item.clone());
        Ok(())
    }

    fn tax_line_items(&self, calculation_id: Uuid) -> PayrollResult<Vec<TaxLineItem>> {
        let items = lock(&self.tax_items)?;
        Ok(items
            .iter()
            .filter(|t| t.calculation_id == Some(calculation_id))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PayPeriod;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn pay_period(period: &str, month: u32) -> PayPeriod {
        PayPeriod {
            period: period.to_string(),
            work_start: NaiveDate::from_ymd_opt(2025, month, 1).unwrap(),
            work_end: NaiveDate::from_ymd_opt(2025, month, 28).unwrap(),
            pay_date: NaiveDate::from_ymd_opt(2025, month + 1, 10).unwrap(),
        }
    }

    fn calculation(consultant_id: i64, period: &str, month: u32) -> SalaryCalculation {
        SalaryCalculation::new(
            consultant_id,
            Uuid::new_v4(),
            &pay_period(period, month),
            Decimal::from(90_000),
            Decimal::ZERO,
            3,
        )
    }

    #[test]
    fn test_save_and_find_by_pair() {
        let store = InMemoryCalculationStore::new();
        let calc = calculation(1, "2025-01", 1);
        store.save(&calc).unwrap();

        let found = store
            .find_by_consultant_and_period(1, "2025-01")
            .unwrap()
            .unwrap();
        assert_eq!(found.id, calc.id);
        assert!(store.find_by_consultant_and_period(1, "2025-02").unwrap().is_none());
        assert!(store.find_by_consultant_and_period(2, "2025-01").unwrap().is_none());
    }

    #[test]
    fn test_save_replaces_by_id() {
        let store = InMemoryCalculationStore::new();
        let mut calc = calculation(1, "2025-01", 1);
        store.save(&calc).unwrap();

        calc.tax_amount = Decimal::from(2_970);
        store.save(&calc).unwrap();

        assert_eq!(store.calculation_count(), 1);
        let found = store.find_by_id(calc.id).unwrap().unwrap();
        assert_eq!(found.tax_amount, Decimal::from(2_970));
    }

    #[test]
    fn test_delete_cascades_tax_items() {
        let store = InMemoryCalculationStore::new();
        let calc = calculation(1, "2025-01", 1);
        store.save(&calc).unwrap();

        let mut item = TaxLineItem::new(
            "WITHHOLDING_TAX",
            "Withholding Tax",
            Decimal::new(33, 3),
            calc.gross_amount,
            "",
        );
        item.attach_to(calc.id);
        store.save_tax_line_item(&item).unwrap();
        assert_eq!(store.tax_line_items(calc.id).unwrap().len(), 1);

        store.delete(calc.id).unwrap();
        assert!(store.find_by_id(calc.id).unwrap().is_none());
        assert!(store.tax_line_items(calc.id).unwrap().is_empty());
    }

    #[test]
    fn test_distinct_consultant_ids() {
        let store = InMemoryCalculationStore::new();
        store.save(&calculation(2, "2025-01", 1)).unwrap();
        store.save(&calculation(1, "2025-01", 1)).unwrap();
        store.save(&calculation(1, "2025-02", 2)).unwrap();

        assert_eq!(store.distinct_consultant_ids().unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_find_by_period() {
        let store = InMemoryCalculationStore::new();
        store.save(&calculation(1, "2025-01", 1)).unwrap();
        store.save(&calculation(2, "2025-01", 1)).unwrap();
        store.save(&calculation(1, "2025-02", 2)).unwrap();

        assert_eq!(store.find_by_period("2025-01").unwrap().len(), 2);
        assert_eq!(store.find_by_period("2025-02").unwrap().len(), 1);
        assert!(store.find_by_period("2025-03").unwrap().is_empty());
    }
}

//! Code table loading functionality.
//!
//! This module provides the [`CodeTable`] type: an in-memory implementation
//! of [`CodeLookup`] that can be built programmatically or loaded from a
//! YAML file.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{PayrollError, PayrollResult};

use super::types::{CodeEntry, CodeLookup};

/// File structure of a YAML code table.
#[derive(Debug, Deserialize)]
struct CodeTableFile {
    codes: Vec<CodeEntry>,
}

/// An in-memory code table.
///
/// Backs the [`CodeLookup`] contract for both production use (loaded from a
/// YAML file kept alongside deployment configuration) and tests (built with
/// [`CodeTable::insert`]).
///
/// # File Format
///
/// ```text
/// codes:
///   - group: SALARY_PAY_DAY
///     value: TENTH
///     display_name: 10th of the following month
///     extra:
///       dayOfMonth: 10
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::codes::{CodeLookup, CodeTable, PAY_DAY_GROUP};
///
/// let table = CodeTable::load("./config/salary_codes.yaml")?;
/// let code = table.get_code(PAY_DAY_GROUP, "TENTH").unwrap();
/// assert_eq!(code.day_of_month(), Some(10));
/// # Ok::<(), payroll_engine::error::PayrollError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct CodeTable {
    entries: HashMap<(String, String), CodeEntry>,
}

impl CodeTable {
    /// Creates an empty code table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a code table from a YAML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the YAML file (e.g. "./config/salary_codes.yaml")
    ///
    /// # Returns
    ///
    /// Returns a `CodeTable` on success, or an error if the file is missing
    /// (`CodeTableNotFound`) or contains invalid YAML (`CodeTableParse`).
    pub fn load<P: AsRef<Path>>(path: P) -> PayrollResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PayrollError::CodeTableNotFound {
            path: path_str.clone(),
        })?;

        let file: CodeTableFile =
            serde_yaml::from_str(&content).map_err(|e| PayrollError::CodeTableParse {
                path: path_str,
                message: e.to_string(),
            })?;

        let mut table = Self::new();
        for entry in file.codes {
            table.insert(entry);
        }
        Ok(table)
    }

    /// Inserts a code entry, replacing any prior entry with the same group
    /// and value.
    pub fn insert(&mut self, entry: CodeEntry) {
        self.entries
            .insert((entry.group.clone(), entry.value.clone()), entry);
    }

    /// Returns the number of entries in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CodeLookup for CodeTable {
    fn get_code(&self, group: &str, value: &str) -> Option<CodeEntry> {
        self.entries
            .get(&(group.to_string(), value.to_string()))
            .cloned()
    }

    fn codes_in_group(&self, group: &str) -> Vec<CodeEntry> {
        let mut codes: Vec<CodeEntry> = self
            .entries
            .values()
            .filter(|e| e.group == group)
            .cloned()
            .collect();
        codes.sort_by(|a, b| a.value.cmp(&b.value));
        codes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::{FREELANCE_RATE_GROUP, OPTION_TYPE_GROUP, PAY_DAY_GROUP};
    use rust_decimal::Decimal;
    use serde_json::json;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn table_path() -> &'static str {
        "./config/salary_codes.yaml"
    }

    #[test]
    fn test_load_valid_table() {
        let result = CodeTable::load(table_path());
        assert!(result.is_ok(), "Failed to load table: {:?}", result.err());
        assert!(!result.unwrap().is_empty());
    }

    #[test]
    fn test_load_missing_file_returns_error() {
        let result = CodeTable::load("/nonexistent/codes.yaml");
        match result {
            Err(PayrollError::CodeTableNotFound { path }) => {
                assert!(path.contains("codes.yaml"));
            }
            other => panic!("Expected CodeTableNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_pay_day_codes_loaded() {
        let table = CodeTable::load(table_path()).unwrap();

        let tenth = table.get_code(PAY_DAY_GROUP, "TENTH").unwrap();
        assert_eq!(tenth.day_of_month(), Some(10));

        let end_of_month = table.get_code(PAY_DAY_GROUP, "END_OF_MONTH").unwrap();
        assert_eq!(end_of_month.day_of_month(), Some(0));
    }

    #[test]
    fn test_freelance_rates_loaded() {
        let table = CodeTable::load(table_path()).unwrap();

        let junior = table.get_code(FREELANCE_RATE_GROUP, "JUNIOR_RATE").unwrap();
        assert_eq!(junior.rate(), Some(dec("30000")));

        let senior = table.get_code(FREELANCE_RATE_GROUP, "SENIOR_RATE").unwrap();
        assert_eq!(senior.rate(), Some(dec("50000")));
    }

    #[test]
    fn test_option_bonuses_loaded() {
        let table = CodeTable::load(table_path()).unwrap();

        let options = table.codes_in_group(OPTION_TYPE_GROUP);
        assert!(options.len() >= 2);
        let initial = options
            .iter()
            .find(|o| o.value == "INITIAL_CONSULTATION")
            .unwrap();
        assert_eq!(initial.base_amount(), Some(dec("5000")));
    }

    #[test]
    fn test_get_code_unknown_returns_none() {
        let table = CodeTable::load(table_path()).unwrap();
        assert!(table.get_code(PAY_DAY_GROUP, "UNKNOWN").is_none());
        assert!(table.get_code("UNKNOWN_GROUP", "TENTH").is_none());
    }

    #[test]
    fn test_insert_replaces_existing() {
        let mut table = CodeTable::new();
        table.insert(
            CodeEntry::new(PAY_DAY_GROUP, "TENTH", "10th").with_extra(json!({"dayOfMonth": 10})),
        );
        table.insert(
            CodeEntry::new(PAY_DAY_GROUP, "TENTH", "10th").with_extra(json!({"dayOfMonth": 12})),
        );

        assert_eq!(table.len(), 1);
        let code = table.get_code(PAY_DAY_GROUP, "TENTH").unwrap();
        assert_eq!(code.day_of_month(), Some(12));
    }

    #[test]
    fn test_codes_in_group_sorted_by_value() {
        let mut table = CodeTable::new();
        table.insert(CodeEntry::new(OPTION_TYPE_GROUP, "FAMILY_CONSULTATION", "Family"));
        table.insert(CodeEntry::new(OPTION_TYPE_GROUP, "COUPLE_CONSULTATION", "Couple"));
        table.insert(CodeEntry::new(PAY_DAY_GROUP, "TENTH", "10th"));

        let values: Vec<String> = table
            .codes_in_group(OPTION_TYPE_GROUP)
            .into_iter()
            .map(|c| c.value)
            .collect();
        assert_eq!(values, vec!["COUPLE_CONSULTATION", "FAMILY_CONSULTATION"]);
    }

    #[test]
    fn test_parse_error_reports_path() {
        use std::io::Write;

        let dir = std::env::temp_dir().join("payroll_engine_code_table_test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.yaml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "codes: {{ not valid").unwrap();

        let result = CodeTable::load(&path);
        match result {
            Err(PayrollError::CodeTableParse { path: p, .. }) => {
                assert!(p.contains("broken.yaml"));
            }
            other => panic!("Expected CodeTableParse, got {:?}", other),
        }
    }
}

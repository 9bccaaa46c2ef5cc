//! The multi-year financial record.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::amount::parse_amount;
use super::fields;

/// Per field, per fiscal year, the value as the user entered it.
///
/// Values stay strings so blanks and partial input survive a save/load
/// cycle untouched. Serializes as `{ "<field>": { "<year>": "<value>" } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FinancialRecord {
    fields: BTreeMap<String, BTreeMap<i32, String>>,
}

impl FinancialRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A record with every known field present and blank for each of `years`.
    #[must_use]
    pub fn blank(years: &[i32]) -> Self {
        let fields = fields::all()
            .map(|field| {
                let per_year = years.iter().map(|&year| (year, String::new())).collect();
                (field.to_string(), per_year)
            })
            .collect();
        Self { fields }
    }

    /// Merge a previously saved record into the complete field shape for `years`.
    ///
    /// Unknown fields and years outside `years` are dropped; missing values
    /// become blank.
    #[must_use]
    pub fn conform_to(&self, years: &[i32]) -> Self {
        let mut shaped = Self::blank(years);
        for (field, per_year) in &mut shaped.fields {
            for (year, value) in per_year.iter_mut() {
                if let Some(saved) = self.get(field, *year) {
                    *value = saved.to_string();
                }
            }
        }
        shaped
    }

    /// Raw value for `field` in `year`, if the cell exists.
    #[must_use]
    pub fn get(&self, field: &str, year: i32) -> Option<&str> {
        self.fields
            .get(field)
            .and_then(|per_year| per_year.get(&year))
            .map(String::as_str)
    }

    /// Parsed value for `field` in `year`; missing or malformed cells are 0.
    #[must_use]
    pub fn amount(&self, field: &str, year: i32) -> f64 {
        self.get(field, year).map_or(0.0, parse_amount)
    }

    /// Store a raw value, creating the field if needed.
    pub fn set(&mut self, field: &str, year: i32, value: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .insert(year, value.into());
    }

    /// Whether `field` is part of this record's shape at all.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Every year present in any field, ascending.
    #[must_use]
    pub fn years(&self) -> BTreeSet<i32> {
        self.fields
            .values()
            .flat_map(|per_year| per_year.keys().copied())
            .collect()
    }

    /// Field names present in the record, alphabetically.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Per-year values of `field`.
    #[must_use]
    pub fn field(&self, field: &str) -> Option<&BTreeMap<i32, String>> {
        self.fields.get(field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn blank_record_has_every_field_for_every_year() {
        let record = FinancialRecord::blank(&[2023, 2024]);
        assert_eq!(record.field_names().count(), 37);
        assert_eq!(record.get(fields::REVENUE, 2023), Some(""));
        assert_eq!(record.get(fields::ADDBACKS_TOTAL, 2024), Some(""));
        assert_eq!(record.years().into_iter().collect::<Vec<_>>(), vec![2023, 2024]);
    }

    #[test]
    fn serializes_with_year_keys_as_strings() {
        let mut record = FinancialRecord::new();
        record.set(fields::REVENUE, 2024, "5000000");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, serde_json::json!({ "revenue": { "2024": "5000000" } }));

        let back: FinancialRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn conform_keeps_known_values_and_drops_the_rest() {
        let mut saved = FinancialRecord::new();
        saved.set(fields::REVENUE, 2024, "100");
        saved.set(fields::REVENUE, 2019, "1");
        saved.set("legacy_field", 2024, "9");

        let shaped = saved.conform_to(&[2023, 2024]);
        assert_eq!(shaped.get(fields::REVENUE, 2024), Some("100"));
        assert_eq!(shaped.get(fields::REVENUE, 2023), Some(""));
        assert_eq!(shaped.get(fields::REVENUE, 2019), None);
        assert!(!shaped.has_field("legacy_field"));
        assert_eq!(shaped.get(fields::DEPRECIATION, 2023), Some(""));
    }

    #[test]
    fn amount_of_missing_or_garbage_cell_is_zero() {
        let mut record = FinancialRecord::new();
        record.set(fields::CASH, 2024, "n/a");
        assert!(record.amount(fields::CASH, 2024).abs() < f64::EPSILON);
        assert!(record.amount(fields::CASH, 2020).abs() < f64::EPSILON);
        assert!(record.amount(fields::EQUITY, 2024).abs() < f64::EPSILON);
    }
}

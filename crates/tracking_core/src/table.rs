//! # Tracking Table
//!
//! Column-oriented storage for sampled tracking data.
//!
//! Every column holds exactly `len()` values. Missing samples are `NaN`;
//! integer fields such as `Period` are stored as floats.

use crate::error::{Result, TrackingError};
use fxhash::FxHashMap;

/// Elapsed match time in seconds
pub const TIME_COLUMN: &str = "Time [s]";

/// Match segment identifier (1 = first half, 2 = second half)
pub const PERIOD_COLUMN: &str = "Period";

/// A named column of samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<f64>,
}

/// Time-indexed table of tracking samples, one row per frame.
///
/// Column order is insertion order. Replacing a column keeps its position,
/// new columns are appended.
#[derive(Debug, Clone, Default)]
pub struct TrackingTable {
    rows: usize,
    columns: Vec<Column>,
    index: FxHashMap<String, usize>,
}

impl TrackingTable {
    /// Create an empty table with a fixed row count and no columns.
    pub fn new(rows: usize) -> Self {
        Self {
            rows,
            columns: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// Build a table from `(name, values)` pairs.
    ///
    /// The first column fixes the row count; every other column must match it.
    pub fn from_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: Into<String>,
    {
        let mut iter = columns.into_iter().peekable();
        let rows = iter.peek().map(|(_, values)| values.len()).unwrap_or(0);
        let mut table = Self::new(rows);
        for (name, values) in iter {
            table.push_column(name, values)?;
        }
        Ok(table)
    }

    /// Number of rows (frames).
    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.index
            .get(name)
            .map(|&idx| self.columns[idx].values.as_slice())
    }

    /// Like [`column`](Self::column) but a missing column is an error.
    pub fn require_column(&self, name: &str) -> Result<&[f64]> {
        self.column(name)
            .ok_or_else(|| TrackingError::MissingColumn(name.to_string()))
    }

    /// The `Time [s]` column.
    pub fn time(&self) -> Result<&[f64]> {
        self.require_column(TIME_COLUMN)
    }

    /// The `Period` column, if the table has one.
    pub fn period(&self) -> Option<&[f64]> {
        self.column(PERIOD_COLUMN)
    }

    /// Append a new column. Fails if the name already exists.
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<()> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(TrackingError::DuplicateColumn(name));
        }
        self.check_len(&name, &values)?;
        self.index.insert(name.clone(), self.columns.len());
        self.columns.push(Column { name, values });
        Ok(())
    }

    /// Insert a column, overwriting any existing column with the same name.
    pub fn set_column(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<()> {
        let name = name.into();
        self.check_len(&name, &values)?;
        match self.index.get(&name) {
            Some(&idx) => self.columns[idx].values = values,
            None => {
                self.index.insert(name.clone(), self.columns.len());
                self.columns.push(Column { name, values });
            }
        }
        Ok(())
    }

    /// Remove every column whose name matches `predicate`; returns the removed names.
    pub fn drop_columns<F>(&mut self, predicate: F) -> Vec<String>
    where
        F: Fn(&str) -> bool,
    {
        let mut dropped = Vec::new();
        self.columns.retain(|c| {
            if predicate(&c.name) {
                dropped.push(c.name.clone());
                false
            } else {
                true
            }
        });
        if !dropped.is_empty() {
            self.rebuild_index();
        }
        dropped
    }

    fn check_len(&self, name: &str, values: &[f64]) -> Result<()> {
        if values.len() != self.rows {
            return Err(TrackingError::LengthMismatch {
                column: name.to_string(),
                expected: self.rows,
                found: values.len(),
            });
        }
        Ok(())
    }

    fn rebuild_index(&mut self) {
        self.index = self
            .columns
            .iter()
            .enumerate()
            .map(|(idx, c)| (c.name.clone(), idx))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> TrackingTable {
        TrackingTable::from_columns(vec![
            (TIME_COLUMN, vec![0.0, 0.04, 0.08]),
            ("Home_1_x", vec![1.0, 2.0, 3.0]),
            ("Home_1_y", vec![0.0, 0.0, f64::NAN]),
        ])
        .unwrap()
    }

    #[test]
    fn test_from_columns_sets_row_count() {
        let table = sample_table();
        assert_eq!(table.len(), 3);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.column("Home_1_x"), Some(&[1.0, 2.0, 3.0][..]));
        assert!(table.column("Home_1_vx").is_none());
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let result = TrackingTable::from_columns(vec![
            (TIME_COLUMN, vec![0.0, 0.04]),
            ("Home_1_x", vec![1.0]),
        ]);
        assert!(matches!(
            result,
            Err(TrackingError::LengthMismatch { expected: 2, found: 1, .. })
        ));
    }

    #[test]
    fn test_duplicate_push_rejected() {
        let mut table = sample_table();
        let err = table.push_column("Home_1_x", vec![0.0; 3]).unwrap_err();
        assert!(matches!(err, TrackingError::DuplicateColumn(_)));
    }

    #[test]
    fn test_set_column_replaces_in_place() {
        let mut table = sample_table();
        table.set_column("Home_1_x", vec![9.0, 9.0, 9.0]).unwrap();
        table.set_column("Home_1_vx", vec![0.0; 3]).unwrap();

        let names: Vec<&str> = table.column_names().collect();
        assert_eq!(names, vec![TIME_COLUMN, "Home_1_x", "Home_1_y", "Home_1_vx"]);
        assert_eq!(table.column("Home_1_x"), Some(&[9.0, 9.0, 9.0][..]));
    }

    #[test]
    fn test_drop_columns_rebuilds_index() {
        let mut table = sample_table();
        let dropped = table.drop_columns(|name| name.ends_with("_x"));
        assert_eq!(dropped, vec!["Home_1_x".to_string()]);
        assert!(!table.has_column("Home_1_x"));
        assert_eq!(table.column("Home_1_y").map(|v| v.len()), Some(3));
        // Re-adding after a drop appends at the end
        table.push_column("Home_1_x", vec![0.0; 3]).unwrap();
        assert_eq!(table.column_names().last(), Some("Home_1_x"));
    }

    #[test]
    fn test_missing_time_column() {
        let table = TrackingTable::from_columns(vec![("Home_1_x", vec![1.0])]).unwrap();
        assert!(matches!(table.time(), Err(TrackingError::MissingColumn(_))));
        assert!(table.period().is_none());
    }

    #[test]
    fn test_empty_table() {
        let table = TrackingTable::from_columns(Vec::<(String, Vec<f64>)>::new()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.column_count(), 0);
    }
}

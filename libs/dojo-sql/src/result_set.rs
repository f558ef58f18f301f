// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.
use std::collections::HashMap;

use crate::database_error::DatabaseError;

/// A single decoded field.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Int(i64),
    Float(f64),
    Text(String),
}

impl SqlValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            SqlValue::Null => "null",
            SqlValue::Int(_) => "integer",
            SqlValue::Float(_) => "floating point",
            SqlValue::Text(_) => "string",
        }
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Int(value)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Float(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(SqlValue::Null)
    }
}

/// The fully materialized rows returned by one statement.
///
/// Column names are only known when at least one row came back; an empty result has
/// neither rows nor columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    columns: Vec<String>,
    rows: Vec<Vec<SqlValue>>,
}

impl ResultSet {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<SqlValue>>) -> Self {
        Self { columns, rows }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn field_count(&self) -> usize {
        self.columns.len()
    }

    pub fn field_name(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(String::as_str)
    }

    pub fn value(&self, row: usize, index: usize) -> Option<&SqlValue> {
        self.rows.get(row).and_then(|values| values.get(index))
    }

    /// Build the name to position lookup for this result's columns.
    pub fn column_index(&self) -> ColumnIndex {
        ColumnIndex {
            positions: self
                .columns
                .iter()
                .enumerate()
                .map(|(position, name)| (name.clone(), position))
                .collect(),
        }
    }

    pub fn get_int(&self, row: usize, index: usize) -> Result<i64, DatabaseError> {
        match self.field(row, index)? {
            SqlValue::Int(value) => Ok(*value),
            other => Err(self.unexpected(row, index, "integer", other)),
        }
    }

    pub fn get_float(&self, row: usize, index: usize) -> Result<f64, DatabaseError> {
        match self.field(row, index)? {
            SqlValue::Float(value) => Ok(*value),
            // Integral columns widen without loss for the ranges stored here
            SqlValue::Int(value) => Ok(*value as f64),
            other => Err(self.unexpected(row, index, "floating point", other)),
        }
    }

    pub fn get_string(&self, row: usize, index: usize) -> Result<String, DatabaseError> {
        match self.field(row, index)? {
            SqlValue::Text(value) => Ok(value.clone()),
            other => Err(self.unexpected(row, index, "string", other)),
        }
    }

    pub fn get_optional_string(
        &self,
        row: usize,
        index: usize,
    ) -> Result<Option<String>, DatabaseError> {
        match self.field(row, index)? {
            SqlValue::Null => Ok(None),
            SqlValue::Text(value) => Ok(Some(value.clone())),
            other => Err(self.unexpected(row, index, "string or null", other)),
        }
    }

    fn field(&self, row: usize, index: usize) -> Result<&SqlValue, DatabaseError> {
        self.value(row, index).ok_or_else(|| {
            DatabaseError::MissingColumn(
                self.field_name(index)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("#{index}")),
            )
        })
    }

    fn unexpected(
        &self,
        row: usize,
        index: usize,
        expected: &'static str,
        found: &SqlValue,
    ) -> DatabaseError {
        DatabaseError::UnexpectedType {
            column: self.field_name(index).unwrap_or_default().to_string(),
            row,
            expected,
            found: found.type_name(),
        }
    }
}

/// Column name to position, computed once per [`ResultSet`].
#[derive(Debug, Clone)]
pub struct ColumnIndex {
    positions: HashMap<String, usize>,
}

impl ColumnIndex {
    pub fn position(&self, column: &str) -> Result<usize, DatabaseError> {
        self.positions
            .get(column)
            .copied()
            .ok_or_else(|| DatabaseError::MissingColumn(column.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResultSet {
        ResultSet::new(
            vec!["key".into(), "name".into(), "latitude".into(), "picture".into()],
            vec![vec![
                SqlValue::Int(7),
                "Hombu".into(),
                SqlValue::Float(-37.8),
                SqlValue::Null,
            ]],
        )
    }

    #[test]
    fn typed_accessors() {
        let result = sample();

        assert_eq!(result.row_count(), 1);
        assert_eq!(result.field_count(), 4);
        assert_eq!(result.field_name(1), Some("name"));
        assert_eq!(result.get_int(0, 0).unwrap(), 7);
        assert_eq!(result.get_string(0, 1).unwrap(), "Hombu");
        assert_eq!(result.get_float(0, 2).unwrap(), -37.8);
        assert_eq!(result.get_float(0, 0).unwrap(), 7.0);
        assert_eq!(result.get_optional_string(0, 3).unwrap(), None);
    }

    #[test]
    fn mismatched_types_name_the_column() {
        let result = sample();

        let err = result.get_int(0, 1).unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::UnexpectedType { ref column, row: 0, expected: "integer", found: "string" }
                if column == "name"
        ));
        assert!(result.get_string(0, 3).is_err());
    }

    #[test]
    fn column_index_lookup() {
        let index = sample().column_index();

        assert_eq!(index.position("latitude").unwrap(), 2);
        assert!(matches!(
            index.position("longitude"),
            Err(DatabaseError::MissingColumn(column)) if column == "longitude"
        ));
    }
}

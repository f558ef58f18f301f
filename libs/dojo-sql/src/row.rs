// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.
use crate::{
    database_error::DatabaseError,
    result_set::{ColumnIndex, ResultSet},
};

/// A record that can be read from one row of a [`ResultSet`].
///
/// `COLUMNS` lists every column `from_row` reads. [`project_rows`] checks them against the
/// result once, before any row is decoded.
pub trait FromRow: Sized {
    const COLUMNS: &'static [&'static str];

    fn from_row(row: &RowReader<'_>) -> Result<Self, DatabaseError>;
}

/// Name-based access to one row, backed by the column lookup of its result set.
pub struct RowReader<'a> {
    result: &'a ResultSet,
    columns: &'a ColumnIndex,
    row: usize,
}

impl RowReader<'_> {
    pub fn int(&self, column: &str) -> Result<i64, DatabaseError> {
        self.result.get_int(self.row, self.columns.position(column)?)
    }

    pub fn float(&self, column: &str) -> Result<f64, DatabaseError> {
        self.result
            .get_float(self.row, self.columns.position(column)?)
    }

    pub fn string(&self, column: &str) -> Result<String, DatabaseError> {
        self.result
            .get_string(self.row, self.columns.position(column)?)
    }

    pub fn optional_string(&self, column: &str) -> Result<Option<String>, DatabaseError> {
        self.result
            .get_optional_string(self.row, self.columns.position(column)?)
    }
}

/// Decode every row of `result` as a `T`, in result order.
pub fn project_rows<T: FromRow>(result: &ResultSet) -> Result<Vec<T>, DatabaseError> {
    if result.row_count() == 0 {
        return Ok(vec![]);
    }

    let columns = result.column_index();
    for column in T::COLUMNS {
        columns.position(column)?;
    }

    (0..result.row_count())
        .map(|row| {
            T::from_row(&RowReader {
                result,
                columns: &columns,
                row,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result_set::SqlValue;

    #[derive(Debug, PartialEq)]
    struct Contact {
        key: i64,
        name: String,
        facebook: Option<String>,
    }

    impl FromRow for Contact {
        const COLUMNS: &'static [&'static str] = &["key", "name", "facebook"];

        fn from_row(row: &RowReader<'_>) -> Result<Self, DatabaseError> {
            Ok(Contact {
                key: row.int("key")?,
                name: row.string("name")?,
                facebook: row.optional_string("facebook")?,
            })
        }
    }

    #[test]
    fn projects_rows_by_name_regardless_of_column_order() {
        let result = ResultSet::new(
            vec!["facebook".into(), "region".into(), "name".into(), "key".into()],
            vec![
                vec![SqlValue::Null, SqlValue::Int(3), "Ann".into(), SqlValue::Int(1)],
                vec!["fb/bo".into(), SqlValue::Int(3), "Bo".into(), SqlValue::Int(2)],
            ],
        );

        let contacts: Vec<Contact> = project_rows(&result).unwrap();

        assert_eq!(
            contacts,
            vec![
                Contact {
                    key: 1,
                    name: "Ann".into(),
                    facebook: None
                },
                Contact {
                    key: 2,
                    name: "Bo".into(),
                    facebook: Some("fb/bo".into())
                },
            ]
        );
    }

    #[test]
    fn missing_column_is_reported_before_decoding() {
        let result = ResultSet::new(
            vec!["key".into(), "name".into()],
            vec![vec![SqlValue::Int(1), "Ann".into()]],
        );

        let err = project_rows::<Contact>(&result).unwrap_err();
        assert!(matches!(err, DatabaseError::MissingColumn(column) if column == "facebook"));
    }

    #[test]
    fn empty_result_has_no_rows() {
        let contacts = project_rows::<Contact>(&ResultSet::empty()).unwrap();
        assert!(contacts.is_empty());
    }
}

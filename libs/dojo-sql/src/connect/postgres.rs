// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.
use std::str::FromStr;

use async_trait::async_trait;
use tokio_postgres::{
    Client, Config, NoTls, Row,
    types::{ToSql, Type},
};

use crate::{
    database_error::{DatabaseError, WithContext},
    query::Query,
    result_set::{ResultSet, SqlValue},
};

use super::{Connector, DatabaseConnection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionMode {
    ReadOnly,
    ReadWrite,
}

impl TransactionMode {
    pub fn update_config(self, config: &mut Config) {
        tracing::info!("Setting database transaction mode to {:?}", self);
        if self == TransactionMode::ReadOnly {
            let read_only_options = "-c default_transaction_read_only=on";
            match config.get_options() {
                Some(options) => {
                    config.options(format!("{options} {read_only_options}"));
                }
                None => {
                    config.options(read_only_options);
                }
            }
        }
    }
}

/// Connects directly (no pooling) to PostgreSQL for every request.
pub struct PostgresConnector {
    config: Config,
}

impl PostgresConnector {
    pub fn from_url(url: &str, transaction_mode: TransactionMode) -> Result<Self, DatabaseError> {
        let mut config = Config::from_str(url)
            .map_err(DatabaseError::Delegate)
            .with_context("Failed to parse PostgreSQL connection string".into())?;

        if config.get_hosts().is_empty() {
            return Err(DatabaseError::Config(
                "PostgreSQL connection string does not name a host".into(),
            ));
        }

        transaction_mode.update_config(&mut config);

        Ok(Self { config })
    }
}

#[async_trait]
impl Connector for PostgresConnector {
    async fn connect(&self) -> Result<Box<dyn DatabaseConnection>, DatabaseError> {
        let (client, connection) = self.config.connect(NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("connection error: {}", e);
            }
        });

        Ok(Box::new(PostgresConnection { client }))
    }
}

struct PostgresConnection {
    client: Client,
}

#[async_trait]
impl DatabaseConnection for PostgresConnection {
    async fn execute(&self, query: &Query) -> Result<ResultSet, DatabaseError> {
        tracing::debug!(
            sql = query.text(),
            parameters = query.parameters().len(),
            "Executing query"
        );

        let params: Vec<(&(dyn ToSql + Sync), Type)> = query
            .parameters()
            .iter()
            .map(|parameter| (parameter as &(dyn ToSql + Sync), Type::TEXT))
            .collect();

        let rows = self.client.query_typed(query.text(), &params).await?;

        decode_rows(&rows)
    }
}

impl Drop for PostgresConnection {
    fn drop(&mut self) {
        tracing::debug!("Closing database connection");
    }
}

fn decode_rows(rows: &[Row]) -> Result<ResultSet, DatabaseError> {
    let columns = rows
        .first()
        .map(|row| {
            row.columns()
                .iter()
                .map(|column| column.name().to_string())
                .collect()
        })
        .unwrap_or_default();

    let values = rows
        .iter()
        .map(|row| {
            (0..row.len())
                .map(|index| decode_value(row, index))
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ResultSet::new(columns, values))
}

fn decode_value(row: &Row, index: usize) -> Result<SqlValue, DatabaseError> {
    let column = &row.columns()[index];
    let column_type = column.type_();

    let value: Option<SqlValue> = if *column_type == Type::INT2 {
        row.try_get::<_, Option<i16>>(index)?
            .map(|v| SqlValue::Int(v.into()))
    } else if *column_type == Type::INT4 {
        row.try_get::<_, Option<i32>>(index)?
            .map(|v| SqlValue::Int(v.into()))
    } else if *column_type == Type::INT8 {
        row.try_get::<_, Option<i64>>(index)?.map(SqlValue::Int)
    } else if *column_type == Type::FLOAT4 {
        row.try_get::<_, Option<f32>>(index)?
            .map(|v| SqlValue::Float(v.into()))
    } else if *column_type == Type::FLOAT8 {
        row.try_get::<_, Option<f64>>(index)?.map(SqlValue::Float)
    } else if [Type::TEXT, Type::VARCHAR, Type::BPCHAR, Type::NAME].contains(column_type) {
        row.try_get::<_, Option<String>>(index)?.map(SqlValue::Text)
    } else {
        return Err(DatabaseError::UnsupportedColumnType {
            column: column.name().to_string(),
            type_name: column_type.name().to_string(),
        });
    };

    Ok(value.unwrap_or(SqlValue::Null))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_only_mode_appends_session_option() {
        let mut config = Config::new();
        config.host("localhost").options("-c search_path=dojo");
        TransactionMode::ReadOnly.update_config(&mut config);

        assert_eq!(
            config.get_options(),
            Some("-c search_path=dojo -c default_transaction_read_only=on")
        );
    }

    #[test]
    fn read_write_mode_leaves_options_alone() {
        let mut config = Config::from_str("postgres://dojo@localhost/dojofinder").unwrap();
        TransactionMode::ReadWrite.update_config(&mut config);

        assert_eq!(config.get_options(), None);
    }

    #[test]
    fn rejects_malformed_urls() {
        assert!(
            PostgresConnector::from_url(
                "postgres://dojo@localhost:notaport/dojofinder",
                TransactionMode::ReadOnly
            )
            .is_err()
        );
        assert!(matches!(
            PostgresConnector::from_url("dbname=dojofinder", TransactionMode::ReadOnly),
            Err(DatabaseError::Config(_))
        ));
        assert!(
            PostgresConnector::from_url(
                "postgres://dojo@db.internal:5432/dojofinder",
                TransactionMode::ReadOnly
            )
            .is_ok()
        );
    }
}

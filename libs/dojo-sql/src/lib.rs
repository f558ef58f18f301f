// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.
//! The database side of the dojo service.
//!
//! The service only ever needs to run a bound statement and read back rows, so this crate
//! exposes that much: a [`Query`], the [`Connector`]/[`DatabaseConnection`] pair that
//! executes it, the [`ResultSet`] it produces, and [`project_rows`] to turn a result
//! set into typed records.

mod connect;
mod database_error;
mod query;
mod result_set;
mod row;

#[cfg(any(feature = "test-support", test))]
pub mod test_support;

pub use connect::postgres::{PostgresConnector, TransactionMode};
pub use connect::{Connector, DatabaseConnection};
pub use database_error::{DatabaseError, WithContext};
pub use query::Query;
pub use result_set::{ColumnIndex, ResultSet, SqlValue};
pub use row::{FromRow, RowReader, project_rows};

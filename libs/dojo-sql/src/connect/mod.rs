// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.
pub mod postgres;

use async_trait::async_trait;

use crate::{database_error::DatabaseError, query::Query, result_set::ResultSet};

/// Opens database connections.
///
/// Each call yields a fresh connection owned by the caller. Dropping the returned value
/// closes the connection, so a connection never outlives the request that opened it.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn DatabaseConnection>, DatabaseError>;
}

/// An open connection that runs bound statements.
#[async_trait]
pub trait DatabaseConnection: Send + Sync {
    async fn execute(&self, query: &Query) -> Result<ResultSet, DatabaseError>;
}

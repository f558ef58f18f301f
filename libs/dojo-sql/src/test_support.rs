// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.
//! An in-memory [`Connector`] for exercising request handling without a database.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;

use crate::{
    connect::{Connector, DatabaseConnection},
    database_error::DatabaseError,
    query::Query,
    result_set::ResultSet,
};

enum Outcome {
    Rows(ResultSet),
    Failure(String),
}

/// Answers queries from a script of `(SQL fragment, outcome)` rules.
///
/// The first rule whose fragment occurs in the query text decides the outcome. A query
/// that matches no rule fails, so tests notice statements they did not expect.
#[derive(Default)]
pub struct ScriptedConnector {
    rules: Arc<Vec<(String, Outcome)>>,
    refusal: Option<String>,
    stats: Arc<ConnectionStats>,
}

#[derive(Default)]
struct ConnectionStats {
    opened: AtomicUsize,
    closed: AtomicUsize,
    executed: Mutex<Vec<Query>>,
}

impl ScriptedConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// A connector whose every connection attempt fails with `message`.
    pub fn refusing(message: &str) -> Self {
        Self {
            refusal: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn on(self, sql_fragment: &str, rows: ResultSet) -> Self {
        self.with_rule(sql_fragment, Outcome::Rows(rows))
    }

    pub fn failing_on(self, sql_fragment: &str, message: &str) -> Self {
        self.with_rule(sql_fragment, Outcome::Failure(message.to_string()))
    }

    fn with_rule(mut self, sql_fragment: &str, outcome: Outcome) -> Self {
        // Rules are only added while building, before any connection shares them
        if let Some(rules) = Arc::get_mut(&mut self.rules) {
            rules.push((sql_fragment.to_string(), outcome));
        }
        self
    }

    pub fn connection_attempts(&self) -> usize {
        self.stats.opened.load(Ordering::SeqCst)
    }

    pub fn connections_closed(&self) -> usize {
        self.stats.closed.load(Ordering::SeqCst)
    }

    pub fn executed_queries(&self) -> Vec<Query> {
        self.stats
            .executed
            .lock()
            .map(|executed| executed.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Connector for ScriptedConnector {
    async fn connect(&self) -> Result<Box<dyn DatabaseConnection>, DatabaseError> {
        self.stats.opened.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = &self.refusal {
            return Err(DatabaseError::BoxedError(message.clone().into()));
        }

        Ok(Box::new(ScriptedConnection {
            rules: self.rules.clone(),
            stats: self.stats.clone(),
        }))
    }
}

struct ScriptedConnection {
    rules: Arc<Vec<(String, Outcome)>>,
    stats: Arc<ConnectionStats>,
}

#[async_trait]
impl DatabaseConnection for ScriptedConnection {
    async fn execute(&self, query: &Query) -> Result<ResultSet, DatabaseError> {
        if let Ok(mut executed) = self.stats.executed.lock() {
            executed.push(query.clone());
        }

        let outcome = self
            .rules
            .iter()
            .find(|(fragment, _)| query.text().contains(fragment.as_str()))
            .map(|(_, outcome)| outcome);

        match outcome {
            Some(Outcome::Rows(rows)) => Ok(rows.clone()),
            Some(Outcome::Failure(message)) => {
                Err(DatabaseError::BoxedError(message.clone().into()))
            }
            None => Err(DatabaseError::BoxedError(
                format!("no scripted result for '{}'", query.text()).into(),
            )),
        }
    }
}

impl Drop for ScriptedConnection {
    fn drop(&mut self) {
        self.stats.closed.fetch_add(1, Ordering::SeqCst);
    }
}

// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.
use dojo_sql::DatabaseError;
use http::StatusCode;
use thiserror::Error;

/// Everything that can turn a request into an error envelope.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("One or more missing parameters: {}", .0.join(", "))]
    MissingParameter(Vec<String>),

    #[error("Failed to connect to database: {0}")]
    DatabaseConnection(#[source] DatabaseError),

    #[error("Database query for {intent} failed: {source}")]
    QueryFailed {
        intent: String,
        #[source]
        source: DatabaseError,
    },

    #[error("No record found: {0}")]
    NoRecordFound(String),

    #[error("Too many records: {0}")]
    TooManyRecords(String),

    #[error("Failed to encode response: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ServiceError {
    pub fn query_failed(intent: &str, source: DatabaseError) -> Self {
        ServiceError::QueryFailed {
            intent: intent.to_string(),
            source,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::MissingParameter(_)
            | ServiceError::DatabaseConnection(_)
            | ServiceError::QueryFailed { .. }
            | ServiceError::NoRecordFound(_)
            | ServiceError::TooManyRecords(_) => StatusCode::BAD_REQUEST,
            ServiceError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

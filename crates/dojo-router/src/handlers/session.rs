// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.
use dojo_sql::{DatabaseError, FromRow, Query, ResultSet, RowReader};
use serde::{Deserialize, Serialize};

use crate::{
    error::ServiceError,
    parameters::ParameterSet,
    pipeline::{AdditionalResponse, Handler},
    response::RequestResponse,
};

use super::{dojo::DojoByKey, project};

/// One weekly class from the `sessions` table. Times are stored as integers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub key: i64,
    #[serde(rename = "dojokey")]
    pub dojo_key: i64,
    #[serde(rename = "dayofweek")]
    pub day_of_week: i64,
    pub details: String,
    #[serde(rename = "starttime")]
    pub start_time: i64,
    #[serde(rename = "endtime")]
    pub end_time: i64,
    #[serde(rename = "type")]
    pub session_type: i64,
}

impl FromRow for Session {
    const COLUMNS: &'static [&'static str] = &[
        "key",
        "dojokey",
        "dayofweek",
        "details",
        "starttime",
        "endtime",
        "type",
    ];

    fn from_row(row: &RowReader<'_>) -> Result<Self, DatabaseError> {
        Ok(Session {
            key: row.int("key")?,
            dojo_key: row.int("dojokey")?,
            day_of_week: row.int("dayofweek")?,
            details: row.string("details")?,
            start_time: row.int("starttime")?,
            end_time: row.int("endtime")?,
            session_type: row.int("type")?,
        })
    }
}

const SESSIONS_FOR_DOJO_SQL: &str = "select key, dojokey, dayofweek, details, starttime, endtime, type \
     from sessions where dojokey = $1::bigint order by dayofweek, starttime, key";

/// The sessions of the dojo named by `dojo`, along with the dojo itself.
pub struct DojoSessionsHandler {
    additional: Vec<Box<dyn AdditionalResponse>>,
}

impl DojoSessionsHandler {
    pub fn new() -> Self {
        Self {
            additional: vec![Box::new(DojoByKey)],
        }
    }
}

impl Default for DojoSessionsHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for DojoSessionsHandler {
    fn description(&self) -> &'static str {
        "sessions"
    }

    fn required_parameters(&self) -> &'static [&'static str] {
        &["dojo"]
    }

    fn query(&self, parameters: &ParameterSet) -> Result<Query, ServiceError> {
        Ok(Query::new(
            SESSIONS_FOR_DOJO_SQL,
            vec![parameters.require("dojo")?.to_string()],
        ))
    }

    fn parse(
        &self,
        result: &ResultSet,
        _parameters: &ParameterSet,
    ) -> Result<RequestResponse, ServiceError> {
        let sessions: Vec<Session> = project(result, self.description())?;
        RequestResponse::collection("sessions", &sessions)
    }

    fn additional_responses(&self) -> &[Box<dyn AdditionalResponse>] {
        &self.additional
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use dojo_sql::{SqlValue, test_support::ScriptedConnector};
    use serde_json::json;

    use super::*;
    use crate::{
        handlers::dojo::tests::dojo_rows, pipeline::RequestPipeline, response::Status,
        test_request::TestRequest,
    };

    fn session_rows(keys: &[i64]) -> ResultSet {
        ResultSet::new(
            [
                "key",
                "dojokey",
                "dayofweek",
                "details",
                "starttime",
                "endtime",
                "type",
            ]
            .map(String::from)
            .to_vec(),
            keys.iter()
                .map(|key| {
                    vec![
                        SqlValue::Int(*key),
                        SqlValue::Int(12),
                        SqlValue::Int(2),
                        "Juniors".into(),
                        SqlValue::Int(1800),
                        SqlValue::Int(1930),
                        SqlValue::Int(1),
                    ]
                })
                .collect(),
        )
    }

    fn request(dojo: &str) -> TestRequest {
        TestRequest::get("/sessionsForDojo", &[("dojo", dojo)])
    }

    #[tokio::test]
    async fn sessions_come_with_their_dojo() {
        let connector = Arc::new(
            ScriptedConnector::new()
                .on("from sessions", session_rows(&[3, 4]))
                .on("from dojos", dojo_rows(&[(12, "Hombu", 1.0, 2.0)])),
        );

        let envelope = RequestPipeline::new(connector.clone())
            .process(&DojoSessionsHandler::new(), &request("12"))
            .await
            .unwrap();

        assert_eq!(envelope.status, Status::Ok);
        assert_eq!(envelope.count, 2);
        assert_eq!(
            envelope.payload["sessions"][0],
            json!({
                "key": 3,
                "dojokey": 12,
                "dayofweek": 2,
                "details": "Juniors",
                "starttime": 1800,
                "endtime": 1930,
                "type": 1
            })
        );
        assert_eq!(envelope.payload["dojo"]["name"], "Hombu");
        assert_eq!(connector.connection_attempts(), 1);
    }

    #[tokio::test]
    async fn dojo_without_sessions_still_answers() {
        let connector = Arc::new(
            ScriptedConnector::new()
                .on("from sessions", ResultSet::empty())
                .on("from dojos", dojo_rows(&[(12, "Hombu", 1.0, 2.0)])),
        );

        let envelope = RequestPipeline::new(connector)
            .process(&DojoSessionsHandler::new(), &request("12"))
            .await
            .unwrap();

        assert_eq!(envelope.count, 0);
        assert_eq!(envelope.payload["sessions"], json!([]));
        assert_eq!(envelope.payload["dojo"]["key"], 12);
    }

    #[tokio::test]
    async fn unknown_dojo_fails_even_with_sessions() {
        let connector = Arc::new(
            ScriptedConnector::new()
                .on("from sessions", session_rows(&[3]))
                .on("from dojos", ResultSet::empty()),
        );

        let err = RequestPipeline::new(connector)
            .process(&DojoSessionsHandler::new(), &request("999"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "No record found: no dojos found with key 999");
    }
}

// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.
use async_trait::async_trait;
use dojo_sql::{DatabaseConnection, DatabaseError, FromRow, Query, ResultSet, RowReader};
use serde::{Deserialize, Serialize};

use crate::{
    error::ServiceError,
    parameters::ParameterSet,
    pipeline::{AdditionalResponse, Handler},
    response::RequestResponse,
};

use super::{exactly_one, project};

/// A venue from the `dojos` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dojo {
    pub key: i64,
    pub name: String,
    pub address: String,
    pub region: i64,
    pub latitude: f64,
    pub longitude: f64,
}

impl FromRow for Dojo {
    const COLUMNS: &'static [&'static str] =
        &["key", "name", "address", "region", "latitude", "longitude"];

    fn from_row(row: &RowReader<'_>) -> Result<Self, DatabaseError> {
        Ok(Dojo {
            key: row.int("key")?,
            name: row.string("name")?,
            address: row.string("address")?,
            region: row.int("region")?,
            latitude: row.float("latitude")?,
            longitude: row.float("longitude")?,
        })
    }
}

// The box is given by two corners in either order
const DOJOS_WITHIN_SQL: &str = "select key, name, address, region, latitude, longitude from dojos \
     where latitude > least($1::float8, $2::float8) and latitude < greatest($1::float8, $2::float8) \
     and longitude > least($3::float8, $4::float8) and longitude < greatest($3::float8, $4::float8) \
     order by key";

const DOJO_BY_KEY_SQL: &str =
    "select key, name, address, region, latitude, longitude from dojos where key = $1::bigint";

/// Dojos strictly inside the box spanned by `(startLat, startLon)` and `(endLat, endLon)`.
pub struct DojosWithinHandler;

impl Handler for DojosWithinHandler {
    fn description(&self) -> &'static str {
        "dojos"
    }

    fn required_parameters(&self) -> &'static [&'static str] {
        &["startLat", "startLon", "endLat", "endLon"]
    }

    fn query(&self, parameters: &ParameterSet) -> Result<Query, ServiceError> {
        Ok(Query::new(
            DOJOS_WITHIN_SQL,
            vec![
                parameters.require("startLat")?.to_string(),
                parameters.require("endLat")?.to_string(),
                parameters.require("startLon")?.to_string(),
                parameters.require("endLon")?.to_string(),
            ],
        ))
    }

    fn parse(
        &self,
        result: &ResultSet,
        _parameters: &ParameterSet,
    ) -> Result<RequestResponse, ServiceError> {
        let dojos: Vec<Dojo> = project(result, self.description())?;
        RequestResponse::collection("dojos", &dojos)
    }
}

/// Load the one dojo with `key`.
pub async fn load_dojo_by_key(
    connection: &dyn DatabaseConnection,
    key: &str,
) -> Result<Dojo, ServiceError> {
    let result = connection
        .execute(&Query::new(DOJO_BY_KEY_SQL, vec![key.to_string()]))
        .await
        .map_err(|source| ServiceError::query_failed(&format!("dojo by key ({key})"), source))?;

    exactly_one(
        project(&result, "dojo by key")?,
        || format!("no dojos found with key {key}"),
        || format!("more than one dojo found with key {key}"),
    )
}

/// Adds the `dojo` named by the `dojo` parameter to a response.
pub struct DojoByKey;

#[async_trait]
impl AdditionalResponse for DojoByKey {
    async fn respond(
        &self,
        connection: &dyn DatabaseConnection,
        parameters: &ParameterSet,
    ) -> Result<RequestResponse, ServiceError> {
        let dojo = load_dojo_by_key(connection, parameters.require("dojo")?).await?;
        RequestResponse::single("dojo", &dojo)
    }
}

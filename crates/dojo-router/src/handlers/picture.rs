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
use serde_json::{Map, Value};

use crate::{
    error::ServiceError, parameters::ParameterSet, pipeline::Handler, response::RequestResponse,
};

use super::{at_most_one, project};

/// A region contact's photo, stored base64-encoded along with its image type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactPicture {
    pub picture: Option<String>,
    #[serde(rename = "type")]
    pub picture_type: Option<String>,
}

impl FromRow for ContactPicture {
    const COLUMNS: &'static [&'static str] = &["picture", "picturetype"];

    fn from_row(row: &RowReader<'_>) -> Result<Self, DatabaseError> {
        Ok(ContactPicture {
            picture: row.optional_string("picture")?,
            picture_type: row.optional_string("picturetype")?,
        })
    }
}

const REGION_CONTACT_PICTURE_SQL: &str =
    "select picture, picturetype from regioncontacts where key = $1::bigint";

/// The picture of the region contact with `key`. A contact without a row is answered with
/// an empty `picture` object and a count of 0.
pub struct RegionContactPictureHandler;

impl Handler for RegionContactPictureHandler {
    fn description(&self) -> &'static str {
        "region contact picture"
    }

    fn required_parameters(&self) -> &'static [&'static str] {
        &["key"]
    }

    fn query(&self, parameters: &ParameterSet) -> Result<Query, ServiceError> {
        Ok(Query::new(
            REGION_CONTACT_PICTURE_SQL,
            vec![parameters.require("key")?.to_string()],
        ))
    }

    fn parse(
        &self,
        result: &ResultSet,
        parameters: &ParameterSet,
    ) -> Result<RequestResponse, ServiceError> {
        let key = parameters.require("key")?;
        let picture: Option<ContactPicture> = at_most_one(
            project(result, self.description())?,
            || format!("more than one picture found for key {key}"),
        )?;

        match picture {
            Some(picture) => RequestResponse::single("picture", &picture),
            None => RequestResponse::new("picture", Value::Object(Map::new()), 0),
        }
    }
}

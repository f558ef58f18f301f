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
    error::ServiceError, parameters::ParameterSet, pipeline::Handler, response::RequestResponse,
};

use super::{exactly_one, project};

/// The person to contact about dojos in a region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionContact {
    pub key: i64,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub facebook: Option<String>,
    pub region: i64,
}

impl FromRow for RegionContact {
    const COLUMNS: &'static [&'static str] =
        &["key", "name", "phone", "email", "facebook", "region"];

    fn from_row(row: &RowReader<'_>) -> Result<Self, DatabaseError> {
        Ok(RegionContact {
            key: row.int("key")?,
            name: row.string("name")?,
            phone: row.optional_string("phone")?,
            email: row.optional_string("email")?,
            facebook: row.optional_string("facebook")?,
            region: row.int("region")?,
        })
    }
}

const REGION_CONTACT_SQL: &str =
    "select key, name, phone, email, facebook, region from regioncontacts where region = $1::bigint";

pub struct RegionContactHandler;

impl Handler for RegionContactHandler {
    fn description(&self) -> &'static str {
        "regional contacts"
    }

    fn required_parameters(&self) -> &'static [&'static str] {
        &["region"]
    }

    fn query(&self, parameters: &ParameterSet) -> Result<Query, ServiceError> {
        Ok(Query::new(
            REGION_CONTACT_SQL,
            vec![parameters.require("region")?.to_string()],
        ))
    }

    fn parse(
        &self,
        result: &ResultSet,
        parameters: &ParameterSet,
    ) -> Result<RequestResponse, ServiceError> {
        let region = parameters.require("region")?;
        let contact: RegionContact = exactly_one(
            project(result, self.description())?,
            || format!("could not find any regional contact for region {region}"),
            || format!("found more than one regional contact for region {region}"),
        )?;

        RequestResponse::single("contact", &contact)
    }
}

#[cfg(test)]
mod tests {
    use dojo_sql::SqlValue;
    use serde_json::json;

    use super::*;

    fn contact_rows(count: usize) -> ResultSet {
        ResultSet::new(
            ["key", "name", "phone", "email", "facebook", "region"]
                .map(String::from)
                .to_vec(),
            (0..count)
                .map(|index| {
                    vec![
                        SqlValue::Int(index as i64 + 1),
                        "Sensei".into(),
                        "0400 000 000".into(),
                        SqlValue::Null,
                        SqlValue::Null,
                        SqlValue::Int(4),
                    ]
                })
                .collect(),
        )
    }

    fn region(value: &str) -> ParameterSet {
        ParameterSet::from([("region", value)])
    }

    #[test]
    fn single_contact() {
        let response = RegionContactHandler
            .parse(&contact_rows(1), &region("4"))
            .unwrap();

        assert_eq!(response.key, "contact");
        assert_eq!(response.count, 1);
        assert_eq!(
            response.value,
            json!({
                "key": 1,
                "name": "Sensei",
                "phone": "0400 000 000",
                "email": null,
                "facebook": null,
                "region": 4
            })
        );
    }

    #[test]
    fn missing_or_ambiguous_contact() {
        let none = RegionContactHandler
            .parse(&contact_rows(0), &region("4"))
            .unwrap_err();
        assert_eq!(
            none.to_string(),
            "No record found: could not find any regional contact for region 4"
        );

        let many = RegionContactHandler
            .parse(&contact_rows(2), &region("4"))
            .unwrap_err();
        assert!(matches!(many, ServiceError::TooManyRecords(_)));
    }

    #[test]
    fn query_binds_region() {
        let query = RegionContactHandler.query(&region("4")).unwrap();
        assert_eq!(query.parameters(), ["4"]);
        assert!(query.text().contains("where region = $1::bigint"));
    }
}

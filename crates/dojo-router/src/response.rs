// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ServiceError;

/// One named contribution to a response envelope.
///
/// `count` is the number of items in `value` when it is a collection, or 0/1 to signal
/// whether a single lookup found anything.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestResponse {
    pub key: String,
    pub value: Value,
    pub count: usize,
}

impl RequestResponse {
    pub fn new(key: &str, value: impl Serialize, count: usize) -> Result<Self, ServiceError> {
        Ok(Self {
            key: key.to_string(),
            value: serde_json::to_value(value)?,
            count,
        })
    }

    /// A response listing every item.
    pub fn collection<T: Serialize>(key: &str, items: &[T]) -> Result<Self, ServiceError> {
        Self::new(key, items, items.len())
    }

    /// A response holding exactly one item.
    pub fn single<T: Serialize>(key: &str, item: &T) -> Result<Self, ServiceError> {
        Self::new(key, item, 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Error,
}

/// The JSON body of every response: `status`, `count`, an `error` message on failure, and
/// one field per [`RequestResponse`] on success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub status: Status,
    pub count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Envelope {
    /// Merge the primary response and any additional ones, in order. The envelope count is
    /// the primary response's count.
    pub fn ok(
        primary: RequestResponse,
        additional: impl IntoIterator<Item = RequestResponse>,
    ) -> Self {
        let count = primary.count;
        let payload = std::iter::once(primary)
            .chain(additional)
            .map(|response| (response.key, response.value))
            .collect();

        Self {
            status: Status::Ok,
            count,
            error: None,
            payload,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            count: 0,
            error: Some(message.into()),
            payload: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn ok_envelope_layout() {
        let sessions = RequestResponse::collection("sessions", &[json!({"key": 1}), json!({"key": 2})])
            .unwrap();
        let dojo = RequestResponse::single("dojo", &json!({"key": 9, "name": "Hombu"})).unwrap();

        let envelope = Envelope::ok(sessions, [dojo]);

        assert_eq!(
            serde_json::to_string(&envelope).unwrap(),
            r#"{"status":"ok","count":2,"sessions":[{"key":1},{"key":2}],"dojo":{"key":9,"name":"Hombu"}}"#
        );
    }

    #[test]
    fn error_envelope_layout() {
        let envelope = Envelope::error("One or more missing parameters: region");

        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"status": "error", "count": 0, "error": "One or more missing parameters: region"})
        );
    }

    #[test]
    fn decoding_restores_keys_values_and_field_order() {
        let dojos = RequestResponse::collection(
            "dojos",
            &[json!({"key": 1, "name": "X", "address": "Y", "region": 2, "latitude": 5.0, "longitude": 5.0})],
        )
        .unwrap();
        let envelope = Envelope::ok(dojos, []);

        let encoded = serde_json::to_string_pretty(&envelope).unwrap();
        let decoded: Envelope = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded, envelope);
        let fields: Vec<&String> = decoded.payload["dojos"][0]
            .as_object()
            .unwrap()
            .keys()
            .collect();
        assert_eq!(
            fields,
            ["key", "name", "address", "region", "latitude", "longitude"]
        );
    }
}

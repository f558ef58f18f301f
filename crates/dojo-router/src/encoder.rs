// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.
use common::http::{Headers, ResponsePayload};
use http::StatusCode;
use serde::Serialize;

use crate::{error::ServiceError, response::Envelope};

/// Encode `body` as pretty-printed JSON with the given status.
///
/// A body that fails to serialize is replaced by an error envelope (status 500). The error
/// envelope only holds strings and integers, so the fallback cannot fail in turn.
pub fn encode<T: Serialize + ?Sized>(body: &T, status_code: StatusCode) -> ResponsePayload {
    match serde_json::to_vec_pretty(body) {
        Ok(bytes) => ResponsePayload {
            body: bytes,
            headers: json_headers(),
            status_code,
        },
        Err(err) => {
            let error = ServiceError::Serialization(err);
            tracing::error!(%error, "Falling back to an error envelope");
            encode_error(&error)
        }
    }
}

/// Encode the error envelope for `error`, using its status code.
pub fn encode_error(error: &ServiceError) -> ResponsePayload {
    encode(&Envelope::error(error.to_string()), error.status_code())
}

fn json_headers() -> Headers {
    Headers::from_vec(vec![(
        http::header::CONTENT_TYPE.to_string(),
        "application/json".to_string(),
    )])
}

#[cfg(test)]
mod tests {
    use serde::Serializer;
    use serde_json::{Value, json};

    use super::*;
    use crate::response::RequestResponse;

    struct Unencodable;

    impl Serialize for Unencodable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("picture data is not valid UTF-8"))
        }
    }

    fn body_json(payload: &ResponsePayload) -> Value {
        serde_json::from_slice(&payload.body).unwrap()
    }

    #[test]
    fn encodes_pretty_json() {
        let contact = RequestResponse::single("contact", &json!({"key": 3})).unwrap();
        let payload = encode(&Envelope::ok(contact, []), StatusCode::OK);

        assert_eq!(payload.status_code, StatusCode::OK);
        assert_eq!(
            payload.headers.get("Content-Type").as_deref(),
            Some("application/json")
        );
        assert!(String::from_utf8(payload.body.clone()).unwrap().contains('\n'));
        assert_eq!(
            body_json(&payload),
            json!({"status": "ok", "count": 1, "contact": {"key": 3}})
        );
    }

    #[test]
    fn unencodable_body_becomes_error_envelope() {
        let payload = encode(&Unencodable, StatusCode::OK);

        assert_eq!(payload.status_code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(&payload),
            json!({
                "status": "error",
                "count": 0,
                "error": "Failed to encode response: picture data is not valid UTF-8"
            })
        );
    }

    #[test]
    fn error_envelope_uses_error_status() {
        let payload = encode_error(&ServiceError::TooManyRecords(
            "more than one picture found for key 4".into(),
        ));

        assert_eq!(payload.status_code, StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(&payload)["error"],
            "Too many records: more than one picture found for key 4"
        );
    }
}

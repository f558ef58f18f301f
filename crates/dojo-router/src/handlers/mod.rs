// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.
//! The service's endpoints, one [`Handler`](crate::Handler) per lookup.

mod dojo;
mod picture;
mod region_contact;
mod session;

pub use dojo::{Dojo, DojoByKey, DojosWithinHandler, load_dojo_by_key};
pub use picture::{ContactPicture, RegionContactPictureHandler};
pub use region_contact::{RegionContact, RegionContactHandler};
pub use session::{DojoSessionsHandler, Session};

use dojo_sql::{FromRow, ResultSet, project_rows};

use crate::error::ServiceError;

/// Decode every row as a `T`, reporting decoding problems as a failed `intent` query.
fn project<T: FromRow>(result: &ResultSet, intent: &str) -> Result<Vec<T>, ServiceError> {
    project_rows(result).map_err(|source| ServiceError::query_failed(intent, source))
}

/// The only row of a lookup that must match exactly one record.
fn exactly_one<T>(
    mut rows: Vec<T>,
    none_found: impl FnOnce() -> String,
    too_many: impl FnOnce() -> String,
) -> Result<T, ServiceError> {
    match (rows.pop(), rows.is_empty()) {
        (Some(row), true) => Ok(row),
        (Some(_), false) => Err(ServiceError::TooManyRecords(too_many())),
        (None, _) => Err(ServiceError::NoRecordFound(none_found())),
    }
}

/// The row of a lookup that may match nothing, but never more than one record.
fn at_most_one<T>(
    mut rows: Vec<T>,
    too_many: impl FnOnce() -> String,
) -> Result<Option<T>, ServiceError> {
    if rows.len() > 1 {
        return Err(ServiceError::TooManyRecords(too_many()));
    }
    Ok(rows.pop())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_one_policy() {
        let none = || "none".to_string();
        let many = || "many".to_string();

        assert_eq!(exactly_one(vec![7], none, many).unwrap(), 7);
        assert!(matches!(
            exactly_one(Vec::<i32>::new(), none, many),
            Err(ServiceError::NoRecordFound(message)) if message == "none"
        ));
        assert!(matches!(
            exactly_one(vec![1, 2], none, many),
            Err(ServiceError::TooManyRecords(message)) if message == "many"
        ));
    }

    #[test]
    fn at_most_one_policy() {
        let many = || "many".to_string();

        assert_eq!(at_most_one(Vec::<i32>::new(), many).unwrap(), None);
        assert_eq!(at_most_one(vec![3], many).unwrap(), Some(3));
        assert!(matches!(
            at_most_one(vec![1, 2, 3], many),
            Err(ServiceError::TooManyRecords(_))
        ));
    }
}

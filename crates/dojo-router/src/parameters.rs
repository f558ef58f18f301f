// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.
use std::collections::HashMap;

use common::http::RequestHead;

use crate::error::ServiceError;

/// The values of a handler's required parameters, taken from one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    values: HashMap<String, String>,
}

impl ParameterSet {
    /// Collect every name in `required` from `request`. Absent and blank values are
    /// reported together in one [`ServiceError::MissingParameter`].
    pub fn extract(request: &dyn RequestHead, required: &[&str]) -> Result<Self, ServiceError> {
        let mut values = HashMap::new();
        let mut missing = vec![];

        for name in required {
            match request
                .get_param(name)
                .filter(|value| !value.trim().is_empty())
            {
                Some(value) => {
                    values.insert(name.to_string(), value);
                }
                None => missing.push(name.to_string()),
            }
        }

        if missing.is_empty() {
            Ok(Self { values })
        } else {
            Err(ServiceError::MissingParameter(missing))
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn require(&self, name: &str) -> Result<&str, ServiceError> {
        self.get(name)
            .ok_or_else(|| ServiceError::MissingParameter(vec![name.to_string()]))
    }
}

impl<const N: usize> From<[(&str, &str); N]> for ParameterSet {
    fn from(values: [(&str, &str); N]) -> Self {
        Self {
            values: values
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

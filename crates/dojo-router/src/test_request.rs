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

/// An in-memory GET request.
pub struct TestRequest {
    method: http::Method,
    path: String,
    params: HashMap<String, String>,
}

impl TestRequest {
    pub fn get(path: &str, params: &[(&str, &str)]) -> Self {
        Self {
            method: http::Method::GET,
            path: path.to_string(),
            params: params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn with_method(mut self, method: http::Method) -> Self {
        self.method = method;
        self
    }
}

impl RequestHead for TestRequest {
    fn get_method(&self) -> http::Method {
        self.method.clone()
    }

    fn get_path(&self) -> String {
        self.path.clone()
    }

    fn get_param(&self, name: &str) -> Option<String> {
        self.params.get(name).cloned()
    }
}

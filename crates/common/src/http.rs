// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.
use http::StatusCode;

/// Represents a HTTP request from which information can be extracted
pub trait RequestHead {
    fn get_method(&self) -> http::Method;

    fn get_path(&self) -> String;

    // return the value of a query-string parameter
    fn get_param(&self, name: &str) -> Option<String>;
}

#[derive(Debug, Clone, Default)]
pub struct Headers {
    inner: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self { inner: vec![] }
    }

    pub fn from_vec(vec: Vec<(String, String)>) -> Self {
        Self {
            inner: vec
                .into_iter()
                .map(|(key, value)| (key.to_lowercase(), value))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner
            .iter()
            .find(|(k, _)| k == &key.to_lowercase())
            .map(|(_, v)| v.clone())
    }

    pub fn insert(&mut self, key: String, value: String) {
        self.inner.push((key.to_lowercase(), value));
    }
}

impl IntoIterator for Headers {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

#[derive(Debug)]
pub struct ResponsePayload {
    pub body: Vec<u8>,
    pub headers: Headers,
    pub status_code: StatusCode,
}

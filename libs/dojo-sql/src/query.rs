// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.
/// A statement ready to execute: SQL text with `$1..$n` placeholders and one string
/// argument per placeholder.
///
/// Arguments are always bound as SQL `text`; the statement casts them where a typed
/// comparison is needed (for example `key = $1::bigint`). Keeping the placeholder count in
/// step with `parameters` is up to whoever builds the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    text: String,
    parameters: Vec<String>,
}

impl Query {
    pub fn new(text: impl Into<String>, parameters: Vec<String>) -> Self {
        Self {
            text: text.into(),
            parameters,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }
}

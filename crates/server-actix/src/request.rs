// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.
use std::collections::HashMap;

use actix_web::HttpRequest;
use common::http::RequestHead;

pub struct ActixRequestHead {
    // we cannot refer to HttpRequest directly, as it holds an Rc (and therefore does
    // not impl Send or Sync)
    method: http::Method,
    path: String,
    params: HashMap<String, String>,
}

impl ActixRequestHead {
    /// Capture what the router needs from `req`. Fails with the method name when it has
    /// no http-1.x equivalent.
    pub fn from_request(
        req: &HttpRequest,
        params: HashMap<String, String>,
    ) -> Result<ActixRequestHead, String> {
        // Actix uses http-0.2. However, the rest of the system uses
        // http-1.x, so we need to convert between the two.
        let method = http::Method::from_bytes(req.method().as_str().as_bytes())
            .map_err(|_| req.method().to_string())?;

        Ok(ActixRequestHead {
            method,
            path: req.path().to_string(),
            params,
        })
    }
}

impl RequestHead for ActixRequestHead {
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

// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.
use std::sync::Arc;

use async_trait::async_trait;
use common::{
    http::{RequestHead, ResponsePayload},
    router::Router,
};
use dojo_sql::Connector;
use http::Method;

use crate::{
    handlers::{
        DojoSessionsHandler, DojosWithinHandler, RegionContactHandler,
        RegionContactPictureHandler,
    },
    pipeline::{Handler, RequestPipeline},
};

pub const DOJOS_WITHIN_PATH: &str = "/dojosWithin";
pub const SESSIONS_FOR_DOJO_PATH: &str = "/sessionsForDojo";
pub const REGION_CONTACT_PATH: &str = "/regionContact";
pub const REGION_CONTACT_PICTURE_PATH: &str = "/regionContactPicture";

struct Route {
    method: Method,
    path: &'static str,
    handler: Box<dyn Handler>,
}

impl Route {
    fn get(path: &'static str, handler: impl Handler + 'static) -> Self {
        Self {
            method: Method::GET,
            path,
            handler: Box::new(handler),
        }
    }
}

/// Dispatches requests to the service's handlers by method and path.
pub struct DojoRouter {
    pipeline: RequestPipeline,
    routes: Vec<Route>,
}

impl DojoRouter {
    pub fn new(connector: Arc<dyn Connector>) -> Self {
        Self {
            pipeline: RequestPipeline::new(connector),
            routes: vec![
                Route::get(DOJOS_WITHIN_PATH, DojosWithinHandler),
                Route::get(SESSIONS_FOR_DOJO_PATH, DojoSessionsHandler::new()),
                Route::get(REGION_CONTACT_PATH, RegionContactHandler),
                Route::get(REGION_CONTACT_PICTURE_PATH, RegionContactPictureHandler),
            ],
        }
    }

    /// `(method, path)` of every route, in registration order.
    pub fn routes(&self) -> impl Iterator<Item = (&Method, &'static str)> {
        self.routes.iter().map(|route| (&route.method, route.path))
    }
}

#[async_trait]
impl Router for DojoRouter {
    async fn route(&self, request: &(dyn RequestHead + Send + Sync)) -> Option<ResponsePayload> {
        let method = request.get_method();
        let path = request.get_path();

        let route = self
            .routes
            .iter()
            .find(|route| route.method == method && route.path == path)?;

        Some(self.pipeline.handle(route.handler.as_ref(), request).await)
    }
}

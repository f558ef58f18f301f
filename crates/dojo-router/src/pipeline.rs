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
use common::http::{RequestHead, ResponsePayload};
use dojo_sql::{Connector, DatabaseConnection, Query, ResultSet};
use http::StatusCode;
use tracing::instrument;

use crate::{
    encoder::{encode, encode_error},
    error::ServiceError,
    parameters::ParameterSet,
    response::{Envelope, RequestResponse},
};

/// The declaration of one endpoint.
///
/// Implementations hold no per-request state: `query` and `parse` are functions of the
/// validated parameters (and, for `parse`, of the rows returned).
pub trait Handler: Send + Sync {
    /// What the primary query looks up; used in error messages and logs.
    fn description(&self) -> &'static str;

    fn required_parameters(&self) -> &'static [&'static str];

    fn query(&self, parameters: &ParameterSet) -> Result<Query, ServiceError>;

    fn parse(
        &self,
        result: &ResultSet,
        parameters: &ParameterSet,
    ) -> Result<RequestResponse, ServiceError>;

    /// Secondary lookups merged into the same envelope, run in order after `parse`.
    fn additional_responses(&self) -> &[Box<dyn AdditionalResponse>] {
        &[]
    }
}

/// A secondary lookup that runs on the primary query's connection.
#[async_trait]
pub trait AdditionalResponse: Send + Sync {
    async fn respond(
        &self,
        connection: &dyn DatabaseConnection,
        parameters: &ParameterSet,
    ) -> Result<RequestResponse, ServiceError>;
}

/// Runs a [`Handler`] against a fresh database connection and encodes the outcome.
pub struct RequestPipeline {
    connector: Arc<dyn Connector>,
}

impl RequestPipeline {
    pub fn new(connector: Arc<dyn Connector>) -> Self {
        Self { connector }
    }

    /// Handle `request` with `handler`, always producing a JSON response.
    #[instrument(name = "RequestPipeline::handle", skip_all, fields(handler = handler.description()))]
    pub async fn handle(
        &self,
        handler: &dyn Handler,
        request: &(dyn RequestHead + Send + Sync),
    ) -> ResponsePayload {
        match self.process(handler, request).await {
            Ok(envelope) => encode(&envelope, StatusCode::OK),
            Err(error) => {
                tracing::warn!(%error, "Request failed");
                encode_error(&error)
            }
        }
    }

    /// Validate parameters, run the primary query and every additional response, and merge
    /// them into one envelope. The first failure aborts the request; nothing gathered up to
    /// that point is returned.
    pub async fn process(
        &self,
        handler: &dyn Handler,
        request: &(dyn RequestHead + Send + Sync),
    ) -> Result<Envelope, ServiceError> {
        let parameters = ParameterSet::extract(request, handler.required_parameters())?;

        // Dropped on every return below, which closes the connection
        let connection = self
            .connector
            .connect()
            .await
            .map_err(ServiceError::DatabaseConnection)?;

        let query = handler.query(&parameters)?;
        let result = connection
            .execute(&query)
            .await
            .map_err(|source| ServiceError::query_failed(handler.description(), source))?;

        let primary = handler.parse(&result, &parameters)?;

        let mut additional = Vec::with_capacity(handler.additional_responses().len());
        for provider in handler.additional_responses() {
            additional.push(provider.respond(connection.as_ref(), &parameters).await?);
        }

        Ok(Envelope::ok(primary, additional))
    }
}

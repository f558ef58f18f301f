// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.
//! Request handling for the dojo finder service.
//!
//! Every endpoint is a [`Handler`]: a list of required query parameters, a query to run and
//! a parser for its rows. The [`RequestPipeline`] does the rest (parameter validation, one
//! connection per request, any [`AdditionalResponse`]s, and encoding the JSON [`Envelope`]).

mod encoder;
mod error;
pub mod handlers;
mod parameters;
mod pipeline;
mod response;
mod router;

#[cfg(test)]
mod test_request;

pub use encoder::{encode, encode_error};
pub use error::ServiceError;
pub use parameters::ParameterSet;
pub use pipeline::{AdditionalResponse, Handler, RequestPipeline};
pub use response::{Envelope, RequestResponse, Status};
pub use router::{
    DOJOS_WITHIN_PATH, DojoRouter, REGION_CONTACT_PATH, REGION_CONTACT_PICTURE_PATH,
    SESSIONS_FOR_DOJO_PATH,
};

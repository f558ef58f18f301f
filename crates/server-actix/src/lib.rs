// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.
mod request;

use std::collections::HashMap;

use actix_web::{
    HttpRequest, HttpResponse,
    web::{self, ServiceConfig},
};
use common::{http::ResponsePayload, router::Router};
use dojo_router::{DojoRouter, Envelope, encode};
use http::StatusCode;
use request::ActixRequestHead;

macro_rules! error_msg {
    ($msg:literal) => {
        concat!("{\"status\": \"error\", \"count\": 0, \"error\": \"", $msg, "\"}").as_bytes()
    };
}

pub fn configure_router(router: web::Data<DojoRouter>) -> impl FnOnce(&mut ServiceConfig) {
    move |app| {
        app.app_data(router).default_service(web::to(resolve));
    }
}

/// Resolve a request through the dojo router, answering unknown routes with a 404 envelope.
async fn resolve(http_request: HttpRequest, router: web::Data<DojoRouter>) -> HttpResponse {
    let query = match web::Query::<HashMap<String, String>>::from_query(
        http_request.query_string(),
    ) {
        Ok(query) => query.into_inner(),
        Err(err) => {
            tracing::warn!("Malformed query string: {}", err);
            return to_actix_response(encode(
                &Envelope::error(format!("Malformed query string: {err}")),
                StatusCode::BAD_REQUEST,
            ));
        }
    };

    let request = match ActixRequestHead::from_request(&http_request, query) {
        Ok(request) => request,
        Err(method) => {
            return to_actix_response(encode(
                &Envelope::error(format!("Unsupported method {method}")),
                StatusCode::METHOD_NOT_ALLOWED,
            ));
        }
    };

    match router.route(&request).await {
        Some(response) => to_actix_response(response),
        None => to_actix_response(encode(
            &Envelope::error(format!(
                "No handler for {} {}",
                http_request.method(),
                http_request.path()
            )),
            StatusCode::NOT_FOUND,
        )),
    }
}

fn to_actix_response(response: ResponsePayload) -> HttpResponse {
    let ResponsePayload {
        body,
        headers,
        status_code,
    } = response;

    let actix_status_code = match to_actix_status_code(status_code) {
        Ok(status_code) => status_code,
        Err(err) => {
            tracing::error!("Invalid status code: {}", err);
            return HttpResponse::build(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR)
                .content_type("application/json")
                .body(error_msg!("Invalid status code"));
        }
    };

    let mut builder = HttpResponse::build(actix_status_code);

    for header in headers.into_iter() {
        builder.append_header(header);
    }

    builder.body(body)
}

// Actix uses http-0.2. However, the rest of the system uses
// http-1.x, so we need to convert between the two.
fn to_actix_status_code(status_code: StatusCode) -> Result<actix_web::http::StatusCode, String> {
    actix_web::http::StatusCode::from_u16(status_code.as_u16())
        .map_err(|_| "Invalid status code".to_string())
}

// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.
//! # Tracing configuration setup.
//!
//! The server code is instrumented with Rust's `tracing` framework.
//!
//! Calling the `init` function will initialize a global tracing subscriber based on the value of
//! the `DOJO_LOG` environment variable which follows the same conventions as `RUST_LOG`. This will
//! provide console logging. Without `DOJO_LOG`, only warnings and errors are printed.

use dojo_env::Environment;
use tracing_subscriber::{EnvFilter, filter::LevelFilter, prelude::*, util::TryInitError};

use crate::env_const::DOJO_LOG;

/// Initialize the tracing subscriber.
pub fn init(env: &dyn Environment) -> Result<(), TryInitError> {
    let fmt_layer = tracing_subscriber::fmt::layer().compact();

    tracing_subscriber::registry()
        .with(log_filter(env))
        .with(fmt_layer)
        .try_init()
}

fn log_filter(env: &dyn Environment) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(env.get(DOJO_LOG).unwrap_or_default())
}

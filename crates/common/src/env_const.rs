// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.
use dojo_env::{EnvError, Environment, get_parsed};

pub const DOJO_POSTGRES_URL: &str = "DOJO_POSTGRES_URL";
pub const DATABASE_URL: &str = "DATABASE_URL";
pub const DOJO_POSTGRES_READ_ONLY: &str = "DOJO_POSTGRES_READ_ONLY";

pub const DOJO_SERVER_HOST: &str = "DOJO_SERVER_HOST";
pub const DOJO_SERVER_PORT: &str = "DOJO_SERVER_PORT";

pub const DOJO_LOG: &str = "DOJO_LOG";

const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
const DEFAULT_SERVER_PORT: u16 = 9876;

pub fn get_postgres_url(env: &dyn Environment) -> Result<String, EnvError> {
    env.get_first(&[DOJO_POSTGRES_URL, DATABASE_URL])
        .ok_or_else(|| EnvError::Missing(format!("{DOJO_POSTGRES_URL} (or {DATABASE_URL})")))
}

pub fn is_read_only(env: &dyn Environment) -> Result<bool, EnvError> {
    env.enabled(DOJO_POSTGRES_READ_ONLY, true)
}

pub fn get_server_host(env: &dyn Environment) -> String {
    env.get_or_else(DOJO_SERVER_HOST, DEFAULT_SERVER_HOST)
}

pub fn get_server_port(env: &dyn Environment) -> Result<u16, EnvError> {
    get_parsed(env, DOJO_SERVER_PORT, DEFAULT_SERVER_PORT)
}

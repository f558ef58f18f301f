// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Access to process configuration through an injectable [`Environment`].
//!
//! Production code reads from [`SystemEnvironment`]; tests hand a [`MapEnvironment`]
//! to the same code paths.

mod map;

use std::str::FromStr;

pub use map::MapEnvironment;

pub trait Environment: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn enabled(&self, key: &str, default_value: bool) -> Result<bool, EnvError> {
        match self.get(key) {
            Some(value) => match value.to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" | "enabled" | "enable" => Ok(true),
                "false" | "0" | "no" | "off" | "disabled" | "disable" => Ok(false),
                _ => Err(EnvError::InvalidBoolean {
                    key: key.to_string(),
                    value,
                }),
            },
            None => Ok(default_value),
        }
    }

    fn get_or_else(&self, key: &str, default_value: &str) -> String {
        self.get(key).unwrap_or(default_value.to_string())
    }

    /// The first of `keys` that is set to a non-blank value.
    fn get_first(&self, keys: &[&'static str]) -> Option<String> {
        keys.iter()
            .filter_map(|key| self.get(key))
            .find(|value| !value.trim().is_empty())
    }
}

/// Parse the value of `key`, falling back to `default_value` when it is not set.
pub fn get_parsed<T>(
    env: &dyn Environment,
    key: &'static str,
    default_value: T,
) -> Result<T, EnvError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env.get(key) {
        Some(value) => match value.trim().parse() {
            Ok(parsed) => Ok(parsed),
            Err(e) => Err(EnvError::InvalidValue {
                key,
                message: e.to_string(),
                value,
            }),
        },
        None => Ok(default_value),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error(
        "Invalid value for {key}: {value}. Expected true, 1, yes, on, enabled, enable OR false, 0, no, off, disabled, disable"
    )]
    InvalidBoolean { key: String, value: String },

    #[error("Invalid env value {value} for {key}: {message}")]
    InvalidValue {
        key: &'static str,
        value: String,
        message: String,
    },

    #[error("Missing required env value {0}")]
    Missing(String),
}

pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enabled_accepts_common_spellings() {
        let env = MapEnvironment::from([("A", "Yes"), ("B", "off"), ("C", "maybe")]);

        assert!(env.enabled("A", false).unwrap());
        assert!(!env.enabled("B", true).unwrap());
        assert!(env.enabled("UNSET", true).unwrap());
        assert!(matches!(
            env.enabled("C", true),
            Err(EnvError::InvalidBoolean { .. })
        ));
    }

    #[test]
    fn parsed_values() {
        let env = MapEnvironment::from([("PORT", " 8080 "), ("BAD_PORT", "eighty")]);

        assert_eq!(get_parsed::<u16>(&env, "PORT", 1).unwrap(), 8080);
        assert_eq!(get_parsed::<u16>(&env, "MISSING_PORT", 9876).unwrap(), 9876);

        let err = get_parsed::<u16>(&env, "BAD_PORT", 1).unwrap_err();
        assert!(err.to_string().contains("BAD_PORT"));
    }

    #[test]
    fn first_non_blank_key_wins() {
        let env = MapEnvironment::from([("PRIMARY", "  "), ("SECONDARY", "postgres://db")]);

        assert_eq!(
            env.get_first(&["PRIMARY", "SECONDARY"]).as_deref(),
            Some("postgres://db")
        );
        assert_eq!(env.get_first(&["NONE"]), None);
    }
}

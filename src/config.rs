// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::DEFAULT_REQUEST_TIMEOUT_SECS;
use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Service configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Namespace used when a request does not name one
    pub default_namespace: String,
    /// Build a fresh client from each request's credentials instead of using the service account
    pub enable_client_auth: bool,
    /// Deadline applied to requests that carry none of their own
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let default_namespace = env::var("DEFAULT_NAMESPACE")
            .context("DEFAULT_NAMESPACE environment variable not set")?;
        let enable_client_auth = parse_bool(env::var("ENABLE_CLIENT_AUTH").ok().as_deref());
        let request_timeout = match env::var("REQUEST_TIMEOUT_SECS") {
            Ok(secs) => Duration::from_secs(
                secs.parse()
                    .with_context(|| format!("REQUEST_TIMEOUT_SECS is not a number: {}", secs))?,
            ),
            Err(_) => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        Ok(Config {
            default_namespace,
            enable_client_auth,
            request_timeout,
        })
    }

    /// Configuration with the given default namespace and everything else defaulted
    pub fn new(default_namespace: impl Into<String>) -> Self {
        Config {
            default_namespace: default_namespace.into(),
            enable_client_auth: false,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

fn parse_bool(value: Option<&str>) -> bool {
    value
        .map(|v| v.trim().to_ascii_lowercase())
        .is_some_and(|v| v == "true" || v == "1")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool(Some("true")));
        assert!(parse_bool(Some(" TRUE ")));
        assert!(parse_bool(Some("1")));
        assert!(!parse_bool(Some("false")));
        assert!(!parse_bool(Some("yes please")));
        assert!(!parse_bool(None));
    }

    #[test]
    fn test_new_defaults() {
        let config = Config::new("ns-a");
        assert_eq!(config.default_namespace, "ns-a");
        assert!(!config.enable_client_auth);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }
}

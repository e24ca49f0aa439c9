// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Per-request credentials attached out-of-band to a call.

use crate::constants::metadata;
use http::HeaderMap;
use std::fmt;
use std::time::Duration;

/// Cluster credentials supplied by the caller alongside a request
#[derive(Clone, Default)]
pub struct RequestCredentials {
    /// Serialized kubeconfig, YAML or JSON
    pub rest_config: Option<String>,
    pub bearer_token: Option<String>,
}

impl RequestCredentials {
    pub fn new(rest_config: Option<String>, bearer_token: Option<String>) -> Self {
        Self {
            rest_config,
            bearer_token: bearer_token.and_then(normalize_token),
        }
    }

    /// Read credentials from request metadata. Values that are not valid
    /// UTF-8 are treated as absent.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let value = |key: &str| {
            headers
                .get(key)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        Self::new(value(metadata::CLIENT_REST_CONFIG), value(metadata::AUTH_TOKEN))
    }
}

const BEARER: &str = "Bearer ";

/// Empty tokens count as absent, and a `Bearer ` scheme prefix is dropped
fn normalize_token(token: String) -> Option<String> {
    let token = token.trim_start();
    let token = match token.get(..BEARER.len()) {
        Some(scheme) if scheme.eq_ignore_ascii_case(BEARER) => &token[BEARER.len()..],
        _ => token,
    }
    .trim();

    (!token.is_empty()).then(|| token.to_string())
}

impl fmt::Debug for RequestCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestCredentials")
            .field("rest_config", &self.rest_config.as_ref().map(|_| "<kubeconfig>"))
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Everything a handler knows about the call besides its payload
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub credentials: RequestCredentials,
    /// Overrides the service-wide request timeout
    pub timeout: Option<Duration>,
}

impl RequestContext {
    pub fn new(credentials: RequestCredentials) -> Self {
        Self {
            credentials,
            timeout: None,
        }
    }

    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self::new(RequestCredentials::from_headers(headers))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

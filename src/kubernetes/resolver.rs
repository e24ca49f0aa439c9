// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Per-request choice between the service's own clients and caller-scoped ones

use crate::credentials::RequestCredentials;
use crate::error::Result;
use crate::kubernetes::client::ClusterClients;
use std::ops::Deref;
use std::sync::Arc;

/// How clients are obtained for a request, fixed at startup
#[derive(Clone)]
pub enum ClientResolver {
    /// Every request uses the service's own clients; request metadata is ignored
    Shared(Arc<ClusterClients>),
    /// Every request must bring credentials and gets clients built from them
    PerRequest,
}

/// Clients resolved for one request
pub enum ServiceIdentity<'a> {
    Shared(&'a ClusterClients),
    /// Owned by the request and dropped with it
    Scoped(ClusterClients),
}

impl Deref for ServiceIdentity<'_> {
    type Target = ClusterClients;

    fn deref(&self) -> &ClusterClients {
        match self {
            ServiceIdentity::Shared(clients) => clients,
            ServiceIdentity::Scoped(clients) => clients,
        }
    }
}

impl ClientResolver {
    pub fn new(shared: Arc<ClusterClients>, require_per_request_auth: bool) -> Self {
        if require_per_request_auth {
            ClientResolver::PerRequest
        } else {
            ClientResolver::Shared(shared)
        }
    }

    pub async fn resolve(&self, credentials: &RequestCredentials) -> Result<ServiceIdentity<'_>> {
        match self {
            ClientResolver::Shared(clients) => Ok(ServiceIdentity::Shared(clients)),
            ClientResolver::PerRequest => ClusterClients::from_credentials(credentials)
                .await
                .map(ServiceIdentity::Scoped),
        }
    }
}

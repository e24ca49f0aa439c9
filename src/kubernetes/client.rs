// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Client pair construction from caller-supplied kubeconfigs

use crate::credentials::RequestCredentials;
use crate::error::{Result, ServiceError};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config as KConfig};
use secrecy::SecretString;
use std::fmt;
use tracing::{debug, error, instrument};

/// The clients a request talks to the cluster with
#[derive(Clone)]
pub struct ClusterClients {
    /// Client used for WorkflowTemplate resources
    pub templates: Client,
    /// Client for core cluster resources
    pub cluster: Client,
}

impl ClusterClients {
    /// Share one underlying client for both roles, as done for the service account
    pub fn from_client(client: Client) -> Self {
        Self {
            templates: client.clone(),
            cluster: client,
        }
    }

    /// Clients for the service's own identity, inferred from the environment
    pub async fn try_default() -> kube::Result<Self> {
        Ok(Self::from_client(Client::try_default().await?))
    }

    /// Build a fresh pair from request credentials
    #[instrument(skip_all)]
    pub async fn from_credentials(credentials: &RequestCredentials) -> Result<Self> {
        let config = connection_config(credentials).await?;

        let templates = Client::try_from(config.clone()).map_err(|e| {
            error!(
                config = ?RedactedConfig(&config),
                "Failure to create workflow template client: {}", e
            );
            ServiceError::ClientConstructionFailed(e)
        })?;

        let cluster = Client::try_from(config.clone()).map_err(|e| {
            error!(
                config = ?RedactedConfig(&config),
                "Failure to create cluster client: {}", e
            );
            ServiceError::ClientConstructionFailed(e)
        })?;

        debug!("Created request-scoped clients for {}", config.cluster_url);
        Ok(Self { templates, cluster })
    }
}

/// Parse the serialized kubeconfig and apply the bearer token override
pub async fn connection_config(credentials: &RequestCredentials) -> Result<KConfig> {
    let Some(rest_config) = credentials.rest_config.as_deref() else {
        return Err(ServiceError::MissingCredentials);
    };

    let kubeconfig: Kubeconfig = serde_yaml::from_str(rest_config)
        .map_err(|e| ServiceError::MalformedCredentials(format!("Failed to parse kubeconfig: {}", e)))?;
    reject_local_references(&kubeconfig)?;

    let mut config = KConfig::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
        .await
        .map_err(|e| ServiceError::MalformedCredentials(format!("Failed to create config: {}", e)))?;

    if let Some(token) = credentials.bearer_token.as_deref() {
        override_credentials(&mut config, token);
    }

    Ok(config)
}

/// A caller's kubeconfig is evaluated on this host, so anything that reads
/// local files or runs local commands would act with the service's privileges.
fn reject_local_references(kubeconfig: &Kubeconfig) -> Result<()> {
    let rejected = |what: &str, name: &str| {
        Err(ServiceError::MalformedCredentials(format!(
            "{} is not allowed in client kubeconfig ({})",
            what, name
        )))
    };

    for named in &kubeconfig.clusters {
        let Some(cluster) = named.cluster.as_ref() else {
            continue;
        };
        if cluster.certificate_authority.is_some() {
            return rejected("certificate-authority file", &named.name);
        }
    }

    for named in &kubeconfig.auth_infos {
        let Some(user) = named.auth_info.as_ref() else {
            continue;
        };
        if user.token_file.is_some() {
            return rejected("tokenFile", &named.name);
        }
        if user.exec.is_some() {
            return rejected("exec", &named.name);
        }
        if user.auth_provider.is_some() {
            return rejected("auth-provider", &named.name);
        }
        if user.client_certificate.is_some() {
            return rejected("client-certificate file", &named.name);
        }
        if user.client_key.is_some() {
            return rejected("client-key file", &named.name);
        }
    }

    Ok(())
}

/// Make `token` the only credential the client presents
fn override_credentials(config: &mut KConfig, token: &str) {
    let auth = &mut config.auth_info;
    auth.token = Some(SecretString::from(token.to_string()));
    auth.token_file = None;
    auth.username = None;
    auth.password = None;
    auth.auth_provider = None;
    auth.exec = None;
}

/// Connection descriptor for logs, with every secret left out
pub struct RedactedConfig<'a>(pub &'a KConfig);

impl fmt::Debug for RedactedConfig<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.0;
        let auth = &config.auth_info;

        f.debug_struct("Config")
            .field("cluster_url", &config.cluster_url.to_string())
            .field("default_namespace", &config.default_namespace)
            .field("tls_server_name", &config.tls_server_name)
            .field("accept_invalid_certs", &config.accept_invalid_certs)
            .field("root_certs", &config.root_cert.as_ref().map_or(0, Vec::len))
            .field("proxy_url", &config.proxy_url.as_ref().map(ToString::to_string))
            .field("username", &auth.username)
            .field("token", &auth.token.as_ref().map(|_| "[REDACTED]"))
            .field(
                "client_certificate",
                &(auth.client_certificate.is_some() || auth.client_certificate_data.is_some()),
            )
            .finish()
    }
}

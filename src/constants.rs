// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Request metadata keys carrying per-request cluster credentials
pub mod metadata {
    /// Serialized kubeconfig (YAML or JSON) of the calling user
    pub const CLIENT_REST_CONFIG: &str = "client-rest-config";
    /// Bearer token that replaces any credential in the kubeconfig
    pub const AUTH_TOKEN: &str = "auth-token";
}

/// WorkflowTemplate API coordinates
pub mod api {
    pub const GROUP: &str = "argoproj.io";
    pub const VERSION: &str = "v1alpha1";
    pub const KIND: &str = "WorkflowTemplate";
}

/// Status marker returned for a successful delete
pub const DELETED_STATUS: &str = "Deleted";

/// Default per-request deadline when the caller sets none
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// CRD polling configuration
pub mod crd {
    /// Initial polling interval in seconds when waiting for CRD
    pub const POLL_INTERVAL_SECS: u64 = 10;
    /// Maximum polling interval in seconds (exponential backoff cap)
    pub const POLL_MAX_INTERVAL_SECS: u64 = 60;
}

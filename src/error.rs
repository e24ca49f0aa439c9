// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::validation::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Client kubeconfig is not found in request metadata")]
    MissingCredentials,

    #[error("Failed to parse client kubeconfig: {0}")]
    MalformedCredentials(String),

    #[error("Failed to create client from request credentials: {0}")]
    ClientConstructionFailed(#[source] kube::Error),

    #[error("WorkflowTemplate is not found in request body")]
    MissingTemplateBody,

    #[error("Failed to validate workflow template: {0}")]
    ValidationFailed(#[source] ValidationError),

    #[error("WorkflowTemplate {namespace}/{name} not found")]
    NotFound { namespace: String, name: String },

    #[error("Kubernetes API error: {0}")]
    BackendUnavailable(#[source] kube::Error),

    #[error("Request cancelled before completion")]
    Cancelled,
}

/// A lookup the validator could not complete is a backend failure, not a verdict on the template
impl From<ValidationError> for ServiceError {
    fn from(error: ValidationError) -> Self {
        match error {
            ValidationError::Lookup { source, .. } => ServiceError::BackendUnavailable(source),
            other => ServiceError::ValidationFailed(other),
        }
    }
}

impl ServiceError {
    /// Translate a backend failure for `namespace/name`, singling out 404s.
    pub fn from_backend(error: kube::Error, namespace: &str, name: &str) -> Self {
        match error {
            kube::Error::Api(ref response) if response.code == 404 => ServiceError::NotFound {
                namespace: namespace.to_string(),
                name: name.to_string(),
            },
            other => ServiceError::BackendUnavailable(other),
        }
    }

    /// HTTP status a calling layer should answer with.
    pub fn status_code(&self) -> http::StatusCode {
        use http::StatusCode;

        match self {
            ServiceError::MissingCredentials => StatusCode::UNAUTHORIZED,
            ServiceError::MalformedCredentials(_) => StatusCode::BAD_REQUEST,
            ServiceError::ClientConstructionFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::MissingTemplateBody => StatusCode::BAD_REQUEST,
            ServiceError::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
            ServiceError::BackendUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            // nginx's "client closed request"
            ServiceError::Cancelled => {
                StatusCode::from_u16(499).unwrap_or(StatusCode::REQUEST_TIMEOUT)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;

// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Validation seam: the validator and the lookup it resolves references with.

pub mod getter;
pub mod reference;

pub use getter::NamespacedTemplateGetter;
pub use reference::ReferenceValidator;

use crate::types::WorkflowTemplate;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("workflow template has no name")]
    MissingName,

    #[error("workflow template has no templates")]
    NoTemplates,

    #[error("template name '{0}' is not unique")]
    DuplicateTemplate(String),

    #[error("spec.entrypoint template '{0}' is not defined")]
    UnknownEntrypoint(String),

    #[error("templates.{caller}.{step} must specify either template or templateRef")]
    MissingTarget { caller: String, step: String },

    #[error("templates.{caller}.{step} template '{template}' is not defined")]
    UnknownTemplate {
        caller: String,
        step: String,
        template: String,
    },

    #[error("templates.{caller}.{step} templateRef {name}/{template} could not be resolved")]
    UnresolvedTemplateRef {
        caller: String,
        step: String,
        name: String,
        template: String,
    },

    #[error("failed to look up workflow template '{name}': {source}")]
    Lookup {
        name: String,
        #[source]
        source: kube::Error,
    },

    #[error("{0}")]
    Invalid(String),
}

/// Read-only lookup over the WorkflowTemplates of one namespace
#[async_trait]
pub trait TemplateGetter: Send + Sync {
    async fn get(&self, name: &str) -> kube::Result<Option<WorkflowTemplate>>;
}

/// Decides whether a WorkflowTemplate may be stored
#[async_trait]
pub trait TemplateValidator: Send + Sync {
    async fn validate(
        &self,
        getter: &dyn TemplateGetter,
        template: &WorkflowTemplate,
    ) -> Result<(), ValidationError>;
}

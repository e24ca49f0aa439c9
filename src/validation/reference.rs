// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Structural validation: names, entrypoint and template references.

use crate::types::{TemplateCall, TemplateRef, WorkflowTemplate};
use crate::validation::{TemplateGetter, TemplateValidator, ValidationError};
use async_trait::async_trait;
use kube::ResourceExt;
use std::collections::HashSet;
use tracing::debug;

/// Checks that every template a WorkflowTemplate invokes exists, either
/// locally or in another WorkflowTemplate of the same namespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceValidator;

#[async_trait]
impl TemplateValidator for ReferenceValidator {
    async fn validate(
        &self,
        getter: &dyn TemplateGetter,
        wft: &WorkflowTemplate,
    ) -> Result<(), ValidationError> {
        if wft.metadata.name.as_deref().unwrap_or_default().is_empty() {
            return Err(ValidationError::MissingName);
        }
        if wft.spec.templates.is_empty() {
            return Err(ValidationError::NoTemplates);
        }

        let mut names = HashSet::new();
        for template in &wft.spec.templates {
            if !names.insert(template.name.as_str()) {
                return Err(ValidationError::DuplicateTemplate(template.name.clone()));
            }
        }

        if let Some(entrypoint) = &wft.spec.entrypoint {
            if !names.contains(entrypoint.as_str()) {
                return Err(ValidationError::UnknownEntrypoint(entrypoint.clone()));
            }
        }

        for template in &wft.spec.templates {
            for call in template.calls() {
                check_call(getter, wft, &names, &template.name, call).await?;
            }
        }

        Ok(())
    }
}

async fn check_call(
    getter: &dyn TemplateGetter,
    wft: &WorkflowTemplate,
    local: &HashSet<&str>,
    caller: &str,
    call: &TemplateCall,
) -> Result<(), ValidationError> {
    match (&call.template, &call.template_ref) {
        (Some(template), _) => {
            if local.contains(template.as_str()) {
                Ok(())
            } else {
                Err(ValidationError::UnknownTemplate {
                    caller: caller.to_string(),
                    step: call.name.clone(),
                    template: template.clone(),
                })
            }
        }
        (None, Some(template_ref)) => {
            if resolve_ref(getter, wft, template_ref).await? {
                Ok(())
            } else {
                Err(ValidationError::UnresolvedTemplateRef {
                    caller: caller.to_string(),
                    step: call.name.clone(),
                    name: template_ref.name.clone(),
                    template: template_ref.template.clone(),
                })
            }
        }
        (None, None) => Err(ValidationError::MissingTarget {
            caller: caller.to_string(),
            step: call.name.clone(),
        }),
    }
}

async fn resolve_ref(
    getter: &dyn TemplateGetter,
    wft: &WorkflowTemplate,
    template_ref: &TemplateRef,
) -> Result<bool, ValidationError> {
    // A reference to the template being validated resolves against itself,
    // it may not be stored yet.
    if template_ref.name == wft.name_any() {
        return Ok(wft.template(&template_ref.template).is_some());
    }

    debug!("Resolving templateRef {}/{}", template_ref.name, template_ref.template);

    let referenced = getter
        .get(&template_ref.name)
        .await
        .map_err(|source| ValidationError::Lookup {
            name: template_ref.name.clone(),
            source,
        })?;

    Ok(referenced.is_some_and(|r| r.template(&template_ref.template).is_some()))
}

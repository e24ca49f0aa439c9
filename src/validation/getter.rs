// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::types::WorkflowTemplate;
use crate::validation::TemplateGetter;
use async_trait::async_trait;
use kube::Api;

/// Template lookup backed by a namespaced API handle
pub struct NamespacedTemplateGetter {
    api: Api<WorkflowTemplate>,
}

impl NamespacedTemplateGetter {
    pub fn new(api: Api<WorkflowTemplate>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl TemplateGetter for NamespacedTemplateGetter {
    async fn get(&self, name: &str) -> kube::Result<Option<WorkflowTemplate>> {
        self.api.get_opt(name).await
    }
}

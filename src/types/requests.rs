// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::DELETED_STATUS;
use crate::types::workflow_template::WorkflowTemplate;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub template: Option<WorkflowTemplate>,
}

/// Lint takes the same payload as create
pub type LintRequest = CreateRequest;

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetRequest {
    #[serde(default)]
    pub namespace: Option<String>,
    pub template_name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListRequest {
    #[serde(default)]
    pub namespace: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRequest {
    #[serde(default)]
    pub namespace: Option<String>,
    pub template_name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub template_name: String,
    pub status: String,
}

impl DeleteResponse {
    pub fn deleted(template_name: impl Into<String>) -> Self {
        Self {
            template_name: template_name.into(),
            status: DELETED_STATUS.to_string(),
        }
    }
}

impl CreateRequest {
    pub fn new(template: WorkflowTemplate) -> Self {
        Self {
            namespace: None,
            template: Some(template),
        }
    }

    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }
}

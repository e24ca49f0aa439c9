// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resource and request/response types.

pub mod requests;
pub mod workflow_template;

pub use requests::{CreateRequest, DeleteRequest, DeleteResponse, GetRequest, LintRequest, ListRequest};
pub use workflow_template::{DagTemplate, Template, TemplateCall, TemplateRef, WorkflowTemplate, WorkflowTemplateSpec};

// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Request handlers for WorkflowTemplate operations.

pub mod templates;

pub use templates::TemplateService;

// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for CRD discovery and client resolution.

pub mod client;
pub mod crd;
pub mod resolver;

pub use client::ClusterClients;
pub use crd::wait_for_workflow_template_crd;
pub use resolver::{ClientResolver, ServiceIdentity};

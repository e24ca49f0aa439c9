// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{bail, Context, Result};
use kube::ResourceExt;
use std::sync::Arc;
use tracing::{error, info};

use stencil::config::Config;
use stencil::credentials::RequestContext;
use stencil::kubernetes::{wait_for_workflow_template_crd, ClusterClients};
use stencil::service::TemplateService;
use stencil::types::{CreateRequest, ListRequest, WorkflowTemplate};

const USAGE: &str = "usage: stencil lint <file>... | stencil list [namespace]";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        bail!(USAGE);
    };

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: default_namespace={}, enable_client_auth={}",
        config.default_namespace, config.enable_client_auth
    );

    // Create the shared Kubernetes clients
    let clients = ClusterClients::try_default()
        .await
        .context("Failed to create Kubernetes client")?;
    info!("Connected to Kubernetes cluster");

    info!("Waiting for WorkflowTemplate CRD to become available...");
    wait_for_workflow_template_crd(&clients.cluster).await;

    let service = TemplateService::new(&config, Arc::new(clients));
    let ctx = RequestContext::default();

    match command.as_str() {
        "lint" if !rest.is_empty() => lint_files(&service, &ctx, rest).await,
        "list" => {
            let req = ListRequest {
                namespace: rest.first().cloned(),
            };
            for template in service.list(&ctx, &req).await? {
                println!("{}", template.name_any());
            }
            Ok(())
        }
        _ => bail!(USAGE),
    }
}

async fn lint_files(service: &TemplateService, ctx: &RequestContext, paths: &[String]) -> Result<()> {
    let mut failed = 0;

    for path in paths {
        let contents =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
        let template: WorkflowTemplate = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path))?;

        match service.lint(ctx, CreateRequest::new(template)).await {
            Ok(template) => info!("{}: workflow template '{}' is valid", path, template.name_any()),
            Err(e) => {
                error!("{}: {}", path, e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} workflow templates failed linting", failed, paths.len());
    }
    Ok(())
}

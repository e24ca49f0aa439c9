// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! WorkflowTemplate create, get, list, delete and lint.

use crate::config::Config;
use crate::credentials::RequestContext;
use crate::error::{Result, ServiceError};
use crate::kubernetes::{ClientResolver, ClusterClients};
use crate::types::{
    CreateRequest, DeleteRequest, DeleteResponse, GetRequest, LintRequest, ListRequest,
    WorkflowTemplate,
};
use crate::validation::{NamespacedTemplateGetter, ReferenceValidator, TemplateValidator};
use kube::{
    api::{DeleteParams, ListParams, PostParams},
    Api, ResourceExt,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, instrument};

pub struct TemplateService {
    namespace: String,
    resolver: ClientResolver,
    validator: Arc<dyn TemplateValidator>,
    request_timeout: Duration,
}

impl TemplateService {
    pub fn new(config: &Config, shared: Arc<ClusterClients>) -> Self {
        Self {
            namespace: config.default_namespace.clone(),
            resolver: ClientResolver::new(shared, config.enable_client_auth),
            validator: Arc::new(ReferenceValidator),
            request_timeout: config.request_timeout,
        }
    }

    /// Replace the validator used by create and lint
    pub fn with_validator(mut self, validator: Arc<dyn TemplateValidator>) -> Self {
        self.validator = validator;
        self
    }

    /// The requested namespace if one was given, the configured default otherwise
    pub fn effective_namespace<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested
            .filter(|ns| !ns.is_empty())
            .unwrap_or(&self.namespace)
    }

    #[instrument(skip_all, fields(namespace = %self.effective_namespace(req.namespace.as_deref())))]
    pub async fn create(&self, ctx: &RequestContext, req: CreateRequest) -> Result<WorkflowTemplate> {
        self.within_deadline(ctx, async {
            let clients = self.resolver.resolve(&ctx.credentials).await?;
            let namespace = self.effective_namespace(req.namespace.as_deref());
            let api = templates_api(&clients, namespace);

            let template = self.validated(&api, req.template.as_ref()).await?;
            let name = template.name_any();

            let created = api
                .create(&PostParams::default(), template)
                .await
                .map_err(|e| ServiceError::from_backend(e, namespace, &name))?;

            info!("Created workflow template {}/{}", namespace, name);
            Ok(created)
        })
        .await
    }

    #[instrument(skip_all, fields(namespace = %self.effective_namespace(req.namespace.as_deref()), name = %req.template_name))]
    pub async fn get(&self, ctx: &RequestContext, req: &GetRequest) -> Result<WorkflowTemplate> {
        self.within_deadline(ctx, async {
            let clients = self.resolver.resolve(&ctx.credentials).await?;
            let namespace = self.effective_namespace(req.namespace.as_deref());

            templates_api(&clients, namespace)
                .get(&req.template_name)
                .await
                .map_err(|e| ServiceError::from_backend(e, namespace, &req.template_name))
        })
        .await
    }

    #[instrument(skip_all, fields(namespace = %self.effective_namespace(req.namespace.as_deref())))]
    pub async fn list(&self, ctx: &RequestContext, req: &ListRequest) -> Result<Vec<WorkflowTemplate>> {
        self.within_deadline(ctx, async {
            let clients = self.resolver.resolve(&ctx.credentials).await?;
            let namespace = self.effective_namespace(req.namespace.as_deref());

            let list = templates_api(&clients, namespace)
                .list(&ListParams::default())
                .await
                .map_err(ServiceError::BackendUnavailable)?;

            debug!("Found {} workflow templates", list.items.len());
            Ok(list.items)
        })
        .await
    }

    #[instrument(skip_all, fields(namespace = %self.effective_namespace(req.namespace.as_deref()), name = %req.template_name))]
    pub async fn delete(&self, ctx: &RequestContext, req: &DeleteRequest) -> Result<DeleteResponse> {
        self.within_deadline(ctx, async {
            let clients = self.resolver.resolve(&ctx.credentials).await?;
            let namespace = self.effective_namespace(req.namespace.as_deref());

            templates_api(&clients, namespace)
                .delete(&req.template_name, &DeleteParams::default())
                .await
                .map_err(|e| ServiceError::from_backend(e, namespace, &req.template_name))?;

            info!("Deleted workflow template {}/{}", namespace, req.template_name);
            Ok(DeleteResponse::deleted(&req.template_name))
        })
        .await
    }

    /// Validate without storing; returns the submitted template
    #[instrument(skip_all, fields(namespace = %self.effective_namespace(req.namespace.as_deref())))]
    pub async fn lint(&self, ctx: &RequestContext, req: LintRequest) -> Result<WorkflowTemplate> {
        self.within_deadline(ctx, async {
            let clients = self.resolver.resolve(&ctx.credentials).await?;
            let namespace = self.effective_namespace(req.namespace.as_deref());
            let api = templates_api(&clients, namespace);

            self.validated(&api, req.template.as_ref()).await?;
            Ok(())
        })
        .await?;

        req.template.ok_or(ServiceError::MissingTemplateBody)
    }

    /// The validation step shared by create and lint
    async fn validated<'t>(
        &self,
        api: &Api<WorkflowTemplate>,
        template: Option<&'t WorkflowTemplate>,
    ) -> Result<&'t WorkflowTemplate> {
        let template = template.ok_or(ServiceError::MissingTemplateBody)?;
        let getter = NamespacedTemplateGetter::new(api.clone());

        self.validator.validate(&getter, template).await?;
        Ok(template)
    }

    /// Abandon `operation` once the request's deadline passes
    async fn within_deadline<T>(
        &self,
        ctx: &RequestContext,
        operation: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        let deadline = ctx.timeout.unwrap_or(self.request_timeout);

        timeout(deadline, operation)
            .await
            .unwrap_or(Err(ServiceError::Cancelled))
    }
}

fn templates_api(clients: &ClusterClients, namespace: &str) -> Api<WorkflowTemplate> {
    Api::namespaced(clients.templates.clone(), namespace)
}

// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities: an in-memory Kubernetes API serving WorkflowTemplates.

use bytes::Bytes;
use http::{Method, Request, Response, StatusCode};
use http_body_util::BodyExt;
use kube::client::Body;
use kube::Client;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;
use tower::Service;

pub const KUBECONFIG: &str = r#"
apiVersion: v1
kind: Config
clusters:
  - name: downstream
    cluster:
      server: https://10.0.0.1:6443
      insecure-skip-tls-verify: true
contexts:
  - name: downstream
    context:
      cluster: downstream
      user: alice
      namespace: team-a
current-context: downstream
users:
  - name: alice
    user:
      token: embedded-token
"#;

const TEMPLATES_PREFIX: &str = "/apis/argoproj.io/v1alpha1/namespaces/";

#[derive(Default)]
struct State {
    /// (namespace, name) -> stored object
    templates: BTreeMap<(String, String), Value>,
    requests: Vec<(String, String)>,
    next_version: u64,
}

/// A fake API server storing WorkflowTemplates in memory.
#[derive(Clone, Default)]
pub struct FakeApiServer {
    state: Arc<Mutex<State>>,
    serve_crd: bool,
    latency: Option<Duration>,
    /// Names whose GET answers with an internal error
    failing_gets: Vec<String>,
}

impl FakeApiServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advertise the WorkflowTemplate resource through discovery
    pub fn with_workflow_template_crd(mut self) -> Self {
        self.serve_crd = true;
        self
    }

    /// Delay every response
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Answer GETs of `name` with a 500
    pub fn with_failing_get(mut self, name: &str) -> Self {
        self.failing_gets.push(name.to_string());
        self
    }

    /// Build a kube Client from this fake server
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    /// Every (method, path) received so far
    pub fn requests(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Names stored in `namespace`, in storage order
    pub fn stored_names(&self, namespace: &str) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .templates
            .keys()
            .filter(|(ns, _)| ns == namespace)
            .map(|(_, name)| name.clone())
            .collect()
    }

    fn handle(&self, method: &Method, path: &str, body: &[u8]) -> (StatusCode, Value) {
        let mut state = self.state.lock().unwrap();
        state.requests.push((method.to_string(), path.to_string()));

        match path {
            "/apis" => return (StatusCode::OK, self.api_groups()),
            "/apis/argoproj.io/v1alpha1" if self.serve_crd => {
                return (StatusCode::OK, api_resources())
            }
            _ => {}
        }

        let Some(rest) = path.strip_prefix(TEMPLATES_PREFIX) else {
            return (StatusCode::NOT_FOUND, not_found_json("path", path));
        };
        let segments: Vec<&str> = rest.split('/').collect();

        match (method, segments.as_slice()) {
            (&Method::GET, [ns, "workflowtemplates"]) => {
                let items: Vec<Value> = state
                    .templates
                    .iter()
                    .filter(|((n, _), _)| n == ns)
                    .map(|(_, v)| v.clone())
                    .collect();
                (
                    StatusCode::OK,
                    json!({
                        "apiVersion": "argoproj.io/v1alpha1",
                        "kind": "WorkflowTemplateList",
                        "metadata": { "resourceVersion": state.next_version.to_string() },
                        "items": items
                    }),
                )
            }
            (&Method::POST, [ns, "workflowtemplates"]) => {
                let mut object: Value = match serde_json::from_slice(body) {
                    Ok(v) => v,
                    Err(e) => return (StatusCode::BAD_REQUEST, status_json(400, "BadRequest", &e.to_string())),
                };
                let name = object["metadata"]["name"].as_str().unwrap_or_default().to_string();
                let key = (ns.to_string(), name.clone());
                if state.templates.contains_key(&key) {
                    return (
                        StatusCode::CONFLICT,
                        status_json(
                            409,
                            "AlreadyExists",
                            &format!("workflowtemplates.argoproj.io \"{}\" already exists", name),
                        ),
                    );
                }
                state.next_version += 1;
                object["metadata"]["namespace"] = json!(ns);
                object["metadata"]["resourceVersion"] = json!(state.next_version.to_string());
                state.templates.insert(key, object.clone());
                (StatusCode::CREATED, object)
            }
            (&Method::GET, [_, "workflowtemplates", name])
                if self.failing_gets.iter().any(|f| f == name) =>
            {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    status_json(500, "InternalError", "etcdserver: request timed out"),
                )
            }
            (&Method::GET, [ns, "workflowtemplates", name]) => {
                match state.templates.get(&(ns.to_string(), name.to_string())) {
                    Some(object) => (StatusCode::OK, object.clone()),
                    None => (StatusCode::NOT_FOUND, not_found_json("workflowtemplates.argoproj.io", name)),
                }
            }
            (&Method::DELETE, [ns, "workflowtemplates", name]) => {
                match state.templates.remove(&(ns.to_string(), name.to_string())) {
                    Some(object) => (StatusCode::OK, object),
                    None => (StatusCode::NOT_FOUND, not_found_json("workflowtemplates.argoproj.io", name)),
                }
            }
            _ => (
                StatusCode::METHOD_NOT_ALLOWED,
                status_json(405, "MethodNotAllowed", "method not allowed"),
            ),
        }
    }

    fn api_groups(&self) -> Value {
        let groups = if self.serve_crd {
            json!([{
                "name": "argoproj.io",
                "versions": [{ "groupVersion": "argoproj.io/v1alpha1", "version": "v1alpha1" }],
                "preferredVersion": { "groupVersion": "argoproj.io/v1alpha1", "version": "v1alpha1" }
            }])
        } else {
            json!([])
        };
        json!({ "kind": "APIGroupList", "apiVersion": "v1", "groups": groups })
    }
}

fn api_resources() -> Value {
    json!({
        "kind": "APIResourceList",
        "apiVersion": "v1",
        "groupVersion": "argoproj.io/v1alpha1",
        "resources": [{
            "name": "workflowtemplates",
            "singularName": "workflowtemplate",
            "namespaced": true,
            "kind": "WorkflowTemplate",
            "verbs": ["create", "delete", "get", "list"]
        }]
    })
}

impl Service<Request<Body>> for FakeApiServer {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let server = self.clone();

        Box::pin(async move {
            let (parts, body) = req.into_parts();
            let body: Bytes = body.collect().await?.to_bytes();

            if let Some(latency) = server.latency {
                tokio::time::sleep(latency).await;
            }

            let (status, value) = server.handle(&parts.method, parts.uri.path(), &body);

            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(value.to_string().into_bytes()))?)
        })
    }
}

fn status_json(code: u16, reason: &str, message: &str) -> Value {
    json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": message,
        "reason": reason,
        "code": code
    })
}

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> Value {
    status_json(404, "NotFound", &format!("{} \"{}\" not found", resource, name))
}

/// Log output captured from a thread-local subscriber
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync {
        let logs = self.clone();
        tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(move || logs.clone())
            .finish()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Parse a WorkflowTemplate from YAML
pub fn workflow_template(yaml: &str) -> crate::types::WorkflowTemplate {
    serde_yaml::from_str(yaml).unwrap()
}

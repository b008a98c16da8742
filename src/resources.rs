use k8s_openapi::api::core::v1::ContainerPort;
use serde_json::{json, Value};

use crate::k8s::ResourceKind;
use crate::ports::port_name;

/// Everything needed to render the objects for one application.
#[derive(Debug, Clone, Default)]
pub struct AppSpec {
    pub name: String,
    pub namespace: String,
    pub builder_stream: String,
    pub builder_namespace: String,
    pub tag: String,
    pub repository: String,
    pub git_ref: String,
    pub context_dir: String,
    pub ports: Vec<ContainerPort>,
}

/// A single object to create.
#[derive(Debug, Clone)]
pub struct PlannedResource {
    pub kind: ResourceKind,
    pub body: Value,
}

impl AppSpec {
    fn labels(&self) -> Value {
        json!({ "app": self.name })
    }

    fn pod_labels(&self) -> Value {
        json!({
            "app": self.name,
            "deploymentconfig": self.name,
        })
    }

    fn metadata(&self) -> Value {
        json!({
            "name": self.name,
            "namespace": self.namespace,
            "labels": self.labels(),
        })
    }

    fn output_tag(&self) -> String {
        format!("{}:latest", self.name)
    }

    pub fn image_stream(&self) -> Value {
        json!({
            "apiVersion": "image.openshift.io/v1",
            "kind": "ImageStream",
            "metadata": self.metadata(),
        })
    }

    pub fn build_config(&self) -> Value {
        let mut git = json!({ "uri": self.repository });
        // An empty ref lets the build clone the repository's default branch.
        if !self.git_ref.is_empty() {
            git["ref"] = json!(self.git_ref);
        }
        if !self.context_dir.is_empty() {
            git["contextDir"] = json!(self.context_dir);
        }

        json!({
            "apiVersion": "build.openshift.io/v1",
            "kind": "BuildConfig",
            "metadata": self.metadata(),
            "spec": {
                "output": {
                    "to": {
                        "kind": "ImageStreamTag",
                        "name": self.output_tag(),
                    },
                },
                "source": {
                    "type": "Git",
                    "git": git,
                },
                "strategy": {
                    "type": "Source",
                    "sourceStrategy": {
                        "from": {
                            "kind": "ImageStreamTag",
                            "name": format!("{}:{}", self.builder_stream, self.tag),
                            "namespace": self.builder_namespace,
                        },
                    },
                },
                "triggers": [
                    { "type": "ImageChange", "imageChange": {} },
                    { "type": "ConfigChange" },
                ],
            },
        })
    }

    pub fn deployment_config(&self) -> Value {
        json!({
            "apiVersion": "apps.openshift.io/v1",
            "kind": "DeploymentConfig",
            "metadata": self.metadata(),
            "spec": {
                "selector": self.pod_labels(),
                "replicas": 1,
                "template": {
                    "metadata": { "labels": self.pod_labels() },
                    "spec": {
                        "containers": [{
                            "name": self.name,
                            "image": self.output_tag(),
                            "ports": self.ports,
                            "env": [],
                        }],
                    },
                },
                "triggers": [
                    {
                        "type": "ImageChange",
                        "imageChangeParams": {
                            "automatic": true,
                            "containerNames": [self.name],
                            "from": {
                                "kind": "ImageStreamTag",
                                "name": self.output_tag(),
                            },
                        },
                    },
                    { "type": "ConfigChange" },
                ],
            },
        })
    }

    /// Service on the first exposed port. `None` when the image exposes no ports.
    pub fn service(&self) -> Option<Value> {
        let first = self.ports.first()?;
        Some(json!({
            "apiVersion": "v1",
            "kind": "Service",
            "metadata": self.metadata(),
            "spec": {
                "selector": self.pod_labels(),
                "ports": [{
                    "port": first.container_port,
                    "targetPort": first.container_port,
                    "protocol": first.protocol.as_deref().unwrap_or("TCP"),
                    "name": port_name(first),
                }],
            },
        }))
    }

    /// Route to the service. The target port is the port *name*: the router
    /// resolves ports against endpoints, not the service.
    pub fn route(&self) -> Option<Value> {
        let first = self.ports.first()?;
        Some(json!({
            "apiVersion": "route.openshift.io/v1",
            "kind": "Route",
            "metadata": self.metadata(),
            "spec": {
                "to": {
                    "kind": "Service",
                    "name": self.name,
                },
                "port": {
                    "targetPort": port_name(first),
                },
                "wildcardPolicy": "None",
            },
        }))
    }

    /// Objects to create, in request order. Service and route only when the
    /// builder image exposes ports.
    pub fn plan(&self, create_route: bool) -> Vec<PlannedResource> {
        let mut plan = vec![
            PlannedResource { kind: ResourceKind::DeploymentConfig, body: self.deployment_config() },
            PlannedResource { kind: ResourceKind::ImageStream, body: self.image_stream() },
            PlannedResource { kind: ResourceKind::BuildConfig, body: self.build_config() },
        ];
        if let Some(service) = self.service() {
            plan.push(PlannedResource { kind: ResourceKind::Service, body: service });
            if create_route {
                if let Some(route) = self.route() {
                    plan.push(PlannedResource { kind: ResourceKind::Route, body: route });
                }
            }
        }
        plan
    }
}

use anyhow::Context;
use kube::api::{Api, ApiResource, DynamicObject, ListParams, PostParams};
use kube::Client;
use serde_json::Value;

/// Cluster resource kinds this tool reads or creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    ImageStream,
    ImageStreamTag,
    BuildConfig,
    DeploymentConfig,
    Service,
    Route,
}

impl ResourceKind {
    pub fn api_resource(self) -> ApiResource {
        let (group, version, kind, plural) = match self {
            ResourceKind::ImageStream => ("image.openshift.io", "v1", "ImageStream", "imagestreams"),
            ResourceKind::ImageStreamTag => {
                ("image.openshift.io", "v1", "ImageStreamTag", "imagestreamtags")
            }
            ResourceKind::BuildConfig => ("build.openshift.io", "v1", "BuildConfig", "buildconfigs"),
            ResourceKind::DeploymentConfig => {
                ("apps.openshift.io", "v1", "DeploymentConfig", "deploymentconfigs")
            }
            ResourceKind::Service => ("", "v1", "Service", "services"),
            ResourceKind::Route => ("route.openshift.io", "v1", "Route", "routes"),
        };
        let api_version = if group.is_empty() {
            version.to_string()
        } else {
            format!("{group}/{version}")
        };
        ApiResource {
            group: group.into(),
            version: version.into(),
            api_version,
            kind: kind.into(),
            plural: plural.into(),
        }
    }

    pub fn kind(self) -> &'static str {
        match self {
            ResourceKind::ImageStream => "ImageStream",
            ResourceKind::ImageStreamTag => "ImageStreamTag",
            ResourceKind::BuildConfig => "BuildConfig",
            ResourceKind::DeploymentConfig => "DeploymentConfig",
            ResourceKind::Service => "Service",
            ResourceKind::Route => "Route",
        }
    }

    /// Console detail path for a named object of this kind.
    pub fn console_path(self, name: &str, namespace: &str) -> String {
        format!("/k8s/ns/{namespace}/{}/{name}", self.api_resource().plural)
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.kind())
    }
}

/// Generic object create/get against the cluster API, keyed by kind/name/namespace.
#[allow(async_fn_in_trait)]
pub trait ResourceClient {
    async fn create(&self, kind: ResourceKind, namespace: &str, body: &Value) -> anyhow::Result<Value>;

    async fn get(&self, kind: ResourceKind, name: &str, namespace: &str) -> anyhow::Result<Value>;
}

pub struct KubeResourceClient {
    client: Client,
}

impl KubeResourceClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    fn api(&self, kind: ResourceKind, namespace: &str) -> Api<DynamicObject> {
        Api::namespaced_with(self.client.clone(), namespace, &kind.api_resource())
    }
}

impl ResourceClient for KubeResourceClient {
    async fn create(&self, kind: ResourceKind, namespace: &str, body: &Value) -> anyhow::Result<Value> {
        let obj: DynamicObject = serde_json::from_value(body.clone())
            .with_context(|| format!("Invalid {kind} payload"))?;
        tracing::debug!(%kind, namespace, name = ?obj.metadata.name, "creating object");
        let created = self
            .api(kind, namespace)
            .create(&PostParams::default(), &obj)
            .await
            .map_err(api_error)?;
        Ok(serde_json::to_value(created)?)
    }

    async fn get(&self, kind: ResourceKind, name: &str, namespace: &str) -> anyhow::Result<Value> {
        tracing::debug!(%kind, namespace, name, "fetching object");
        let obj = self.api(kind, namespace).get(name).await.map_err(api_error)?;
        Ok(serde_json::to_value(obj)?)
    }
}

/// Surface the API server's own message for status errors, as the console does.
fn api_error(err: kube::Error) -> anyhow::Error {
    match err {
        kube::Error::Api(resp) => anyhow::anyhow!(resp.message),
        other => anyhow::Error::new(other),
    }
}

/// Creates a kube client using the default kubeconfig/in-cluster config.
pub async fn create_kube_client() -> anyhow::Result<Client> {
    Client::try_default()
        .await
        .context("Failed to connect to cluster. Are you logged in? Try: oc login")
}

/// The namespace of the current kubeconfig context (or the in-cluster namespace).
pub fn default_namespace(client: &Client) -> String {
    client.default_namespace().to_string()
}

/// Namespaces the current user can see, via OpenShift projects. Empty when listing is not allowed.
pub async fn list_namespaces(client: &Client) -> Vec<String> {
    let ar = ApiResource {
        group: "project.openshift.io".into(),
        version: "v1".into(),
        api_version: "project.openshift.io/v1".into(),
        kind: "Project".into(),
        plural: "projects".into(),
    };
    let api: Api<DynamicObject> = Api::all_with(client.clone(), &ar);
    match api.list(&ListParams::default()).await {
        Ok(list) => {
            let mut names: Vec<String> = list.items.into_iter().filter_map(|p| p.metadata.name).collect();
            names.sort();
            names
        }
        Err(e) => {
            tracing::debug!(error = %e, "cannot list projects");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_api_version_has_no_group() {
        let ar = ResourceKind::Service.api_resource();
        assert_eq!(ar.api_version, "v1");
        assert_eq!(ar.group, "");
    }

    #[test]
    fn test_openshift_api_versions() {
        assert_eq!(
            ResourceKind::DeploymentConfig.api_resource().api_version,
            "apps.openshift.io/v1"
        );
        assert_eq!(ResourceKind::Route.api_resource().api_version, "route.openshift.io/v1");
        assert_eq!(ResourceKind::BuildConfig.api_resource().plural, "buildconfigs");
    }

    #[test]
    fn test_console_path() {
        assert_eq!(
            ResourceKind::DeploymentConfig.console_path("ruby-ex", "demo"),
            "/k8s/ns/demo/deploymentconfigs/ruby-ex"
        );
    }
}

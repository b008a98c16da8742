use futures::future::join_all;
use k8s_openapi::api::core::v1::ContainerPort;

use crate::imagestream::{image_stream_tag_name, TagInfo};
use crate::k8s::{ResourceClient, ResourceKind};
use crate::ports::get_ports;
use crate::resources::AppSpec;

pub const INCOMPLETE_FORM: &str = "Please complete all fields.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

/// The builder image stream the form creates an application from.
#[derive(Debug, Clone, Default)]
pub struct BuilderImage {
    pub name: String,
    pub namespace: String,
}

/// Result of one create request in a submission.
#[derive(Debug, Clone)]
pub struct Created {
    pub kind: ResourceKind,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Outcome {
    pub results: Vec<Created>,
    /// Console path of the new DeploymentConfig, set only when every request succeeded.
    pub navigate_to: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub builder: BuilderImage,
    pub tags: Vec<TagInfo>,
    pub namespace: String,
    pub selected_tag: String,
    pub name: String,
    pub repository: String,
    pub git_ref: String,
    pub context_dir: String,
    pub create_route: bool,
    pub ports: Vec<ContainerPort>,
    pub error: Option<String>,
    pub in_progress: bool,
    pub phase: Phase,
    /// Ref used when a sample repository carries no ref of its own.
    pub default_ref: String,
}

impl FormState {
    pub fn new(builder: BuilderImage, default_ref: impl Into<String>) -> Self {
        Self {
            builder,
            default_ref: default_ref.into(),
            ..Default::default()
        }
    }

    /// Replace the tag list. Keeps the current selection if it is still
    /// offered, otherwise selects the first tag.
    pub fn set_tags(&mut self, tags: Vec<TagInfo>) {
        let keep = !self.selected_tag.is_empty() && tags.iter().any(|t| t.name == self.selected_tag);
        if !keep {
            self.selected_tag = tags.first().map(|t| t.name.clone()).unwrap_or_default();
        }
        self.tags = tags;
    }

    pub fn set_namespace(&mut self, namespace: impl Into<String>) {
        self.namespace = namespace.into();
    }

    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.selected_tag = tag.into();
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// A new repository invalidates any ref and context dir filled from a sample.
    pub fn set_repository(&mut self, repository: impl Into<String>) {
        self.repository = repository.into();
        self.git_ref.clear();
        self.context_dir.clear();
    }

    pub fn set_create_route(&mut self, create_route: bool) {
        self.create_route = create_route;
    }

    pub fn selected(&self) -> Option<&TagInfo> {
        self.tags.iter().find(|t| t.name == self.selected_tag)
    }

    /// Fill repository, ref and context dir from the selected tag's sample
    /// annotations. The name defaults to the image stream name.
    pub fn fill_sample(&mut self) {
        let Some(tag) = self.selected() else {
            return;
        };
        let repository = tag.sample_repo.clone().unwrap_or_default();
        let git_ref = tag
            .sample_ref
            .clone()
            .unwrap_or_else(|| self.default_ref.clone());
        let context_dir = tag.sample_context_dir.clone().unwrap_or_default();
        if self.name.is_empty() {
            self.name = self.builder.name.clone();
        }
        self.repository = repository;
        self.git_ref = git_ref;
        self.context_dir = context_dir;
    }

    /// Fetch the selected tag's image and derive its exposed ports.
    pub async fn load_ports<C: ResourceClient>(&mut self, client: &C) {
        if self.selected_tag.is_empty() {
            return;
        }
        let tag_name = image_stream_tag_name(&self.builder.name, &self.selected_tag);
        self.in_progress = true;
        match client
            .get(ResourceKind::ImageStreamTag, &tag_name, &self.builder.namespace)
            .await
        {
            Ok(image) => {
                self.ports = get_ports(&image);
                tracing::debug!(tag = %tag_name, ports = self.ports.len(), "loaded image ports");
            }
            Err(e) => self.error = Some(e.to_string()),
        }
        self.in_progress = false;
    }

    /// Required fields present. Sets the fixed error otherwise.
    pub fn validate(&mut self) -> bool {
        self.phase = Phase::Validating;
        if self.name.is_empty()
            || self.selected_tag.is_empty()
            || self.namespace.is_empty()
            || self.repository.is_empty()
        {
            self.error = Some(INCOMPLETE_FORM.to_string());
            self.phase = Phase::Failed;
            return false;
        }
        true
    }

    pub fn app_spec(&self) -> AppSpec {
        AppSpec {
            name: self.name.clone(),
            namespace: self.namespace.clone(),
            builder_stream: self.builder.name.clone(),
            builder_namespace: self.builder.namespace.clone(),
            tag: self.selected_tag.clone(),
            repository: self.repository.clone(),
            git_ref: self.git_ref.clone(),
            context_dir: self.context_dir.clone(),
            ports: self.ports.clone(),
        }
    }

    fn record_error(&mut self, message: &str) {
        self.error = Some(match self.error.take() {
            Some(prev) => format!("{prev}; {message}"),
            None => message.to_string(),
        });
    }

    /// Validate, then create every planned object concurrently. A failed
    /// request does not cancel its siblings; failures accumulate in `error`.
    /// Returns `None` when validation fails (no request is issued).
    pub async fn submit<C: ResourceClient>(&mut self, client: &C) -> Option<Outcome> {
        if !self.validate() {
            return None;
        }

        let plan = self.app_spec().plan(self.create_route);
        self.error = None;
        self.in_progress = true;
        self.phase = Phase::Submitting;
        tracing::info!(
            name = %self.name,
            namespace = %self.namespace,
            requests = plan.len(),
            "submitting"
        );

        let namespace = self.namespace.clone();
        let responses = join_all(
            plan.iter()
                .map(|r| client.create(r.kind, &namespace, &r.body)),
        )
        .await;

        let mut results = Vec::with_capacity(plan.len());
        for (planned, response) in plan.iter().zip(responses) {
            let error = match response {
                Ok(_) => None,
                Err(e) => {
                    let message = e.to_string();
                    tracing::warn!(kind = %planned.kind, error = %message, "create failed");
                    self.record_error(&message);
                    Some(message)
                }
            };
            results.push(Created { kind: planned.kind, error });
        }

        self.in_progress = false;
        let navigate_to = if self.error.is_none() {
            self.phase = Phase::Succeeded;
            Some(ResourceKind::DeploymentConfig.console_path(&self.name, &self.namespace))
        } else {
            self.phase = Phase::Failed;
            None
        };

        Some(Outcome { results, navigate_to })
    }
}

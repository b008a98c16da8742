use serde_json::{json, Value};

use crate::resources::PlannedResource;

/// Render planned objects as a multi-document YAML stream.
pub fn render_yaml(plan: &[PlannedResource]) -> anyhow::Result<String> {
    let mut out = String::new();
    for resource in plan {
        out.push_str("---\n");
        out.push_str(&serde_yaml::to_string(&resource.body)?);
    }
    Ok(out)
}

/// Render planned objects as a `v1` List, the shape `oc create -f` accepts.
pub fn render_json(plan: &[PlannedResource]) -> anyhow::Result<String> {
    let items: Vec<&Value> = plan.iter().map(|r| &r.body).collect();
    let list = json!({
        "apiVersion": "v1",
        "kind": "List",
        "items": items,
    });
    Ok(serde_json::to_string_pretty(&list)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::AppSpec;

    fn plan() -> Vec<PlannedResource> {
        AppSpec {
            name: "app".into(),
            namespace: "demo".into(),
            builder_stream: "python".into(),
            builder_namespace: "openshift".into(),
            tag: "3.9".into(),
            repository: "https://github.com/sclorg/django-ex.git".into(),
            git_ref: "master".into(),
            ..Default::default()
        }
        .plan(false)
    }

    #[test]
    fn test_yaml_has_one_document_per_object() {
        let yaml = render_yaml(&plan()).unwrap();
        assert_eq!(yaml.matches("---\n").count(), 3);
        assert!(yaml.contains("kind: DeploymentConfig"));
        assert!(yaml.contains("kind: BuildConfig"));
    }

    #[test]
    fn test_json_list() {
        let out: Value = serde_json::from_str(&render_json(&plan()).unwrap()).unwrap();
        assert_eq!(out["kind"], "List");
        assert_eq!(out["items"].as_array().unwrap().len(), 3);
        assert_eq!(out["items"][1]["kind"], "ImageStream");
    }
}

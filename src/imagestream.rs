use anyhow::bail;
use serde_json::Value;

/// A builder tag on an image stream, with the annotations the form cares about.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagInfo {
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub annotation_tags: Vec<String>,
    pub sample_repo: Option<String>,
    pub sample_ref: Option<String>,
    pub sample_context_dir: Option<String>,
}

pub fn stream_name(image_stream: &Value) -> &str {
    image_stream
        .pointer("/metadata/name")
        .and_then(Value::as_str)
        .unwrap_or("")
}

/// `<stream>:<tag>`, the name of an ImageStreamTag object.
pub fn image_stream_tag_name(stream: &str, tag: &str) -> String {
    format!("{stream}:{tag}")
}

/// Split the comma separated `tags` annotation of a spec tag.
fn annotation_tags(tag: &Value) -> Vec<String> {
    tag.pointer("/annotations/tags")
        .and_then(Value::as_str)
        .map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn annotation(tag: &Value, key: &str) -> Option<String> {
    tag.get("annotations")
        .and_then(|a| a.get(key))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn tag_info(image_stream: &Value, tag: &Value) -> TagInfo {
    let name = tag.get("name").and_then(Value::as_str).unwrap_or("").to_string();
    TagInfo {
        display_name: annotation(tag, "openshift.io/display-name")
            .unwrap_or_else(|| stream_name(image_stream).to_string()),
        description: annotation(tag, "description"),
        annotation_tags: annotation_tags(tag),
        sample_repo: annotation(tag, "sampleRepo"),
        sample_ref: annotation(tag, "sampleRef"),
        sample_context_dir: annotation(tag, "sampleContextDir"),
        name,
    }
}

/// Spec tags marked `builder` (and not `hidden`) that have been imported,
/// i.e. have a matching entry in `status.tags`.
pub fn builder_tags(image_stream: &Value) -> Vec<TagInfo> {
    let imported: Vec<&str> = image_stream
        .pointer("/status/tags")
        .and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter_map(|t| t.get("tag").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();

    image_stream
        .pointer("/spec/tags")
        .and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter(|tag| {
                    let labels = annotation_tags(tag);
                    let name = tag.get("name").and_then(Value::as_str).unwrap_or("");
                    labels.iter().any(|t| t == "builder")
                        && !labels.iter().any(|t| t == "hidden")
                        && imported.contains(&name)
                })
                .map(|tag| tag_info(image_stream, tag))
                .collect()
        })
        .unwrap_or_default()
}

/// Builder tags, or an error when the stream has none.
pub fn require_builder_tags(image_stream: &Value) -> anyhow::Result<Vec<TagInfo>> {
    let tags = builder_tags(image_stream);
    if tags.is_empty() {
        bail!(
            "ImageStream {} has no Source-to-Image builder tags.",
            stream_name(image_stream)
        );
    }
    Ok(tags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn nodejs_stream() -> Value {
        json!({
            "metadata": {"name": "nodejs", "namespace": "openshift"},
            "spec": {"tags": [
                {
                    "name": "14",
                    "annotations": {
                        "openshift.io/display-name": "Node.js 14",
                        "tags": "builder, nodejs",
                        "description": "Build and run Node.js 14 applications",
                        "sampleRepo": "https://github.com/sclorg/nodejs-ex.git"
                    }
                },
                {"name": "12", "annotations": {"tags": "builder,nodejs,hidden"}},
                {"name": "latest", "annotations": {"tags": "builder"}},
                {"name": "10", "annotations": {"tags": "nodejs"}}
            ]},
            "status": {"tags": [{"tag": "14"}, {"tag": "12"}, {"tag": "10"}]}
        })
    }

    #[test]
    fn test_builder_tags_filtering() {
        let tags = builder_tags(&nodejs_stream());
        let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
        // "12" is hidden, "latest" is not imported, "10" is not a builder.
        assert_eq!(names, vec!["14"]);
    }

    #[test]
    fn test_tag_info_annotations() {
        let tag = &builder_tags(&nodejs_stream())[0];
        assert_eq!(tag.display_name, "Node.js 14");
        assert_eq!(tag.annotation_tags, vec!["builder", "nodejs"]);
        assert_eq!(
            tag.sample_repo.as_deref(),
            Some("https://github.com/sclorg/nodejs-ex.git")
        );
        assert_eq!(tag.sample_ref, None);
    }

    #[test]
    fn test_display_name_falls_back_to_stream() {
        let stream = json!({
            "metadata": {"name": "ruby"},
            "spec": {"tags": [{"name": "2.7", "annotations": {"tags": "builder"}}]},
            "status": {"tags": [{"tag": "2.7"}]}
        });
        assert_eq!(builder_tags(&stream)[0].display_name, "ruby");
    }

    #[test]
    fn test_no_builder_tags_is_error() {
        let stream = json!({"metadata": {"name": "mysql"}, "spec": {"tags": []}});
        let err = require_builder_tags(&stream).unwrap_err();
        assert!(err.to_string().contains("ImageStream mysql has no Source-to-Image builder tags."));
    }
}

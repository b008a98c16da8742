use console::Style;
use serde_json::Value;

use crate::cli::ImageStreamArgs;
use crate::config::Config;
use crate::imagestream::{self, image_stream_tag_name, TagInfo};
use crate::k8s::{self, KubeResourceClient, ResourceClient, ResourceKind};
use crate::ports::{get_ports, port_name};
use crate::progress;

/// Connect and fetch the builder image stream.
pub async fn fetch_image_stream(
    image: &ImageStreamArgs,
    config: &Config,
) -> anyhow::Result<(KubeResourceClient, Value, String)> {
    let pb = progress::stage_spinner("Connecting to cluster");
    let client = match k8s::create_kube_client().await {
        Ok(c) => c,
        Err(e) => {
            progress::fail_spinner(&pb, "not connected");
            return Err(e);
        }
    };
    progress::finish_spinner(&pb, true);

    let namespace = image
        .image_namespace
        .clone()
        .unwrap_or_else(|| config.image_namespace.clone());
    let client = KubeResourceClient::new(client);

    let pb = progress::stage_spinner(&format!("Fetching ImageStream {namespace}/{}", image.image_stream));
    match client
        .get(ResourceKind::ImageStream, &image.image_stream, &namespace)
        .await
    {
        Ok(stream) => {
            progress::finish_spinner(&pb, true);
            Ok((client, stream, namespace))
        }
        Err(e) => {
            progress::fail_spinner(&pb, &e.to_string());
            Err(e.context(format!("Failed to get ImageStream {namespace}/{}", image.image_stream)))
        }
    }
}

pub async fn run_tags(image: &ImageStreamArgs, config: &Config) -> anyhow::Result<()> {
    let (_, stream, _) = fetch_image_stream(image, config).await?;
    let tags = imagestream::require_builder_tags(&stream)?;
    print_tag_table(&tags);
    Ok(())
}

fn print_tag_table(tags: &[TagInfo]) {
    let width = tags.iter().map(|t| t.name.len()).max().unwrap_or(0).max(3);
    println!("{:<width$}  {:<30}  SAMPLE", "TAG", "DISPLAY NAME");
    for tag in tags {
        println!(
            "{:<width$}  {:<30}  {}",
            tag.name,
            tag.display_name,
            tag.sample_repo.as_deref().unwrap_or("-")
        );
    }
}

pub async fn run_inspect(
    image: &ImageStreamArgs,
    tag: Option<&str>,
    config: &Config,
) -> anyhow::Result<()> {
    let (client, stream, namespace) = fetch_image_stream(image, config).await?;
    let tags = imagestream::require_builder_tags(&stream)?;
    let selected = match tag {
        Some(name) => tags
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| anyhow::anyhow!("'{name}' is not a builder tag of ImageStream {}", image.image_stream))?,
        None => &tags[0],
    };

    let tag_name = image_stream_tag_name(&image.image_stream, &selected.name);
    let image_tag = client
        .get(ResourceKind::ImageStreamTag, &tag_name, &namespace)
        .await
        .map_err(|e| e.context(format!("Failed to get ImageStreamTag {tag_name}")))?;

    let bold = Style::new().bold();
    println!();
    println!("{}", bold.apply_to(&selected.display_name));
    println!("  ImageStreamTag: {namespace}/{tag_name}");
    if !selected.annotation_tags.is_empty() {
        println!("  Tags:           {}", selected.annotation_tags.join(", "));
    }
    if let Some(description) = &selected.description {
        println!("  Description:    {description}");
    }
    if let Some(repo) = &selected.sample_repo {
        println!("  Sample repo:    {repo}");
    }
    let ports = get_ports(&image_tag);
    if ports.is_empty() {
        println!("  Ports:          none (no service or route will be created)");
    } else {
        let names: Vec<String> = ports.iter().map(port_name).collect();
        println!("  Ports:          {}", names.join(", "));
    }
    Ok(())
}

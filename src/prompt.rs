use inquire::{Confirm, Select, Text};

use crate::imagestream::TagInfo;

/// Pick the target namespace. Falls back to free text when the namespace list is unavailable.
pub fn choose_namespace(namespaces: Vec<String>, default: &str) -> anyhow::Result<String> {
    if namespaces.is_empty() {
        return Ok(Text::new("Namespace:").with_default(default).prompt()?);
    }
    let start = namespaces.iter().position(|n| n == default).unwrap_or(0);
    Ok(Select::new("Namespace:", namespaces)
        .with_starting_cursor(start)
        .prompt()?)
}

pub fn choose_tag(tags: &[TagInfo], current: &str) -> anyhow::Result<String> {
    let names: Vec<String> = tags.iter().map(|t| t.name.clone()).collect();
    if names.len() == 1 {
        return Ok(names[0].clone());
    }
    let start = names.iter().position(|n| n == current).unwrap_or(0);
    Ok(Select::new("Version:", names).with_starting_cursor(start).prompt()?)
}

pub fn ask_name(default: &str) -> anyhow::Result<String> {
    let prompt = Text::new("Name:").with_help_message("Names the resources created for this application.");
    let prompt = if default.is_empty() { prompt } else { prompt.with_default(default) };
    Ok(prompt.prompt()?)
}

/// Whether to use the selected tag's sample repository.
pub fn ask_try_sample(sample_repo: &str) -> anyhow::Result<bool> {
    Ok(Confirm::new(&format!("Try sample repository {sample_repo}?"))
        .with_default(false)
        .prompt()?)
}

pub fn ask_repository() -> anyhow::Result<String> {
    Ok(Text::new("Git Repository:")
        .with_help_message("For private Git repositories, create a source secret first.")
        .prompt()?)
}

pub fn ask_route(default: bool) -> anyhow::Result<bool> {
    Ok(Confirm::new("Create route?")
        .with_default(default)
        .with_help_message("Exposes your application at a public URL.")
        .prompt()?)
}

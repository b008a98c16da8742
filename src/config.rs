use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Tool defaults, optionally loaded from a TOML file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Namespace holding the builder image streams.
    pub image_namespace: String,
    /// Git ref for sample repositories whose tag declares no `sampleRef`.
    pub default_ref: String,
    /// Web console base URL, e.g. https://console-openshift-console.apps.example.com
    pub console_url: Option<String>,
    /// Default answer for the route question.
    pub create_route: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_namespace: "openshift".to_string(),
            default_ref: "master".to_string(),
            console_url: None,
            create_route: false,
        }
    }
}

impl Config {
    /// Full console URL for a path when a console base URL is configured.
    pub fn console_link(&self, path: &str) -> Option<String> {
        self.console_url
            .as_deref()
            .map(|base| format!("{}{}", base.trim_end_matches('/'), path))
    }
}

/// Load configuration from a TOML file.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config =
        toml::from_str(&content).with_context(|| format!("Failed to parse config: {}", path.display()))?;
    Ok(config)
}

/// Load the explicit config file, or the default one if present, or built-in defaults.
pub fn resolve_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    let path = default_config_path();
    if path.exists() {
        tracing::debug!(path = %path.display(), "loading config");
        load_config(&path)
    } else {
        Ok(Config::default())
    }
}

/// Returns the default path to `config/s2i.toml` relative to the current directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("config/s2i.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s2i.toml");
        std::fs::write(&path, "console_url = \"https://console.example.com/\"\n").unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.image_namespace, "openshift");
        assert_eq!(config.default_ref, "master");
        assert_eq!(
            config.console_link("/k8s/ns/demo/deploymentconfigs/app").as_deref(),
            Some("https://console.example.com/k8s/ns/demo/deploymentconfigs/app")
        );
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s2i.toml");
        std::fs::write(&path, "create_route = \"maybe\"").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        assert!(resolve_config(Some(Path::new("/nonexistent/s2i.toml"))).is_err());
    }
}

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::discovery::{
    CapabilityMarker, DirectoryResolver, NamePattern, NamespaceResolver, ProviderResolver,
    RecursionPolicy, RootLocation, STEPS_MARKER,
};
use crate::error::{ConfigError, ResolutionError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscoveryMode {
    #[default]
    Directory,
    Namespace,
}

/// Input of a resolution pass as supplied by the test harness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Directory path, or namespace prefix in namespace mode.
    pub root: String,
    #[serde(default)]
    pub mode: DiscoveryMode,
    /// Falls back to the steps naming convention when absent.
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub recursive: bool,
    #[serde(default = "default_marker")]
    pub marker: String,
}

fn default_marker() -> String {
    STEPS_MARKER.to_string()
}

impl DiscoveryConfig {
    pub fn new(root: impl Into<String>, mode: DiscoveryMode) -> Self {
        Self {
            root: root.into(),
            mode,
            pattern: None,
            recursive: false,
            marker: default_marker(),
        }
    }

    pub fn root_location(&self) -> RootLocation {
        match self.mode {
            DiscoveryMode::Directory => RootLocation::directory(&self.root),
            DiscoveryMode::Namespace => RootLocation::namespace(&self.root),
        }
    }

    pub fn recursion(&self) -> RecursionPolicy {
        RecursionPolicy::from_flag(self.recursive)
    }

    /// Builds the resolver this configuration describes.
    pub fn build(&self) -> Result<Box<dyn ProviderResolver>, ResolutionError> {
        let marker = CapabilityMarker::new(self.marker.clone());
        let pattern = self.pattern.as_deref().map(NamePattern::new).transpose()?;

        match self.root_location() {
            RootLocation::Directory(root) => {
                let mut resolver = DirectoryResolver::new(root)
                    .recursion(self.recursion())
                    .marker(marker);
                if let Some(pattern) = pattern {
                    resolver = resolver.pattern(pattern);
                }
                Ok(Box::new(resolver))
            }
            RootLocation::Namespace(prefix) => {
                let mut resolver = NamespaceResolver::new(prefix)
                    .recursion(self.recursion())
                    .marker(marker);
                if let Some(pattern) = pattern {
                    resolver = resolver.pattern(pattern);
                }
                Ok(Box::new(resolver))
            }
        }
    }
}

/// Reads a configuration file; `.yaml`/`.yml` are parsed as YAML, anything
/// else as JSON.
pub fn load_config(path: &Path) -> Result<DiscoveryConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    if is_yaml {
        serde_yaml::from_str(&content).map_err(|e| ConfigError::parse(path, e.to_string()))
    } else {
        serde_json::from_str(&content).map_err(|e| ConfigError::parse(path, e.to_string()))
    }
}

use anyhow::{Context as AnyhowContext, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

use crate::config::{load_config, DiscoveryConfig, DiscoveryMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "stepscan")]
#[command(
    about = "Step provider discovery - list the test step providers found under a directory",
    long_about = None
)]
pub struct Args {
    /// Directory holding compiled step libraries
    #[arg(long, value_name = "DIR", required_unless_present = "config")]
    pub root: Option<PathBuf>,

    /// Discovery config file (YAML or JSON); flags override its values
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Regular expression matched against whole file names
    #[arg(short, long, value_name = "REGEX")]
    pub pattern: Option<String>,

    /// Descend into sub-directories
    #[arg(short, long)]
    pub recursive: bool,

    /// Capability marker a library must declare
    #[arg(long, value_name = "MARKER")]
    pub marker: Option<String>,

    /// Output format (text, json)
    #[arg(short = 'f', long, default_value = "text")]
    pub format: OutputFormat,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn validate(&self) -> Result<()> {
        if let Some(ref root) = self.root {
            validate_dir(root)?;
        }
        if let Some(ref config) = self.config {
            if !config.exists() {
                anyhow::bail!("Config file does not exist: {}", config.display());
            }
        }
        Ok(())
    }

    /// Config file values overridden by command-line flags.
    pub fn discovery_config(&self) -> Result<DiscoveryConfig> {
        let mut config = match self.config {
            Some(ref path) => load_config(path)
                .with_context(|| format!("Cannot load config: {}", path.display()))?,
            None => DiscoveryConfig::new(String::new(), DiscoveryMode::Directory),
        };

        if let Some(ref root) = self.root {
            config.root = root.to_string_lossy().into_owned();
            config.mode = DiscoveryMode::Directory;
        }
        if let Some(ref pattern) = self.pattern {
            config.pattern = Some(pattern.clone());
        }
        if self.recursive {
            config.recursive = true;
        }
        if let Some(ref marker) = self.marker {
            config.marker = marker.clone();
        }

        Ok(config)
    }
}

pub fn validate_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }

    if !path.is_dir() {
        anyhow::bail!("Path is not a directory: {}", path.display());
    }

    std::fs::read_dir(path)
        .with_context(|| format!("Cannot read directory: {}", path.display()))?;

    Ok(())
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }
}

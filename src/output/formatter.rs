use std::fmt::Write as _;

use anyhow::Result;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::discovery::ResolutionResult;
use crate::provider::{ProviderInstance, StepDefinition};

#[derive(Debug, Serialize)]
pub struct ProviderReport {
    pub name: String,
    pub dynamic: bool,
    pub steps: Vec<StepDefinition>,
}

impl ProviderReport {
    pub fn from_instance(instance: &ProviderInstance) -> Self {
        Self {
            name: instance.qualified_name().to_string(),
            dynamic: instance.is_dynamic(),
            steps: instance.steps(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JsonOutput {
    pub root: String,
    pub total_providers: usize,
    pub total_steps: usize,
    pub providers: Vec<ProviderReport>,
}

pub struct OutputFormatter;

impl OutputFormatter {
    pub fn format(root: &str, result: &ResolutionResult, format: OutputFormat) -> Result<String> {
        let output = Self::build_output(root, result);

        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&output)?),
            OutputFormat::Text => Ok(Self::render_text(&output)),
        }
    }

    pub fn build_output(root: &str, result: &ResolutionResult) -> JsonOutput {
        let providers: Vec<ProviderReport> =
            result.iter().map(ProviderReport::from_instance).collect();
        let total_steps = providers.iter().map(|p| p.steps.len()).sum();

        JsonOutput {
            root: root.to_string(),
            total_providers: providers.len(),
            total_steps,
            providers,
        }
    }

    fn render_text(output: &JsonOutput) -> String {
        let mut text = String::new();
        for provider in &output.providers {
            let _ = writeln!(text, "{}", provider.name);
            for step in &provider.steps {
                let _ = writeln!(text, "  {} {}", step.kind.as_str(), step.pattern);
            }
        }
        let _ = writeln!(
            text,
            "{} provider(s), {} step(s) under {}",
            output.total_providers, output.total_steps, output.root
        );
        text
    }
}

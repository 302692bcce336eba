mod formatter;

pub use formatter::{JsonOutput, OutputFormatter, ProviderReport};

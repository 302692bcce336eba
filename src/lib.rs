/// stepscan
///
/// Discovers behavior-driven test step providers from compiled units, either
/// shared libraries found in a directory tree or providers registered at
/// compile time under a namespace, and hands the constructed providers to
/// the test harness.
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod logging;
pub mod output;
pub mod provider;
pub mod utils;

pub use config::DiscoveryConfig;
pub use discovery::{
    CapabilityMarker, DirectoryResolver, NamePattern, NamespaceResolver, ProviderResolver,
    RecursionPolicy, ResolutionResult, RootLocation,
};
pub use provider::{ProviderInstance, StepDefinition, StepKind, StepProvider};

#[doc(hidden)]
pub mod __private {
    pub use linkme;
}

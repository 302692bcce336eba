//! Step providers and the two ways a compiled unit declares one.
//!
//! A shared library exports a single [`ProviderDeclaration`] through
//! [`export_step_provider!`](crate::export_step_provider); code linked into
//! the test binary registers a [`ProviderEntry`] through
//! [`register_step_provider!`](crate::register_step_provider).

pub mod declaration;
pub mod registry;

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use libloading::Library;
use serde::Serialize;

pub use declaration::{ProviderDeclaration, ABI_VERSION, CORE_VERSION, DECLARATION_SYMBOL};
pub use registry::{ProviderEntry, ProviderRegistry, STEP_PROVIDERS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Given,
    When,
    Then,
}

impl StepKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::Given => "Given",
            StepKind::When => "When",
            StepKind::Then => "Then",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepDefinition {
    pub kind: StepKind,
    pub pattern: String,
}

impl StepDefinition {
    pub fn given(pattern: impl Into<String>) -> Self {
        Self {
            kind: StepKind::Given,
            pattern: pattern.into(),
        }
    }

    pub fn when(pattern: impl Into<String>) -> Self {
        Self {
            kind: StepKind::When,
            pattern: pattern.into(),
        }
    }

    pub fn then(pattern: impl Into<String>) -> Self {
        Self {
            kind: StepKind::Then,
            pattern: pattern.into(),
        }
    }
}

/// An object whose methods implement test steps.
///
/// The step-registration facility of the test harness reads [`steps`] and
/// binds each definition to story text; the discovery engine only creates
/// the provider.
///
/// [`steps`]: StepProvider::steps
pub trait StepProvider {
    fn steps(&self) -> Vec<StepDefinition>;
}

/// Zero-argument construction of a provider.
pub type Constructor = fn() -> Result<Box<dyn StepProvider>, String>;

/// Constructor for providers built through [`Default`].
pub fn construct_default<T>() -> Result<Box<dyn StepProvider>, String>
where
    T: StepProvider + Default + 'static,
{
    Ok(Box::new(T::default()))
}

/// A constructed provider handed to the caller.
pub struct ProviderInstance {
    // Declared before `library`: the provider must drop while its code is
    // still mapped.
    provider: Box<dyn StepProvider>,
    qualified_name: String,
    library: Option<Arc<Library>>,
}

impl ProviderInstance {
    pub(crate) fn new(
        qualified_name: impl Into<String>,
        provider: Box<dyn StepProvider>,
        library: Option<Arc<Library>>,
    ) -> Self {
        Self {
            provider,
            qualified_name: qualified_name.into(),
            library,
        }
    }

    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    pub fn provider(&self) -> &dyn StepProvider {
        self.provider.as_ref()
    }

    /// True when the provider's code lives in a dynamically loaded library.
    pub fn is_dynamic(&self) -> bool {
        self.library.is_some()
    }
}

impl Deref for ProviderInstance {
    type Target = dyn StepProvider;

    fn deref(&self) -> &Self::Target {
        self.provider.as_ref()
    }
}

impl fmt::Debug for ProviderInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderInstance")
            .field("qualified_name", &self.qualified_name)
            .field("dynamic", &self.is_dynamic())
            .finish()
    }
}

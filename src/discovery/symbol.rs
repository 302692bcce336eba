use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use libloading::Library;

use crate::provider::{Constructor, ProviderEntry};

/// Marker carried by units that provide test steps.
pub const STEPS_MARKER: &str = "steps";

/// Tag a unit must carry to be instantiated. Only presence is checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CapabilityMarker(Cow<'static, str>);

impl CapabilityMarker {
    pub const STEPS: CapabilityMarker = CapabilityMarker(Cow::Borrowed(STEPS_MARKER));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CapabilityMarker {
    fn default() -> Self {
        Self::STEPS
    }
}

impl fmt::Display for CapabilityMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A compiled unit after loading: its markers and, when it has one, its
/// zero-argument constructor.
pub struct LoadedSymbol {
    qualified_name: String,
    markers: Vec<String>,
    constructor: Option<Constructor>,
    library: Option<Arc<Library>>,
}

impl LoadedSymbol {
    pub fn new<I, S>(
        qualified_name: impl Into<String>,
        markers: I,
        constructor: Option<Constructor>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            qualified_name: qualified_name.into(),
            markers: markers.into_iter().map(Into::into).collect(),
            constructor,
            library: None,
        }
    }

    pub fn from_entry(entry: &ProviderEntry) -> Self {
        Self::new(
            entry.qualified_name,
            entry.markers.iter().copied(),
            entry.constructor,
        )
    }

    /// Ties the symbol to the library its constructor lives in.
    pub(crate) fn with_library(mut self, library: Arc<Library>) -> Self {
        self.library = Some(library);
        self
    }

    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    pub fn constructor(&self) -> Option<Constructor> {
        self.constructor
    }

    pub(crate) fn library(&self) -> Option<&Arc<Library>> {
        self.library.as_ref()
    }

    pub fn has_capability(&self, marker: &CapabilityMarker) -> bool {
        self.markers.iter().any(|m| m == marker.as_str())
    }
}

impl fmt::Debug for LoadedSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedSymbol")
            .field("qualified_name", &self.qualified_name)
            .field("markers", &self.markers)
            .field("constructible", &self.constructor.is_some())
            .field("dynamic", &self.library.is_some())
            .finish()
    }
}

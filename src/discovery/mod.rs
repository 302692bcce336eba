//! Discovery engine: locate compiled units, load them, keep the ones that
//! carry the capability marker and construct a provider from each.

pub mod cache;
pub mod instantiator;
pub mod loader;
pub mod matcher;
pub mod resolver;
pub mod symbol;
pub mod walker;

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ResolutionError;
use crate::utils::string::{extract_last_segment, strip_generics};

pub use cache::SymbolCache;
pub use instantiator::instantiate;
pub use loader::{DylibLoader, RegistryLoader, SymbolLoader};
pub use matcher::{NamePattern, NamingConvention, UnitKind};
pub use resolver::{DirectoryResolver, NamespaceResolver, ProviderResolver, ResolutionResult};
pub use symbol::{CapabilityMarker, LoadedSymbol, STEPS_MARKER};

/// Whether sub-directories or sub-namespaces are descended into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecursionPolicy {
    #[default]
    Direct,
    Recursive,
}

impl RecursionPolicy {
    pub fn from_flag(recursive: bool) -> Self {
        if recursive {
            Self::Recursive
        } else {
            Self::Direct
        }
    }

    pub fn is_recursive(&self) -> bool {
        matches!(self, Self::Recursive)
    }
}

/// Where a resolution pass starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootLocation {
    Directory(PathBuf),
    Namespace(String),
}

impl RootLocation {
    pub fn directory(path: impl Into<PathBuf>) -> Self {
        Self::Directory(path.into())
    }

    pub fn namespace(prefix: impl Into<String>) -> Self {
        Self::Namespace(prefix.into())
    }

    /// The directory holding the running executable.
    ///
    /// Test binaries live next to the libraries cargo builds for the same
    /// workspace, so this is where compiled step libraries usually are.
    pub fn beside_current_exe() -> Result<Self, ResolutionError> {
        current_exe_dir().map(Self::Directory)
    }

    /// The namespace enclosing `T`, e.g. `app::features` for
    /// `app::features::LoginStory`.
    pub fn namespace_of<T: ?Sized>() -> Self {
        Self::Namespace(namespace_of::<T>())
    }
}

impl fmt::Display for RootLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directory(path) => write!(f, "{}", path.display()),
            Self::Namespace(prefix) => write!(f, "{prefix}"),
        }
    }
}

/// A located, not yet loaded unit. Lives for one pass only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateUnit {
    File(PathBuf),
    Named(String),
}

impl CandidateUnit {
    /// File name or last path segment. `None` for names that are not valid
    /// UTF-8; such candidates never match a pattern.
    pub fn simple_name(&self) -> Option<&str> {
        match self {
            Self::File(path) => path.file_name()?.to_str(),
            Self::Named(name) => Some(
                name.rsplit_once("::")
                    .map(|(_, simple)| simple)
                    .unwrap_or(name),
            ),
        }
    }
}

impl fmt::Display for CandidateUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Named(name) => write!(f, "{name}"),
        }
    }
}

pub(crate) fn current_exe_dir() -> Result<PathBuf, ResolutionError> {
    let exe = std::env::current_exe()
        .map_err(|_| ResolutionError::root_not_found("<current executable>"))?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| ResolutionError::root_not_directory(&exe))
}

/// Module path enclosing `T`; empty for types at a crate root's top level
/// without a module path.
pub fn namespace_of<T: ?Sized>() -> String {
    let path = strip_generics(std::any::type_name::<T>());
    path.rsplit_once("::")
        .map(|(parent, _)| parent)
        .unwrap_or("")
        .to_string()
}

/// Simple name of `T` as written in source, without module path or generics.
pub fn simple_type_name<T: ?Sized>() -> String {
    extract_last_segment(strip_generics(std::any::type_name::<T>()))
}

//! Symbol loading backends.
//!
//! [`DylibLoader`] opens shared libraries straight from the files the
//! directory walk found; [`RegistryLoader`] resolves fully-qualified names
//! against the compile-time registry. Both produce a [`LoadedSymbol`].

use std::fs;
use std::path::Path;
use std::sync::Arc;

use libloading::Library;
use tracing::debug;

use super::symbol::LoadedSymbol;
use super::CandidateUnit;
use crate::error::LoadError;
use crate::provider::{ProviderDeclaration, ProviderRegistry, ABI_VERSION, CORE_VERSION};

pub trait SymbolLoader {
    fn load(&self, candidate: &CandidateUnit) -> Result<LoadedSymbol, LoadError>;
}

impl<L: SymbolLoader + ?Sized> SymbolLoader for &L {
    fn load(&self, candidate: &CandidateUnit) -> Result<LoadedSymbol, LoadError> {
        (**self).load(candidate)
    }
}

impl<L: SymbolLoader + ?Sized> SymbolLoader for Box<L> {
    fn load(&self, candidate: &CandidateUnit) -> Result<LoadedSymbol, LoadError> {
        (**self).load(candidate)
    }
}

/// Loads provider libraries directly from disk.
///
/// The file does not have to be on any library search path; it is opened by
/// the path the walk produced.
#[derive(Debug, Clone, Copy, Default)]
pub struct DylibLoader;

impl DylibLoader {
    pub fn load_file(&self, path: &Path) -> Result<LoadedSymbol, LoadError> {
        // The dynamic linker reports a missing file as an opaque message.
        fs::metadata(path).map_err(|e| LoadError::io(path, e))?;

        // SAFETY: running a library's initialisers is the point of loading
        // it; step libraries are test code the caller chose to scan.
        let library = unsafe { Library::new(path) }.map_err(|source| LoadError::Library {
            path: path.to_path_buf(),
            source,
        })?;

        let symbol = {
            let name = ProviderDeclaration::symbol_name();
            // SAFETY: the symbol is a static of type `ProviderDeclaration`
            // exported by `export_step_provider!`; the pointer is only read
            // while `library` is alive.
            let declaration = unsafe { library.get::<*const ProviderDeclaration>(&name) }
                .map_err(|source| LoadError::MissingDeclaration {
                    path: path.to_path_buf(),
                    source,
                })?;
            let declaration: &ProviderDeclaration = unsafe { &**declaration };

            if declaration.abi_version != ABI_VERSION {
                return Err(LoadError::IncompatibleAbi {
                    path: path.to_path_buf(),
                    found: declaration.abi_version,
                    expected: ABI_VERSION,
                });
            }

            if declaration.core_version != CORE_VERSION {
                return Err(LoadError::IncompatibleVersion {
                    path: path.to_path_buf(),
                    found: declaration.core_version.to_string(),
                    expected: CORE_VERSION.to_string(),
                });
            }

            LoadedSymbol::new(
                declaration.qualified_name,
                declaration.markers.iter().copied(),
                declaration.constructor,
            )
        };

        debug!(
            path = %path.display(),
            name = symbol.qualified_name(),
            "loaded provider library"
        );

        Ok(symbol.with_library(Arc::new(library)))
    }
}

impl SymbolLoader for DylibLoader {
    fn load(&self, candidate: &CandidateUnit) -> Result<LoadedSymbol, LoadError> {
        match candidate {
            CandidateUnit::File(path) => self.load_file(path),
            CandidateUnit::Named(name) => Err(LoadError::unsupported_candidate(name.as_str())),
        }
    }
}

/// Resolves names through a [`ProviderRegistry`].
#[derive(Debug, Clone)]
pub struct RegistryLoader {
    registry: ProviderRegistry,
}

impl RegistryLoader {
    pub fn new(registry: ProviderRegistry) -> Self {
        Self { registry }
    }

    /// Loader over every provider linked into the running binary.
    pub fn global() -> Self {
        Self::new(ProviderRegistry::global())
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }
}

impl SymbolLoader for RegistryLoader {
    fn load(&self, candidate: &CandidateUnit) -> Result<LoadedSymbol, LoadError> {
        match candidate {
            CandidateUnit::Named(name) => self
                .registry
                .get(name)
                .map(LoadedSymbol::from_entry)
                .ok_or_else(|| LoadError::unknown_name(name.as_str())),
            CandidateUnit::File(path) => Err(LoadError::unsupported_candidate(
                path.display().to_string(),
            )),
        }
    }
}

//! Resolution passes.
//!
//! A pass enumerates candidates, drops those whose simple name does not
//! match before loading anything, loads the rest through a pass-scoped
//! [`SymbolCache`], keeps the symbols carrying the capability marker and
//! constructs one provider per kept symbol. Per-candidate failures are
//! logged and skipped; only an unusable root fails the pass.

use std::path::{Path, PathBuf};

use tracing::{debug, error, info_span, trace};

use super::cache::SymbolCache;
use super::instantiator::instantiate;
use super::loader::{DylibLoader, RegistryLoader, SymbolLoader};
use super::matcher::{NamePattern, NamingConvention, UnitKind};
use super::symbol::CapabilityMarker;
use super::walker::enumerate_files;
use super::{current_exe_dir, namespace_of, CandidateUnit, RecursionPolicy, RootLocation};
use crate::error::ResolutionError;
use crate::provider::{ProviderInstance, ProviderRegistry};

/// Providers of one pass, in traversal order.
#[derive(Debug, Default)]
pub struct ResolutionResult {
    providers: Vec<ProviderInstance>,
}

impl ResolutionResult {
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProviderInstance> {
        self.providers.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.qualified_name()).collect()
    }

    pub fn into_providers(self) -> Vec<ProviderInstance> {
        self.providers
    }
}

impl FromIterator<ProviderInstance> for ResolutionResult {
    fn from_iter<I: IntoIterator<Item = ProviderInstance>>(iter: I) -> Self {
        Self {
            providers: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ResolutionResult {
    type Item = ProviderInstance;
    type IntoIter = std::vec::IntoIter<ProviderInstance>;

    fn into_iter(self) -> Self::IntoIter {
        self.providers.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResolutionResult {
    type Item = &'a ProviderInstance;
    type IntoIter = std::slice::Iter<'a, ProviderInstance>;

    fn into_iter(self) -> Self::IntoIter {
        self.providers.iter()
    }
}

pub trait ProviderResolver {
    /// Runs one complete resolution pass.
    fn resolve(&self) -> Result<ResolutionResult, ResolutionError>;

    /// Where every pass of this resolver starts.
    fn root_location(&self) -> RootLocation;
}

/// Finds provider libraries in a directory tree.
#[derive(Debug, Clone)]
pub struct DirectoryResolver<L = DylibLoader> {
    root: PathBuf,
    pattern: NamePattern,
    recursion: RecursionPolicy,
    marker: CapabilityMarker,
    loader: L,
}

impl DirectoryResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            pattern: NamePattern::any_steps(UnitKind::SharedLibrary),
            recursion: RecursionPolicy::default(),
            marker: CapabilityMarker::default(),
            loader: DylibLoader,
        }
    }

    /// Resolver for the libraries belonging to runner type `T`: the
    /// directory of the running executable, matched against
    /// `{DLL_PREFIX}{runner_snake}.*steps{DLL_SUFFIX}`.
    pub fn for_runner<T: ?Sized>() -> Result<Self, ResolutionError> {
        Ok(Self::new(current_exe_dir()?).pattern(NamePattern::for_runner_type::<T>(
            NamingConvention::Prefixed,
            UnitKind::SharedLibrary,
        )))
    }
}

impl<L: SymbolLoader> DirectoryResolver<L> {
    pub fn pattern(mut self, pattern: NamePattern) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn recursion(mut self, recursion: RecursionPolicy) -> Self {
        self.recursion = recursion;
        self
    }

    pub fn marker(mut self, marker: CapabilityMarker) -> Self {
        self.marker = marker;
        self
    }

    /// Replaces the loading backend.
    pub fn loader<M: SymbolLoader>(self, loader: M) -> DirectoryResolver<M> {
        DirectoryResolver {
            root: self.root,
            pattern: self.pattern,
            recursion: self.recursion,
            marker: self.marker,
            loader,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl<L: SymbolLoader> ProviderResolver for DirectoryResolver<L> {
    fn root_location(&self) -> RootLocation {
        RootLocation::Directory(self.root.clone())
    }

    fn resolve(&self) -> Result<ResolutionResult, ResolutionError> {
        let span = info_span!("resolution_pass", root = %self.root.display());
        let _enter = span.enter();

        let candidates = enumerate_files(&self.root, self.recursion)?
            .into_iter()
            .map(CandidateUnit::File)
            .collect();

        Ok(run_pass(candidates, &self.pattern, &self.marker, &self.loader))
    }
}

/// Finds providers registered at compile time under a namespace prefix.
#[derive(Debug, Clone)]
pub struct NamespaceResolver {
    prefix: String,
    pattern: NamePattern,
    recursion: RecursionPolicy,
    marker: CapabilityMarker,
    loader: RegistryLoader,
}

impl NamespaceResolver {
    /// Resolver over the providers linked into the running binary.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            pattern: NamePattern::any_steps(UnitKind::Registered),
            recursion: RecursionPolicy::default(),
            marker: CapabilityMarker::default(),
            loader: RegistryLoader::global(),
        }
    }

    /// Resolver for the providers belonging to runner type `T`: the
    /// runner's own namespace, matched against `{Runner}.*Steps`.
    pub fn for_runner<T: ?Sized>() -> Self {
        Self::new(namespace_of::<T>()).pattern(NamePattern::for_runner_type::<T>(
            NamingConvention::Prefixed,
            UnitKind::Registered,
        ))
    }

    pub fn pattern(mut self, pattern: NamePattern) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn recursion(mut self, recursion: RecursionPolicy) -> Self {
        self.recursion = recursion;
        self
    }

    pub fn marker(mut self, marker: CapabilityMarker) -> Self {
        self.marker = marker;
        self
    }

    pub fn registry(mut self, registry: ProviderRegistry) -> Self {
        self.loader = RegistryLoader::new(registry);
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl ProviderResolver for NamespaceResolver {
    fn root_location(&self) -> RootLocation {
        RootLocation::Namespace(self.prefix.clone())
    }

    fn resolve(&self) -> Result<ResolutionResult, ResolutionError> {
        let span = info_span!("resolution_pass", namespace = %self.prefix);
        let _enter = span.enter();

        let registry = self.loader.registry();
        if !registry.contains_namespace(&self.prefix) {
            return Err(ResolutionError::empty_namespace(self.prefix.as_str()));
        }

        let candidates = registry
            .names_under(&self.prefix, self.recursion)
            .into_iter()
            .map(|name| CandidateUnit::Named(name.to_string()))
            .collect();

        Ok(run_pass(candidates, &self.pattern, &self.marker, &self.loader))
    }
}

fn run_pass<L: SymbolLoader + ?Sized>(
    candidates: Vec<CandidateUnit>,
    pattern: &NamePattern,
    marker: &CapabilityMarker,
    loader: &L,
) -> ResolutionResult {
    let mut cache = SymbolCache::new(loader);
    let mut providers = Vec::new();
    let mut matched = 0usize;

    for candidate in &candidates {
        let Some(simple_name) = candidate.simple_name() else {
            trace!(candidate = %candidate, "skipping candidate without a UTF-8 name");
            continue;
        };

        if !pattern.matches(simple_name) {
            trace!(candidate = %candidate, "name does not match pattern");
            continue;
        }
        matched += 1;

        let symbol = match cache.load(candidate) {
            Ok(symbol) => symbol,
            Err(e) => {
                error!(candidate = %candidate, error = %e, "failed to load unit");
                continue;
            }
        };

        if !symbol.has_capability(marker) {
            trace!(name = symbol.qualified_name(), marker = %marker, "unit lacks marker");
            continue;
        }

        match instantiate(symbol) {
            Ok(instance) => {
                debug!(name = instance.qualified_name(), "instantiated step provider");
                providers.push(instance);
            }
            Err(e) => {
                error!(
                    name = e.unit_name(),
                    error = %e,
                    "failed to instantiate step provider"
                );
            }
        }
    }

    debug!(
        candidates = candidates.len(),
        matched,
        loaded = cache.len(),
        providers = providers.len(),
        "resolution pass complete"
    );

    ResolutionResult { providers }
}

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use super::loader::SymbolLoader;
use super::symbol::LoadedSymbol;
use super::CandidateUnit;
use crate::error::LoadError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum CacheKey {
    File(PathBuf),
    Name(String),
}

impl CacheKey {
    fn of(candidate: &CandidateUnit) -> Self {
        match candidate {
            CandidateUnit::File(path) => {
                Self::File(fs::canonicalize(path).unwrap_or_else(|_| path.clone()))
            }
            CandidateUnit::Named(name) => Self::Name(name.clone()),
        }
    }
}

/// Loaded symbols of one resolution pass.
///
/// Each unit is loaded at most once per pass, however many candidates lead
/// to it, and a unit that failed to load is not attempted again. Dropping the
/// cache releases every symbol it holds; instances already constructed keep
/// their own library handle.
pub struct SymbolCache<'a, L: ?Sized> {
    loader: &'a L,
    symbols: HashMap<CacheKey, Option<LoadedSymbol>>,
}

impl<'a, L: SymbolLoader + ?Sized> SymbolCache<'a, L> {
    pub fn new(loader: &'a L) -> Self {
        Self {
            loader,
            symbols: HashMap::new(),
        }
    }

    pub fn load(&mut self, candidate: &CandidateUnit) -> Result<&LoadedSymbol, LoadError> {
        let slot = match self.symbols.entry(CacheKey::of(candidate)) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => match self.loader.load(candidate) {
                Ok(symbol) => entry.insert(Some(symbol)),
                Err(e) => {
                    entry.insert(None);
                    return Err(e);
                }
            },
        };

        slot.as_ref()
            .ok_or_else(|| LoadError::previously_failed(candidate.to_string()))
    }

    /// Number of distinct units attempted in this pass.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

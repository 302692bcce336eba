//! Compile-time provider registry.
//!
//! Providers linked into the running binary add a [`ProviderEntry`] to the
//! [`STEP_PROVIDERS`] distributed slice. [`ProviderRegistry`] indexes those
//! entries by fully-qualified path so a namespace scan can enumerate and
//! resolve them by name.

use std::collections::BTreeMap;

use tracing::warn;

use super::Constructor;
use crate::discovery::RecursionPolicy;

const PATH_SEPARATOR: &str = "::";

pub struct ProviderEntry {
    /// Fully-qualified path, e.g. `app::features::LoginSteps`.
    pub qualified_name: &'static str,
    pub markers: &'static [&'static str],
    pub constructor: Option<Constructor>,
}

#[linkme::distributed_slice]
pub static STEP_PROVIDERS: [ProviderEntry] = [..];

/// Registers a provider in the compile-time registry.
///
/// The type must be named bare and the macro invoked in the module that
/// defines it: the registered name is `module_path!()` joined with the type
/// name, which then equals `std::any::type_name` of the type. Names must be
/// unique across the binary; see [`ProviderRegistry::insert`].
///
/// ```ignore
/// #[derive(Default)]
/// pub struct LoginSteps;
///
/// stepscan::register_step_provider!(static LOGIN_STEPS: LoginSteps);
/// stepscan::register_step_provider!(static DB_STEPS: DbSteps = DbSteps::connect);
/// stepscan::register_step_provider!(
///     static HELPER: Helper,
///     markers = [],
///     constructor = None,
/// );
/// ```
#[macro_export]
macro_rules! register_step_provider {
    (static $name:ident : $ty:ident $(;)?) => {
        $crate::register_step_provider!(
            static $name: $ty,
            markers = [$crate::discovery::STEPS_MARKER],
            constructor = Some($crate::provider::construct_default::<$ty>),
        );
    };
    (static $name:ident : $ty:ident = $ctor:expr $(;)?) => {
        $crate::register_step_provider!(
            static $name: $ty,
            markers = [$crate::discovery::STEPS_MARKER],
            constructor = Some($ctor),
        );
    };
    (
        static $name:ident : $ty:ident,
        markers = [$($marker:expr),* $(,)?],
        constructor = $ctor:expr $(,)?
    ) => {
        #[$crate::__private::linkme::distributed_slice($crate::provider::registry::STEP_PROVIDERS)]
        #[linkme(crate = $crate::__private::linkme)]
        static $name: $crate::provider::registry::ProviderEntry =
            $crate::provider::registry::ProviderEntry {
                qualified_name: concat!(module_path!(), "::", stringify!($ty)),
                markers: &[$($marker),*],
                constructor: $ctor,
            };
    };
}

/// Name index over registered entries, ordered by qualified name.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    entries: BTreeMap<&'static str, &'static ProviderEntry>,
}

impl ProviderRegistry {
    /// Every entry linked into the running binary.
    pub fn global() -> Self {
        STEP_PROVIDERS.iter().collect()
    }

    pub fn from_entries(entries: &'static [ProviderEntry]) -> Self {
        entries.iter().collect()
    }

    /// Adds an entry. Qualified names are unique: a second entry under a
    /// name already present is a registration mistake, logged and ignored
    /// so the first registration stays reachable.
    pub fn insert(&mut self, entry: &'static ProviderEntry) {
        if self.entries.contains_key(entry.qualified_name) {
            warn!(
                name = entry.qualified_name,
                "duplicate step provider registration ignored"
            );
            return;
        }
        self.entries.insert(entry.qualified_name, entry);
    }

    pub fn get(&self, qualified_name: &str) -> Option<&'static ProviderEntry> {
        self.entries.get(qualified_name).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Qualified names under `prefix`, sorted.
    ///
    /// `Direct` keeps only units whose parent namespace is exactly `prefix`;
    /// `Recursive` keeps every descendant. An empty prefix is the root
    /// namespace.
    pub fn names_under(&self, prefix: &str, recursion: RecursionPolicy) -> Vec<&'static str> {
        self.entries
            .keys()
            .copied()
            .filter(|name| is_under(name, prefix, recursion))
            .collect()
    }

    /// True when at least one unit lives somewhere below `prefix`.
    pub fn contains_namespace(&self, prefix: &str) -> bool {
        self.entries
            .keys()
            .any(|name| is_under(name, prefix, RecursionPolicy::Recursive))
    }
}

impl FromIterator<&'static ProviderEntry> for ProviderRegistry {
    fn from_iter<I: IntoIterator<Item = &'static ProviderEntry>>(iter: I) -> Self {
        let mut registry = Self::default();
        for entry in iter {
            registry.insert(entry);
        }
        registry
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.entries.keys()).finish()
    }
}

fn is_under(name: &str, prefix: &str, recursion: RecursionPolicy) -> bool {
    let parent = name
        .rsplit_once(PATH_SEPARATOR)
        .map(|(parent, _)| parent)
        .unwrap_or("");

    match recursion {
        RecursionPolicy::Direct => parent == prefix,
        RecursionPolicy::Recursive => {
            prefix.is_empty()
                || parent == prefix
                || parent
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with(PATH_SEPARATOR))
        }
    }
}

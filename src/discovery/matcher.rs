use std::env::consts::{DLL_PREFIX, DLL_SUFFIX};
use std::fmt;

use regex::Regex;

use crate::error::ResolutionError;
use crate::utils::string::to_snake_case;

/// Suffix token of the default naming convention.
pub const STEPS_SUFFIX: &str = "Steps";

/// Regular expression matched against the whole simple name of a candidate.
#[derive(Clone)]
pub struct NamePattern {
    source: String,
    regex: Regex,
}

/// How strictly the default pattern ties provider names to the runner name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamingConvention {
    /// `{Runner}` + anything + `Steps`.
    #[default]
    Prefixed,
    /// Exactly `{Runner}Steps`.
    Exact,
}

/// What kind of name the pattern will be tested against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    /// Platform shared library file names, e.g. `liblogin_story_steps.so`.
    SharedLibrary,
    /// Last segment of a Rust path, e.g. `LoginStorySteps`.
    Registered,
}

impl NamePattern {
    pub fn new(pattern: &str) -> Result<Self, ResolutionError> {
        let regex = Regex::new(&format!("^(?:{pattern})$")).map_err(|source| {
            ResolutionError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            }
        })?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// Default pattern for units belonging to a runner named `runner`.
    pub fn for_runner(runner: &str, convention: NamingConvention, kind: UnitKind) -> Self {
        let pattern = match kind {
            UnitKind::Registered => {
                let runner = regex::escape(runner);
                match convention {
                    NamingConvention::Prefixed => format!("{runner}.*{STEPS_SUFFIX}"),
                    NamingConvention::Exact => format!("{runner}{STEPS_SUFFIX}"),
                }
            }
            UnitKind::SharedLibrary => {
                let prefix = regex::escape(DLL_PREFIX);
                let suffix = regex::escape(DLL_SUFFIX);
                let runner = regex::escape(&to_snake_case(runner));
                let steps = STEPS_SUFFIX.to_lowercase();
                match convention {
                    NamingConvention::Prefixed => format!("{prefix}{runner}.*{steps}{suffix}"),
                    NamingConvention::Exact if runner.is_empty() => {
                        format!("{prefix}{steps}{suffix}")
                    }
                    NamingConvention::Exact => format!("{prefix}{runner}_{steps}{suffix}"),
                }
            }
        };

        Self::from_generated(pattern)
    }

    /// Default pattern for units belonging to the runner type `T`.
    pub fn for_runner_type<T: ?Sized>(convention: NamingConvention, kind: UnitKind) -> Self {
        Self::for_runner(&super::simple_type_name::<T>(), convention, kind)
    }

    /// Any unit following the steps naming convention.
    pub fn any_steps(kind: UnitKind) -> Self {
        Self::for_runner("", NamingConvention::Prefixed, kind)
    }

    pub fn matches(&self, simple_name: &str) -> bool {
        self.regex.is_match(simple_name)
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    // Input is escaped by the callers above, so compilation cannot fail.
    fn from_generated(pattern: String) -> Self {
        let regex = Regex::new(&format!("^(?:{pattern})$"))
            .unwrap_or_else(|e| unreachable!("generated pattern {pattern:?} is invalid: {e}"));
        Self {
            source: pattern,
            regex,
        }
    }
}

impl fmt::Debug for NamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NamePattern").field(&self.source).finish()
    }
}

impl fmt::Display for NamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl PartialEq for NamePattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

//! Error families of the discovery engine.
//!
//! Load and instantiation failures are recovered within a pass; resolution
//! and configuration failures are returned to the caller.

mod config;
mod instantiation;
mod load;
mod resolution;

pub use config::ConfigError;
pub use instantiation::InstantiationError;
pub use load::LoadError;
pub use resolution::ResolutionError;

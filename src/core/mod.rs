//! Core types shared by every layer: errors, configuration and build phases.

pub mod config;
pub mod error;
pub mod phase;

pub use config::{DEFAULT_CONTEXT_KEY, ENGINE_SETTINGS_FILE, GeneratorConfig};
pub use error::{Error, ErrorKind, Result};
pub use phase::BuildPhase;

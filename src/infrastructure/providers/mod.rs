//! Descriptor provider implementations

pub mod defaults;
pub mod json;
pub mod layout;
pub mod yaml;

pub use defaults::*;
pub use json::*;
pub use layout::*;
pub use yaml::*;

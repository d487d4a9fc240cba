//! Infrastructure layer - concrete implementations of domain ports

pub mod providers;
pub mod templates;

pub use providers::*;
pub use templates::*;

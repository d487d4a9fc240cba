//! Template engine implementations

pub mod settings;
pub mod tera_engine;

pub use settings::*;
pub use tera_engine::*;

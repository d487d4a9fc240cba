//! Application layer - runs a generation pass on behalf of a host build

pub mod generate;
pub mod project;
pub mod traits;

pub use generate::*;
pub use project::*;
pub use traits::*;

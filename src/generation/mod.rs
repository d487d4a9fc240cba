//! Generation domain - staleness checks, rendering and descriptor dispatch
//!
//! A [`DirectoryDispatcher`] walks a descriptor tree, asks the registered
//! [`DescriptorProvider`] for each file's template, output and data model,
//! merges in the shared build context and hands the resulting
//! [`GenerationUnit`] its render-or-skip decision.

pub mod dispatcher;
pub mod registry;
pub mod traits;
pub mod unit;

pub use dispatcher::*;
pub use registry::*;
pub use traits::*;
pub use unit::*;

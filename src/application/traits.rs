//! Port interfaces for the application layer

use std::path::Path;

/// Host build capability that accepts generated source directories
pub trait SourceRootRegistry {
    /// Register `path` as a root of main sources
    fn add_compile_source_root(&mut self, path: &Path);

    /// Register `path` as a root of test sources
    fn add_test_compile_source_root(&mut self, path: &Path);
}

//! Build-wide inputs shared by every generation unit of a run

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde_json::Value as JsonValue;

use crate::application::SourceRootRegistry;

/// Property set and configuration files of the active build
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectContext {
    pub properties: BTreeMap<String, String>,
    pub project_files: Vec<PathBuf>,
}

impl ProjectContext {
    pub fn new(properties: BTreeMap<String, String>, project_files: Vec<PathBuf>) -> Self {
        Self {
            properties,
            project_files,
        }
    }

    /// Newest modification time across the project files.
    ///
    /// Missing files count as the epoch, as does an empty list.
    pub fn reference_timestamp(&self) -> SystemTime {
        self.project_files
            .iter()
            .filter_map(|path| fs::metadata(path).and_then(|m| m.modified()).ok())
            .max()
            .unwrap_or(SystemTime::UNIX_EPOCH)
    }

    /// The property set as a JSON mapping
    pub fn properties_value(&self) -> JsonValue {
        JsonValue::Object(
            self.properties
                .iter()
                .map(|(key, value)| (key.clone(), JsonValue::String(value.clone())))
                .collect(),
        )
    }
}

/// In-memory source root registry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRoots {
    pub compile: Vec<PathBuf>,
    pub test_compile: Vec<PathBuf>,
}

impl SourceRootRegistry for SourceRoots {
    fn add_compile_source_root(&mut self, path: &Path) {
        if !self.compile.iter().any(|p| p == path) {
            self.compile.push(path.to_path_buf());
        }
    }

    fn add_test_compile_source_root(&mut self, path: &Path) {
        if !self.test_compile.iter().any(|p| p == path) {
            self.test_compile.push(path.to_path_buf());
        }
    }
}

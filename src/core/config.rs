//! Generator configuration.
//!
//! A run is described by a [`GeneratorConfig`], usually read from a
//! `teragen.toml` file and then adjusted from the command line:
//!
//! ```toml
//! source_dir = "codegen"
//! template_dir = "codegen/template"
//! generator_dir = "codegen/generator"
//! output_dir = "target/generated-sources/tera"
//! phase = "generate-sources"
//! project_files = ["Cargo.toml"]
//!
//! [properties]
//! version = "1.2.3"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::error::{Error, Result};
use crate::core::phase::BuildPhase;

/// Data-model key the build properties are published under
pub const DEFAULT_CONTEXT_KEY: &str = "pomProperties";

/// Name of the optional engine settings file inside `source_dir`
pub const ENGINE_SETTINGS_FILE: &str = "engine.toml";

/// Directory layout and build context for one generation run
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Holds the engine settings file
    pub source_dir: PathBuf,
    /// Root of the template tree
    pub template_dir: PathBuf,
    /// Root of the descriptor tree
    pub generator_dir: PathBuf,
    /// Root of the generated output tree
    pub output_dir: PathBuf,
    /// Phase the run is bound to
    pub phase: BuildPhase,
    /// Reserved data-model key for the build properties
    pub context_key: String,
    /// Build-configuration files whose newest modification time invalidates every output
    pub project_files: Vec<PathBuf>,
    /// Property set of the active build
    pub properties: BTreeMap<String, String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("src/main/tera"),
            template_dir: PathBuf::from("src/main/tera/template"),
            generator_dir: PathBuf::from("src/main/tera/generator"),
            output_dir: PathBuf::from("target/generated-sources/tera"),
            phase: BuildPhase::default(),
            context_key: DEFAULT_CONTEXT_KEY.to_string(),
            project_files: Vec::new(),
            properties: BTreeMap::new(),
        }
    }
}

impl GeneratorConfig {
    /// Load a configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|e| Error::io("read config file", path, e))?;
        Self::from_toml_str(&content)
            .map_err(|e| Error::config(format!("Invalid config file {}: {e}", path.display())))
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Path of the engine settings file
    pub fn engine_settings_path(&self) -> PathBuf {
        self.source_dir.join(ENGINE_SETTINGS_FILE)
    }

    /// Check the directories a run reads from
    pub fn validate(&self) -> Result<()> {
        if self.context_key.is_empty() {
            return Err(Error::config("context_key must not be empty"));
        }
        for dir in [&self.generator_dir, &self.template_dir] {
            if !dir.is_dir() {
                return Err(Error::config(format!(
                    "Required directory does not exist: {}",
                    dir.display()
                )));
            }
        }
        Ok(())
    }
}

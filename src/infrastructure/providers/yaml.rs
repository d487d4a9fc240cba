//! YAML-backed descriptor provider

use std::fs;
use std::path::Path;

use serde_json::Value as JsonValue;

use crate::core::{Error, Result};
use crate::generation::{DescriptorProperties, DescriptorProvider};
use crate::infrastructure::providers::DescriptorLayout;

/// Reads `templateName` and `dataModel` from a YAML descriptor.
///
/// One instance serves one suffix (`.yaml` or `.yml`), which is stripped from
/// the descriptor name to form the output name.
#[derive(Debug, Clone)]
pub struct YamlDescriptorProvider {
    layout: DescriptorLayout,
    suffix: String,
}

impl YamlDescriptorProvider {
    pub fn new(layout: DescriptorLayout, suffix: impl Into<String>) -> Self {
        Self {
            layout,
            suffix: suffix.into(),
        }
    }

    fn parse(&self, path: &Path) -> Result<JsonValue> {
        let content =
            fs::read_to_string(path).map_err(|e| Error::io("read descriptor file", path, e))?;
        serde_yaml::from_str(&content).map_err(|e| Error::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

impl DescriptorProvider for YamlDescriptorProvider {
    fn provide_properties_from_file(&self, path: &Path) -> Result<DescriptorProperties> {
        let document = self.parse(path)?;
        self.layout.extract(document, path, &self.suffix)
    }
}

//! JSON-backed descriptor provider

use std::fs;
use std::path::Path;

use serde_json::Value as JsonValue;

use crate::core::{Error, Result};
use crate::generation::{DescriptorProperties, DescriptorProvider};
use crate::infrastructure::providers::DescriptorLayout;

/// Suffix stripped from a JSON descriptor's name to form its output name
pub const JSON_SUFFIX: &str = ".json";

/// Reads `templateName` and `dataModel` from a JSON descriptor
#[derive(Debug, Clone)]
pub struct JsonDescriptorProvider {
    layout: DescriptorLayout,
}

impl JsonDescriptorProvider {
    pub fn new(layout: DescriptorLayout) -> Self {
        Self { layout }
    }

    fn parse(&self, path: &Path) -> Result<JsonValue> {
        let content =
            fs::read_to_string(path).map_err(|e| Error::io("read descriptor file", path, e))?;
        serde_json::from_str(&content).map_err(|e| Error::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

impl DescriptorProvider for JsonDescriptorProvider {
    fn provide_properties_from_file(&self, path: &Path) -> Result<DescriptorProperties> {
        let document = self.parse(path)?;
        self.layout.extract(document, path, JSON_SUFFIX)
    }
}

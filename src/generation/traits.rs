//! Port interfaces for the generation domain

use std::path::{Path, PathBuf};

use serde_json::{Map, Value as JsonValue};

use crate::core::Result;

/// What a descriptor file contributes to a generation unit.
///
/// The descriptor location and the reference timestamp are supplied by the
/// dispatcher, not by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptorProperties {
    pub template_reference: PathBuf,
    pub output_location: PathBuf,
    pub data_model: Map<String, JsonValue>,
}

/// Turns one kind of descriptor file into template, output and data model
pub trait DescriptorProvider: Send + Sync {
    /// Read `path` and resolve the generation task it describes
    fn provide_properties_from_file(&self, path: &Path) -> Result<DescriptorProperties>;
}

/// Why a template could not be rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderFailure {
    /// The template could not be located or opened
    TemplateNotFound,
    /// The template failed to evaluate against the data model
    Evaluation(String),
}

/// Opaque template rendering service
pub trait TemplateEngine: Send + Sync {
    /// Render `template` against `data`
    fn render(
        &self,
        template: &Path,
        data: &Map<String, JsonValue>,
    ) -> std::result::Result<String, RenderFailure>;
}

//! Generation unit - one validated (template, data, output) task.
//!
//! A unit decides whether its output is stale and, if so, renders the
//! template into it. Staleness is judged against the newest of the
//! descriptor, the template and the build-wide reference timestamp:
//!
//! ```text
//! threshold = max(reference_timestamp, mtime(descriptor), mtime(template))
//! skip      = output exists && mtime(output) >= threshold
//! ```
//!
//! A successful write stamps the output with "now", so a second run over an
//! unchanged tree always takes the skip path.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde_json::{Map, Value as JsonValue};
use tracing::debug;

use crate::core::{Error, Result};
use crate::generation::{RenderFailure, TemplateEngine};

/// What `render_or_skip` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The template was rendered and the output written
    Generated,
    /// The output was newer than every input and left untouched
    UpToDate,
}

/// An immutable, validated generation task
#[derive(Debug, Clone)]
pub struct GenerationUnit {
    descriptor_location: PathBuf,
    template_reference: PathBuf,
    output_location: PathBuf,
    data_model: Map<String, JsonValue>,
    reference_timestamp: SystemTime,
}

/// Collects the fields of a [`GenerationUnit`] and validates them on `build`
#[derive(Debug, Clone, Default)]
pub struct GenerationUnitBuilder {
    descriptor_location: Option<PathBuf>,
    template_reference: Option<PathBuf>,
    output_location: Option<PathBuf>,
    data_model: Option<Map<String, JsonValue>>,
    reference_timestamp: Option<SystemTime>,
}

impl GenerationUnitBuilder {
    pub fn reference_timestamp(mut self, timestamp: SystemTime) -> Self {
        self.reference_timestamp = Some(timestamp);
        self
    }

    pub fn descriptor_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.descriptor_location = Some(path.into());
        self
    }

    pub fn template_reference(mut self, path: impl Into<PathBuf>) -> Self {
        self.template_reference = Some(path.into());
        self
    }

    pub fn output_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_location = Some(path.into());
        self
    }

    /// Replace the data model
    pub fn data_model(mut self, data: Map<String, JsonValue>) -> Self {
        self.data_model = Some(data);
        self
    }

    /// Insert one entry, replacing any value already under `key`
    pub fn insert_data(mut self, key: impl Into<String>, value: JsonValue) -> Self {
        self.data_model
            .get_or_insert_with(Map::new)
            .insert(key.into(), value);
        self
    }

    /// Validate and freeze the unit.
    ///
    /// Fields are checked in a fixed order and the first missing one is
    /// reported: `referenceTimestamp`, `descriptorLocation`,
    /// `templateReference`, `outputLocation`, `dataModel`.
    pub fn build(self) -> Result<GenerationUnit> {
        let reference_timestamp = self
            .reference_timestamp
            .ok_or(Error::MissingField("referenceTimestamp"))?;
        let descriptor_location = non_empty(self.descriptor_location, "descriptorLocation")?;
        let template_reference = non_empty(self.template_reference, "templateReference")?;
        let output_location = non_empty(self.output_location, "outputLocation")?;
        let data_model = self.data_model.ok_or(Error::MissingField("dataModel"))?;

        Ok(GenerationUnit {
            descriptor_location,
            template_reference,
            output_location,
            data_model,
            reference_timestamp,
        })
    }
}

fn non_empty(path: Option<PathBuf>, field: &'static str) -> Result<PathBuf> {
    match path {
        Some(path) if !path.as_os_str().is_empty() => Ok(path),
        _ => Err(Error::MissingField(field)),
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

impl GenerationUnit {
    pub fn builder() -> GenerationUnitBuilder {
        GenerationUnitBuilder::default()
    }

    pub fn descriptor_location(&self) -> &Path {
        &self.descriptor_location
    }

    pub fn template_reference(&self) -> &Path {
        &self.template_reference
    }

    pub fn output_location(&self) -> &Path {
        &self.output_location
    }

    pub fn data_model(&self) -> &Map<String, JsonValue> {
        &self.data_model
    }

    pub fn reference_timestamp(&self) -> SystemTime {
        self.reference_timestamp
    }

    /// Newest modification time among the unit's inputs.
    ///
    /// A template that cannot be stat'ed does not contribute; rendering will
    /// report it.
    pub fn effective_threshold(&self) -> SystemTime {
        [
            modified(&self.descriptor_location),
            modified(&self.template_reference),
        ]
        .into_iter()
        .flatten()
        .fold(self.reference_timestamp, |newest, time| newest.max(time))
    }

    /// Whether the output exists and is at least as new as every input
    pub fn is_up_to_date(&self) -> bool {
        modified(&self.output_location)
            .is_some_and(|output_time| output_time >= self.effective_threshold())
    }

    /// Render the template into the output unless the output is up to date
    pub fn render_or_skip(&self, engine: &dyn TemplateEngine) -> Result<GenerationOutcome> {
        if self.is_up_to_date() {
            debug!(
                output = %self.output_location.display(),
                "Output is up to date, skipping"
            );
            return Ok(GenerationOutcome::UpToDate);
        }

        self.ensure_parent_directory()?;

        let rendered = engine
            .render(&self.template_reference, &self.data_model)
            .map_err(|failure| match failure {
                RenderFailure::TemplateNotFound => Error::TemplateNotFound {
                    template: self.template_reference.clone(),
                },
                RenderFailure::Evaluation(message) => Error::Render {
                    descriptor: self.descriptor_location.clone(),
                    message,
                },
            })?;

        fs::write(&self.output_location, rendered.as_bytes())
            .map_err(|e| Error::io("write output file", &self.output_location, e))?;

        debug!(
            output = %self.output_location.display(),
            template = %self.template_reference.display(),
            "Generated output"
        );
        Ok(GenerationOutcome::Generated)
    }

    fn ensure_parent_directory(&self) -> Result<()> {
        let Some(parent) = self
            .output_location
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
        else {
            return Ok(());
        };

        if parent.exists() {
            if !parent.is_dir() {
                return Err(Error::OutputParentIsFile {
                    path: absolute(parent),
                });
            }
            return Ok(());
        }

        fs::create_dir_all(parent).map_err(|e| Error::io("create directory", absolute(parent), e))
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

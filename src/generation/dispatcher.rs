//! Directory dispatcher - turns every descriptor under a root into a generation unit.
//!
//! The walk is sequential and fail-fast: the first error aborts it, and
//! outputs written for earlier descriptors stay on disk.

use std::path::Path;
use std::sync::Arc;
use std::time::SystemTime;

use serde_json::Value as JsonValue;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::core::{Error, Result};
use crate::generation::{GenerationOutcome, GenerationUnit, ProviderRegistry, TemplateEngine};

/// Build-wide data merged into every data model under a reserved key
#[derive(Debug, Clone, PartialEq)]
pub struct SharedContext {
    pub key: String,
    pub value: JsonValue,
}

impl SharedContext {
    pub fn new(key: impl Into<String>, value: JsonValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Counts of what a walk did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkSummary {
    pub generated: usize,
    pub up_to_date: usize,
}

impl WalkSummary {
    fn record(&mut self, outcome: GenerationOutcome) {
        match outcome {
            GenerationOutcome::Generated => self.generated += 1,
            GenerationOutcome::UpToDate => self.up_to_date += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.generated + self.up_to_date
    }
}

/// Walks a descriptor tree and drives one generation unit per regular file
pub struct DirectoryDispatcher {
    registry: Arc<ProviderRegistry>,
    engine: Arc<dyn TemplateEngine>,
    shared_context: SharedContext,
    reference_timestamp: SystemTime,
}

impl DirectoryDispatcher {
    pub fn new(
        registry: Arc<ProviderRegistry>,
        engine: Arc<dyn TemplateEngine>,
        shared_context: SharedContext,
        reference_timestamp: SystemTime,
    ) -> Self {
        Self {
            registry,
            engine,
            shared_context,
            reference_timestamp,
        }
    }

    /// Visit every regular file under `root`, in file-name order per directory.
    ///
    /// Symbolic links are not followed.
    pub fn walk(&self, root: &Path) -> Result<WalkSummary> {
        let mut summary = WalkSummary::default();

        for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(root).to_path_buf();
                Error::io("walk descriptor directory", path, e.into())
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            summary.record(self.dispatch(entry.path())?);
        }

        Ok(summary)
    }

    /// Generate the output for a single descriptor file
    pub fn dispatch(&self, path: &Path) -> Result<GenerationOutcome> {
        let provider = extension_of(path)
            .and_then(|extension| self.registry.get(extension))
            .ok_or_else(|| Error::UnsupportedType {
                path: path.to_path_buf(),
            })?;

        let properties = provider.provide_properties_from_file(path)?;
        if properties.data_model.contains_key(&self.shared_context.key) {
            warn!(
                descriptor = %path.display(),
                key = %self.shared_context.key,
                "Descriptor data model key is overwritten by the build context"
            );
        }

        let unit = GenerationUnit::builder()
            .reference_timestamp(self.reference_timestamp)
            .descriptor_location(path)
            .template_reference(properties.template_reference)
            .output_location(properties.output_location)
            .data_model(properties.data_model)
            .insert_data(
                self.shared_context.key.clone(),
                self.shared_context.value.clone(),
            )
            .build()?;

        debug!(descriptor = %path.display(), "Dispatching descriptor");
        unit.render_or_skip(self.engine.as_ref())
    }
}

/// Substring of the file name from its last `.`, if any
fn extension_of(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    name.rfind('.').map(|index| &name[index..])
}

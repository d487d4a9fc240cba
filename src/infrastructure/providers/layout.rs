//! Directory layout shared by the structured descriptor providers.
//!
//! A descriptor at `<descriptor_root>/a/b/name.txt.json` produces the output
//! `<output_root>/a/b/name.txt`, and its `templateName` is resolved against
//! `<template_root>`.

use std::path::{Component, Path, PathBuf};

use serde_json::{Map, Value as JsonValue};

use crate::core::{Error, Result};
use crate::generation::DescriptorProperties;

/// Descriptor key naming the template, relative to the template root
pub const TEMPLATE_NAME_KEY: &str = "templateName";

/// Descriptor key holding the data model mapping
pub const DATA_MODEL_KEY: &str = "dataModel";

/// The three fixed roots a structured provider works against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorLayout {
    descriptor_root: PathBuf,
    template_root: PathBuf,
    output_root: PathBuf,
}

impl DescriptorLayout {
    pub fn new(
        descriptor_root: impl Into<PathBuf>,
        template_root: impl Into<PathBuf>,
        output_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            descriptor_root: descriptor_root.into(),
            template_root: template_root.into(),
            output_root: output_root.into(),
        }
    }

    /// Resolve a template name against the template root
    pub fn template_path(&self, template_name: &str) -> PathBuf {
        self.template_root.join(template_name)
    }

    /// Map a descriptor path onto the output tree, dropping `suffix` from its name
    pub fn output_path(&self, descriptor: &Path, suffix: &str) -> Result<PathBuf> {
        let absolute_descriptor = absolute(descriptor)?;
        let absolute_root = absolute(&self.descriptor_root)?;

        let outside = || Error::DescriptorOutsideRoot {
            path: descriptor.to_path_buf(),
        };
        let relative = absolute_descriptor
            .strip_prefix(&absolute_root)
            .map_err(|_| outside())?;
        if relative.as_os_str().is_empty()
            || relative
                .components()
                .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(outside());
        }

        let output_name = relative
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.strip_suffix(suffix))
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                Error::config(format!(
                    "Descriptor file name must end with {suffix} and leave a non-empty output name: {}",
                    descriptor.display()
                ))
            })?;

        Ok(self.output_root.join(relative.with_file_name(output_name)))
    }

    /// Turn a parsed descriptor document into descriptor properties
    pub fn extract(
        &self,
        document: JsonValue,
        descriptor: &Path,
        suffix: &str,
    ) -> Result<DescriptorProperties> {
        let JsonValue::Object(mut document) = document else {
            return Err(Error::Parse {
                path: descriptor.to_path_buf(),
                message: "top-level value must be a mapping".to_string(),
            });
        };

        let data_model = match document.remove(DATA_MODEL_KEY) {
            None | Some(JsonValue::Null) => Map::new(),
            Some(JsonValue::Object(data)) => data,
            Some(_) => {
                return Err(Error::config(format!(
                    "{DATA_MODEL_KEY} must be a mapping in {}",
                    descriptor.display()
                )));
            }
        };

        let template_reference = match document.get(TEMPLATE_NAME_KEY) {
            None | Some(JsonValue::Null) => {
                return Err(Error::MissingProperty {
                    field: TEMPLATE_NAME_KEY,
                    path: descriptor.to_path_buf(),
                });
            }
            Some(JsonValue::String(name)) => self.template_path(name),
            Some(_) => {
                return Err(Error::config(format!(
                    "{TEMPLATE_NAME_KEY} must be a string in {}",
                    descriptor.display()
                )));
            }
        };

        let output_location = self.output_path(descriptor, suffix)?;

        Ok(DescriptorProperties {
            template_reference,
            output_location,
            data_model,
        })
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|e| Error::io("resolve path", path, e))
}

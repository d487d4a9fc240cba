//! teragen - build-time code generation from declarative descriptors.
//!
//! Each descriptor file under the generator directory names a Tera template
//! and a data model; teragen renders the template into a mirrored path under
//! the output directory, but only when the output is older than its inputs.
//!
//! ```no_run
//! use teragen::application::{GenerateUseCase, ProjectContext, SourceRoots};
//! use teragen::core::GeneratorConfig;
//!
//! let config = GeneratorConfig::load("teragen.toml".as_ref())?;
//! let project = ProjectContext::new(config.properties.clone(), config.project_files.clone());
//! let mut roots = SourceRoots::default();
//! let report = GenerateUseCase::new(config, project).execute(&mut roots)?;
//! println!("{} generated", report.summary.generated);
//! # Ok::<(), teragen::core::Error>(())
//! ```
#![deny(unsafe_code)]

pub mod application;
pub mod core;
pub mod generation;
pub mod infrastructure;

pub use crate::core::{Error, ErrorKind, Result};

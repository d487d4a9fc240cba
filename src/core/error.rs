//! Error handling for the teragen code generator.
//!
//! This module defines the main error type `Error` used throughout the library,
//! along with a convenient `Result` type alias. Every variant carries the path,
//! field name or directory needed to act on it without re-running the build.
//!
//! # Examples
//!
//! ```
//! use teragen::core::error::{Error, ErrorKind, Result};
//!
//! fn might_fail() -> Result<()> {
//!     Err(Error::config("Required directory does not exist: codegen"))
//! }
//!
//! assert_eq!(might_fail().unwrap_err().kind(), ErrorKind::Config);
//! ```

use std::fmt::{self, Display};
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for teragen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for teragen operations
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration or malformed descriptor field
    #[error("Configuration error: {0}")]
    Config(String),

    /// A generation unit was built without one of its required fields
    #[error("Generation unit is missing required field: {0}")]
    MissingField(&'static str),

    /// A descriptor file lacks a required property
    #[error("Required descriptor property not found: {field} (in {})", path.display())]
    MissingProperty { field: &'static str, path: PathBuf },

    /// A descriptor file could not be parsed
    #[error("Could not parse descriptor file {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// A descriptor file lives outside the descriptor root
    #[error("Descriptor file is not under the descriptor root: {}", path.display())]
    DescriptorOutsideRoot { path: PathBuf },

    /// The parent of an output file exists and is not a directory
    #[error("Parent directory of output file is a file: {}", path.display())]
    OutputParentIsFile { path: PathBuf },

    /// No descriptor provider is registered for the file's extension
    #[error("Unknown descriptor file extension: {}", path.display())]
    UnsupportedType { path: PathBuf },

    /// I/O failure while reading, writing or creating a path
    #[error("Could not {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The template could not be located or opened
    #[error("Could not read template: {}", template.display())]
    TemplateNotFound { template: PathBuf },

    /// The template engine settings are invalid
    #[error("Template engine error: {0}")]
    Engine(String),

    /// The template failed to evaluate against the descriptor's data model
    #[error(
        "Could not process template associated with descriptor file {}: {message}",
        descriptor.display()
    )]
    Render { descriptor: PathBuf, message: String },
}

/// Broad failure category, one per entry of the error taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Config,
    Parse,
    Path,
    UnsupportedType,
    Io,
    Template,
    Render,
}

impl ErrorKind {
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::Config => "config",
            ErrorKind::Parse => "parse",
            ErrorKind::Path => "path",
            ErrorKind::UnsupportedType => "unsupported-type",
            ErrorKind::Io => "io",
            ErrorKind::Template => "template",
            ErrorKind::Render => "render",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new template engine error
    pub fn engine<S: Into<String>>(msg: S) -> Self {
        Self::Engine(msg.into())
    }

    /// Create a new I/O error for `path`
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// The taxonomy category this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(_) | Error::MissingField(_) | Error::MissingProperty { .. } => {
                ErrorKind::Config
            }
            Error::Parse { .. } => ErrorKind::Parse,
            Error::DescriptorOutsideRoot { .. } | Error::OutputParentIsFile { .. } => {
                ErrorKind::Path
            }
            Error::UnsupportedType { .. } => ErrorKind::UnsupportedType,
            Error::Io { .. } => ErrorKind::Io,
            Error::TemplateNotFound { .. } | Error::Engine(_) => ErrorKind::Template,
            Error::Render { .. } => ErrorKind::Render,
        }
    }
}

/// Flattens an error and its `source()` chain into one line.
///
/// Tera reports the useful detail (the undefined variable, the bad filter)
/// several levels down the chain.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut current = err.source();
    while let Some(cause) = current {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        current = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_config_creation() {
        let error = Error::config("Invalid configuration");
        assert!(matches!(error, Error::Config(_)));
        assert_eq!(error.kind(), ErrorKind::Config);
        assert_eq!(
            error.to_string(),
            "Configuration error: Invalid configuration"
        );
    }

    #[test]
    fn test_missing_field_message_names_field() {
        let error = Error::MissingField("templateReference");
        assert_eq!(error.kind(), ErrorKind::Config);
        assert!(error.to_string().ends_with("templateReference"));
    }

    #[test]
    fn test_missing_property_names_field_and_file() {
        let error = Error::MissingProperty {
            field: "templateName",
            path: PathBuf::from("gen/a.txt.json"),
        };
        let message = error.to_string();
        assert!(message.contains("templateName"));
        assert!(message.contains("gen/a.txt.json"));
    }

    #[test]
    fn test_io_error_keeps_source() {
        let source = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let error = Error::io("create directory", "out/mydir", source);
        assert_eq!(error.kind(), ErrorKind::Io);
        assert_eq!(
            error.to_string(),
            "Could not create directory out/mydir: denied"
        );
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_path_errors_share_kind() {
        let outside = Error::DescriptorOutsideRoot {
            path: PathBuf::from("elsewhere/x.json"),
        };
        let parent = Error::OutputParentIsFile {
            path: PathBuf::from("/out/badParent"),
        };
        assert_eq!(outside.kind(), ErrorKind::Path);
        assert_eq!(parent.kind(), ErrorKind::Path);
        assert_eq!(
            parent.to_string(),
            "Parent directory of output file is a file: /out/badParent"
        );
    }

    #[test]
    fn test_template_and_render_kinds() {
        let missing = Error::TemplateNotFound {
            template: PathBuf::from("missing.tera"),
        };
        assert_eq!(missing.kind(), ErrorKind::Template);
        assert_eq!(missing.to_string(), "Could not read template: missing.tera");

        let render = Error::Render {
            descriptor: PathBuf::from("gen/mydir/missing-var.txt.json"),
            message: "Variable `testVar` not found".to_string(),
        };
        assert_eq!(render.kind(), ErrorKind::Render);
        assert!(render.to_string().contains("gen/mydir/missing-var.txt.json"));
    }

    #[test]
    fn test_error_chain_flattens_sources() {
        let inner = io::Error::new(io::ErrorKind::NotFound, "inner cause");
        let outer = Error::io("read descriptor file", "a.json", inner);
        let chain = error_chain(&outer);
        assert!(chain.starts_with("Could not read descriptor file a.json"));
        assert!(chain.ends_with(": inner cause"));
    }

    #[test]
    fn test_error_kind_display() {
        assert_eq!(ErrorKind::UnsupportedType.to_string(), "unsupported-type");
        assert_eq!(ErrorKind::Render.to_string(), "render");
    }
}

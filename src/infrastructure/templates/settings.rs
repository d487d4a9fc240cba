//! Optional engine settings file

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::core::{Error, Result};

/// Engine-level switches read from `engine.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineSettings {
    /// `false` turns off Tera's auto-escaping of `.html`/`.htm`/`.xml` templates
    pub autoescape: Option<bool>,
}

impl EngineSettings {
    /// Load settings from `path`, or the defaults when there is no such file
    pub fn load_optional(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content =
            fs::read_to_string(path).map_err(|e| Error::io("read engine settings", path, e))?;
        toml::from_str(&content).map_err(|e| {
            Error::engine(format!("Invalid setting(s) in {}: {e}", path.display()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_absent_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings = EngineSettings::load_optional(&temp_dir.path().join("engine.toml")).unwrap();
        assert_eq!(settings, EngineSettings::default());
        assert!(settings.autoescape.is_none());
    }

    #[test]
    fn test_load_autoescape() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("engine.toml");
        fs::write(&path, "autoescape = false\n").unwrap();
        let settings = EngineSettings::load_optional(&path).unwrap();
        assert_eq!(settings.autoescape, Some(false));
    }

    #[test]
    fn test_invalid_setting_names_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("engine.toml");
        fs::write(&path, "boolean_format = \"T,F\"\n").unwrap();

        let err = EngineSettings::load_optional(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Template);
        assert!(err.to_string().contains("Invalid setting(s) in"));
        assert!(err.to_string().contains("engine.toml"));
    }
}

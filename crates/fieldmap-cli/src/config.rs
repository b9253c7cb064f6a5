//! CLI settings.
//!
//! Settings come from, in order of precedence:
//! 1. The file passed with `--config`
//! 2. `<config dir>/fieldmap/config.toml` if it exists
//! 3. Built-in defaults
//!
//! ```toml
//! # Field configuration used when a command gets no configuration file
//! configuration = "/etc/fieldmap/site.toml"
//! pretty = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use fieldmap_core::Error as CoreError;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Project directory under the platform config dir.
pub const PROJECT_NAME: &str = "fieldmap";

/// Settings of the `fieldmap` binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldmapConfig {
    /// Field configuration used when a command gets none.
    ///
    /// Without one, the built-in `standard` configuration applies.
    pub configuration: Option<PathBuf>,

    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for FieldmapConfig {
    fn default() -> Self {
        Self {
            configuration: None,
            pretty: true,
        }
    }
}

impl FieldmapConfig {
    /// Load settings.
    ///
    /// An explicit path must exist; the default location is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    log::debug!("No settings file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    /// Parse settings from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| CoreError::io_with_path(e, path))?;
        let config = toml::from_str(&text).map_err(|e| Error::settings(path, e))?;
        log::debug!("Loaded settings from {}", path.display());
        Ok(config)
    }

    /// `<config dir>/fieldmap/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(PROJECT_NAME).join("config.toml"))
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Configuration
//!
//! A YAML file with a single optional setting, the fixed export directory:
//!
//! ```yaml
//! export_dir: /home/me/vault
//! ```
//!
//! Resolution priority for the fixed directory:
//! 1. `NOTEPORT_EXPORT_DIR` environment variable (if non-empty)
//! 2. `export_dir` from the config file
//!
//! When neither is set the run-supplied destination is used.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants as C;
use crate::error::{ExportError, Result};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Fixed output directory; overrides the run destination when non-blank
    #[serde(default)]
    pub export_dir: Option<String>,
}

impl Config {
    /// Platform default config file path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(C::CONFIG_DIR_NAME).join(C::CONFIG_FILE_NAME))
    }

    /// Load from `path`, or the default path when `None`, then apply the
    /// environment override. A missing file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).or_else(Self::default_path);
        let mut config = match path {
            Some(path) => Self::from_file(&path)?,
            None => Config::default(),
        };

        // Treat empty strings as None
        if let Some(dir) = std::env::var(C::ENV_EXPORT_DIR).ok().filter(|s| !s.trim().is_empty()) {
            config.export_dir = Some(dir);
        }

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => return Err(e.into()),
        };
        Self::parse(&content).map_err(|source| ExportError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse YAML content; an empty document is the default config
    pub fn parse(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yaml::from_str(content)
    }

    /// The fixed export directory, if one is configured
    pub fn fixed_dir(&self) -> Option<&str> {
        self.export_dir
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Resolve the export root of a run.
    ///
    /// The fixed directory wins when set; otherwise `destination` is used
    /// unchanged.
    pub fn export_root(&self, destination: Option<&Path>) -> Result<PathBuf> {
        match (self.fixed_dir(), destination) {
            (Some(fixed), _) => Ok(PathBuf::from(fixed)),
            (None, Some(dest)) => Ok(dest.to_path_buf()),
            (None, None) => Err(ExportError::NoDestination),
        }
    }
}

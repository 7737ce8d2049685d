//! Error type for export runs

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal export errors
///
/// Unresolved references and folder cycles are not errors; they are handled
/// where they occur and only show up in logs and the run report.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Host record failed validation at the boundary
    #[error("invalid item #{index}: {reason}")]
    InvalidItem { index: usize, reason: String },

    /// Host store could not deliver a page
    #[error("note store: {0}")]
    Store(String),

    /// Resource bytes could not be copied into the resource directory
    #[error("failed to copy resource {id} from {}: {source}", .from.display())]
    CopyResource {
        id: String,
        from: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Note file or directory could not be written
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Config file exists but is not valid YAML for our schema
    #[error("invalid config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Dump file is not valid JSON for our schema
    #[error("invalid dump: {0}")]
    Dump(#[from] serde_json::Error),

    /// Neither a fixed export directory nor a run destination was given
    #[error("no export destination: pass --dest or set export_dir in the config")]
    NoDestination,

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ExportError {
    pub(crate) fn invalid_item(index: usize, reason: impl Into<String>) -> Self {
        ExportError::InvalidItem {
            index,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;

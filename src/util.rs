//! Utility functions for output naming and path display

use std::path::Path;
use sha2::{Sha256, Digest};

use crate::constants as C;

/// Make a host title usable as a single path segment.
///
/// Strips characters illegal in directory names, trims whitespace and falls
/// back to the placeholder when nothing usable is left. Names made only of
/// dots are replaced too, they would otherwise walk out of the export root.
pub fn sanitize_name(raw: &str) -> String {
    let stripped: String = raw
        .chars()
        .filter(|c| !C::ILLEGAL_NAME_CHARS.contains(c) && !c.is_control())
        .collect();
    let trimmed = stripped.trim();

    if trimmed.is_empty() || trimmed.chars().all(|c| c == '.') {
        C::UNNAMED_FOLDER.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Check that a host id is safe to use as a file name
pub fn is_safe_id(id: &str) -> bool {
    !id.is_empty()
        && id != "."
        && id != ".."
        && !id.contains(|c| c == '/' || c == '\\' || c == '\0')
}

/// Hash source string using SHA256
pub fn hash_source(source: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    let hash = hasher.finalize();
    format!("{:x}", hash)
}

/// Abbreviate hash to git-style length
pub fn abbreviate_hash(full_hash: &str) -> String {
    full_hash.chars().take(C::HASH_ABBREVIATION_LENGTH).collect()
}

/// Display a path with forward slashes (cross-platform standard)
pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

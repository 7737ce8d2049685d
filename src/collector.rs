//! Ingest collector
//!
//! First pass of an export run. Accumulates the folder table, the pending
//! notes and the resource rename table while the host delivers items in
//! whatever order it likes. Nothing here resolves paths or rewrites links;
//! that waits until collection is complete.

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::constants as C;
use crate::frontmatter;
use crate::util;

/// A folder (notebook) seen during collection
#[derive(Debug, Clone, PartialEq)]
pub struct FolderRecord {
    pub id: String,
    /// Title after [`util::sanitize_name`]
    pub name: String,
    /// Empty for a root folder
    pub parent_id: String,
}

/// Folder id to record
pub type FolderTable = HashMap<String, FolderRecord>;

/// A note waiting for the emit phase
#[derive(Debug, Clone, PartialEq)]
pub struct PendingNote {
    pub id: String,
    /// Empty when the note sits at the root
    pub parent_id: String,
    pub front_matter: String,
    /// Raw body with the heading rule already applied; links not yet rewritten
    pub body: String,
}

/// Resource id to destination file name.
///
/// Entries are never overwritten. When a second resource claims a file name
/// already taken by another id, it gets a hash suffix derived from its id.
/// Ids are hex and compared case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct ResourceRenames {
    by_id: HashMap<String, String>,
    owner: HashMap<String, String>,
}

impl ResourceRenames {
    /// Record the destination name for a resource and return the name used
    pub fn record(&mut self, id: &str, basename: &str) -> &str {
        let key = id.to_ascii_lowercase();
        if !self.by_id.contains_key(&key) {
            let name = match self.owner.get(basename) {
                Some(owner) if *owner != key => disambiguate(&key, basename),
                _ => basename.to_string(),
            };
            if name != basename {
                warn!(resource = id, basename, renamed = %name, "resource file name already taken");
            }
            self.owner.insert(name.clone(), key.clone());
            self.by_id.insert(key.clone(), name);
        }
        &self.by_id[&key]
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.by_id.get(&id.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// `photo.png` claimed twice becomes `photo-<hash>.png`
fn disambiguate(id: &str, basename: &str) -> String {
    let suffix = util::abbreviate_hash(&util::hash_source(id));
    match basename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{}-{}.{}", stem, suffix, ext),
        _ => format!("{}-{}", basename, suffix),
    }
}

/// Collected state of one export run
#[derive(Debug, Default)]
pub struct Collector {
    folders: FolderTable,
    notes: Vec<PendingNote>,
    resources: ResourceRenames,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything collected so far
    pub fn reset(&mut self) {
        self.folders.clear();
        self.notes.clear();
        self.resources = ResourceRenames::default();
    }

    /// Record (or replace) a folder
    pub fn observe_folder(&mut self, id: &str, raw_title: &str, parent_id: &str) {
        let record = FolderRecord {
            id: id.to_string(),
            name: util::sanitize_name(raw_title),
            parent_id: parent_id.to_string(),
        };
        debug!(folder = id, name = %record.name, parent = parent_id, "observed folder");
        self.folders.insert(id.to_string(), record);
    }

    /// Record a note; front matter and heading are derived from the raw body
    pub fn observe_note(
        &mut self,
        id: &str,
        parent_id: &str,
        title: &str,
        created: &DateTime<Utc>,
        tags: &[String],
        body: &str,
    ) {
        let front_matter = frontmatter::build(id, title, created, tags);
        let body = frontmatter::ensure_heading(title, body);
        debug!(note = id, parent = parent_id, tags = tags.len(), "observed note");
        self.notes.push(PendingNote {
            id: id.to_string(),
            parent_id: parent_id.to_string(),
            front_matter,
            body,
        });
    }

    /// Record the destination name of a resource whose bytes live at `location`.
    ///
    /// Returns the file name the bytes must be written under.
    pub fn observe_resource_bytes(&mut self, id: &str, location: &Path) -> String {
        let basename = location
            .file_name()
            .map(|n| util::sanitize_name(&n.to_string_lossy()))
            .filter(|n| n != C::UNNAMED_FOLDER)
            .unwrap_or_else(|| id.to_string());
        let name = self.resources.record(id, &basename).to_string();
        debug!(resource = id, file = %name, "observed resource");
        name
    }

    pub fn folders(&self) -> &FolderTable {
        &self.folders
    }

    pub fn notes(&self) -> &[PendingNote] {
        &self.notes
    }

    pub fn resources(&self) -> &ResourceRenames {
        &self.resources
    }

    /// Split into the parts the emit phase consumes
    pub(crate) fn into_parts(self) -> (FolderTable, Vec<PendingNote>, ResourceRenames) {
        (self.folders, self.notes, self.resources)
    }
}

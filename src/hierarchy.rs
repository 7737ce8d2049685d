//! Folder hierarchy resolution
//!
//! Turns the flat folder table into output paths. Parent links are followed
//! upward to a root; the walk stops at an empty parent, at a parent missing
//! from the table, or when it would revisit a folder. In the last case the
//! folder whose parent closes the cycle is placed at the root.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::collector::FolderTable;
use crate::constants as C;

/// Memoizing path resolver over a folder table
pub struct HierarchyResolver<'a> {
    folders: &'a FolderTable,
    memo: HashMap<String, Vec<String>>,
}

impl<'a> HierarchyResolver<'a> {
    pub fn new(folders: &'a FolderTable) -> Self {
        Self {
            folders,
            memo: HashMap::new(),
        }
    }

    /// Sanitized folder names from the root down to `folder_id`.
    ///
    /// Empty or unknown ids resolve to the root (no segments).
    pub fn resolve_path(&mut self, folder_id: &str) -> Vec<String> {
        let folders = self.folders;
        if folder_id.is_empty() || !folders.contains_key(folder_id) {
            return Vec::new();
        }
        if let Some(path) = self.memo.get(folder_id) {
            return path.clone();
        }

        let mut chain: Vec<&str> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        let mut base: Vec<String> = Vec::new();
        let mut current = folder_id;

        loop {
            chain.push(current);
            seen.insert(current);
            let parent = folders[current].parent_id.as_str();

            if parent.is_empty() {
                break;
            }
            if let Some(path) = self.memo.get(parent) {
                base = path.clone();
                break;
            }
            if seen.contains(parent) {
                warn!(folder = current, parent, "folder cycle detected, placing folder at root");
                break;
            }
            if !folders.contains_key(parent) {
                debug!(folder = current, parent, "parent folder unknown, placing folder at root");
                break;
            }
            current = parent;
        }

        let mut path = base;
        for id in chain.iter().rev() {
            path.push(folders[*id].name.clone());
            self.memo.insert(id.to_string(), path.clone());
        }
        path
    }

    /// Number of path segments between the export root and the folder
    pub fn depth(&mut self, folder_id: &str) -> usize {
        self.resolve_path(folder_id).len()
    }

    /// Output directory of a folder below `root`
    pub fn output_dir(&mut self, root: &Path, folder_id: &str) -> PathBuf {
        let mut dir = root.to_path_buf();
        for segment in self.resolve_path(folder_id) {
            dir.push(segment);
        }
        dir
    }
}

/// Relative path from a note at `depth` to the shared resource directory
pub fn resources_relative_path(depth: usize) -> String {
    format!("{}{}", C::PARENT_DIR_TOKEN.repeat(depth), C::RESOURCES_DIR)
}

//! Export run pipeline
//!
//! A run has two phases with an explicit boundary between them:
//!
//! 1. [`ExportRun`] collects folders, notes and resources. Resource bytes are
//!    copied as soon as they are delivered so the rename table is complete
//!    when collection ends.
//! 2. [`ExportRun::finish_collection`] yields [`Collected`], the only type that
//!    can emit notes. Each note's directory, resource path and links are
//!    resolved against the complete folder and resource tables.
//!
//! Writes are not transactional. The first failing write aborts the run and
//! leaves whatever was already written in place.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::collector::{Collector, FolderTable, PendingNote, ResourceRenames};
use crate::constants as C;
use crate::error::{ExportError, Result};
use crate::hierarchy::{resources_relative_path, HierarchyResolver};
use crate::item::Item;
use crate::rewrite::Rewriter;
use crate::sink::FileSink;
use crate::store::{self, NoteStore, Page};

/// An image reference whose resource was never delivered
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingResource {
    pub note_id: String,
    pub resource_id: String,
}

/// Summary of a finished run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExportReport {
    pub root: PathBuf,
    pub folders: usize,
    pub notes_written: usize,
    pub resources_copied: usize,
    pub note_links: usize,
    pub missing_resources: Vec<MissingResource>,
    /// Note files in emission order
    pub written: Vec<PathBuf>,
}

/// Collection phase of an export run
pub struct ExportRun<S: FileSink> {
    root: PathBuf,
    sink: S,
    collector: Collector,
    resources_copied: usize,
}

impl<S: FileSink> ExportRun<S> {
    /// Start a run with fresh state; creates the root and resource directory
    pub fn start(root: impl Into<PathBuf>, mut sink: S) -> Result<Self> {
        let root = root.into();
        let resources = root.join(C::RESOURCES_DIR);
        sink.create_dir_all(&resources).map_err(|source| ExportError::Write {
            path: resources.clone(),
            source,
        })?;
        info!(root = %root.display(), "export run started");

        Ok(Self {
            root,
            sink,
            collector: Collector::new(),
            resources_copied: 0,
        })
    }

    /// Feed one validated item. `tags` is only used for notes.
    pub fn observe(&mut self, item: Item, tags: &[String]) -> Result<()> {
        match item {
            Item::Folder { id, title, parent_id } => {
                self.collector.observe_folder(&id, &title, &parent_id);
            }
            Item::Note { id, parent_id, title, created, body } => {
                self.collector
                    .observe_note(&id, &parent_id, &title, &created, tags, &body);
            }
            Item::Resource { id, location } => self.copy_resource(&id, &location)?,
        }
        Ok(())
    }

    fn copy_resource(&mut self, id: &str, location: &Path) -> Result<()> {
        if let Some(existing) = self.collector.resources().get(id) {
            debug!(resource = id, file = existing, "resource already copied");
            return Ok(());
        }
        let name = self.collector.observe_resource_bytes(id, location);
        let dest = self.root.join(C::RESOURCES_DIR).join(&name);
        self.sink
            .copy(location, &dest)
            .map_err(|source| ExportError::CopyResource {
                id: id.to_string(),
                from: location.to_path_buf(),
                source,
            })?;
        self.resources_copied += 1;
        Ok(())
    }

    /// Drain a host store: every item page, plus each note's tag pages
    pub fn collect<N: NoteStore + ?Sized>(&mut self, store: &N) -> Result<()> {
        let mut index = 0;
        for page in 1..=C::MAX_ITEM_PAGES {
            let Page { items, has_more } = store.item_page(page)?;
            for value in &items {
                match Item::from_value(index, value)? {
                    Some(item) => {
                        let tags = match &item {
                            Item::Note { id, .. } => store::fetch_tags(store, id)?,
                            _ => Vec::new(),
                        };
                        self.observe(item, &tags)?;
                    }
                    None => warn!(index, "skipping item of unsupported kind"),
                }
                index += 1;
            }
            if !has_more {
                return Ok(());
            }
        }
        warn!(pages = C::MAX_ITEM_PAGES, "item listing did not end, truncating");
        Ok(())
    }

    /// Mark collection complete
    pub fn finish_collection(self) -> Collected<S> {
        let (folders, notes, resources) = self.collector.into_parts();
        info!(
            folders = folders.len(),
            notes = notes.len(),
            resources = resources.len(),
            "collection complete"
        );
        Collected {
            root: self.root,
            sink: self.sink,
            folders,
            notes,
            resources,
            resources_copied: self.resources_copied,
        }
    }
}

/// Emission phase: everything a note can reference is known
pub struct Collected<S: FileSink> {
    root: PathBuf,
    sink: S,
    folders: FolderTable,
    notes: Vec<PendingNote>,
    resources: ResourceRenames,
    resources_copied: usize,
}

impl<S: FileSink> Collected<S> {
    pub fn notes(&self) -> &[PendingNote] {
        &self.notes
    }

    /// Write every pending note; returns the report and the sink
    pub fn emit(mut self) -> Result<(ExportReport, S)> {
        let mut resolver = HierarchyResolver::new(&self.folders);
        let rewriter = Rewriter::new(&self.resources);
        let mut report = ExportReport {
            root: self.root.clone(),
            folders: self.folders.len(),
            resources_copied: self.resources_copied,
            ..ExportReport::default()
        };

        for note in &self.notes {
            let dir = resolver.output_dir(&self.root, &note.parent_id);
            let depth = resolver.depth(&note.parent_id);
            let rewritten = rewriter.rewrite(&note.body, &resources_relative_path(depth));

            for resource_id in rewritten.missing {
                warn!(note = %note.id, resource = %resource_id, "image references missing resource");
                report.missing_resources.push(MissingResource {
                    note_id: note.id.clone(),
                    resource_id,
                });
            }
            report.note_links += rewritten.note_links;

            let document = format!("{}\n{}", note.front_matter, rewritten.text);
            let path = dir.join(format!("{}.{}", note.id, C::MARKDOWN_EXTENSION));

            self.sink
                .create_dir_all(&dir)
                .map_err(|source| ExportError::Write { path: dir.clone(), source })?;
            self.sink
                .write(&path, document.as_bytes())
                .map_err(|source| ExportError::Write { path: path.clone(), source })?;
            debug!(note = %note.id, path = %path.display(), "wrote note");

            report.notes_written += 1;
            report.written.push(path);
        }

        info!(
            notes = report.notes_written,
            resources = report.resources_copied,
            missing = report.missing_resources.len(),
            "export finished"
        );
        Ok((report, self.sink))
    }
}

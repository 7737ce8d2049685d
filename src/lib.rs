pub mod cli;
pub mod collector;
pub mod config;
pub mod constants;
pub mod error;
pub mod frontmatter;
pub mod hierarchy;
pub mod item;
pub mod pipeline;
pub mod rewrite;
pub mod sink;
pub mod store;
pub mod util;

pub use cli::{Cli, Command};
pub use collector::{Collector, FolderRecord, PendingNote, ResourceRenames};
pub use config::Config;
pub use error::{ExportError, Result};
pub use hierarchy::{resources_relative_path, HierarchyResolver};
pub use item::Item;
pub use pipeline::{Collected, ExportReport, ExportRun, MissingResource};
pub use rewrite::{rewrite, Rewriter};
pub use sink::{FileSink, FsSink, MemorySink};
pub use store::{JsonDumpStore, NoteStore, Page};
pub use util::display_path;

/// Run a full export of `store` into `root`
pub fn export<N, S>(store: &N, root: impl Into<std::path::PathBuf>, sink: S) -> Result<(ExportReport, S)>
where
    N: NoteStore + ?Sized,
    S: FileSink,
{
    let mut run = ExportRun::start(root, sink)?;
    run.collect(store)?;
    run.finish_collection().emit()
}

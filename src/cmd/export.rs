//! Export command module

use std::path::Path;

use noteport::{util, Config, FsSink, JsonDumpStore, Result};

pub fn run(config: &Config, dump: &Path, dest: Option<&Path>) -> Result<()> {
    let root = config.export_root(dest)?;
    let store = JsonDumpStore::open(dump)?;

    let (report, _) = noteport::export(&store, root, FsSink)?;

    // Canonical root for display, avoiding UNC prefixes on Windows
    let root = dunce::canonicalize(&report.root).unwrap_or_else(|_| report.root.clone());

    eprintln!(
        "Exported {} note(s), {} resource(s), {} folder(s)",
        report.notes_written, report.resources_copied, report.folders
    );
    if !report.missing_resources.is_empty() {
        eprintln!(
            "  {} image reference(s) point at missing resources (search for ':/missing-')",
            report.missing_resources.len()
        );
    }

    // Output root path for shell pipeline compatibility
    println!("{}", util::display_path(&root));

    Ok(())
}

//! Dry-run command module
//!
//! Runs the full pipeline against a memory sink and prints what would be
//! written.

use std::io;
use std::path::Path;

use noteport::sink::Entry;
use noteport::{util, Config, JsonDumpStore, MemorySink, Result};

pub fn run(config: &Config, dump: &Path, dest: Option<&Path>, json: bool) -> Result<()> {
    let root = config.export_root(dest)?;
    let store = JsonDumpStore::open(dump)?;

    let (report, sink) = noteport::export(&store, root, MemorySink::new())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report).map_err(io::Error::from)?);
        return Ok(());
    }

    for (path, entry) in sink.entries() {
        match entry {
            Entry::Dir => {}
            Entry::File(bytes) => println!("write {} ({} bytes)", util::display_path(path), bytes.len()),
            Entry::Copy(from) => println!(
                "copy  {} <- {}",
                util::display_path(path),
                util::display_path(from)
            ),
        }
    }

    for missing in &report.missing_resources {
        println!("missing resource {} in note {}", missing.resource_id, missing.note_id);
    }

    Ok(())
}

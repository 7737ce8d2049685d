//! Output sinks
//!
//! Every externally visible write of an export run goes through [`FileSink`].

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Destination of an export run
pub trait FileSink {
    fn create_dir_all(&mut self, path: &Path) -> io::Result<()>;

    fn write(&mut self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Copy the bytes at `from` to `to`, replacing `to`
    fn copy(&mut self, from: &Path, to: &Path) -> io::Result<()>;
}

/// Writes to the local filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSink;

impl FileSink for FsSink {
    fn create_dir_all(&mut self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn write(&mut self, path: &Path, contents: &[u8]) -> io::Result<()> {
        fs::write(path, contents)
    }

    fn copy(&mut self, from: &Path, to: &Path) -> io::Result<()> {
        fs::copy(from, to).map(|_| ())
    }
}

/// An operation recorded by [`MemorySink`]
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Dir,
    File(Vec<u8>),
    /// Copy planned from this source path
    Copy(PathBuf),
}

/// Records operations instead of touching the disk
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    entries: BTreeMap<PathBuf, Entry>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<&Entry> {
        self.entries.get(path.as_ref())
    }

    /// Text of a written file
    pub fn text(&self, path: impl AsRef<Path>) -> Option<String> {
        match self.get(path)? {
            Entry::File(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
            _ => None,
        }
    }

    /// Every recorded path in sorted order
    pub fn entries(&self) -> impl Iterator<Item = (&PathBuf, &Entry)> {
        self.entries.iter()
    }
}

impl FileSink for MemorySink {
    fn create_dir_all(&mut self, path: &Path) -> io::Result<()> {
        self.entries.entry(path.to_path_buf()).or_insert(Entry::Dir);
        Ok(())
    }

    fn write(&mut self, path: &Path, contents: &[u8]) -> io::Result<()> {
        self.entries.insert(path.to_path_buf(), Entry::File(contents.to_vec()));
        Ok(())
    }

    fn copy(&mut self, from: &Path, to: &Path) -> io::Result<()> {
        self.entries.insert(to.to_path_buf(), Entry::Copy(from.to_path_buf()));
        Ok(())
    }
}

//! Where the checked files come from
//!
//! The validator only needs to know whether a file exists, how large it is,
//! and what it says. [`DirSource`] answers from a directory on disk;
//! [`MemorySource`] answers from an in-memory map so checks can run against
//! synthetic sites.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub trait FileSource {
    /// Size in bytes, or `None` when the file does not exist
    fn size(&self, name: &str) -> Option<u64>;

    /// Full text of the file. Invalid UTF-8 is replaced, not rejected.
    fn read_to_string(&self, name: &str) -> io::Result<String>;
}

/// Files relative to a root directory
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl FileSource for DirSource {
    fn size(&self, name: &str) -> Option<u64> {
        fs::metadata(self.path(name)).ok().map(|meta| meta.len())
    }

    fn read_to_string(&self, name: &str) -> io::Result<String> {
        let bytes = fs::read(self.path(name))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Files held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: BTreeMap<String, Vec<u8>>,
    unreadable: BTreeMap<String, u64>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, name: &str, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(name, contents);
        self
    }

    /// A file that exists with `size` bytes but fails to read
    pub fn with_unreadable(mut self, name: &str, size: u64) -> Self {
        self.files.remove(name);
        self.unreadable.insert(name.to_string(), size);
        self
    }

    pub fn insert(&mut self, name: &str, contents: impl Into<Vec<u8>>) {
        self.unreadable.remove(name);
        self.files.insert(name.to_string(), contents.into());
    }

    pub fn remove(&mut self, name: &str) {
        self.files.remove(name);
        self.unreadable.remove(name);
    }
}

impl FileSource for MemorySource {
    fn size(&self, name: &str) -> Option<u64> {
        self.files
            .get(name)
            .map(|bytes| bytes.len() as u64)
            .or_else(|| self.unreadable.get(name).copied())
    }

    fn read_to_string(&self, name: &str) -> io::Result<String> {
        if self.unreadable.contains_key(name) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{} is not readable", name),
            ));
        }
        self.files
            .get(name)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, name.to_string()))
    }
}

impl<T: FileSource + ?Sized> FileSource for &T {
    fn size(&self, name: &str) -> Option<u64> {
        (**self).size(name)
    }

    fn read_to_string(&self, name: &str) -> io::Result<String> {
        (**self).read_to_string(name)
    }
}

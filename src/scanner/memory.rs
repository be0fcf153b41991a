use std::collections::HashMap;
use std::path::{Path, PathBuf};

use compact_str::CompactString;

use super::{DirectorySource, ScanError};

#[derive(Debug, Clone)]
enum MemEntry {
    Dir(Vec<CompactString>),
    File(u64),
}

/// In-memory directory source.
///
/// Adding an entry registers it in its parent's listing (creating missing
/// ancestor directories), so listings come back in insertion order.
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    entries: HashMap<PathBuf, MemEntry>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`MemorySource::add_dir`].
    pub fn with_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.add_dir(path);
        self
    }

    /// Builder form of [`MemorySource::add_file`].
    pub fn with_file(mut self, path: impl AsRef<Path>, size: u64) -> Self {
        self.add_file(path, size);
        self
    }

    /// Register a directory. Re-adding an existing directory is a no-op.
    pub fn add_dir(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        if matches!(self.entries.get(path), Some(MemEntry::Dir(_))) {
            return;
        }
        self.link_into_parent(path);
        self.entries
            .insert(path.to_path_buf(), MemEntry::Dir(Vec::new()));
    }

    /// Register a file of `size` bytes. Re-adding a file updates its size.
    pub fn add_file(&mut self, path: impl AsRef<Path>, size: u64) {
        let path = path.as_ref();
        if !self.entries.contains_key(path) {
            self.link_into_parent(path);
        }
        self.entries.insert(path.to_path_buf(), MemEntry::File(size));
    }

    fn link_into_parent(&mut self, path: &Path) {
        let (Some(parent), Some(name)) = (path.parent(), path.file_name()) else {
            return;
        };
        if parent.as_os_str().is_empty() {
            return;
        }
        self.add_dir(parent);
        if let Some(MemEntry::Dir(names)) = self.entries.get_mut(parent) {
            let name = CompactString::new(name.to_string_lossy());
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }

    fn lookup(&self, path: &Path) -> Result<&MemEntry, ScanError> {
        self.entries
            .get(path)
            .ok_or_else(|| ScanError::NotFound(path.to_path_buf()))
    }
}

impl DirectorySource for MemorySource {
    fn is_dir(&self, path: &Path) -> Result<bool, ScanError> {
        Ok(matches!(self.lookup(path)?, MemEntry::Dir(_)))
    }

    fn list_entries(&self, path: &Path) -> Result<Vec<CompactString>, ScanError> {
        match self.lookup(path)? {
            MemEntry::Dir(names) => Ok(names.clone()),
            MemEntry::File(_) => Err(ScanError::ReadDir {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "not a directory"),
            }),
        }
    }

    fn file_size(&self, path: &Path) -> Result<u64, ScanError> {
        match self.lookup(path)? {
            MemEntry::File(size) => Ok(*size),
            MemEntry::Dir(_) => Ok(0),
        }
    }
}

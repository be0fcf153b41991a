//! Directory sources: the only place the tree builder touches the outside world.
//!
//! A [`DirectorySource`] answers three questions about a path. The tree
//! builder asks them once per node and never retries, so whatever a source
//! reports as a fault aborts construction of the whole tree.

pub mod fs;
pub mod memory;
pub mod types;

use std::io;
use std::path::{Path, PathBuf};

use compact_str::CompactString;
use thiserror::Error;

pub use fs::FsSource;
pub use memory::MemorySource;

/// Faults raised by a directory source.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The path is not known to the source.
    #[error("path not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The path exists but could not be inspected.
    #[error("cannot read metadata of {}", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The directory could not be enumerated.
    #[error("cannot list directory {}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Capability to inspect a hierarchy of named, sized entries.
pub trait DirectorySource {
    /// Whether `path` is a directory.
    fn is_dir(&self, path: &Path) -> Result<bool, ScanError>;

    /// Entry names of the directory at `path`, in the order the source yields them.
    fn list_entries(&self, path: &Path) -> Result<Vec<CompactString>, ScanError>;

    /// Byte length of the file at `path`.
    fn file_size(&self, path: &Path) -> Result<u64, ScanError>;
}

impl<S: DirectorySource + ?Sized> DirectorySource for &S {
    fn is_dir(&self, path: &Path) -> Result<bool, ScanError> {
        (**self).is_dir(path)
    }

    fn list_entries(&self, path: &Path) -> Result<Vec<CompactString>, ScanError> {
        (**self).list_entries(path)
    }

    fn file_size(&self, path: &Path) -> Result<u64, ScanError> {
        (**self).file_size(path)
    }
}

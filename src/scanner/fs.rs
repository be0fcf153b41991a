use std::fs;
use std::io;
use std::path::Path;

use compact_str::CompactString;

use super::{DirectorySource, ScanError};

/// Directory source backed by the local filesystem.
///
/// Symlinks are followed: a link to a directory is listed like the directory
/// itself, and a dangling link is a metadata fault.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSource;

impl FsSource {
    pub fn new() -> Self {
        FsSource
    }
}

fn metadata_error(path: &Path, source: io::Error) -> ScanError {
    if source.kind() == io::ErrorKind::NotFound && fs::symlink_metadata(path).is_err() {
        ScanError::NotFound(path.to_path_buf())
    } else {
        ScanError::Metadata {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl DirectorySource for FsSource {
    fn is_dir(&self, path: &Path) -> Result<bool, ScanError> {
        fs::metadata(path)
            .map(|m| m.is_dir())
            .map_err(|e| metadata_error(path, e))
    }

    fn list_entries(&self, path: &Path) -> Result<Vec<CompactString>, ScanError> {
        let read_dir_error = |source| ScanError::ReadDir {
            path: path.to_path_buf(),
            source,
        };

        let mut names = Vec::new();
        for entry in fs::read_dir(path).map_err(read_dir_error)? {
            let entry = entry.map_err(read_dir_error)?;
            names.push(CompactString::new(entry.file_name().to_string_lossy()));
        }
        Ok(names)
    }

    fn file_size(&self, path: &Path) -> Result<u64, ScanError> {
        fs::metadata(path)
            .map(|m| m.len())
            .map_err(|e| metadata_error(path, e))
    }
}

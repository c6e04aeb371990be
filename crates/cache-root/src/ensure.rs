//! Directory creation and writability verification on the local filesystem.

use std::path::Path;
use std::{fs, io};

use crate::host::DirectoryEnsurer;

/// [`DirectoryEnsurer`] backed by the local filesystem.
///
/// Creation is recursive and idempotent. Writability is verified by
/// actually creating an unnamed probe file inside the directory rather
/// than by inspecting permission bits, so the answer matches what the
/// calling process can really do; the probe is removed by the OS as soon
/// as it is dropped.
#[derive(Debug, Default, Clone, Copy)]
#[non_exhaustive]
pub struct StdDirectoryEnsurer;

impl DirectoryEnsurer for StdDirectoryEnsurer {
    #[inline]
    fn ensure_exists(&self, path: &Path) -> bool {
        match ensure_dir(path) {
            Ok(()) => true,
            Err(source) => {
                log::warn!("cache directory {} is unusable: {source}", path.display());
                false
            }
        }
    }
}

/// Creates `path` recursively if absent and verifies it is a writable
/// directory.
///
/// # Errors
///
/// Returns an error if the directory tree could not be created, if the
/// path exists but is not a directory, or if no file can be created
/// inside it.
#[inline]
pub fn ensure_dir(path: &Path) -> Result<(), EnsureDirError> {
    // `create_dir_all` succeeds when the tree already exists, so two
    // callers racing on creation both pass.
    fs::create_dir_all(path).map_err(|source| EnsureDirError::Create { source })?;
    if !path.is_dir() {
        return Err(EnsureDirError::NotADirectory);
    }
    tempfile::tempfile_in(path).map_err(|source| EnsureDirError::NotWritable { source })?;
    Ok(())
}

/// An error indicating a directory could not be created or verified
/// writable.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum EnsureDirError {
    /// The directory tree could not be created.
    #[error("failed to create directory tree: {source}")]
    Create {
        /// The source of the error.
        #[source]
        source: io::Error,
    },
    /// The path exists but is not a directory.
    #[error("path exists but is not a directory")]
    NotADirectory,
    /// The directory exists but no file can be created inside it.
    #[error("directory is not writable: {source}")]
    NotWritable {
        /// The source of the error.
        #[source]
        source: io::Error,
    },
}

//! Host collaborator implementations for desktop platforms.

use std::path::{Path, PathBuf};

use crate::host::{
    ExternalAccessorError, ExternalPathProvider, InternalPathProvider, StorageMountChecker,
};

/// [`InternalPathProvider`] over the per-user cache directory of the OS.
///
/// Possible roots by OS are:
/// * Windows: `C:/users/<user>/AppData/Local/<app-id>`
/// * Mac: `~/Library/Caches/<app-id>`
/// * Linux: `~/.cache/<app-id>`
#[derive(Debug, Clone)]
pub struct UserCacheDirs {
    /// Application identifier appended to the user cache root.
    app_id: String,
}

impl UserCacheDirs {
    /// Creates a provider for the application with the given identifier.
    #[inline]
    pub fn new<A>(app_id: A) -> Self
    where
        A: Into<String>,
    {
        Self {
            app_id: app_id.into(),
        }
    }
}

impl InternalPathProvider for UserCacheDirs {
    #[inline]
    fn internal_cache_path(&self) -> PathBuf {
        // the contract is "always returns a path": when the host exposes no
        // home directory at all, hand out a relative one and let the
        // verification step decide whether it is usable
        directories::BaseDirs::new()
            .map_or_else(|| PathBuf::from(".cache"), |dirs| dirs.cache_dir().to_owned())
            .join(&self.app_id)
    }
}

/// Removable storage mounted under a fixed, known root path.
///
/// Mount state is "the root directory currently exists"; it is re-read on
/// every call, so media attached or detached between calls is observed.
/// The host has no native sandboxed accessor in this shape, leaving the
/// resolver to construct the external cache path manually under the root.
#[derive(Debug, Clone)]
pub struct FixedExternalStorage {
    /// Root directory the removable media appears under when mounted.
    root: PathBuf,
}

impl FixedExternalStorage {
    /// Creates a provider for removable media expected under `root`.
    #[inline]
    pub fn new<R>(root: R) -> Self
    where
        R: Into<PathBuf>,
    {
        Self { root: root.into() }
    }

    /// Root path the removable media appears under.
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl StorageMountChecker for FixedExternalStorage {
    #[inline]
    fn is_removable_storage_mounted(&self) -> bool {
        self.root.is_dir()
    }
}

impl ExternalPathProvider for FixedExternalStorage {
    #[inline]
    fn native_external_cache_path(&self) -> Result<Option<PathBuf>, ExternalAccessorError> {
        Ok(None)
    }

    #[inline]
    fn removable_storage_root(&self) -> Option<PathBuf> {
        Some(self.root.clone())
    }
}

#[cfg(test)]
mod test {
    use std::fs;

    use super::*;

    #[test_log::test]
    fn user_cache_path_ends_with_app_id() {
        let provider = UserCacheDirs::new("com.example.app");

        let path = provider.internal_cache_path();

        assert!(path.ends_with("com.example.app"));
    }

    #[test_log::test]
    fn fixed_storage_mount_state_follows_the_root_directory() {
        let scratch = tempfile::tempdir().unwrap();
        let root = scratch.path().join("usb0");
        let storage = FixedExternalStorage::new(&root);

        assert!(!storage.is_removable_storage_mounted());

        fs::create_dir(&root).unwrap();
        assert!(storage.is_removable_storage_mounted());

        fs::remove_dir(&root).unwrap();
        assert!(!storage.is_removable_storage_mounted());
    }

    #[test_log::test]
    fn fixed_storage_has_no_native_accessor() {
        let storage = FixedExternalStorage::new("/media/usb0");

        assert!(storage.native_external_cache_path().unwrap().is_none());
        assert_eq!(
            storage.removable_storage_root(),
            Some(PathBuf::from("/media/usb0"))
        );
    }
}

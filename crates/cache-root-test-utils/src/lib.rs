//! Scripted host collaborators and scratch environments for `cache-root`
//! tests.
//!
//! [`MockHost`] roots all its paths in a temp directory, so directory
//! creation and writability probes run against a real filesystem while
//! mount state and accessor behaviour are plain switches the test flips.

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use cache_root::host::{
    ExternalAccessorError, ExternalPathProvider, InternalPathProvider, StorageMountChecker,
};
use cache_root::{CacheRootResolver, StdDirectoryEnsurer};

/// Scripted host platform for driving the resolver through storage
/// scenarios.
///
/// Starts out with removable storage mounted and a native external cache
/// accessor available; builder-style methods flip either off. Mount state
/// is interior-mutable so a test can detach the media between two calls
/// on the same resolver.
#[derive(Debug)]
pub struct MockHost {
    /// Scratch directory all handed-out paths live under.
    scratch: tempfile::TempDir,
    /// Current mount state of the scripted removable storage.
    mounted: AtomicBool,
    /// Whether the host exposes the native external cache accessor.
    native_accessor: bool,
    /// Whether the native accessor fails instead of answering.
    accessor_fails: bool,
    /// Whether the internal cache path is uncreatable.
    broken_internal: bool,
}

impl MockHost {
    /// Creates a host with mounted removable storage and a working native
    /// accessor.
    ///
    /// # Errors
    ///
    /// Returns an error if the scratch directory cannot be created.
    #[inline]
    pub fn new() -> anyhow::Result<Self> {
        let scratch = tempfile::tempdir()?;
        // regular file the broken internal path is handed out beneath
        fs::write(scratch.path().join("occupied"), b"not a directory")?;
        Ok(Self {
            scratch,
            mounted: AtomicBool::new(true),
            native_accessor: true,
            accessor_fails: false,
            broken_internal: false,
        })
    }

    /// Hosts of the older capability tier: no native external accessor,
    /// only a removable storage root.
    #[inline]
    #[must_use]
    pub fn without_native_accessor(mut self) -> Self {
        self.native_accessor = false;
        self
    }

    /// Makes the native accessor fail instead of answering.
    #[inline]
    #[must_use]
    pub fn with_failing_accessor(mut self) -> Self {
        self.accessor_fails = true;
        self
    }

    /// Makes the internal location fail: the internal cache path is handed
    /// out beneath a regular file, so its directory tree can never be
    /// created.
    #[inline]
    #[must_use]
    pub fn with_broken_internal(mut self) -> Self {
        self.broken_internal = true;
        self
    }

    /// Attaches or detaches the scripted removable storage.
    #[inline]
    pub fn set_mounted(&self, mounted: bool) {
        self.mounted.store(mounted, Ordering::Relaxed);
    }

    /// Path the internal provider hands out. May not exist yet.
    #[inline]
    #[must_use]
    pub fn internal_dir(&self) -> PathBuf {
        self.scratch.path().join("internal")
    }

    /// Path the native external accessor hands out. May not exist yet.
    #[inline]
    #[must_use]
    pub fn native_external_dir(&self) -> PathBuf {
        self.scratch.path().join("external").join("native-cache")
    }

    /// Root of the scripted removable storage.
    #[inline]
    #[must_use]
    pub fn removable_root(&self) -> PathBuf {
        self.scratch.path().join("external").join("media")
    }

    /// Builds a resolver over this host for the given application
    /// identifier, ensured by the real filesystem.
    #[inline]
    pub fn resolver(
        &self,
        app_id: &str,
    ) -> CacheRootResolver<&Self, &Self, &Self, StdDirectoryEnsurer> {
        CacheRootResolver::new(self, self, self, StdDirectoryEnsurer::default(), app_id)
    }
}

impl StorageMountChecker for MockHost {
    #[inline]
    fn is_removable_storage_mounted(&self) -> bool {
        self.mounted.load(Ordering::Relaxed)
    }
}

impl InternalPathProvider for MockHost {
    #[inline]
    fn internal_cache_path(&self) -> PathBuf {
        if self.broken_internal {
            self.scratch.path().join("occupied").join("internal")
        } else {
            self.internal_dir()
        }
    }
}

impl ExternalPathProvider for MockHost {
    #[inline]
    fn native_external_cache_path(&self) -> Result<Option<PathBuf>, ExternalAccessorError> {
        if self.accessor_fails {
            return Err(ExternalAccessorError::new("scripted accessor failure"));
        }
        Ok(self.native_accessor.then(|| self.native_external_dir()))
    }

    #[inline]
    fn removable_storage_root(&self) -> Option<PathBuf> {
        Some(self.removable_root())
    }
}

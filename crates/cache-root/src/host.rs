//! Capability contracts of the host platform.
//!
//! The resolver never touches the platform directly; it calls into these
//! traits for mount state, sandboxed cache paths, and directory creation.
//! Hosts implement them over whatever bindings they have (platform SDK
//! calls, a fixed mount table, scripted test doubles).

use std::error::Error;
use std::path::{Path, PathBuf};

/// Reports whether removable/external storage media is currently mounted.
pub trait StorageMountChecker {
    /// Returns `true` if removable storage is mounted right now.
    ///
    /// Implementations must reflect the current mount state on every call.
    /// The resolver never caches the answer, so media attached or detached
    /// between calls is observed.
    fn is_removable_storage_mounted(&self) -> bool;
}

/// Provides the sandboxed internal cache path of the running application.
pub trait InternalPathProvider {
    /// Returns the internal cache path.
    ///
    /// The path may not exist yet; the resolver creates and verifies it
    /// before handing it out.
    fn internal_cache_path(&self) -> PathBuf;
}

/// Provides the sandboxed external cache path of the running application.
pub trait ExternalPathProvider {
    /// Returns the native sandboxed external cache path.
    ///
    /// `Ok(None)` means the host has no native accessor for this path
    /// (older capability tier); the resolver then constructs the path
    /// manually under [`removable_storage_root`](Self::removable_storage_root).
    ///
    /// # Errors
    ///
    /// Returns an error if the accessor itself failed unexpectedly, for
    /// example when it is invoked indirectly on the host and the dynamic
    /// call breaks. The resolver treats this as "location unavailable".
    fn native_external_cache_path(&self) -> Result<Option<PathBuf>, ExternalAccessorError>;

    /// Returns the root of removable storage, if the host knows one.
    ///
    /// Only consulted for manual path construction on hosts without the
    /// native accessor.
    fn removable_storage_root(&self) -> Option<PathBuf>;
}

/// Creates directory trees and verifies them usable.
pub trait DirectoryEnsurer {
    /// Creates `path` recursively if absent and returns whether it exists
    /// and is writable after the call.
    ///
    /// Creating an already-existing directory is not an error: concurrent
    /// callers may race on creation, and the loser of that race must still
    /// report success.
    fn ensure_exists(&self, path: &Path) -> bool;
}

impl<T: StorageMountChecker + ?Sized> StorageMountChecker for &T {
    #[inline]
    fn is_removable_storage_mounted(&self) -> bool {
        (**self).is_removable_storage_mounted()
    }
}

impl<T: InternalPathProvider + ?Sized> InternalPathProvider for &T {
    #[inline]
    fn internal_cache_path(&self) -> PathBuf {
        (**self).internal_cache_path()
    }
}

impl<T: ExternalPathProvider + ?Sized> ExternalPathProvider for &T {
    #[inline]
    fn native_external_cache_path(&self) -> Result<Option<PathBuf>, ExternalAccessorError> {
        (**self).native_external_cache_path()
    }

    #[inline]
    fn removable_storage_root(&self) -> Option<PathBuf> {
        (**self).removable_storage_root()
    }
}

impl<T: DirectoryEnsurer + ?Sized> DirectoryEnsurer for &T {
    #[inline]
    fn ensure_exists(&self, path: &Path) -> bool {
        (**self).ensure_exists(path)
    }
}

/// An error indicating the host's external cache path accessor failed
/// unexpectedly.
#[derive(Debug, thiserror::Error)]
#[error("external cache path accessor failed: {0}")]
pub struct ExternalAccessorError(Box<dyn Error + Send + Sync>);

impl ExternalAccessorError {
    /// Wraps the host-side cause of the accessor failure.
    #[inline]
    pub fn new<E>(source: E) -> Self
    where
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        Self(source.into())
    }
}

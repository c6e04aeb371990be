//! The directory-resolution algorithm: preference ordering, fallback
//! policy, and per-call verification.

use std::path::PathBuf;

use crate::{
    host::{DirectoryEnsurer, ExternalPathProvider, InternalPathProvider, StorageMountChecker},
    location::CacheLocation,
};

/// Default external cache storage path, relative to the removable storage
/// root, used on hosts without a native sandboxed accessor. The
/// application identifier goes between the two segments.
const EXT_CACHE_PREFIX: &str = "Android/data";
/// Final segment of the manually constructed external cache path.
const EXT_CACHE_LEAF: &str = "cache";

/// Resolves a verified writable cache root among host storage locations.
///
/// The resolver holds nothing besides its collaborators and the
/// application identifier used for manual external path construction: it
/// has no cross-call state, every call re-queries mount state and
/// re-verifies the chosen directory, and concurrent calls are safe. It
/// also does not track directories it has returned; their lifecycle is
/// entirely the host's.
#[derive(Debug, Clone)]
pub struct CacheRootResolver<M, I, E, D> {
    /// Reports whether removable storage is currently mounted.
    mount: M,
    /// Provides the sandboxed internal cache path.
    internal: I,
    /// Provides the sandboxed external cache path, or the removable root.
    external: E,
    /// Creates and verifies directory trees.
    dirs: D,
    /// Package/bundle identifier of the application.
    app_id: String,
}

impl<M, I, E, D> CacheRootResolver<M, I, E, D>
where
    M: StorageMountChecker,
    I: InternalPathProvider,
    E: ExternalPathProvider,
    D: DirectoryEnsurer,
{
    /// Creates a resolver over the given host collaborators.
    ///
    /// `app_id` is the package/bundle identifier of the application; it is
    /// only consulted when the external cache path has to be constructed
    /// manually on hosts without the native accessor.
    #[inline]
    pub fn new<A>(mount: M, internal: I, external: E, dirs: D, app_id: A) -> Self
    where
        A: Into<String>,
    {
        Self {
            mount,
            internal,
            external,
            dirs,
            app_id: app_id.into(),
        }
    }

    /// Resolves the best cache root without an explicit preference.
    ///
    /// External storage is used whenever it is mounted and verified
    /// writable, internal storage otherwise. Since internal storage is
    /// always provisioned by the host, `None` here means a genuinely
    /// unrecoverable host failure.
    ///
    /// It is recommended to cache under a sub-directory of the returned
    /// path to avoid polluting the application's cache root.
    #[inline]
    #[must_use]
    pub fn resolve_default(&self) -> Option<PathBuf> {
        self.resolve(CacheLocation::External, true)
    }

    /// Resolves a cache root, trying the `preferred` location first.
    ///
    /// With `allow_fallback` set, the other location is tried when the
    /// preferred one yields no usable directory. The returned directory
    /// exists and is writable at the moment of return; no guarantee
    /// survives after that, since the filesystem is shared.
    ///
    /// Each location is attempted at most once per call, and both are
    /// verified fresh on every call: nothing is cached across calls, so
    /// removable media attached or detached in between is observed.
    #[inline]
    #[must_use]
    pub fn resolve(&self, preferred: CacheLocation, allow_fallback: bool) -> Option<PathBuf> {
        let resolved = self.verified(preferred).or_else(|| {
            if allow_fallback {
                log::debug!(
                    "{preferred} cache location unavailable, falling back to {}",
                    preferred.fallback()
                );
                self.verified(preferred.fallback())
            } else {
                None
            }
        });

        match resolved {
            Some(ref dir) => log::info!("resolved cache root '{}'", dir.display()),
            // an expected outcome, not a fault: unmounted storage ends up
            // here too, and genuine failures already warn at their site
            None => log::debug!("no usable cache location (preferred {preferred})"),
        }
        resolved
    }

    /// Resolves the cache root described by `request`.
    #[inline]
    #[must_use]
    pub fn resolve_request(&self, request: &ResolutionRequest) -> Option<PathBuf> {
        match request.preferred {
            Some(preferred) => self.resolve(preferred, request.allow_fallback),
            None => self.resolve_default(),
        }
    }

    /// Dispatches to the sub-procedure of one location.
    fn verified(&self, location: CacheLocation) -> Option<PathBuf> {
        match location {
            CacheLocation::Internal => self.verified_internal(),
            CacheLocation::External => self.verified_external(),
        }
    }

    /// Obtains and verifies the internal cache directory.
    fn verified_internal(&self) -> Option<PathBuf> {
        self.ensured(self.internal.internal_cache_path())
    }

    /// Obtains and verifies the external cache directory.
    ///
    /// Fails immediately while removable storage is unmounted: paths under
    /// an unmounted root would be invalid or silently fail to persist.
    fn verified_external(&self) -> Option<PathBuf> {
        if !self.mount.is_removable_storage_mounted() {
            log::debug!("removable storage is not mounted");
            return None;
        }

        let dir = match self.external.native_external_cache_path() {
            Ok(Some(dir)) => dir,
            Ok(None) => {
                // no native accessor on this host, construct the path manually
                let root = self.external.removable_storage_root()?;
                root.join(EXT_CACHE_PREFIX)
                    .join(&self.app_id)
                    .join(EXT_CACHE_LEAF)
            }
            Err(source) => {
                log::warn!("treating external storage as unavailable: {source}");
                return None;
            }
        };
        self.ensured(dir)
    }

    /// Creates `dir` if absent and returns it once verified writable.
    fn ensured(&self, dir: PathBuf) -> Option<PathBuf> {
        self.dirs.ensure_exists(&dir).then_some(dir)
    }
}

/// Describes a single resolution call.
///
/// Ephemeral by design: build one, pass it to
/// [`CacheRootResolver::resolve_request`], discard it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[cfg_attr(feature = "clap", derive(clap::Parser))]
#[non_exhaustive]
pub struct ResolutionRequest {
    /// Preferred cache location. Absent means "best available,
    /// default-ordered", which prefers external storage.
    #[cfg_attr(feature = "clap", clap(long, value_enum))]
    pub preferred: Option<CacheLocation>,

    /// Try the other location when the preferred one is unavailable.
    #[cfg_attr(feature = "clap", clap(long = "no-fallback", default_value = "true", action = clap::ArgAction::SetFalse))]
    #[serde(default = "default_allow_fallback")]
    pub allow_fallback: bool,
}

impl ResolutionRequest {
    /// Creates a request preferring the given location, fallback enabled.
    #[inline]
    #[must_use]
    pub const fn preferring(location: CacheLocation) -> Self {
        Self {
            preferred: Some(location),
            allow_fallback: true,
        }
    }
}

impl Default for ResolutionRequest {
    #[inline]
    fn default() -> Self {
        Self {
            preferred: None,
            allow_fallback: default_allow_fallback(),
        }
    }
}

/// Fallback is on unless explicitly disabled.
const fn default_allow_fallback() -> bool {
    true
}

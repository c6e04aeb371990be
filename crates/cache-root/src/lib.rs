//! Resolver of a writable cache storage root for a host application.
//!
//! Hosts with more than one class of cache storage have to pick one before
//! any caching layer can run: a sandboxed internal location that is always
//! provisioned, and an external, possibly removable location that may be
//! unmounted at any moment. This crate owns that decision: given a caller
//! preference and a fallback flag, it picks among the candidate locations,
//! creates the directory tree if absent, and hands back a path that exists
//! and is writable at the moment of return, or a definite "no usable
//! location".
//!
//! The resolver itself is stateless and host-agnostic. Everything platform
//! specific (mount state, sandboxed cache paths, directory creation) sits
//! behind the collaborator traits in [`host`]; desktop-flavoured
//! implementations of those live in [`platform`] and [`ensure`].
//!
//! ```no_run
//! use cache_root::platform::{FixedExternalStorage, UserCacheDirs};
//! use cache_root::{CacheRootResolver, StdDirectoryEnsurer};
//!
//! let media = FixedExternalStorage::new("/media/usb0");
//! let resolver = CacheRootResolver::new(
//!     media.clone(),
//!     UserCacheDirs::new("com.example.app"),
//!     media,
//!     StdDirectoryEnsurer::default(),
//!     "com.example.app",
//! );
//!
//! // Prefer the removable media, fall back to the sandboxed internal cache.
//! if let Some(cache_root) = resolver.resolve_default() {
//!     println!("caching under {}", cache_root.display());
//! }
//! ```
//!
//! Callers are expected to treat `None` as a normal outcome and operate
//! without caching, not as an error to surface.

#![expect(clippy::pub_use, reason = "part of public API")]

pub mod ensure;
pub mod host;
pub mod location;
pub mod platform;
pub mod resolver;

pub use self::ensure::StdDirectoryEnsurer;
pub use self::location::CacheLocation;
pub use self::resolver::{CacheRootResolver, ResolutionRequest};

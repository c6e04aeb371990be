//! The storage location classes a cache root can live in.

use core::fmt::{self, Display};

/// A class of host storage that can hold the application cache root.
///
/// A location identifies a class of storage, not a specific path; the
/// concrete directory behind it is obtained per call by the
/// [resolver](crate::resolver::CacheRootResolver).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize,
)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
#[expect(
    clippy::exhaustive_enums,
    reason = "hosts expose exactly these two location classes"
)]
pub enum CacheLocation {
    /// Storage private to the application, always provisioned by the host.
    Internal,
    /// Removable or device-shared storage that may not always be mounted.
    External,
}

impl CacheLocation {
    /// Returns the other location, the one tried when fallback is enabled.
    #[inline]
    #[must_use]
    pub const fn fallback(self) -> Self {
        match self {
            Self::Internal => Self::External,
            Self::External => Self::Internal,
        }
    }
}

impl Display for CacheLocation {
    #[expect(
        clippy::min_ident_chars,
        reason = "It's a core library trait implementation"
    )]
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Internal => f.write_str("internal"),
            Self::External => f.write_str("external"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test_log::test]
    fn fallback_is_the_other_location() {
        assert_eq!(CacheLocation::Internal.fallback(), CacheLocation::External);
        assert_eq!(CacheLocation::External.fallback(), CacheLocation::Internal);
    }

    #[test_log::test]
    fn fallback_twice_returns_to_the_preferred_location() {
        for location in [CacheLocation::Internal, CacheLocation::External] {
            assert_eq!(location.fallback().fallback(), location);
        }
    }
}

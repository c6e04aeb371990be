//! Scenario tests driving the resolver through host storage states.

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use cache_root::{CacheLocation, ResolutionRequest};
use cache_root_test_utils::MockHost;

const APP_ID: &str = "com.example.app";

#[test_log::test]
fn default_resolution_prefers_external_storage() -> Result<()> {
    let host = MockHost::new()?;
    let resolver = host.resolver(APP_ID);

    let dir = resolver.resolve_default().expect("external is available");

    // external wins even though internal would also succeed
    assert_eq!(dir, host.native_external_dir());
    assert!(dir.is_dir());
    Ok(())
}

#[test_log::test]
fn default_resolution_falls_back_to_internal_when_unmounted() -> Result<()> {
    let host = MockHost::new()?;
    host.set_mounted(false);
    let resolver = host.resolver(APP_ID);

    let dir = resolver.resolve_default().expect("internal is available");

    assert_eq!(dir, host.internal_dir());
    assert!(dir.is_dir());
    Ok(())
}

#[test_log::test]
fn resolved_directory_exists_and_is_writable() -> Result<()> {
    let host = MockHost::new()?;
    let resolver = host.resolver(APP_ID);

    let dir = resolver
        .resolve(CacheLocation::Internal, false)
        .expect("internal is available");

    assert!(dir.is_dir());
    fs::write(dir.join("entry"), b"cached")?;
    Ok(())
}

#[test_log::test]
fn external_is_never_attempted_while_unmounted() -> Result<()> {
    let host = MockHost::new()?;
    host.set_mounted(false);
    let resolver = host.resolver(APP_ID);

    assert_eq!(resolver.resolve(CacheLocation::External, false), None);
    // the preferred location failed with fallback disabled, so nothing
    // was created anywhere
    assert!(!host.native_external_dir().exists());
    assert!(!host.internal_dir().exists());
    Ok(())
}

#[test_log::test]
fn unmounted_external_falls_back_to_internal() -> Result<()> {
    let host = MockHost::new()?;
    host.set_mounted(false);
    let resolver = host.resolver(APP_ID);

    let dir = resolver
        .resolve(CacheLocation::External, true)
        .expect("internal is available");

    assert_eq!(dir, host.internal_dir());
    Ok(())
}

#[test_log::test]
fn uncreatable_internal_falls_back_to_external() -> Result<()> {
    let host = MockHost::new()?.with_broken_internal();
    let resolver = host.resolver(APP_ID);

    let dir = resolver
        .resolve(CacheLocation::Internal, true)
        .expect("external is available");

    assert_eq!(dir, host.native_external_dir());
    assert!(dir.is_dir());
    Ok(())
}

#[test_log::test]
fn uncreatable_internal_without_fallback_is_unavailable() -> Result<()> {
    let host = MockHost::new()?.with_broken_internal();
    let resolver = host.resolver(APP_ID);

    assert_eq!(resolver.resolve(CacheLocation::Internal, false), None);
    // fallback was disabled, so the external side was never touched
    assert!(!host.native_external_dir().exists());
    Ok(())
}

#[test_log::test]
fn internal_ignores_mount_state() -> Result<()> {
    let host = MockHost::new()?;
    host.set_mounted(false);
    let resolver = host.resolver(APP_ID);

    let dir = resolver
        .resolve(CacheLocation::Internal, false)
        .expect("internal never depends on mount state");

    assert_eq!(dir, host.internal_dir());
    Ok(())
}

#[test_log::test]
fn native_accessor_path_is_returned_verbatim() -> Result<()> {
    let host = MockHost::new()?;
    let resolver = host.resolver(APP_ID);

    let dir = resolver
        .resolve(CacheLocation::External, false)
        .expect("external is available");

    assert_eq!(dir, host.native_external_dir());
    Ok(())
}

#[test_log::test]
fn manual_path_is_built_under_the_removable_root() -> Result<()> {
    let host = MockHost::new()?.without_native_accessor();
    let resolver = host.resolver(APP_ID);

    let dir = resolver
        .resolve(CacheLocation::External, false)
        .expect("external is available");

    let expected: PathBuf = host
        .removable_root()
        .join("Android/data")
        .join(APP_ID)
        .join("cache");
    assert_eq!(dir, expected);
    assert!(dir.is_dir());
    Ok(())
}

#[test_log::test]
fn accessor_failure_collapses_to_unavailable() -> Result<()> {
    let host = MockHost::new()?.with_failing_accessor();
    let resolver = host.resolver(APP_ID);

    assert_eq!(resolver.resolve(CacheLocation::External, false), None);
    Ok(())
}

#[test_log::test]
fn accessor_failure_still_falls_back_to_internal() -> Result<()> {
    let host = MockHost::new()?.with_failing_accessor();
    let resolver = host.resolver(APP_ID);

    let dir = resolver
        .resolve(CacheLocation::External, true)
        .expect("internal is available");

    assert_eq!(dir, host.internal_dir());
    Ok(())
}

#[test_log::test]
fn resolution_is_idempotent_in_an_unchanged_environment() -> Result<()> {
    let host = MockHost::new()?;
    let resolver = host.resolver(APP_ID);

    let first = resolver.resolve(CacheLocation::External, true);
    let second = resolver.resolve(CacheLocation::External, true);

    assert!(first.is_some());
    assert_eq!(first, second);
    Ok(())
}

#[test_log::test]
fn mount_state_is_rechecked_on_every_call() -> Result<()> {
    let host = MockHost::new()?;
    let resolver = host.resolver(APP_ID);

    assert!(resolver.resolve(CacheLocation::External, false).is_some());

    host.set_mounted(false);
    assert_eq!(resolver.resolve(CacheLocation::External, false), None);

    host.set_mounted(true);
    assert!(resolver.resolve(CacheLocation::External, false).is_some());
    Ok(())
}

#[test_log::test]
fn concurrent_resolutions_tolerate_the_creation_race() -> Result<()> {
    let host = MockHost::new()?;
    let resolver = host.resolver(APP_ID);

    let (first, second) = std::thread::scope(|scope| {
        let one = scope.spawn(|| resolver.resolve(CacheLocation::Internal, false));
        let two = scope.spawn(|| resolver.resolve(CacheLocation::Internal, false));
        (one.join().unwrap(), two.join().unwrap())
    });

    assert!(first.is_some());
    assert_eq!(first, second);
    Ok(())
}

#[test_log::test]
fn default_request_behaves_like_default_resolution() -> Result<()> {
    let host = MockHost::new()?;
    let resolver = host.resolver(APP_ID);

    assert_eq!(
        resolver.resolve_request(&ResolutionRequest::default()),
        resolver.resolve_default()
    );
    Ok(())
}

#[test_log::test]
fn request_preference_and_fallback_flag_are_honoured() -> Result<()> {
    let host = MockHost::new()?;
    host.set_mounted(false);
    let resolver = host.resolver(APP_ID);

    let with_fallback = ResolutionRequest::preferring(CacheLocation::External);
    assert_eq!(
        resolver.resolve_request(&with_fallback),
        Some(host.internal_dir())
    );

    let mut without_fallback = with_fallback;
    without_fallback.allow_fallback = false;
    assert_eq!(resolver.resolve_request(&without_fallback), None);
    Ok(())
}

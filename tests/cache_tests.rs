//! Integration tests for the bundle cache
//!
//! These tests exercise staleness checks and serialized regeneration through
//! the public cache API, and check that the override engine reuses cached
//! jars until their input changes.

mod common;

use std::fs::{self, File};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use common::Workspace;
use target_bundler::app::{CacheManager, Coordinate, ResolvedArtifact, TargetLocation};
use target_bundler::Result;

fn set_mtime(path: &Path, time: SystemTime) {
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(time)
        .unwrap();
}

/// Current time truncated to whole seconds
fn now() -> SystemTime {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs();
    UNIX_EPOCH + Duration::from_secs(secs)
}

fn reference(workspace: &Workspace, name: &str) -> ResolvedArtifact {
    let file = workspace.path(name);
    fs::write(&file, b"reference content").unwrap();
    ResolvedArtifact::new(Coordinate::new("org.example", name, "1.0.0"), file)
}

#[test]
fn test_is_outdated_compares_timestamps() {
    let workspace = Workspace::new();
    let target = workspace.path("target.jar");
    let source = workspace.path("source.jar");
    fs::write(&source, b"source").unwrap();

    assert!(CacheManager::is_outdated(&target, &source));

    fs::write(&target, b"target").unwrap();
    let base = now();
    set_mtime(&source, base);
    set_mtime(&target, base);
    assert!(!CacheManager::is_outdated(&target, &source));

    set_mtime(&target, base + Duration::from_secs(60));
    assert!(!CacheManager::is_outdated(&target, &source));

    set_mtime(&target, base - Duration::from_secs(60));
    assert!(CacheManager::is_outdated(&target, &source));
}

#[test]
fn test_access_twice_produces_once_with_identical_content() {
    let workspace = Workspace::new();
    let artifact = reference(&workspace, "stable");
    let calls = AtomicUsize::new(0);

    let produce = |staging: &Path| -> Result<()> {
        calls.fetch_add(1, Ordering::SeqCst);
        fs::write(staging, b"generated")?;
        Ok(())
    };

    let first = workspace
        .cache
        .access_artifact_file(&artifact, "stable_1.0.0.jar", produce)
        .unwrap();
    let first_content = fs::read(&first).unwrap();
    let first_modified = fs::metadata(&first).unwrap().modified().unwrap();
    let second = workspace
        .cache
        .access_artifact_file(&artifact, "stable_1.0.0.jar", produce)
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(first_content, b"generated");
    assert_eq!(fs::read(&second).unwrap(), first_content);
    assert_eq!(
        fs::metadata(&second).unwrap().modified().unwrap(),
        first_modified
    );
}

#[test]
fn test_concurrent_access_to_distinct_keys() {
    let workspace = Workspace::new();
    let cache = Arc::clone(&workspace.cache);
    let artifacts: Vec<ResolvedArtifact> = (0..4)
        .map(|i| reference(&workspace, &format!("artifact{}", i)))
        .collect();
    let calls = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = artifacts
        .into_iter()
        .flat_map(|artifact| {
            (0..3).map(move |_| artifact.clone()).collect::<Vec<_>>()
        })
        .map(|artifact| {
            let cache = Arc::clone(&cache);
            let calls = Arc::clone(&calls);
            thread::spawn(move || {
                cache
                    .access_artifact_file(&artifact, "out.jar", |staging: &Path| -> Result<()> {
                        calls.fetch_add(1, Ordering::SeqCst);
                        thread::sleep(Duration::from_millis(20));
                        fs::write(staging, artifact.coordinate.artifact_id.as_bytes())?;
                        Ok(())
                    })
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        let path = handle.join().unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(path.to_string_lossy().contains(&content));
    }
    // One regeneration per distinct artifact
    assert_eq!(calls.load(Ordering::SeqCst), 4);
}

#[test]
fn test_engine_regenerates_only_when_input_is_newer() {
    let workspace = Workspace::new();
    let dependency = workspace.slf4j();
    let location = TargetLocation {
        id: "slf4j".to_string(),
        manifest_override: true,
        dependencies: vec![dependency.artifact.coordinate.clone()],
        instructions: vec!["Bundle-SymbolicName: custom.slf4j.api".to_string()],
        ..Default::default()
    };
    let engine = workspace.engine();

    let first = engine.process(&location, &dependency).unwrap();
    let cached = first[0].file_path().unwrap();
    let written = now() - Duration::from_secs(600);
    set_mtime(&cached, written);
    set_mtime(&dependency.artifact.file, written - Duration::from_secs(60));

    // Input older than the cached jar: reused as is
    let second = engine.process(&location, &dependency).unwrap();
    assert_eq!(second[0].location, first[0].location);
    assert_eq!(
        fs::metadata(&cached).unwrap().modified().unwrap(),
        written
    );

    // Input newer than the cached jar: regenerated
    set_mtime(&dependency.artifact.file, now());
    engine.process(&location, &dependency).unwrap();
    assert!(fs::metadata(&cached).unwrap().modified().unwrap() > written);
}

#[tokio::test]
async fn test_cache_stats_after_override() {
    let workspace = Workspace::new();
    let dependency = workspace.slf4j();
    let location = TargetLocation {
        id: "slf4j".to_string(),
        include_source: true,
        manifest_override: true,
        dependencies: vec![dependency.artifact.coordinate.clone()],
        instructions: vec!["Bundle-SymbolicName: custom.slf4j.api".to_string()],
        ..Default::default()
    };

    workspace.engine().process(&location, &dependency).unwrap();

    let stats = workspace.cache.get_cache_stats().await;
    assert_eq!(stats.bundle_count, 2);
    assert!(stats.total_size > 0);
    assert!(stats.newest.is_some());
}

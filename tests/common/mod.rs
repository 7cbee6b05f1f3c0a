//! Shared fixtures for the integration tests

#![allow(dead_code)]

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

use target_bundler::app::{
    CacheConfig, CacheManager, Coordinate, Manifest, ManifestOverrideEngine, ResolvedArtifact,
    ResolvedDependency,
};

pub const SLF4J_MANIFEST: &str = "Manifest-Version: 1.0\r\n\
Bundle-ManifestVersion: 2\r\n\
Bundle-SymbolicName: slf4j.api\r\n\
Bundle-Version: 2.0.7\r\n\
Export-Package: org.slf4j;version=\"2.0.7\"\r\n\r\n";

/// Write a jar with an optional manifest and the given entries
pub fn write_jar(path: &Path, manifest: Option<&str>, entries: &[(&str, &[u8])]) {
    let mut writer = ZipWriter::new(File::create(path).unwrap());
    let options = SimpleFileOptions::default();
    if let Some(manifest) = manifest {
        writer.start_file("META-INF/MANIFEST.MF", options).unwrap();
        writer.write_all(manifest.as_bytes()).unwrap();
    }
    for (name, data) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap();
}

/// Read one entry of a jar
pub fn read_entry(path: &Path, name: &str) -> Option<Vec<u8>> {
    let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut entry = archive.by_name(name).ok()?;
    let mut data = Vec::new();
    entry.read_to_end(&mut data).unwrap();
    Some(data)
}

/// Parse the manifest of a jar written by the bundler
pub fn manifest_of(path: &Path) -> Manifest {
    let bytes = read_entry(path, "META-INF/MANIFEST.MF").unwrap();
    Manifest::parse_bytes(&bytes).unwrap()
}

/// A workspace with a cache below a temporary directory
pub struct Workspace {
    pub temp_dir: TempDir,
    pub cache: Arc<CacheManager>,
}

impl Workspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let cache = CacheManager::new(CacheConfig::with_cache_root(temp_dir.path().join("cache")))
            .unwrap();
        Self {
            temp_dir,
            cache: Arc::new(cache),
        }
    }

    pub fn engine(&self) -> ManifestOverrideEngine {
        ManifestOverrideEngine::with_defaults(Arc::clone(&self.cache))
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// slf4j-api as a bundle, with a plain sources jar
    pub fn slf4j(&self) -> ResolvedDependency {
        let coordinate = Coordinate::new("org.slf4j", "slf4j-api", "2.0.7");
        let jar = self.path("slf4j-api-2.0.7.jar");
        write_jar(
            &jar,
            Some(SLF4J_MANIFEST),
            &[("org/slf4j/Logger.class", b"logger bytes")],
        );
        let sources = self.path("slf4j-api-2.0.7-sources.jar");
        write_jar(
            &sources,
            Some("Manifest-Version: 1.0\r\n\r\n"),
            &[("org/slf4j/Logger.java", b"package org.slf4j;")],
        );

        ResolvedDependency::root(ResolvedArtifact::new(coordinate.clone(), jar))
            .with_sources(ResolvedArtifact::new(coordinate.sources(), sources))
    }

    /// A jar without any manifest
    pub fn plain(&self) -> ResolvedDependency {
        let coordinate = Coordinate::new("com.google.errorprone", "error_prone_annotations", "2.18.0");
        let jar = self.path("error_prone_annotations-2.18.0.jar");
        write_jar(
            &jar,
            None,
            &[("com/google/errorprone/annotations/Var.class", b"var")],
        );
        ResolvedDependency::root(ResolvedArtifact::new(coordinate, jar))
    }
}

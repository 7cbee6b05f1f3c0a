//! Jar archive access
//!
//! The bundling core only ever needs two archive operations: read the
//! manifest of a jar, and write a copy of a jar with its manifest replaced.
//! [`ArchiveAccess`] is that seam; [`JarArchive`] implements it on top of the
//! `zip` crate, copying every non-manifest entry raw so that entry bytes
//! (compressed data, CRCs, timestamps) are preserved exactly.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use super::types::Manifest;
use crate::constants::jar;
use crate::errors::{ManifestError, ManifestResult};

/// Archive operations used by the bundling core
pub trait ArchiveAccess: Send + Sync + std::fmt::Debug {
    /// Read the manifest of a jar; `Ok(None)` when the jar has none
    fn read_manifest(&self, path: &Path) -> ManifestResult<Option<Manifest>>;

    /// Write `destination` as a copy of `source` whose manifest is `manifest`
    fn copy_entries_replacing_manifest(
        &self,
        source: &Path,
        manifest: &Manifest,
        destination: &Path,
    ) -> ManifestResult<()>;
}

/// Zip-backed [`ArchiveAccess`]
#[derive(Debug, Default, Clone, Copy)]
pub struct JarArchive;

impl JarArchive {
    pub fn new() -> Self {
        Self
    }

    fn open(path: &Path) -> ManifestResult<ZipArchive<File>> {
        let file = File::open(path).map_err(|e| ManifestError::Archive {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        ZipArchive::new(file).map_err(|source| ManifestError::Archive {
            path: path.to_path_buf(),
            source,
        })
    }

    fn manifest_index(archive: &mut ZipArchive<File>, path: &Path) -> ManifestResult<Option<usize>> {
        for index in 0..archive.len() {
            let entry = archive
                .by_index_raw(index)
                .map_err(|source| ManifestError::Archive {
                    path: path.to_path_buf(),
                    source,
                })?;
            if is_manifest_entry(entry.name()) {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }
}

impl ArchiveAccess for JarArchive {
    fn read_manifest(&self, path: &Path) -> ManifestResult<Option<Manifest>> {
        let mut archive = Self::open(path)?;
        let Some(index) = Self::manifest_index(&mut archive, path)? else {
            debug!("No manifest in {}", path.display());
            return Ok(None);
        };

        let mut entry = archive
            .by_index(index)
            .map_err(|source| ManifestError::Archive {
                path: path.to_path_buf(),
                source,
            })?;
        let mut bytes = Vec::new();
        entry
            .read_to_end(&mut bytes)
            .map_err(|e| ManifestError::Archive {
                path: path.to_path_buf(),
                source: e.into(),
            })?;

        Manifest::parse_bytes(&bytes).map(Some)
    }

    fn copy_entries_replacing_manifest(
        &self,
        source: &Path,
        manifest: &Manifest,
        destination: &Path,
    ) -> ManifestResult<()> {
        let mut archive = Self::open(source)?;
        let write_error = |source| ManifestError::Write {
            path: destination.to_path_buf(),
            source,
        };
        let io_error = |source| ManifestError::Io {
            path: destination.to_path_buf(),
            source,
        };

        let output = File::create(destination).map_err(io_error)?;
        let mut writer = ZipWriter::new(BufWriter::new(output));

        // The manifest goes first so that streaming jar readers find it
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        writer
            .start_file(jar::MANIFEST_PATH, options)
            .map_err(write_error)?;
        writer.write_all(&manifest.to_bytes()).map_err(io_error)?;

        let mut copied = 0usize;
        for index in 0..archive.len() {
            let entry = archive
                .by_index_raw(index)
                .map_err(|e| ManifestError::Archive {
                    path: source.to_path_buf(),
                    source: e,
                })?;
            if is_manifest_entry(entry.name()) {
                continue;
            }
            writer.raw_copy_file(entry).map_err(write_error)?;
            copied += 1;
        }

        let mut inner = writer.finish().map_err(write_error)?;
        inner.flush().map_err(io_error)?;

        debug!(
            "Copied {} entries from {} to {} with replaced manifest",
            copied,
            source.display(),
            destination.display()
        );
        Ok(())
    }
}

fn is_manifest_entry(name: &str) -> bool {
    name.eq_ignore_ascii_case(jar::MANIFEST_PATH)
}

//! Cache file path generation
//!
//! Generated bundles are organized by Maven coordinate:
//! `{cache_root}/{group}/{artifact}/{version}[/{classifier}]/{file_name}`.

use std::path::{Path, PathBuf};

use crate::app::models::Coordinate;
use crate::constants::jar;

/// Path generation utility for cache files
pub struct PathGenerator;

impl PathGenerator {
    /// Directory holding every generated file for a coordinate
    pub fn artifact_dir(cache_root: &Path, coordinate: &Coordinate) -> PathBuf {
        let mut path = cache_root.to_path_buf();
        path.push(Self::segment(&coordinate.group_id));
        path.push(Self::segment(&coordinate.artifact_id));
        path.push(Self::segment(&coordinate.version));
        if let Some(classifier) = &coordinate.classifier {
            path.push(Self::segment(classifier));
        }
        path
    }

    /// Full path of a generated file for a coordinate
    pub fn target_path(cache_root: &Path, coordinate: &Coordinate, file_name: &str) -> PathBuf {
        Self::artifact_dir(cache_root, coordinate).join(Self::segment(file_name))
    }

    /// File name of a generated bundle: `<symbolicName>_<version>.jar`
    pub fn bundle_file_name(symbolic_name: &str, version: &str) -> String {
        format!("{}_{}.{}", symbolic_name, version, jar::JAR_EXTENSION)
    }

    /// Keep a single path component inside its parent directory
    pub(crate) fn segment(value: &str) -> String {
        let cleaned: String = value
            .chars()
            .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
            .collect();
        match cleaned.as_str() {
            "" | "." | ".." => "_".to_string(),
            _ => cleaned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_dir_layout() {
        let root = PathBuf::from("/cache");
        let coordinate = Coordinate::new("org.slf4j", "slf4j-api", "2.0.7");

        assert_eq!(
            PathGenerator::artifact_dir(&root, &coordinate),
            PathBuf::from("/cache/org.slf4j/slf4j-api/2.0.7")
        );
        assert_eq!(
            PathGenerator::artifact_dir(&root, &coordinate.sources()),
            PathBuf::from("/cache/org.slf4j/slf4j-api/2.0.7/sources")
        );
    }

    #[test]
    fn test_target_path() {
        let root = PathBuf::from("/cache");
        let coordinate = Coordinate::new("org.slf4j", "slf4j-api", "2.0.7");
        let file_name = PathGenerator::bundle_file_name("custom.slf4j.api", "2.0.7");

        assert_eq!(file_name, "custom.slf4j.api_2.0.7.jar");
        assert_eq!(
            PathGenerator::target_path(&root, &coordinate, &file_name),
            PathBuf::from("/cache/org.slf4j/slf4j-api/2.0.7/custom.slf4j.api_2.0.7.jar")
        );
    }

    #[test]
    fn test_segments_cannot_escape() {
        let root = PathBuf::from("/cache");
        let coordinate = Coordinate::new("..", "a/b", "1.0");
        let path = PathGenerator::target_path(&root, &coordinate, "x.jar");

        assert_eq!(path, PathBuf::from("/cache/_/a_b/1.0/x.jar"));
        assert!(path.starts_with(&root));
    }
}

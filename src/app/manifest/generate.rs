//! Manifest synthesis for artifacts that carry no bundle metadata
//!
//! Used by the `generate` missing-manifest mode: the identity of the wrapped
//! bundle is derived from the Maven coordinate alone.

use crate::app::models::Coordinate;
use crate::constants::{generate, headers};

use super::types::Manifest;

/// Build a minimal bundle manifest for a coordinate
///
/// The symbolic name is `wrapped.<groupId>.<artifactId>` and the version is the
/// Maven version cleaned up into OSGi form. Headers of `original` (a plain jar
/// manifest, if any) are kept.
pub fn synthesize_manifest(coordinate: &Coordinate, original: Option<&Manifest>) -> Manifest {
    let mut manifest = original.cloned().unwrap_or_default();

    manifest.set(
        headers::MANIFEST_VERSION,
        headers::MANIFEST_VERSION_VALUE,
    );
    manifest.set(
        headers::BUNDLE_MANIFEST_VERSION,
        headers::BUNDLE_MANIFEST_VERSION_VALUE,
    );
    manifest.set(
        headers::BUNDLE_SYMBOLIC_NAME,
        wrapped_symbolic_name(coordinate),
    );
    manifest.set(headers::BUNDLE_VERSION, osgi_version(&coordinate.version));
    manifest.set_if_absent(headers::BUNDLE_NAME, coordinate.artifact_id.clone());

    manifest
}

/// `wrapped.<groupId>.<artifactId>` with unsafe characters replaced
pub fn wrapped_symbolic_name(coordinate: &Coordinate) -> String {
    format!(
        "{}.{}.{}",
        generate::WRAPPED_PREFIX,
        sanitize(&coordinate.group_id),
        sanitize(&coordinate.artifact_id)
    )
}

fn sanitize(segment: &str) -> String {
    segment
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Convert a Maven version into `major.minor.micro[.qualifier]`
///
/// `1.2` becomes `1.2.0`, `1.0-SNAPSHOT` becomes `1.0.0.SNAPSHOT`. Qualifier
/// characters outside `[A-Za-z0-9_-]` are replaced by `_`.
pub fn osgi_version(maven_version: &str) -> String {
    let version = maven_version.trim();
    let numeric_end = version
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(version.len());

    let mut numbers: Vec<&str> = version[..numeric_end]
        .split('.')
        .filter(|part| !part.is_empty())
        .collect();

    let mut qualifier_parts: Vec<String> = Vec::new();
    if numbers.len() > 3 {
        qualifier_parts.extend(numbers.drain(3..).map(str::to_string));
    }

    let rest = version[numeric_end..].trim_start_matches(['-', '.', '_']);
    if !rest.is_empty() {
        qualifier_parts.push(rest.to_string());
    }

    if numbers.is_empty() {
        return if qualifier_parts.is_empty() {
            generate::FALLBACK_VERSION.to_string()
        } else {
            format!(
                "{}.{}",
                generate::FALLBACK_VERSION,
                clean_qualifier(&qualifier_parts.join("_"))
            )
        };
    }

    let mut parts: Vec<String> = numbers
        .iter()
        .map(|n| n.trim_start_matches('0'))
        .map(|n| if n.is_empty() { "0".to_string() } else { n.to_string() })
        .collect();
    while parts.len() < 3 {
        parts.push("0".to_string());
    }

    let mut result = parts.join(".");
    if !qualifier_parts.is_empty() {
        result.push('.');
        result.push_str(&clean_qualifier(&qualifier_parts.join("_")));
    }
    result
}

fn clean_qualifier(qualifier: &str) -> String {
    qualifier
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

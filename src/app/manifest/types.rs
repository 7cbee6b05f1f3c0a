//! Jar manifest model and MANIFEST.MF codec
//!
//! A manifest is a main section of `Name: value` headers followed by optional
//! named sections, separated by blank lines. Values longer than a line are
//! continued on lines starting with a single space. Header names compare
//! case-insensitively; main attributes keep their order.

use crate::constants::{headers, jar};
use crate::errors::{ManifestError, ManifestResult};

/// Headers of a single manifest section, in order
pub type Attributes = Vec<(String, String)>;

/// Parsed jar manifest
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Manifest {
    main: Attributes,
    sections: Vec<Attributes>,
}

impl Manifest {
    /// Create an empty manifest
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse manifest bytes, which must be UTF-8
    pub fn parse_bytes(bytes: &[u8]) -> ManifestResult<Self> {
        let text = std::str::from_utf8(bytes).map_err(|e| ManifestError::Malformed {
            line: 0,
            reason: format!("manifest is not valid UTF-8: {}", e),
        })?;
        Self::parse(text)
    }

    /// Parse manifest text
    pub fn parse(text: &str) -> ManifestResult<Self> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut manifest = Manifest::new();
        let mut current: Attributes = Vec::new();
        let mut in_main = true;

        for (index, line) in text.split('\n').enumerate() {
            let line_number = index + 1;
            let line = line.strip_suffix('\r').unwrap_or(line);

            if line.is_empty() {
                if !current.is_empty() {
                    manifest.finish_section(std::mem::take(&mut current), &mut in_main);
                }
                continue;
            }

            if let Some(continuation) = line.strip_prefix(' ') {
                let Some((_, value)) = current.last_mut() else {
                    return Err(ManifestError::Malformed {
                        line: line_number,
                        reason: "continuation line without a header".to_string(),
                    });
                };
                value.push_str(continuation);
                continue;
            }

            let Some((name, value)) = line.split_once(':') else {
                return Err(ManifestError::Malformed {
                    line: line_number,
                    reason: format!("expected 'Name: value', found '{}'", line),
                });
            };
            let name = name.trim();
            if name.is_empty() {
                return Err(ManifestError::Malformed {
                    line: line_number,
                    reason: "empty header name".to_string(),
                });
            }
            let value = value.strip_prefix(' ').unwrap_or(value);
            current.push((name.to_string(), value.to_string()));
        }

        if !current.is_empty() {
            manifest.finish_section(current, &mut in_main);
        }

        Ok(manifest)
    }

    fn finish_section(&mut self, attributes: Attributes, in_main: &mut bool) {
        if *in_main {
            self.main = attributes;
            *in_main = false;
        } else {
            self.sections.push(attributes);
        }
    }

    /// Serialize to MANIFEST.MF bytes
    ///
    /// `Manifest-Version` is always written first; lines are wrapped at 72 bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = String::new();

        let version = self
            .get(headers::MANIFEST_VERSION)
            .unwrap_or(headers::MANIFEST_VERSION_VALUE);
        write_header(&mut out, headers::MANIFEST_VERSION, version);
        for (name, value) in &self.main {
            if !name.eq_ignore_ascii_case(headers::MANIFEST_VERSION) {
                write_header(&mut out, name, value);
            }
        }
        out.push_str("\r\n");

        for section in &self.sections {
            for (name, value) in section {
                write_header(&mut out, name, value);
            }
            out.push_str("\r\n");
        }

        out.into_bytes()
    }

    /// Look up a main attribute
    pub fn get(&self, name: &str) -> Option<&str> {
        self.main
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Set a main attribute, replacing an existing one in place
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self
            .main
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(&name))
        {
            Some(entry) => entry.1 = value,
            None => self.main.push((name, value)),
        }
    }

    /// Set a main attribute only when it is not present yet
    pub fn set_if_absent(&mut self, name: &str, value: impl Into<String>) {
        if !self.contains(name) {
            self.set(name, value);
        }
    }

    /// Remove a main attribute, returning its value
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self
            .main
            .iter()
            .position(|(n, _)| n.eq_ignore_ascii_case(name))?;
        Some(self.main.remove(index).1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Main attributes in order
    pub fn main_attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.main.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Named sections in order
    pub fn sections(&self) -> &[Attributes] {
        &self.sections
    }

    /// Symbolic name without directives, if declared
    pub fn symbolic_name(&self) -> Option<&str> {
        self.get(headers::BUNDLE_SYMBOLIC_NAME)
            .map(leading_name)
            .filter(|name| !name.is_empty())
    }

    /// Declared bundle version, if any
    pub fn version(&self) -> Option<&str> {
        self.get(headers::BUNDLE_VERSION)
            .map(str::trim)
            .filter(|version| !version.is_empty())
    }

    /// A manifest describes a bundle once it declares a symbolic name
    pub fn is_bundle(&self) -> bool {
        self.symbolic_name().is_some()
    }
}

/// Name part of a header clause, before any `;` parameters
pub fn leading_name(value: &str) -> &str {
    value.split(';').next().unwrap_or(value).trim()
}

fn write_header(out: &mut String, name: &str, value: &str) {
    let line = format!("{}: {}", name, value);
    let mut rest = line.as_str();
    let mut limit = jar::MANIFEST_LINE_LIMIT;

    loop {
        if rest.len() <= limit {
            out.push_str(rest);
            out.push_str("\r\n");
            return;
        }
        let mut split = limit;
        while !rest.is_char_boundary(split) {
            split -= 1;
        }
        out.push_str(&rest[..split]);
        out.push_str("\r\n ");
        rest = &rest[split..];
        // Continuation lines spend one byte on the leading space
        limit = jar::MANIFEST_LINE_LIMIT - 1;
    }
}

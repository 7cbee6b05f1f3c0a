//! Rewrite instruction sets
//!
//! An instruction set is an ordered property map describing how a bundle's
//! manifest headers should be replaced or augmented. Locations carry them as
//! free-text blocks in bnd/properties syntax:
//!
//! ```text
//! # comment
//! Bundle-SymbolicName: custom.slf4j.api
//! Bundle-Version=2.0.7
//! Export-Package: org.slf4j,\
//!   org.slf4j.spi
//! ```

use crate::constants::headers;

/// Ordered key/value instructions
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RewriteInstructionSet {
    entries: Vec<(String, String)>,
}

impl RewriteInstructionSet {
    /// Create an empty instruction set
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an instruction block
    ///
    /// Lines are `Key: value` or `Key=value`; `#` and `!` start comments and a
    /// trailing backslash continues the value on the next line. Later keys
    /// overwrite earlier ones in place.
    pub fn parse(text: &str) -> Self {
        let mut set = Self::new();
        let mut pending = String::new();

        for raw in text.lines() {
            let line = raw.trim();
            if pending.is_empty() && (line.is_empty() || line.starts_with('#') || line.starts_with('!'))
            {
                continue;
            }

            if let Some(continued) = line.strip_suffix('\\') {
                pending.push_str(continued);
                continue;
            }

            pending.push_str(line);
            set.push_line(&pending);
            pending.clear();
        }

        if !pending.is_empty() {
            set.push_line(&pending);
        }

        set
    }

    fn push_line(&mut self, line: &str) {
        let Some(split) = line.find([':', '=']) else {
            // A bare key declares an empty value
            self.set(line.trim(), "");
            return;
        };

        let key = line[..split].trim();
        if key.is_empty() {
            return;
        }
        self.set(key, line[split + 1..].trim());
    }

    /// Set a value, keeping the position of an existing key
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Look up a value by exact key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The declared `Bundle-SymbolicName`, if any
    pub fn symbolic_name(&self) -> Option<&str> {
        self.get(headers::BUNDLE_SYMBOLIC_NAME)
            .filter(|value| !value.is_empty())
    }

    /// Iterate over entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RewriteInstructionSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (key, value) in iter {
            set.set(key, value);
        }
        set
    }
}

//! Rewrite instruction evaluation
//!
//! The core hands an instruction set and the original manifest to a
//! [`RewriteEvaluator`] and consumes the headers it returns. The default
//! [`HeaderRewriter`] works at header level: every instruction that is not a
//! bnd directive (a key starting with `-`) becomes a main attribute, with
//! `${Header}` references expanded.

use tracing::debug;

use crate::app::instructions::RewriteInstructionSet;
use crate::app::manifest::Manifest;

/// Turns instructions plus original headers into final headers
pub trait RewriteEvaluator: Send + Sync + std::fmt::Debug {
    fn apply(&self, instructions: &RewriteInstructionSet, original: &Manifest) -> Manifest;
}

/// Header-level instruction evaluator
#[derive(Debug, Default, Clone, Copy)]
pub struct HeaderRewriter;

/// Upper bound on nested `${...}` expansions of a single value
const MAX_EXPANSION_DEPTH: usize = 8;

impl HeaderRewriter {
    pub fn new() -> Self {
        Self
    }

    /// Expand `${Name}` references against the headers set so far
    ///
    /// Unknown references are left untouched.
    fn expand(value: &str, headers: &Manifest, depth: usize) -> String {
        if depth >= MAX_EXPANSION_DEPTH || !value.contains("${") {
            return value.to_string();
        }

        let mut out = String::with_capacity(value.len());
        let mut rest = value;
        while let Some(start) = rest.find("${") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let Some(end) = after.find('}') else {
                out.push_str(&rest[start..]);
                return out;
            };
            let name = &after[..end];
            match headers.get(name) {
                Some(replacement) => out.push_str(&Self::expand(replacement, headers, depth + 1)),
                None => {
                    out.push_str("${");
                    out.push_str(name);
                    out.push('}');
                }
            }
            rest = &after[end + 1..];
        }
        out.push_str(rest);
        out
    }
}

impl RewriteEvaluator for HeaderRewriter {
    fn apply(&self, instructions: &RewriteInstructionSet, original: &Manifest) -> Manifest {
        let mut result = original.clone();
        for (key, value) in instructions.iter() {
            if key.starts_with('-') {
                debug!("Skipping directive {}", key);
                continue;
            }
            let expanded = Self::expand(value, &result, 0);
            result.set(key, expanded);
        }
        result
    }
}

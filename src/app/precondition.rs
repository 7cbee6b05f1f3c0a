//! Override precondition checking
//!
//! Before a bundle's identity may be rewritten the location has to describe an
//! unambiguous override: nothing transitive, one root dependency, one
//! instruction set, and a symbolic name that actually changes. The checks run
//! in a fixed order and the first failure is reported.

use tracing::debug;

use crate::app::instructions::RewriteInstructionSet;
use crate::app::models::{DependencyDepth, DependencyRef, OverrideRequest};
use crate::errors::{OverrideError, OverrideResult};

/// Validate an override request
///
/// The declared symbolic name is compared verbatim, directives included.
pub fn check_override_preconditions(
    original_symbolic_name: Option<&str>,
    root_dependencies: &[DependencyRef],
    instruction_sets: &[RewriteInstructionSet],
    dependency_depth: DependencyDepth,
) -> OverrideResult<()> {
    if dependency_depth != DependencyDepth::None {
        return Err(OverrideError::DependencyDepthNotNone);
    }

    let Some(original) = original_symbolic_name else {
        return Err(OverrideError::NotABundle);
    };

    if root_dependencies.len() != 1 {
        return Err(OverrideError::RootDependencyCount {
            found: root_dependencies.len(),
        });
    }

    let [instructions] = instruction_sets else {
        return Err(OverrideError::InstructionCount {
            found: instruction_sets.len(),
        });
    };

    match instructions.symbolic_name() {
        Some(declared) if declared != original => {
            debug!("Override accepted: {} -> {}", original, declared);
            Ok(())
        }
        _ => Err(OverrideError::SymbolicNameNotChanged),
    }
}

impl OverrideRequest {
    /// Run [`check_override_preconditions`] on this request
    pub fn check(&self) -> OverrideResult<()> {
        check_override_preconditions(
            self.original_symbolic_name.as_deref(),
            &self.root_dependencies,
            &self.instruction_sets,
            self.dependency_depth,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::Coordinate;

    fn root() -> DependencyRef {
        DependencyRef::root(Coordinate::new("org.slf4j", "slf4j-api", "2.0.7"))
    }

    fn instructions(text: &str) -> RewriteInstructionSet {
        RewriteInstructionSet::parse(text)
    }

    fn request(
        original: Option<&str>,
        roots: usize,
        sets: Vec<RewriteInstructionSet>,
        depth: DependencyDepth,
    ) -> OverrideRequest {
        OverrideRequest {
            original_symbolic_name: original.map(str::to_string),
            root_dependencies: (0..roots).map(|_| root()).collect(),
            instruction_sets: sets,
            dependency_depth: depth,
        }
    }

    #[test]
    fn test_valid_override_passes() {
        let request = request(
            Some("slf4j.api"),
            1,
            vec![instructions("Bundle-SymbolicName: custom.slf4j.api")],
            DependencyDepth::None,
        );
        assert_eq!(request.check(), Ok(()));
    }

    #[test]
    fn test_depth_checked_first() {
        // Every other precondition is violated too
        let all_violated = request(None, 0, vec![], DependencyDepth::Direct);
        let err = all_violated.check().unwrap_err();
        assert_eq!(err.to_string(), "The dependency depth must be none!");

        let infinite = request(Some("a"), 1, vec![], DependencyDepth::Infinite);
        assert_eq!(infinite.check(), Err(OverrideError::DependencyDepthNotNone));
    }

    #[test]
    fn test_missing_original_name() {
        let request = request(None, 2, vec![], DependencyDepth::None);
        let err = request.check().unwrap_err();
        assert_eq!(err.to_string(), "The artifact is no bundle.");
    }

    #[test]
    fn test_root_dependency_count() {
        for roots in [0, 2] {
            let request = request(
                Some("slf4j.api"),
                roots,
                vec![instructions("Bundle-SymbolicName: custom")],
                DependencyDepth::None,
            );
            let err = request.check().unwrap_err();
            assert_eq!(err, OverrideError::RootDependencyCount { found: roots });
            assert_eq!(
                err.to_string(),
                "The location must contain exactly one root dependency."
            );
        }
    }

    #[test]
    fn test_root_dependency_count_uses_every_entry() {
        let transitive = DependencyRef {
            coordinate: Coordinate::new("org.example", "transitive", "1.0"),
            root: false,
        };
        let sets = [instructions("Bundle-SymbolicName: custom")];

        let two_entries = check_override_preconditions(
            Some("slf4j.api"),
            &[root(), transitive.clone()],
            &sets,
            DependencyDepth::None,
        );
        assert_eq!(
            two_entries,
            Err(OverrideError::RootDependencyCount { found: 2 })
        );

        let single_entry = check_override_preconditions(
            Some("slf4j.api"),
            &[transitive],
            &sets,
            DependencyDepth::None,
        );
        assert_eq!(single_entry, Ok(()));
    }

    #[test]
    fn test_instruction_set_count() {
        for sets in [
            vec![],
            vec![
                instructions("Bundle-SymbolicName: a"),
                instructions("Bundle-SymbolicName: b"),
            ],
        ] {
            let err = request(Some("slf4j.api"), 1, sets, DependencyDepth::None)
                .check()
                .unwrap_err();
            assert_eq!(
                err.to_string(),
                "The location must contain exactly one bnd instruction which must contain a symbolic name that differs from the original one."
            );
        }
    }

    #[test]
    fn test_symbolic_name_must_change() {
        let expected =
            "The symbolic name in the bnd instructions must be defined and differ from the original one.";

        let unchanged = request(
            Some("slf4j.api"),
            1,
            vec![instructions("Bundle-SymbolicName: slf4j.api")],
            DependencyDepth::None,
        );
        assert_eq!(unchanged.check().unwrap_err().to_string(), expected);

        let undefined = request(
            Some("slf4j.api"),
            1,
            vec![instructions("Bundle-Version: 1.0.0")],
            DependencyDepth::None,
        );
        assert_eq!(undefined.check().unwrap_err().to_string(), expected);

        let with_directive = request(
            Some("slf4j.api"),
            1,
            vec![instructions("Bundle-SymbolicName: slf4j.api;singleton:=true")],
            DependencyDepth::None,
        );
        // Directives make the declared value differ from the original
        assert_eq!(with_directive.check(), Ok(()));
    }
}

//! Project references: the candidates for removal.

use std::path::PathBuf;

use crate::metadata::identity::AssemblyIdentity;

/// A declared project reference under consideration for removal.
///
/// Created once per analysis run from the project's declared reference list. The
/// narrowing protocol removes a candidate from its working set the moment any
/// algorithm proves it live; whatever remains when the protocol finishes is the
/// final unused set. Candidates are never added back.
///
/// Carries enough identity (name, resolvable assembly identity, on-disk location)
/// for the out-of-scope removal collaborator to match and delete the reference
/// independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectReference {
    /// Reference name as declared in the project file.
    pub name: String,

    /// Resolvable identity of the referenced assembly.
    pub identity: AssemblyIdentity,

    /// On-disk location of the referenced assembly.
    pub location: PathBuf,
}

impl ProjectReference {
    /// Create a candidate reference.
    pub fn new(
        name: impl Into<String>,
        identity: AssemblyIdentity,
        location: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            identity,
            location: location.into(),
        }
    }

    /// Whether a required assembly identity proves this candidate live.
    ///
    /// Exact identity equality always matches; beyond that, a required identity that
    /// [`satisfies`](AssemblyIdentity::satisfies) the declared one (conventional
    /// case-insensitive name, compatible version) also matches, since project files
    /// routinely declare looser identities than the compiled manifest carries.
    #[must_use]
    pub fn matches(&self, required: &AssemblyIdentity) -> bool {
        self.identity == *required || required.satisfies(&self.identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::identity::AssemblyVersion;

    #[test]
    fn test_matches_exact_identity() {
        let identity = AssemblyIdentity::new("Lib", AssemblyVersion::new(1, 0, 0, 0), None, None);
        let candidate = ProjectReference::new("Lib", identity.clone(), "libs/Lib.dll");

        assert!(candidate.matches(&identity));
    }

    #[test]
    fn test_matches_compatible_version() {
        let declared = AssemblyIdentity::new("Lib", AssemblyVersion::new(4, 0, 0, 0), None, None);
        let candidate = ProjectReference::new("Lib", declared, "libs/Lib.dll");

        let newer = AssemblyIdentity::new("lib", AssemblyVersion::new(4, 5, 0, 0), None, None);
        let other_major = AssemblyIdentity::new("Lib", AssemblyVersion::new(5, 0, 0, 0), None, None);

        assert!(candidate.matches(&newer));
        assert!(!candidate.matches(&other_major));
    }
}

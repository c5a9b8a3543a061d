//! The metadata reader contract.
//!
//! The engine never parses binaries; it asks a [`MetadataReader`] for fully-resolved
//! entities and treats it as a synchronous, deterministic dependency. A parser-backed
//! host implements the trait over its own loading machinery; [`MemoryReader`] is the
//! in-process implementation used by hosts that already hold entities and by every
//! test in this crate.
//!
//! # Contract
//!
//! - Resolution is deterministic: asking twice for the same identity yields
//!   equivalent entities, which is what makes cache eviction and reconstruction in
//!   [`crate::project`] a pure resource-hygiene concern.
//! - A missing assembly is [`crate::Error::AssemblyNotFound`]; an unreadable or
//!   non-CLR input is [`crate::Error::NotSupported`]. The distinction matters to
//!   callers: the latter means "not analyzable", never "nothing unused".
//! - No retry: a failed resolution will fail identically on the next call.

use std::collections::HashMap;

use crate::{
    metadata::{
        entity::{AssemblyRc, TypeDefinitionRc},
        identity::{AssemblyIdentity, TypeId},
    },
    Error, Result,
};

/// Collaborator supplying resolved metadata for any assembly identity.
pub trait MetadataReader {
    /// Resolve an assembly by identity.
    ///
    /// # Errors
    /// [`Error::AssemblyNotFound`] when no metadata exists for the identity;
    /// [`Error::NotSupported`] when the on-disk input is not a readable CLR assembly.
    fn assembly(&self, identity: &AssemblyIdentity) -> Result<AssemblyRc>;

    /// Resolve a type definition by identity.
    ///
    /// The default implementation resolves the owning assembly and searches its
    /// defined types by name, which is sufficient for any reader whose assemblies
    /// carry their full type lists.
    ///
    /// # Errors
    /// [`Error::TypeResolution`] when the owning assembly does not define the type;
    /// any error from [`assembly`](Self::assembly) otherwise.
    fn type_definition(&self, id: &TypeId) -> Result<TypeDefinitionRc> {
        let assembly = self.assembly(&id.assembly)?;
        assembly
            .type_definition(&id.name)
            .cloned()
            .ok_or_else(|| Error::TypeResolution {
                type_name: id.qualified_name(),
                context: "metadata lookup",
            })
    }
}

/// In-memory [`MetadataReader`] over a map of assemblies.
///
/// # Examples
///
/// ```rust
/// use refscope::metadata::entity::AssemblyBuilder;
/// use refscope::metadata::identity::AssemblyVersion;
/// use refscope::metadata::reader::{MemoryReader, MetadataReader};
///
/// let assembly = AssemblyBuilder::new("Lib", AssemblyVersion::new(1, 0, 0, 0)).build()?;
/// let identity = assembly.identity.clone();
///
/// let mut reader = MemoryReader::new();
/// reader.insert(assembly);
///
/// assert!(reader.assembly(&identity).is_ok());
/// # Ok::<(), refscope::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct MemoryReader {
    assemblies: HashMap<AssemblyIdentity, AssemblyRc>,
}

impl MemoryReader {
    /// Create an empty reader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an assembly under its own identity, replacing any previous entry.
    pub fn insert(&mut self, assembly: AssemblyRc) -> &mut Self {
        self.assemblies.insert(assembly.identity.clone(), assembly);
        self
    }

    /// Number of registered assemblies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assemblies.len()
    }

    /// Whether no assemblies are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assemblies.is_empty()
    }
}

impl MetadataReader for MemoryReader {
    fn assembly(&self, identity: &AssemblyIdentity) -> Result<AssemblyRc> {
        self.assemblies
            .get(identity)
            .cloned()
            .ok_or_else(|| Error::AssemblyNotFound(identity.display_name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{
        entity::{AssemblyBuilder, TypeDefinitionBuilder},
        identity::AssemblyVersion,
    };

    fn asm(name: &str) -> AssemblyIdentity {
        AssemblyIdentity::new(name, AssemblyVersion::new(1, 0, 0, 0), None, None)
    }

    #[test]
    fn test_missing_assembly_is_not_found() {
        let reader = MemoryReader::new();
        let err = reader.assembly(&asm("Ghost")).unwrap_err();
        assert!(matches!(err, Error::AssemblyNotFound(_)));
    }

    #[test]
    fn test_default_type_resolution_goes_through_assembly() {
        let mut reader = MemoryReader::new();
        reader.insert(
            AssemblyBuilder::new("Lib", AssemblyVersion::new(1, 0, 0, 0))
                .define_type(
                    TypeDefinitionBuilder::new("N.Widget", asm("Lib"))
                        .build()
                        .unwrap(),
                )
                .build()
                .unwrap(),
        );

        let found = reader.type_definition(&TypeId::new("N.Widget", asm("Lib")));
        assert!(found.is_ok());

        let missing = reader.type_definition(&TypeId::new("N.Ghost", asm("Lib")));
        assert!(matches!(missing, Err(Error::TypeResolution { .. })));
    }
}

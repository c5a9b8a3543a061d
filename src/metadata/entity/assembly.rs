//! Assembly entities and exported-type forwarders.

use std::sync::Arc;

use uguid::Guid;

use crate::metadata::{
    entity::{CustomAttribute, TypeDefinitionRc},
    identity::AssemblyIdentity,
};

/// Reference-counted [`Assembly`].
pub type AssemblyRc = Arc<Assembly>;

/// One compiled assembly as seen by the analysis engine.
///
/// Immutable once read: identity, the set of assemblies its manifest references, the
/// types it defines, the types its manifest exports through forwarders, and its
/// assembly-level custom attributes. Constructed through
/// [`AssemblyBuilder`](crate::metadata::entity::AssemblyBuilder) or inside a
/// [`MetadataReader`](crate::metadata::reader::MetadataReader) implementation.
///
/// # Thread Safety
///
/// The entity is immutable and all contained data is owned or [`Arc`]-shared, so
/// [`Assembly`] is [`Send`] and [`Sync`] and safe to hand to concurrently running
/// analyses of independent units.
#[derive(Debug, Clone)]
pub struct Assembly {
    /// Identity of this assembly.
    pub identity: AssemblyIdentity,

    /// Assemblies this assembly's manifest directly declares as referenced.
    pub referenced_assemblies: Vec<AssemblyIdentity>,

    /// Types defined by this assembly.
    pub types: Vec<TypeDefinitionRc>,

    /// Forwarder entries: types this assembly's manifest exports while their
    /// definitions live elsewhere.
    pub exported_types: Vec<ExportedType>,

    /// Assembly-level custom attributes.
    pub custom_attributes: Vec<CustomAttribute>,

    /// Type-library scope GUID, when the assembly declares one.
    ///
    /// Consulted by imported-type resolution to match explicit type-identifier
    /// markers against candidate origin assemblies.
    pub scope_guid: Option<Guid>,
}

impl Assembly {
    /// Look up a defined type by its namespace-qualified name.
    #[must_use]
    pub fn type_definition(&self, name: &str) -> Option<&TypeDefinitionRc> {
        self.types.iter().find(|ty| ty.id.name == name)
    }

    /// Whether this assembly's manifest references `other`.
    #[must_use]
    pub fn references(&self, other: &AssemblyIdentity) -> bool {
        self.referenced_assemblies.iter().any(|id| id == other)
    }
}

/// A type-forwarder entry in an assembly manifest.
///
/// The owning assembly still declares `name` in its manifest, but the definition now
/// lives in `target`. A forwarder on a type the analyzed unit uses keeps the owning
/// assembly live even though no code edge points at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedType {
    /// Namespace-qualified name of the forwarded type.
    pub name: String,

    /// Assembly the definition was relocated to.
    pub target: AssemblyIdentity,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{
        entity::AssemblyBuilder,
        identity::{AssemblyVersion, TypeId},
    };

    #[test]
    fn test_type_lookup_by_name() {
        let assembly = AssemblyBuilder::new("Lib", AssemblyVersion::new(1, 0, 0, 0))
            .define_type(
                crate::metadata::entity::TypeDefinitionBuilder::new(
                    "N.Widget",
                    AssemblyIdentity::new("Lib", AssemblyVersion::new(1, 0, 0, 0), None, None),
                )
                .build()
                .unwrap(),
            )
            .build()
            .unwrap();

        assert!(assembly.type_definition("N.Widget").is_some());
        assert!(assembly.type_definition("N.Missing").is_none());

        let id = &assembly.type_definition("N.Widget").unwrap().id;
        assert_eq!(id, &TypeId::new("N.Widget", assembly.identity.clone()));
    }

    #[test]
    fn test_manifest_reference_query() {
        let assembly = AssemblyBuilder::new("App", AssemblyVersion::new(1, 0, 0, 0))
            .references(["Lib, Version=2.0.0.0"])
            .unwrap()
            .build()
            .unwrap();

        let lib = AssemblyIdentity::parse("Lib, Version=2.0.0.0").unwrap();
        let other = AssemblyIdentity::parse("Other, Version=1.0.0.0").unwrap();

        assert!(assembly.references(&lib));
        assert!(!assembly.references(&other));
    }
}

//! Fluent builders for materializing the entity model.
//!
//! Binary parsing is out of scope for this crate, so the builders are the supported
//! way to construct entities: a parser-backed host maps its own metadata tables onto
//! them inside its reader implementation, and every test builds fixtures with them.
//! Validation happens in `build()` - malformed input (empty names) is rejected
//! before any entity exists, never half-constructed.
//!
//! # Examples
//!
//! ```rust
//! use refscope::metadata::entity::{AssemblyBuilder, TypeDefinitionBuilder};
//! use refscope::metadata::identity::{AssemblyIdentity, AssemblyVersion};
//!
//! let lib = AssemblyIdentity::new("Lib", AssemblyVersion::new(1, 0, 0, 0), None, None);
//!
//! let assembly = AssemblyBuilder::new("Lib", AssemblyVersion::new(1, 0, 0, 0))
//!     .define_type(
//!         TypeDefinitionBuilder::new("N.Widget", lib.clone())
//!             .public()
//!             .build()?,
//!     )
//!     .build()?;
//!
//! assert_eq!(assembly.identity, lib);
//! # Ok::<(), refscope::Error>(())
//! ```

use std::sync::Arc;

use uguid::Guid;

use crate::{
    metadata::{
        entity::{
            Assembly, AssemblyRc, CustomAttribute, ExportedType, Member, TypeDefinition, TypeFlags,
        },
        identity::{AssemblyIdentity, AssemblyVersion, ImportMarker, TypeId, TypeOrigin},
    },
    Result,
};

/// Builder for [`Assembly`] entities.
#[derive(Debug, Clone)]
pub struct AssemblyBuilder {
    identity: AssemblyIdentity,
    referenced_assemblies: Vec<AssemblyIdentity>,
    types: Vec<TypeDefinition>,
    exported_types: Vec<ExportedType>,
    custom_attributes: Vec<CustomAttribute>,
    scope_guid: Option<Guid>,
}

impl AssemblyBuilder {
    /// Start building a culture-neutral, unsigned assembly.
    pub fn new(name: impl Into<String>, version: AssemblyVersion) -> Self {
        Self::from_identity(AssemblyIdentity::new(name, version, None, None))
    }

    /// Start building from a complete identity.
    #[must_use]
    pub fn from_identity(identity: AssemblyIdentity) -> Self {
        Self {
            identity,
            referenced_assemblies: Vec::new(),
            types: Vec::new(),
            exported_types: Vec::new(),
            custom_attributes: Vec::new(),
            scope_guid: None,
        }
    }

    /// Declare manifest references by display name.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if any display name fails to parse.
    pub fn references<'a>(mut self, display_names: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        for display_name in display_names {
            self.referenced_assemblies
                .push(AssemblyIdentity::parse(display_name)?);
        }
        Ok(self)
    }

    /// Declare one manifest reference by identity.
    #[must_use]
    pub fn reference(mut self, identity: AssemblyIdentity) -> Self {
        self.referenced_assemblies.push(identity);
        self
    }

    /// Add a type definition to the assembly.
    #[must_use]
    pub fn define_type(mut self, definition: TypeDefinition) -> Self {
        self.types.push(definition);
        self
    }

    /// Add a type-forwarder entry to the manifest.
    pub fn export(mut self, name: impl Into<String>, target: AssemblyIdentity) -> Self {
        self.exported_types.push(ExportedType {
            name: name.into(),
            target,
        });
        self
    }

    /// Add an assembly-level custom attribute.
    #[must_use]
    pub fn attribute(mut self, attribute: CustomAttribute) -> Self {
        self.custom_attributes.push(attribute);
        self
    }

    /// Set the type-library scope GUID.
    #[must_use]
    pub fn scope_guid(mut self, guid: Guid) -> Self {
        self.scope_guid = Some(guid);
        self
    }

    /// Finalize the assembly.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the assembly name is empty.
    pub fn build(self) -> Result<AssemblyRc> {
        if self.identity.name.trim().is_empty() {
            return Err(malformed_error!("Assembly name cannot be empty"));
        }

        Ok(Arc::new(Assembly {
            identity: self.identity,
            referenced_assemblies: self.referenced_assemblies,
            types: self.types.into_iter().map(Arc::new).collect(),
            exported_types: self.exported_types,
            custom_attributes: self.custom_attributes,
            scope_guid: self.scope_guid,
        }))
    }
}

/// Builder for [`TypeDefinition`] entities.
///
/// Keeps the [`TypeId`] forwarding component and the [`TypeOrigin`] variant in sync:
/// callers state provenance once and both views agree.
#[derive(Debug, Clone)]
pub struct TypeDefinitionBuilder {
    name: String,
    assembly: AssemblyIdentity,
    origin: TypeOrigin,
    flags: TypeFlags,
    guid: Option<Guid>,
    base_type: Option<TypeId>,
    interfaces: Vec<TypeId>,
    members: Vec<Member>,
    custom_attributes: Vec<CustomAttribute>,
}

impl TypeDefinitionBuilder {
    /// Start building a directly-defined, non-public class type.
    pub fn new(name: impl Into<String>, assembly: AssemblyIdentity) -> Self {
        Self {
            name: name.into(),
            assembly,
            origin: TypeOrigin::Direct,
            flags: TypeFlags::empty(),
            guid: None,
            base_type: None,
            interfaces: Vec::new(),
            members: Vec::new(),
            custom_attributes: Vec::new(),
        }
    }

    /// Mark the type as an interface.
    #[must_use]
    pub fn interface(mut self) -> Self {
        self.flags |= TypeFlags::INTERFACE;
        self
    }

    /// Mark the type as visible outside its assembly.
    #[must_use]
    pub fn public(mut self) -> Self {
        self.flags |= TypeFlags::PUBLIC;
        self
    }

    /// Record that the type was reached through a forwarder owned by `from`.
    #[must_use]
    pub fn forwarded_from(mut self, from: AssemblyIdentity) -> Self {
        self.origin = TypeOrigin::Forwarded { from };
        self
    }

    /// Record that the type is an embedded type-equivalent copy.
    ///
    /// Also sets the is-import flag, which the embedded copy always carries.
    #[must_use]
    pub fn imported(mut self, marker: ImportMarker) -> Self {
        self.origin = TypeOrigin::Imported(marker);
        self.flags |= TypeFlags::IMPORT;
        self
    }

    /// Set the attribute-encoded GUID.
    #[must_use]
    pub fn guid(mut self, guid: Guid) -> Self {
        self.guid = Some(guid);
        self
    }

    /// Set the base type.
    #[must_use]
    pub fn base_type(mut self, base: TypeId) -> Self {
        self.base_type = Some(base);
        self
    }

    /// Add a directly implemented interface.
    #[must_use]
    pub fn implements(mut self, interface: TypeId) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Add a member.
    #[must_use]
    pub fn member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    /// Add a custom attribute.
    #[must_use]
    pub fn attribute(mut self, attribute: CustomAttribute) -> Self {
        self.custom_attributes.push(attribute);
        self
    }

    /// Finalize the type definition.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the type name is empty.
    pub fn build(self) -> Result<TypeDefinition> {
        if self.name.trim().is_empty() {
            return Err(malformed_error!("Type name cannot be empty"));
        }

        let id = match &self.origin {
            TypeOrigin::Forwarded { from } => {
                TypeId::forwarded(self.name, self.assembly, from.clone())
            }
            _ => TypeId::new(self.name, self.assembly),
        };

        Ok(TypeDefinition {
            id,
            origin: self.origin,
            flags: self.flags,
            guid: self.guid,
            base_type: self.base_type,
            interfaces: self.interfaces,
            members: self.members,
            custom_attributes: self.custom_attributes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uguid::guid;

    fn asm(name: &str) -> AssemblyIdentity {
        AssemblyIdentity::new(name, AssemblyVersion::new(1, 0, 0, 0), None, None)
    }

    #[test]
    fn test_empty_names_rejected() {
        assert!(AssemblyBuilder::new("", AssemblyVersion::new(1, 0, 0, 0))
            .build()
            .is_err());
        assert!(TypeDefinitionBuilder::new("  ", asm("Lib")).build().is_err());
    }

    #[test]
    fn test_forwarding_kept_consistent_between_id_and_origin() {
        let ty = TypeDefinitionBuilder::new("N.T", asm("B"))
            .forwarded_from(asm("A"))
            .build()
            .unwrap();

        assert_eq!(ty.id.forwarded_from, Some(asm("A")));
        assert_eq!(ty.origin.forwarded_from(), Some(&asm("A")));
    }

    #[test]
    fn test_imported_sets_import_flag() {
        let marker = ImportMarker::with_guid(guid!("01234567-89ab-cdef-0123-456789abcdef"));
        let ty = TypeDefinitionBuilder::new("Interop.IWidget", asm("App"))
            .interface()
            .imported(marker)
            .build()
            .unwrap();

        assert!(ty.is_import());
        assert!(ty.is_interface());
        assert!(ty.origin.is_imported());
    }

    #[test]
    fn test_reference_parsing_failure_propagates() {
        let result = AssemblyBuilder::new("App", AssemblyVersion::new(1, 0, 0, 0))
            .references(["Lib, Version=not.a.version"]);
        assert!(result.is_err());
    }
}

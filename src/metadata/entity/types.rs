//! Type definitions and type references.

use std::sync::Arc;

use bitflags::bitflags;
use uguid::Guid;

use crate::metadata::{
    entity::{CustomAttribute, Member},
    identity::{AssemblyIdentity, TypeId, TypeOrigin},
};

/// Reference-counted [`TypeDefinition`].
pub type TypeDefinitionRc = Arc<TypeDefinition>;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// Structural flags of a type definition
    pub struct TypeFlags: u32 {
        /// The type is an interface
        const INTERFACE = 0x0001;
        /// The type carries the is-import (interop) marking
        const IMPORT = 0x0002;
        /// The type is visible outside its assembly
        const PUBLIC = 0x0004;
    }
}

/// One type defined by an assembly.
///
/// Immutable view over a type's structure: identity, provenance, inheritance edges,
/// members, and attributes. The base type and the interfaces are stored as
/// [`TypeId`]s and resolved on demand through the metadata reader, which is where
/// resolution failures surface as typed errors instead of panics.
///
/// # Interfaces
///
/// `interfaces` lists the *directly* implemented interfaces. The interface closure
/// (interfaces of interfaces, and interfaces contributed by uncached base ancestors)
/// is computed by the type-interfaces strategy at traversal time, bounded by the
/// used-type cache.
#[derive(Debug, Clone)]
pub struct TypeDefinition {
    /// Value identity of this type (name + assembly + forwarded-from).
    pub id: TypeId,

    /// Provenance of the definition: direct, forwarded, or imported/embedded.
    ///
    /// Kept consistent with `id.forwarded_from` by the builder.
    pub origin: TypeOrigin,

    /// Structural flags (interface, import marking, visibility).
    pub flags: TypeFlags,

    /// Attribute-encoded GUID of the type, when it declares one.
    ///
    /// Used by imported-type resolution: an embedded copy's marker GUID is matched
    /// against the GUID declared by candidate origin types.
    pub guid: Option<Guid>,

    /// Identity of the base type, absent for interfaces and hierarchy roots.
    pub base_type: Option<TypeId>,

    /// Identities of the directly implemented interfaces.
    pub interfaces: Vec<TypeId>,

    /// Members declared by this type.
    pub members: Vec<Member>,

    /// Custom attributes applied to this type.
    pub custom_attributes: Vec<CustomAttribute>,
}

impl TypeDefinition {
    /// Whether this type is an interface.
    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.flags.contains(TypeFlags::INTERFACE)
    }

    /// Whether this type carries the is-import (interop) marking.
    #[must_use]
    pub fn is_import(&self) -> bool {
        self.flags.contains(TypeFlags::IMPORT)
    }

    /// Whether this type is visible outside its assembly.
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.flags.contains(TypeFlags::PUBLIC)
    }

    /// The assemblies this type makes live by existing: its defining assembly and,
    /// when reached through a forwarder, the forwarding origin.
    ///
    /// Both are live because the forwarding assembly still owns a manifest entry for
    /// the stub.
    #[must_use]
    pub fn declaring_assemblies(&self) -> Vec<AssemblyIdentity> {
        let mut assemblies = Vec::with_capacity(2);
        assemblies.push(self.id.assembly.clone());
        if let Some(from) = self.id.forwarded_from.clone() {
            assemblies.push(from);
        }
        assemblies
    }

    /// All type references mentioned by this type's member signatures, member-level
    /// attributes, and type-level attributes (assembly-level attributes live on
    /// [`super::Assembly`]).
    pub fn referenced_types(&self) -> impl Iterator<Item = &TypeReference> {
        self.members
            .iter()
            .flat_map(Member::referenced_types)
            .chain(
                self.custom_attributes
                    .iter()
                    .flat_map(CustomAttribute::referenced_types),
            )
    }
}

/// A mention of a type inside a signature or attribute argument.
///
/// A reference either names a closed type (possibly a generic instantiation carrying
/// further references recursively) or an open generic parameter, which contributes
/// nothing to liveness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeReference {
    /// Reference to a type definition, possibly instantiated with generic arguments.
    Definition {
        /// Identity of the referenced definition.
        id: TypeId,
        /// Generic arguments of the instantiation, empty for non-generic mentions.
        generic_arguments: Vec<TypeReference>,
    },

    /// An open generic parameter (`T` in `List<T>` as declared). Skipped entirely by
    /// the referenced-types walk.
    GenericParameter,
}

impl TypeReference {
    /// Reference to a non-generic type.
    #[must_use]
    pub fn definition(id: TypeId) -> Self {
        TypeReference::Definition {
            id,
            generic_arguments: Vec::new(),
        }
    }

    /// Reference to a generic instantiation.
    #[must_use]
    pub fn generic(id: TypeId, generic_arguments: Vec<TypeReference>) -> Self {
        TypeReference::Definition {
            id,
            generic_arguments,
        }
    }

    /// Collect every closed [`TypeId`] this reference mentions, recursing through
    /// generic arguments and skipping open generic parameters.
    pub fn collect_ids<'a>(&'a self, out: &mut Vec<&'a TypeId>) {
        match self {
            TypeReference::Definition {
                id,
                generic_arguments,
            } => {
                out.push(id);
                for argument in generic_arguments {
                    argument.collect_ids(out);
                }
            }
            TypeReference::GenericParameter => {}
        }
    }
}

//! Type identity and provenance.
//!
//! A [`TypeId`] names a type definition by the triple (full name, defining assembly,
//! forwarded-from origin). All three components participate in equality and hashing:
//! the same nominal type forwarded from two different origin assemblies is two
//! distinct keys on purpose, because each origin assembly is independently live when
//! the type is reached via that path.
//!
//! [`TypeOrigin`] is the tagged provenance of a type definition. Consumers match on
//! the variant - `Direct`, `Forwarded`, or `Imported` - instead of probing nullable
//! back-reference fields, so the non-default cases cannot be silently ignored.

use std::fmt;

use uguid::Guid;

use crate::metadata::identity::AssemblyIdentity;

/// Value identity of a type definition.
///
/// Used as the key of the used-type cache and for every cross-assembly type lookup.
/// Equality requires all three components to match; hashing is consistent with
/// equality. Pure value object - no identity map, no reference semantics.
///
/// # Examples
///
/// ```rust
/// use refscope::metadata::identity::{AssemblyIdentity, AssemblyVersion, TypeId};
///
/// let asm_b = AssemblyIdentity::new("B", AssemblyVersion::new(1, 0, 0, 0), None, None);
/// let asm_a = AssemblyIdentity::new("A", AssemblyVersion::new(1, 0, 0, 0), None, None);
///
/// let direct = TypeId::new("Contoso.Widget", asm_b.clone());
/// let forwarded = TypeId::forwarded("Contoso.Widget", asm_b, asm_a);
///
/// // Same nominal type, different forwarding origin: intentionally distinct
/// assert_ne!(direct, forwarded);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeId {
    /// Namespace-qualified type name (e.g., "System.Collections.Generic.List`1").
    pub name: String,

    /// Identity of the assembly defining the type.
    pub assembly: AssemblyIdentity,

    /// Identity of the assembly whose manifest declared the type before it was
    /// relocated, when the type is reached through a forwarder.
    ///
    /// Part of the identity triple: a forwarded `TypeId` never collapses with the
    /// direct one, so both the origin and the destination assembly stay
    /// independently visible to the liveness computation.
    pub forwarded_from: Option<AssemblyIdentity>,
}

impl TypeId {
    /// Create the identity of a type defined directly in `assembly`.
    pub fn new(name: impl Into<String>, assembly: AssemblyIdentity) -> Self {
        Self {
            name: name.into(),
            assembly,
            forwarded_from: None,
        }
    }

    /// Create the identity of a type reached through a forwarder.
    ///
    /// `assembly` is where the definition really lives; `forwarded_from` is the
    /// assembly whose manifest still carries the forwarding stub.
    pub fn forwarded(
        name: impl Into<String>,
        assembly: AssemblyIdentity,
        forwarded_from: AssemblyIdentity,
    ) -> Self {
        Self {
            name: name.into(),
            assembly,
            forwarded_from: Some(forwarded_from),
        }
    }

    /// Qualified identity string used in diagnostics and error messages.
    ///
    /// Format: `FullName, AssemblyName` with a ` (forwarded from Origin)` suffix when
    /// a forwarding origin is present.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match &self.forwarded_from {
            Some(origin) => format!(
                "{}, {} (forwarded from {})",
                self.name, self.assembly.name, origin.name
            ),
            None => format!("{}, {}", self.name, self.assembly.name),
        }
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qualified_name())
    }
}

/// Provenance of a type definition within its assembly.
///
/// Replaces the pair of nullable "forwarded-from" / "imported-from" back-references
/// with one tagged variant, so every consumer explicitly handles the non-default
/// cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeOrigin {
    /// The type is defined in its assembly with no indirection.
    Direct,

    /// The type's nominal home redirected here through a type forwarder.
    ///
    /// `from` is the assembly whose manifest declared the type before relocation.
    /// Both `from` and the defining assembly are live when the type is reached.
    Forwarded {
        /// Assembly that still owns the manifest forwarding stub.
        from: AssemblyIdentity,
    },

    /// The type is a locally-embedded, type-equivalent copy of a type whose
    /// authoritative definition lives in another (typically interop) assembly.
    ///
    /// The origin assembly is not recorded here - it is resolved on demand by the
    /// imported-type strategy using the marker's identity information.
    Imported(ImportMarker),
}

impl TypeOrigin {
    /// The forwarding origin assembly, when this type came through a forwarder.
    #[must_use]
    pub fn forwarded_from(&self) -> Option<&AssemblyIdentity> {
        match self {
            TypeOrigin::Forwarded { from } => Some(from),
            _ => None,
        }
    }

    /// The embedding marker, when this type is an imported copy.
    #[must_use]
    pub fn import_marker(&self) -> Option<&ImportMarker> {
        match self {
            TypeOrigin::Imported(marker) => Some(marker),
            _ => None,
        }
    }

    /// Whether this type is an imported/embedded type-equivalent copy.
    #[must_use]
    pub fn is_imported(&self) -> bool {
        matches!(self, TypeOrigin::Imported(_))
    }
}

/// Identity markers carried by an embedded type-equivalent copy.
///
/// Interop type embedding compiles a local copy of a type whose authoritative source
/// is elsewhere; the copy carries identity markers instead of a reference edge. The
/// imported-type strategy matches these against candidate origin assemblies:
/// the explicit [`TypeIdentifier`] wins when present, otherwise matching falls back
/// to full name filtered by the attribute-encoded GUID and the is-import flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportMarker {
    /// Explicit type-identifier marker (scope GUID + identifier string), when the
    /// embedded copy carries one.
    pub type_identifier: Option<TypeIdentifier>,

    /// Attribute-encoded GUID of the type, when present.
    pub guid: Option<Guid>,
}

impl ImportMarker {
    /// Marker with only an attribute-encoded GUID.
    #[must_use]
    pub fn with_guid(guid: Guid) -> Self {
        Self {
            type_identifier: None,
            guid: Some(guid),
        }
    }

    /// Marker with an explicit type-identifier.
    pub fn with_identifier(scope: Guid, identifier: impl Into<String>) -> Self {
        Self {
            type_identifier: Some(TypeIdentifier {
                scope,
                identifier: identifier.into(),
            }),
            guid: None,
        }
    }
}

/// Explicit type-identifier of an embedded type: scope GUID plus identifier string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeIdentifier {
    /// GUID identifying the originating scope (type library or origin assembly).
    pub scope: Guid,

    /// Identifier string, conventionally the full name of the authoritative type.
    pub identifier: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::identity::AssemblyVersion;
    use uguid::guid;

    fn asm(name: &str) -> AssemblyIdentity {
        AssemblyIdentity::new(name, AssemblyVersion::new(1, 0, 0, 0), None, None)
    }

    #[test]
    fn test_type_id_equality_requires_all_components() {
        let direct = TypeId::new("N.T", asm("B"));
        let forwarded = TypeId::forwarded("N.T", asm("B"), asm("A"));
        let other_origin = TypeId::forwarded("N.T", asm("B"), asm("C"));

        assert_ne!(direct, forwarded);
        assert_ne!(forwarded, other_origin);
        assert_eq!(forwarded, TypeId::forwarded("N.T", asm("B"), asm("A")));
    }

    #[test]
    fn test_type_id_hash_consistent_with_equality() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(TypeId::forwarded("N.T", asm("B"), asm("A")));

        assert!(set.contains(&TypeId::forwarded("N.T", asm("B"), asm("A"))));
        assert!(!set.contains(&TypeId::new("N.T", asm("B"))));
    }

    #[test]
    fn test_qualified_name_includes_forwarding_origin() {
        let id = TypeId::forwarded("N.T", asm("B"), asm("A"));
        assert_eq!(id.qualified_name(), "N.T, B (forwarded from A)");

        let direct = TypeId::new("N.T", asm("B"));
        assert_eq!(direct.qualified_name(), "N.T, B");
    }

    #[test]
    fn test_origin_accessors() {
        let forwarded = TypeOrigin::Forwarded { from: asm("A") };
        assert_eq!(forwarded.forwarded_from(), Some(&asm("A")));
        assert!(!forwarded.is_imported());

        let marker = ImportMarker::with_identifier(
            guid!("01234567-89ab-cdef-0123-456789abcdef"),
            "Interop.IWidget",
        );
        let imported = TypeOrigin::Imported(marker.clone());
        assert!(imported.is_imported());
        assert_eq!(imported.import_marker(), Some(&marker));

        assert_eq!(TypeOrigin::Direct.forwarded_from(), None);
        assert_eq!(TypeOrigin::Direct.import_marker(), None);
    }
}

//! Type members: methods, fields, properties, and events.

use crate::metadata::entity::{CustomAttribute, TypeReference};

/// One member declared by a type.
///
/// Members matter to the analysis through the types their signatures mention and
/// the attributes applied to them; bodies, accessibility, and calling conventions
/// are irrelevant to structural liveness and are not modeled.
#[derive(Debug, Clone)]
pub struct Member {
    /// Member name.
    pub name: String,

    /// The member's shape and signature types.
    pub kind: MemberKind,

    /// Custom attributes applied to this member.
    pub custom_attributes: Vec<CustomAttribute>,
}

/// Signature shape of a [`Member`].
#[derive(Debug, Clone)]
pub enum MemberKind {
    /// A method with its return and parameter types.
    Method {
        /// Return type of the method.
        return_type: TypeReference,
        /// Parameter types, in declaration order.
        parameters: Vec<TypeReference>,
    },

    /// A field with its field type.
    Field {
        /// Declared type of the field.
        field_type: TypeReference,
    },

    /// A property with its property type.
    Property {
        /// Declared type of the property.
        property_type: TypeReference,
    },

    /// An event with its handler type.
    Event {
        /// Declared handler type of the event.
        event_type: TypeReference,
    },
}

impl Member {
    /// A method member.
    #[must_use]
    pub fn method(
        name: impl Into<String>,
        return_type: TypeReference,
        parameters: Vec<TypeReference>,
    ) -> Self {
        Self::with_kind(
            name,
            MemberKind::Method {
                return_type,
                parameters,
            },
        )
    }

    /// A field member.
    #[must_use]
    pub fn field(name: impl Into<String>, field_type: TypeReference) -> Self {
        Self::with_kind(name, MemberKind::Field { field_type })
    }

    /// A property member.
    #[must_use]
    pub fn property(name: impl Into<String>, property_type: TypeReference) -> Self {
        Self::with_kind(name, MemberKind::Property { property_type })
    }

    /// An event member.
    #[must_use]
    pub fn event(name: impl Into<String>, event_type: TypeReference) -> Self {
        Self::with_kind(name, MemberKind::Event { event_type })
    }

    fn with_kind(name: impl Into<String>, kind: MemberKind) -> Self {
        Self {
            name: name.into(),
            kind,
            custom_attributes: Vec::new(),
        }
    }

    /// Apply a custom attribute to this member.
    #[must_use]
    pub fn attribute(mut self, attribute: CustomAttribute) -> Self {
        self.custom_attributes.push(attribute);
        self
    }

    /// Every type reference appearing in this member's signature.
    pub fn signature_types(&self) -> impl Iterator<Item = &TypeReference> {
        let (single, list): (&TypeReference, &[TypeReference]) = match &self.kind {
            MemberKind::Method {
                return_type,
                parameters,
            } => (return_type, parameters.as_slice()),
            MemberKind::Field { field_type } => (field_type, &[]),
            MemberKind::Property { property_type } => (property_type, &[]),
            MemberKind::Event { event_type } => (event_type, &[]),
        };
        std::iter::once(single).chain(list.iter())
    }

    /// Signature types plus every type mentioned by this member's attributes.
    pub fn referenced_types(&self) -> impl Iterator<Item = &TypeReference> {
        self.signature_types().chain(
            self.custom_attributes
                .iter()
                .flat_map(CustomAttribute::referenced_types),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::identity::{AssemblyIdentity, AssemblyVersion, TypeId};

    fn type_ref(name: &str) -> TypeReference {
        TypeReference::definition(TypeId::new(
            name,
            AssemblyIdentity::new("Lib", AssemblyVersion::new(1, 0, 0, 0), None, None),
        ))
    }

    #[test]
    fn test_method_signature_types_cover_return_and_parameters() {
        let member = Member::method(
            "Frobnicate",
            type_ref("N.Ret"),
            vec![type_ref("N.P1"), type_ref("N.P2")],
        );

        assert_eq!(member.name, "Frobnicate");
        assert_eq!(member.signature_types().count(), 3);
    }

    #[test]
    fn test_field_signature_is_single_type() {
        let member = Member::field("_count", type_ref("System.Int32"));

        assert_eq!(member.signature_types().count(), 1);
    }

    #[test]
    fn test_member_attributes_contribute_referenced_types() {
        let member = Member::property("Total", type_ref("System.Decimal"))
            .attribute(CustomAttribute::new(type_ref("N.ObsoleteAttribute")));

        assert_eq!(member.signature_types().count(), 1);
        assert_eq!(member.referenced_types().count(), 2);
    }
}

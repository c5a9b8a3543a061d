//! Custom attributes as liveness sources.

use crate::metadata::entity::TypeReference;

/// A custom attribute application.
///
/// Attributes are a liveness source even absent any ordinary code reference: the
/// attribute type itself, the types of its constructor arguments, and the types of
/// its named field and property arguments can each pull an assembly into the
/// required set. Argument *values* are irrelevant and not modeled.
#[derive(Debug, Clone)]
pub struct CustomAttribute {
    /// The attribute type being applied.
    pub attribute_type: TypeReference,

    /// Types of the positional constructor arguments.
    pub constructor_argument_types: Vec<TypeReference>,

    /// Types of the named field and property arguments.
    pub named_argument_types: Vec<TypeReference>,
}

impl CustomAttribute {
    /// An attribute application with no arguments.
    #[must_use]
    pub fn new(attribute_type: TypeReference) -> Self {
        Self {
            attribute_type,
            constructor_argument_types: Vec::new(),
            named_argument_types: Vec::new(),
        }
    }

    /// Every type reference this attribute application mentions.
    pub fn referenced_types(&self) -> impl Iterator<Item = &TypeReference> {
        std::iter::once(&self.attribute_type)
            .chain(self.constructor_argument_types.iter())
            .chain(self.named_argument_types.iter())
    }
}

//! Read-only entity model over a compiled unit's structure.
//!
//! The entity model is the engine's only picture of an assembly: its identity and
//! manifest references, the types it defines (with provenance, base type, interfaces,
//! members, and attributes), the types its manifest exports through forwarders, and
//! the project references under consideration for removal. Entities are immutable
//! once constructed and shared via [`std::sync::Arc`]; every view is side-effect free.
//!
//! # Construction
//!
//! A binary-backed host materializes entities inside its
//! [`MetadataReader`](crate::metadata::reader::MetadataReader) implementation; tests
//! and in-process hosts use the fluent [`AssemblyBuilder`] / [`TypeDefinitionBuilder`]
//! pair. There is no other mutation path.
//!
//! # Key Components
//!
//! - [`Assembly`] - identity, manifest reference set, defined and exported types,
//!   assembly-level attributes
//! - [`TypeDefinition`] - one type with its [`TypeOrigin`](crate::metadata::identity::TypeOrigin),
//!   flags, base type, direct interfaces, members, and attributes
//! - [`Member`] - method, field, property, or event with its signature types and
//!   member-level attributes
//! - [`CustomAttribute`] - attribute type plus constructor and named argument types
//! - [`TypeReference`] - a (possibly generic) mention of a type in a signature
//! - [`ProjectReference`] - a removal candidate with resolvable identity and location

mod assembly;
mod attributes;
mod builder;
mod member;
mod reference;
mod types;

pub use assembly::{Assembly, AssemblyRc, ExportedType};
pub use attributes::CustomAttribute;
pub use builder::{AssemblyBuilder, TypeDefinitionBuilder};
pub use member::{Member, MemberKind};
pub use reference::ProjectReference;
pub use types::{TypeDefinition, TypeDefinitionRc, TypeFlags, TypeReference};

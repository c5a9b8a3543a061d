//! Value identities for assemblies and types.
//!
//! This module provides the identity layer of the analysis engine: plain value objects
//! with structural equality that serve as map and set keys everywhere liveness is
//! tracked. There is no identity map and no reference semantics - two identities are
//! interchangeable exactly when they compare equal.
//!
//! # Key Components
//!
//! - [`AssemblyIdentity`] - name, four-part version, culture, and public key token
//! - [`AssemblyVersion`] - four-part version numbering with ordering and parsing
//! - [`TypeId`] - full type name + defining assembly + forwarded-from origin
//! - [`TypeOrigin`] - tagged provenance of a type definition (direct, forwarded,
//!   or imported/embedded)
//!
//! # Equality Contract
//!
//! [`AssemblyIdentity`] equality is ordinal and case-sensitive on every component;
//! case-insensitive name matching and version-insensitive binding checks exist as
//! explicit caller options ([`AssemblyIdentity::matches_name`],
//! [`AssemblyIdentity::satisfies`]) and never leak into `Eq`/`Hash`.
//!
//! [`TypeId`] equality requires all three components to match. This is intentional:
//! the *same* nominal type forwarded from two different origin assemblies must not
//! collapse into one key, because each origin is independently live when the type is
//! reached through that path.

mod assembly;
mod types;

pub use assembly::{AssemblyIdentity, AssemblyVersion};
pub use types::{ImportMarker, TypeId, TypeIdentifier, TypeOrigin};

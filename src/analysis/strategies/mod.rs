//! Reachability strategies.
//!
//! A strategy is one independent traversal rule contributing to liveness for a
//! single type: the class-hierarchy walk, the interface-hierarchy walk, and
//! imported-type origin resolution. Each yields a [`LiveSet`] - the assemblies the
//! input type makes live through that rule - and records its progress in the shared
//! per-run [`UsedTypeCache`](crate::analysis::cache::UsedTypeCache) so no type is
//! processed twice.
//!
//! Strategies are a legitimate open extension point: the
//! [`UsageStrategy`] trait abstracts over the closed set shipped here, and the
//! algorithms in [`crate::analysis::algorithms`] compose them without knowing the
//! concrete rules.
//!
//! # Error Behavior
//!
//! Strategies raise typed errors and never swallow resolution failures: a base type
//! or interface that cannot be located falsifies the liveness computation, so it
//! surfaces as [`crate::Error::TypeResolution`] (or
//! [`crate::Error::UnresolvedImport`]) carrying the qualified type identity and the
//! strategy name.

mod hierarchy;
mod imports;
mod interfaces;

pub use hierarchy::ClassHierarchyStrategy;
pub use imports::ImportedTypeStrategy;
pub use interfaces::TypeInterfacesStrategy;

use std::collections::HashSet;

use crate::{
    analysis::AnalysisContext,
    metadata::{
        entity::{TypeDefinition, TypeDefinitionRc},
        identity::{AssemblyIdentity, TypeId},
    },
    Error, Result,
};

/// One traversal rule contributing to liveness computation for a single type.
pub trait UsageStrategy {
    /// Human-readable strategy name, used in error context and diagnostics.
    fn name(&self) -> &'static str;

    /// The set of assemblies `ty` makes live under this rule.
    ///
    /// # Errors
    /// [`Error::TypeResolution`] when a type the walk needs cannot be located;
    /// [`Error::UnresolvedImport`] when an embedded copy has no matching origin.
    fn collect(&self, ty: &TypeDefinitionRc, ctx: &AnalysisContext<'_>) -> Result<LiveSet>;
}

/// A set of assemblies proven live by one or more strategies.
///
/// Plain value set over [`AssemblyIdentity`]; duplicate contributions collapse, so
/// a type reached via multiple inheritance paths counts once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiveSet {
    assemblies: HashSet<AssemblyIdentity>,
}

impl LiveSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one assembly.
    pub fn insert(&mut self, assembly: AssemblyIdentity) -> bool {
        self.assemblies.insert(assembly)
    }

    /// Union another set into this one.
    pub fn union_with(&mut self, other: LiveSet) {
        self.assemblies.extend(other.assemblies);
    }

    /// Whether the set contains `assembly`.
    #[must_use]
    pub fn contains(&self, assembly: &AssemblyIdentity) -> bool {
        self.assemblies.contains(assembly)
    }

    /// Iterate the contained assemblies.
    pub fn iter(&self) -> impl Iterator<Item = &AssemblyIdentity> {
        self.assemblies.iter()
    }

    /// Number of assemblies in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assemblies.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assemblies.is_empty()
    }
}

impl IntoIterator for LiveSet {
    type Item = AssemblyIdentity;
    type IntoIter = std::collections::hash_set::IntoIter<AssemblyIdentity>;

    fn into_iter(self) -> Self::IntoIter {
        self.assemblies.into_iter()
    }
}

impl FromIterator<AssemblyIdentity> for LiveSet {
    fn from_iter<I: IntoIterator<Item = AssemblyIdentity>>(iter: I) -> Self {
        Self {
            assemblies: iter.into_iter().collect(),
        }
    }
}

/// Emit the assemblies a visited type contributes: the defining assembly and any
/// forwarding origin, taken from both the reference path (`id`) and the resolved
/// definition. The two can differ when a forwarded reference resolves to a
/// definition recorded as direct.
pub(crate) fn emit_type(live: &mut LiveSet, id: &TypeId, definition: &TypeDefinition) {
    live.insert(id.assembly.clone());
    if let Some(from) = &id.forwarded_from {
        live.insert(from.clone());
    }
    for assembly in definition.declaring_assemblies() {
        live.insert(assembly);
    }
}

/// Resolve `id` through the context's reader, converting any failure into a
/// [`Error::TypeResolution`] that names the type and the requesting strategy.
pub(crate) fn resolve_type(
    ctx: &AnalysisContext<'_>,
    id: &TypeId,
    context: &'static str,
) -> Result<TypeDefinitionRc> {
    ctx.reader
        .type_definition(id)
        .map_err(|_| Error::TypeResolution {
            type_name: id.qualified_name(),
            context,
        })
}

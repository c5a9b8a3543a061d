//! Composable usage-analysis algorithms.
//!
//! An algorithm is one complete pass over the unit that proves a set of assemblies
//! required, together with provenance ([`AlgorithmKind`]) saying which pass proved
//! it. The narrowing protocol in [`crate::analysis::narrowing`] runs the passes in
//! a fixed order - manifest, type reachability, referenced types, dependent
//! assemblies - removing candidates as they are proven required and stopping as
//! soon as none remain.
//!
//! The first three passes are order-independent with respect to the final required
//! set; the dependent-assemblies pass reads the used-type cache that the earlier
//! traversals populate, so it is pinned last.

mod dependents;
mod manifest;
mod reachability;
mod referenced;

pub use dependents::DependentAssembliesAlgorithm;
pub use manifest::ManifestAlgorithm;
pub use reachability::TypeReachabilityAlgorithm;
pub use referenced::ReferencedTypesAlgorithm;

use std::collections::HashMap;

use strum::Display;

use crate::{
    analysis::{strategies::LiveSet, AnalysisContext},
    metadata::entity::{AssemblyRc, ProjectReference},
    metadata::identity::AssemblyIdentity,
    Result,
};

/// Provenance tag naming the pass that proved an assembly required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum AlgorithmKind {
    /// Proven by the unit's manifest reference table.
    #[strum(serialize = "manifest references")]
    Manifest,

    /// Proven by hierarchy, interface, or import traversal of the unit's types.
    #[strum(serialize = "type reachability")]
    TypeReachability,

    /// Proven by a type mention in a member signature or attribute argument.
    #[strum(serialize = "referenced types")]
    ReferencedTypes,

    /// Proven by a forwarder entry matching a type the traversals touched.
    #[strum(serialize = "dependent assemblies")]
    DependentAssemblies,
}

/// One pass of the usage analysis.
pub trait UsageAlgorithm {
    /// Provenance tag for everything this pass proves.
    fn kind(&self) -> AlgorithmKind;

    /// Prove assemblies required for `unit`.
    ///
    /// `required` is everything earlier passes already proved, and `candidates`
    /// are the references still unproven; passes may use both to limit their work.
    /// The returned set contains only this pass's contributions.
    ///
    /// # Errors
    /// Resolution failures from the underlying traversals propagate unchanged.
    fn collect(
        &self,
        unit: &AssemblyRc,
        required: &RequiredAssemblies,
        candidates: &[ProjectReference],
        ctx: &AnalysisContext<'_>,
    ) -> Result<RequiredAssemblies>;
}

/// Assemblies proven required, each tagged with the pass that proved it first.
///
/// Provenance is first-writer-wins: once a pass proves an assembly, later passes
/// proving it again do not overwrite the tag. This keeps the reported reason the
/// earliest (and cheapest) proof.
#[derive(Debug, Clone, Default)]
pub struct RequiredAssemblies {
    proven: HashMap<AssemblyIdentity, AlgorithmKind>,
}

impl RequiredAssemblies {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `assembly` as proven by `kind`, unless already proven.
    pub fn insert(&mut self, assembly: AssemblyIdentity, kind: AlgorithmKind) {
        self.proven.entry(assembly).or_insert(kind);
    }

    /// Record every assembly in `live` as proven by `kind`.
    pub fn extend_from(&mut self, live: LiveSet, kind: AlgorithmKind) {
        for assembly in live {
            self.insert(assembly, kind);
        }
    }

    /// Merge another set, keeping existing provenance on conflict.
    pub fn merge(&mut self, other: RequiredAssemblies) {
        for (assembly, kind) in other.proven {
            self.insert(assembly, kind);
        }
    }

    /// Whether `assembly` has been proven required.
    #[must_use]
    pub fn contains(&self, assembly: &AssemblyIdentity) -> bool {
        self.proven.contains_key(assembly)
    }

    /// The pass that proved `assembly`, if any.
    #[must_use]
    pub fn provenance(&self, assembly: &AssemblyIdentity) -> Option<AlgorithmKind> {
        self.proven.get(assembly).copied()
    }

    /// Iterate proven assemblies with their provenance.
    pub fn iter(&self) -> impl Iterator<Item = (&AssemblyIdentity, AlgorithmKind)> {
        self.proven.iter().map(|(assembly, kind)| (assembly, *kind))
    }

    /// Number of proven assemblies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.proven.len()
    }

    /// Whether nothing has been proven yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.proven.is_empty()
    }
}

//! Type-reachability pass.

use crate::{
    analysis::{
        algorithms::{AlgorithmKind, RequiredAssemblies, UsageAlgorithm},
        strategies::{
            ClassHierarchyStrategy, ImportedTypeStrategy, LiveSet, TypeInterfacesStrategy,
            UsageStrategy,
        },
        AnalysisContext,
    },
    metadata::entity::{AssemblyRc, ProjectReference, TypeDefinitionRc},
    Result,
};

/// Proves required every assembly reachable from the unit's own type definitions
/// through inheritance, interface implementation, and interop embedding.
///
/// Each type is pushed through the strategy sequence by [`reach_type`]; the shared
/// used-type cache makes the whole pass linear in the number of distinct types
/// touched, regardless of how many definitions share ancestry.
pub struct TypeReachabilityAlgorithm;

impl UsageAlgorithm for TypeReachabilityAlgorithm {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::TypeReachability
    }

    fn collect(
        &self,
        unit: &AssemblyRc,
        _required: &RequiredAssemblies,
        _candidates: &[ProjectReference],
        ctx: &AnalysisContext<'_>,
    ) -> Result<RequiredAssemblies> {
        let mut proven = RequiredAssemblies::new();
        for ty in &unit.types {
            proven.extend_from(reach_type(ty, ctx)?, self.kind());
        }
        Ok(proven)
    }
}

/// Run the full strategy sequence over one type definition.
///
/// Order matters twice. The hierarchy walk runs before interface flattening so
/// that base ancestors are cached before flattening considers them, and the
/// imported-origin resolution is keyed on whether the type was cached *before*
/// this call: the hierarchy walk caches the input type itself, which must not
/// suppress resolving its own embedding origin.
pub(crate) fn reach_type(ty: &TypeDefinitionRc, ctx: &AnalysisContext<'_>) -> Result<LiveSet> {
    let already_processed = ctx.cache.contains(&ty.id);

    let mut live = ClassHierarchyStrategy.collect(ty, ctx)?;
    live.union_with(TypeInterfacesStrategy.collect(ty, ctx)?);

    if !already_processed && ty.origin.is_imported() {
        live.union_with(ImportedTypeStrategy::resolve_origin(ty, ctx)?);
    }

    Ok(live)
}

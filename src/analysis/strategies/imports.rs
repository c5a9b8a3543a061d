//! Imported-type origin resolution strategy.

use crate::{
    analysis::{
        strategies::{LiveSet, UsageStrategy},
        AnalysisContext,
    },
    metadata::{entity::TypeDefinitionRc, identity::ImportMarker},
    Error, Result,
};

/// Resolves embedded type-equivalent copies back to their origin assembly.
///
/// Interop type embedding compiles a local copy of a type into the unit instead of
/// keeping a cross-assembly reference, so the defining assembly of the copy says
/// nothing about liveness. The copy carries an import marker, and this strategy
/// scans the run's candidate origin assemblies for the type the copy was made
/// from, marking that origin live.
///
/// Matching prefers the marker's type identifier: an origin matches when its
/// type-library scope GUID agrees (an origin without a scope GUID is not excluded)
/// and it defines a type with the identifier's name. Without an identifier, the
/// strategy falls back to full-name matching, which additionally requires the
/// origin type to carry the same is-import marking and, when the marker declares a
/// GUID, the identical type GUID.
///
/// An embedded copy with no resolvable origin falsifies the whole analysis: the
/// origin may well be one of the removal candidates. The strategy therefore
/// surfaces [`Error::UnresolvedImport`] instead of guessing.
pub struct ImportedTypeStrategy;

impl ImportedTypeStrategy {
    /// Locate the origin assembly of the embedded copy `ty`.
    ///
    /// Candidate origins that the reader cannot load are skipped; an origin set
    /// with no match at all is an [`Error::UnresolvedImport`].
    pub(crate) fn resolve_origin(
        ty: &TypeDefinitionRc,
        ctx: &AnalysisContext<'_>,
    ) -> Result<LiveSet> {
        let Some(marker) = ty.origin.import_marker() else {
            return Ok(LiveSet::new());
        };

        for origin in &ctx.import_origins {
            let assembly = match ctx.reader.assembly(origin) {
                Ok(assembly) => assembly,
                Err(Error::AssemblyNotFound(_)) => continue,
                Err(error) => return Err(error),
            };

            let matched = if let Some(identifier) = &marker.type_identifier {
                let scope_ok = assembly
                    .scope_guid
                    .map_or(true, |scope| scope == identifier.scope);
                scope_ok && assembly.type_definition(&identifier.identifier).is_some()
            } else {
                Self::matches_by_name(ty, marker, &assembly)
            };

            if matched {
                let mut live = LiveSet::new();
                live.insert(origin.clone());
                return Ok(live);
            }
        }

        Err(Error::UnresolvedImport {
            type_name: ty.id.qualified_name(),
        })
    }

    fn matches_by_name(
        ty: &TypeDefinitionRc,
        marker: &ImportMarker,
        assembly: &crate::metadata::entity::Assembly,
    ) -> bool {
        assembly
            .type_definition(&ty.id.name)
            .is_some_and(|candidate| {
                candidate.is_import() == ty.is_import()
                    && (marker.guid.is_none() || candidate.guid == marker.guid)
            })
    }
}

impl UsageStrategy for ImportedTypeStrategy {
    fn name(&self) -> &'static str {
        "imported type origin"
    }

    fn collect(&self, ty: &TypeDefinitionRc, ctx: &AnalysisContext<'_>) -> Result<LiveSet> {
        if ctx.cache.contains(&ty.id) || !ty.origin.is_imported() {
            return Ok(LiveSet::new());
        }

        let live = Self::resolve_origin(ty, ctx)?;
        ctx.cache.add(ty.id.clone());
        Ok(live)
    }
}

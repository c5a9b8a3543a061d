//! Class-hierarchy liveness strategy.

use crate::{
    analysis::{
        strategies::{emit_type, resolve_type, LiveSet, UsageStrategy},
        AnalysisContext,
    },
    metadata::{entity::TypeDefinitionRc, identity::TypeId},
    Error, Result,
};

/// Walks the base-type chain of the input type and marks every ancestor's
/// assembly live.
///
/// The walk stops early at the first ancestor already present in the run's
/// used-type cache: everything above it was emitted when that ancestor was first
/// processed, so revisiting would change nothing. Visited ancestors are cached in
/// root-to-input order, so a partially shared chain resumes exactly where a
/// previous walk left off.
///
/// This strategy must run before interface flattening for the same input type.
/// Flattening skips cached base ancestors, and it is this walk that puts them
/// into the cache.
pub struct ClassHierarchyStrategy;

impl UsageStrategy for ClassHierarchyStrategy {
    fn name(&self) -> &'static str {
        "class hierarchy"
    }

    fn collect(&self, ty: &TypeDefinitionRc, ctx: &AnalysisContext<'_>) -> Result<LiveSet> {
        let mut live = LiveSet::new();

        // Input first, then ancestors until the chain ends or hits a cached type.
        let mut chain: Vec<(TypeId, TypeDefinitionRc)> = vec![(ty.id.clone(), ty.clone())];
        let mut base = ty.base_type.clone();
        while let Some(id) = base {
            if ctx.cache.contains(&id) {
                break;
            }
            // Valid metadata never closes a base chain on itself, but a reader can
            // still hand one over; report it instead of walking forever.
            if chain.iter().any(|(visited, _)| *visited == id) {
                return Err(Error::TypeResolution {
                    type_name: id.qualified_name(),
                    context: self.name(),
                });
            }
            let definition = resolve_type(ctx, &id, self.name())?;
            base = definition.base_type.clone();
            chain.push((id, definition));
        }

        // Emit and cache root-first so an interrupted chain is resumable from any
        // cached ancestor downward.
        for (id, definition) in chain.iter().rev() {
            emit_type(&mut live, id, definition);
            ctx.cache.add(id.clone());
        }

        Ok(live)
    }
}

//! Interface-hierarchy liveness strategy.

use crate::{
    analysis::{
        strategies::{emit_type, resolve_type, ImportedTypeStrategy, LiveSet, UsageStrategy},
        AnalysisContext,
    },
    metadata::{entity::TypeDefinitionRc, identity::TypeId},
    Error, Result,
};

/// Flattens the interface closure of the input type and marks every reached
/// interface's assembly live.
///
/// The closure seeds from the input type's directly implemented interfaces plus
/// the direct interfaces of base ancestors not yet in the used-type cache, then
/// recurses through interface extension edges. A cached interface is skipped
/// without expansion: whoever cached it already emitted it and its super
/// interfaces.
///
/// Run this after [`ClassHierarchyStrategy`](super::ClassHierarchyStrategy) for
/// the same input type. Interfaces contributed by ancestors that the hierarchy
/// walk already processed are intentionally not re-collected here.
///
/// Embedded interface copies encountered during flattening are resolved to their
/// origin assembly before being cached, so the origin contribution is never lost
/// to memoization.
pub struct TypeInterfacesStrategy;

impl UsageStrategy for TypeInterfacesStrategy {
    fn name(&self) -> &'static str {
        "type interfaces"
    }

    fn collect(&self, ty: &TypeDefinitionRc, ctx: &AnalysisContext<'_>) -> Result<LiveSet> {
        let mut live = LiveSet::new();
        emit_type(&mut live, &ty.id, ty);

        let mut worklist: Vec<TypeId> = ty.interfaces.clone();

        // Interfaces inherited through base classes, but only from ancestors the
        // hierarchy walk has not already accounted for.
        let mut ancestors: Vec<TypeId> = Vec::new();
        let mut base = ty.base_type.clone();
        while let Some(id) = base {
            if ctx.cache.contains(&id) {
                break;
            }
            // Same guard as the hierarchy walk: a cyclic chain from the reader
            // must surface as an error, not spin.
            if id == ty.id || ancestors.contains(&id) {
                return Err(Error::TypeResolution {
                    type_name: id.qualified_name(),
                    context: self.name(),
                });
            }
            let ancestor = resolve_type(ctx, &id, self.name())?;
            worklist.extend(ancestor.interfaces.iter().cloned());
            base = ancestor.base_type.clone();
            ancestors.push(id);
        }

        while let Some(id) = worklist.pop() {
            if ctx.cache.contains(&id) {
                continue;
            }

            let interface = resolve_type(ctx, &id, self.name())?;
            emit_type(&mut live, &id, &interface);

            // Origin resolution has to happen before caching, or a later
            // encounter of the same copy would skip it unresolved.
            if interface.origin.is_imported() {
                live.union_with(ImportedTypeStrategy::resolve_origin(&interface, ctx)?);
            }

            ctx.cache.add(id);
            worklist.extend(interface.interfaces.iter().cloned());
        }

        Ok(live)
    }
}

//! Dependent-assemblies pass.

use crate::{
    analysis::{
        algorithms::{AlgorithmKind, RequiredAssemblies, UsageAlgorithm},
        AnalysisContext,
    },
    metadata::entity::{AssemblyRc, ProjectReference},
    Error, Result,
};

/// Proves required any remaining candidate that forwards a type the traversals
/// touched.
///
/// A candidate can be structurally required without appearing anywhere in the
/// unit's metadata: when it owns a forwarder entry for a type the unit reaches
/// through its new home, removing the candidate breaks binding for older callers
/// resolved against the origin. This pass loads each still-unproven candidate and
/// matches its exported-type entries against the run's used-type cache, so it is
/// pinned after the traversal passes that populate the cache.
///
/// A candidate the reader cannot load is skipped, not an error. An unloadable
/// candidate cannot be proven required here, and the narrowing protocol will
/// report it with whatever proof the earlier passes produced, or as unused.
pub struct DependentAssembliesAlgorithm;

impl UsageAlgorithm for DependentAssembliesAlgorithm {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::DependentAssemblies
    }

    fn collect(
        &self,
        _unit: &AssemblyRc,
        required: &RequiredAssemblies,
        candidates: &[ProjectReference],
        ctx: &AnalysisContext<'_>,
    ) -> Result<RequiredAssemblies> {
        let mut proven = RequiredAssemblies::new();
        let touched = ctx.cache.snapshot();

        for candidate in candidates {
            if required.contains(&candidate.identity) {
                continue;
            }
            let assembly = match ctx.reader.assembly(&candidate.identity) {
                Ok(assembly) => assembly,
                Err(Error::AssemblyNotFound(_)) => continue,
                Err(error) => return Err(error),
            };

            let forwards_touched_type = assembly.exported_types.iter().any(|exported| {
                touched.iter().any(|cached| {
                    cached.name == exported.name
                        && (cached.assembly == exported.target
                            || cached.forwarded_from.as_ref() == Some(&assembly.identity))
                })
            });

            if forwards_touched_type {
                proven.insert(candidate.identity.clone(), self.kind());
            }
        }

        Ok(proven)
    }
}

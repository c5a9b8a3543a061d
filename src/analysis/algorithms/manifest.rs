//! Manifest-reference pass.

use crate::{
    analysis::{
        algorithms::{AlgorithmKind, RequiredAssemblies, UsageAlgorithm},
        AnalysisContext,
    },
    metadata::entity::{AssemblyRc, ProjectReference},
    Result,
};

/// Proves required every assembly named in the unit's manifest reference table.
///
/// The compiler only emits a manifest reference for an assembly the unit actually
/// binds against, so each entry is a direct structural proof. This is the cheapest
/// pass and runs first; candidates it proves never reach the traversal passes.
pub struct ManifestAlgorithm;

impl UsageAlgorithm for ManifestAlgorithm {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Manifest
    }

    fn collect(
        &self,
        unit: &AssemblyRc,
        _required: &RequiredAssemblies,
        _candidates: &[ProjectReference],
        _ctx: &AnalysisContext<'_>,
    ) -> Result<RequiredAssemblies> {
        let mut proven = RequiredAssemblies::new();
        for reference in &unit.referenced_assemblies {
            proven.insert(reference.clone(), self.kind());
        }
        Ok(proven)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{
        entity::AssemblyBuilder,
        identity::{AssemblyIdentity, AssemblyVersion},
        reader::MemoryReader,
    };

    #[test]
    fn test_manifest_entries_are_proven() {
        let unit = AssemblyBuilder::new("App", AssemblyVersion::new(1, 0, 0, 0))
            .references(["Lib, Version=2.0.0.0", "Core, Version=4.0.0.0"])
            .unwrap()
            .build()
            .unwrap();

        let reader = MemoryReader::new();
        let ctx = AnalysisContext::new(&reader);

        let proven = ManifestAlgorithm
            .collect(&unit, &RequiredAssemblies::new(), &[], &ctx)
            .unwrap();

        let lib = AssemblyIdentity::parse("Lib, Version=2.0.0.0").unwrap();
        assert_eq!(proven.provenance(&lib), Some(AlgorithmKind::Manifest));
        assert_eq!(proven.len(), 2);
    }
}

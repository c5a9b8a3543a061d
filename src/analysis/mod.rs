//! Reference usage analysis.
//!
//! The layers here compose bottom-up. [`cache::UsedTypeCache`] memoizes processed
//! types within one run. The [`strategies`] walk single types (class hierarchy,
//! interface closure, imported-type origins). The [`algorithms`] run whole passes
//! over the unit and tag everything they prove with an
//! [`algorithms::AlgorithmKind`]. The [`narrowing`] protocol owns the shrinking
//! candidate set and stops the pipeline as soon as it empties. [`batch`] drives
//! several units with fault isolation between them.
//!
//! Most hosts only need [`ReferenceAnalyzer`]:
//!
//! ```rust
//! use refscope::prelude::*;
//!
//! let unit = AssemblyBuilder::new("App", AssemblyVersion::new(1, 0, 0, 0))
//!     .references(["Lib, Version=1.0.0.0"])?
//!     .build()?;
//! let unit_id = unit.identity.clone();
//!
//! let mut reader = MemoryReader::new();
//! reader.insert(unit);
//!
//! let candidates = vec![
//!     ProjectReference::new("Lib", AssemblyIdentity::parse("Lib, Version=1.0.0.0")?, "libs/Lib.dll"),
//!     ProjectReference::new("Stale", AssemblyIdentity::parse("Stale, Version=1.0.0.0")?, "libs/Stale.dll"),
//! ];
//!
//! let report = ReferenceAnalyzer::new(&reader).analyze(&unit_id, candidates)?;
//! assert_eq!(report.unused.len(), 1);
//! assert_eq!(report.retained.len(), 1);
//! # Ok::<(), refscope::Error>(())
//! ```

pub mod algorithms;
pub mod batch;
pub mod cache;
pub mod narrowing;
pub mod strategies;

pub use batch::{BatchAnalyzer, BatchOutcome};
pub use narrowing::{CandidateNarrowing, NarrowingState, RetainedReference};

use crate::{
    analysis::{
        algorithms::{
            DependentAssembliesAlgorithm, ManifestAlgorithm, ReferencedTypesAlgorithm,
            RequiredAssemblies, TypeReachabilityAlgorithm, UsageAlgorithm,
        },
        cache::UsedTypeCache,
    },
    metadata::{
        entity::ProjectReference,
        identity::AssemblyIdentity,
        reader::MetadataReader,
    },
    Result,
};

/// Shared state of one analysis run.
///
/// Bundles the metadata reader, the run's private [`UsedTypeCache`], and the
/// candidate origin assemblies considered by imported-type resolution. One context
/// per unit; contexts are never shared across runs.
pub struct AnalysisContext<'a> {
    /// Reader supplying resolved metadata entities.
    pub reader: &'a dyn MetadataReader,

    /// The run's used-type cache. Fresh per run; see the type's scoping notes.
    pub cache: UsedTypeCache,

    /// Assemblies scanned as potential origins of embedded type-equivalent copies.
    ///
    /// The analyzer seeds this with the run's candidate reference identities: the
    /// origin of an embedded copy is precisely what the run is trying to prove
    /// required or not.
    pub import_origins: Vec<AssemblyIdentity>,
}

impl<'a> AnalysisContext<'a> {
    /// Create a fresh context with an empty cache and no import origins.
    pub fn new(reader: &'a dyn MetadataReader) -> Self {
        Self {
            reader,
            cache: UsedTypeCache::new(),
            import_origins: Vec::new(),
        }
    }
}

/// Result of analyzing one unit's declared references.
#[derive(Debug)]
pub struct AnalysisReport {
    /// Identity of the analyzed unit.
    pub unit: AssemblyIdentity,

    /// Candidates no pass could prove required. Safe to remove.
    pub unused: Vec<ProjectReference>,

    /// Candidates proven required, each with the pass that proved it.
    pub retained: Vec<RetainedReference>,
}

/// Determines which declared references of a compiled unit are never
/// structurally required.
///
/// Runs the pass pipeline (manifest references, type reachability, referenced
/// types, dependent assemblies) under the narrowing protocol: each pass removes
/// the candidates it proves required, and the pipeline stops as soon as none
/// remain. What survives every pass is reported unused.
///
/// The analyzer is stateless between calls; every [`analyze`](Self::analyze) run
/// gets a fresh used-type cache.
pub struct ReferenceAnalyzer<'a> {
    reader: &'a dyn MetadataReader,
}

impl<'a> ReferenceAnalyzer<'a> {
    /// Create an analyzer over `reader`.
    pub fn new(reader: &'a dyn MetadataReader) -> Self {
        Self { reader }
    }

    /// Analyze `unit`'s declared `candidates`.
    ///
    /// # Errors
    /// - [`crate::Error::Malformed`] if a candidate has an empty name
    /// - [`crate::Error::AssemblyNotFound`] if the unit itself cannot be loaded
    /// - [`crate::Error::TypeResolution`] / [`crate::Error::UnresolvedImport`] when
    ///   the traversals cannot complete soundly; no partial report is produced
    pub fn analyze(
        &self,
        unit: &AssemblyIdentity,
        candidates: Vec<ProjectReference>,
    ) -> Result<AnalysisReport> {
        self.analyze_with_cache(unit, candidates, UsedTypeCache::new())
    }

    /// Analyze with a pre-populated used-type cache.
    ///
    /// Types already in `cache` are treated as fully processed and contribute
    /// nothing further. Intended for hosts that carry traversal state across
    /// passes over the same unit; sharing a cache across *different* units is
    /// unsound and yields under-reporting.
    pub fn analyze_with_cache(
        &self,
        unit: &AssemblyIdentity,
        candidates: Vec<ProjectReference>,
        cache: UsedTypeCache,
    ) -> Result<AnalysisReport> {
        for candidate in &candidates {
            if candidate.name.trim().is_empty() {
                return Err(malformed_error!(
                    "Candidate reference name cannot be empty"
                ));
            }
        }

        let assembly = self.reader.assembly(unit)?;

        let mut ctx = AnalysisContext::new(self.reader);
        ctx.cache = cache;
        ctx.import_origins = candidates
            .iter()
            .map(|candidate| candidate.identity.clone())
            .collect();

        let mut narrowing = CandidateNarrowing::new(candidates);
        let mut required = RequiredAssemblies::new();

        let pipeline: [&dyn UsageAlgorithm; 4] = [
            &ManifestAlgorithm,
            &TypeReachabilityAlgorithm,
            &ReferencedTypesAlgorithm,
            &DependentAssembliesAlgorithm,
        ];

        for pass in pipeline {
            if narrowing.is_done() {
                break;
            }
            let proven = pass.collect(&assembly, &required, narrowing.remaining(), &ctx)?;
            narrowing.apply(&proven);
            required.merge(proven);
        }

        let (unused, retained) = narrowing.finish();
        Ok(AnalysisReport {
            unit: unit.clone(),
            unused,
            retained,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{
        entity::AssemblyBuilder,
        identity::AssemblyVersion,
        reader::MemoryReader,
    };

    fn asm(name: &str) -> AssemblyIdentity {
        AssemblyIdentity::new(name, AssemblyVersion::new(1, 0, 0, 0), None, None)
    }

    fn reference(name: &str) -> ProjectReference {
        ProjectReference::new(name, asm(name), format!("packages/{name}.dll"))
    }

    #[test]
    fn test_empty_candidate_name_is_rejected() {
        let mut reader = MemoryReader::new();
        reader.insert(
            AssemblyBuilder::new("App", AssemblyVersion::new(1, 0, 0, 0))
                .build()
                .unwrap(),
        );

        let analyzer = ReferenceAnalyzer::new(&reader);
        let result = analyzer.analyze(&asm("App"), vec![reference(" ")]);
        assert!(matches!(result, Err(crate::Error::Malformed { .. })));
    }

    #[test]
    fn test_missing_unit_is_reported() {
        let reader = MemoryReader::new();
        let analyzer = ReferenceAnalyzer::new(&reader);

        let result = analyzer.analyze(&asm("Nope"), vec![reference("Lib")]);
        assert!(matches!(result, Err(crate::Error::AssemblyNotFound(_))));
    }

    #[test]
    fn test_no_candidates_short_circuits() {
        let mut reader = MemoryReader::new();
        reader.insert(
            AssemblyBuilder::new("App", AssemblyVersion::new(1, 0, 0, 0))
                .build()
                .unwrap(),
        );

        let analyzer = ReferenceAnalyzer::new(&reader);
        let report = analyzer.analyze(&asm("App"), Vec::new()).unwrap();
        assert!(report.unused.is_empty());
        assert!(report.retained.is_empty());
    }

    #[test]
    fn test_manifest_reference_is_retained_and_rest_unused() {
        let mut reader = MemoryReader::new();
        reader.insert(
            AssemblyBuilder::new("App", AssemblyVersion::new(1, 0, 0, 0))
                .references(["Lib, Version=1.0.0.0"])
                .unwrap()
                .build()
                .unwrap(),
        );

        let analyzer = ReferenceAnalyzer::new(&reader);
        let report = analyzer
            .analyze(&asm("App"), vec![reference("Lib"), reference("Stale")])
            .unwrap();

        assert_eq!(report.unused.len(), 1);
        assert_eq!(report.unused[0].name, "Stale");
        assert_eq!(report.retained.len(), 1);
        assert_eq!(
            report.retained[0].proved_by,
            algorithms::AlgorithmKind::Manifest
        );
    }
}

//! Common imports for working with `refscope`.
//!
//! # Examples
//!
//! ```rust
//! use refscope::prelude::*;
//!
//! let unit = AssemblyBuilder::new("App", AssemblyVersion::new(1, 0, 0, 0)).build()?;
//! let unit_id = unit.identity.clone();
//!
//! let mut reader = MemoryReader::new();
//! reader.insert(unit);
//!
//! let report = ReferenceAnalyzer::new(&reader).analyze(&unit_id, Vec::new())?;
//! assert!(report.unused.is_empty());
//! # Ok::<(), refscope::Error>(())
//! ```

pub use crate::{
    analysis::{
        algorithms::{AlgorithmKind, RequiredAssemblies, UsageAlgorithm},
        cache::UsedTypeCache,
        strategies::{LiveSet, UsageStrategy},
        AnalysisContext, AnalysisReport, BatchAnalyzer, BatchOutcome, CandidateNarrowing,
        NarrowingState, ReferenceAnalyzer, RetainedReference,
    },
    metadata::{
        entity::{
            Assembly, AssemblyBuilder, AssemblyRc, CustomAttribute, ExportedType, Member,
            MemberKind, ProjectReference, TypeDefinition, TypeDefinitionBuilder, TypeDefinitionRc,
            TypeFlags, TypeReference,
        },
        identity::{
            AssemblyIdentity, AssemblyVersion, ImportMarker, TypeId, TypeIdentifier, TypeOrigin,
        },
        reader::{MemoryReader, MetadataReader},
    },
    project::{AssemblyCache, CachingReader},
    Error, Result,
};

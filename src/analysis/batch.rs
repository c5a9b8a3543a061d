//! Multi-unit batch driver.

use crate::{
    analysis::{AnalysisReport, ReferenceAnalyzer},
    metadata::{entity::ProjectReference, identity::AssemblyIdentity, reader::MetadataReader},
    Result,
};

/// Outcome of analyzing one unit within a batch.
#[derive(Debug)]
pub struct BatchOutcome {
    /// Identity of the unit this outcome belongs to.
    pub unit: AssemblyIdentity,

    /// The unit's report, or the error that aborted its run.
    pub result: Result<AnalysisReport>,
}

/// Runs the analysis over several units with fault isolation.
///
/// Each unit gets its own [`ReferenceAnalyzer`] run with a fresh used-type cache;
/// one unit's resolution failure is captured in its [`BatchOutcome`] and never
/// aborts the rest of the batch. A solution with one unreadable project still
/// yields reports for every other project.
pub struct BatchAnalyzer<'a> {
    reader: &'a dyn MetadataReader,
}

impl<'a> BatchAnalyzer<'a> {
    /// Create a batch driver over `reader`.
    pub fn new(reader: &'a dyn MetadataReader) -> Self {
        Self { reader }
    }

    /// Analyze every `(unit, candidates)` pair, in order.
    ///
    /// The output is one [`BatchOutcome`] per input pair, in input order.
    pub fn analyze(
        &self,
        units: impl IntoIterator<Item = (AssemblyIdentity, Vec<ProjectReference>)>,
    ) -> Vec<BatchOutcome> {
        let analyzer = ReferenceAnalyzer::new(self.reader);
        units
            .into_iter()
            .map(|(unit, candidates)| {
                let result = analyzer.analyze(&unit, candidates);
                BatchOutcome { unit, result }
            })
            .collect()
    }
}

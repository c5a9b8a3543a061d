//! Candidate narrowing protocol.
//!
//! The protocol owns the monotonically shrinking candidate set. Algorithms only
//! ever *remove* candidates by proving them required; nothing is added back, so
//! running more passes can only move references from "unused" to "retained",
//! never the reverse. When the candidate set empties, the run is done and any
//! remaining passes are skipped.

use crate::{
    analysis::algorithms::{AlgorithmKind, RequiredAssemblies},
    metadata::entity::ProjectReference,
};

/// Phase of a narrowing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrowingState {
    /// No pass has been applied yet.
    Open,

    /// At least one pass has been applied and candidates remain.
    Narrowed,

    /// No candidates remain; further passes would prove nothing new.
    Done,
}

/// A reference proven required, with the pass that proved it.
#[derive(Debug, Clone)]
pub struct RetainedReference {
    /// The candidate that was proven required.
    pub reference: ProjectReference,

    /// The pass that first proved it.
    pub proved_by: AlgorithmKind,
}

/// The shrinking candidate set of one analysis run.
///
/// Constructed from the project's declared references; [`apply`](Self::apply) is
/// called once per pass with that pass's contributions, and
/// [`finish`](Self::finish) splits the final unused/retained partition.
#[derive(Debug)]
pub struct CandidateNarrowing {
    state: NarrowingState,
    remaining: Vec<ProjectReference>,
    retained: Vec<RetainedReference>,
}

impl CandidateNarrowing {
    /// Start a run over the declared candidates.
    ///
    /// An empty candidate list starts in [`NarrowingState::Done`]: there is
    /// nothing to prove and no pass needs to run.
    #[must_use]
    pub fn new(candidates: Vec<ProjectReference>) -> Self {
        let state = if candidates.is_empty() {
            NarrowingState::Done
        } else {
            NarrowingState::Open
        };
        Self {
            state,
            remaining: candidates,
            retained: Vec::new(),
        }
    }

    /// Current phase.
    #[must_use]
    pub fn state(&self) -> NarrowingState {
        self.state
    }

    /// Whether the run can stop early.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.state == NarrowingState::Done
    }

    /// Candidates not yet proven required.
    #[must_use]
    pub fn remaining(&self) -> &[ProjectReference] {
        &self.remaining
    }

    /// Remove every candidate that one of `proven`'s identities matches, keeping
    /// the proving pass as provenance.
    pub fn apply(&mut self, proven: &RequiredAssemblies) {
        let candidates = std::mem::take(&mut self.remaining);
        for candidate in candidates {
            let proof = proven
                .iter()
                .find(|(identity, _)| candidate.matches(identity));
            match proof {
                Some((_, kind)) => self.retained.push(RetainedReference {
                    reference: candidate,
                    proved_by: kind,
                }),
                None => self.remaining.push(candidate),
            }
        }

        self.state = if self.remaining.is_empty() {
            NarrowingState::Done
        } else {
            NarrowingState::Narrowed
        };
    }

    /// Final partition: (unused, retained).
    #[must_use]
    pub fn finish(self) -> (Vec<ProjectReference>, Vec<RetainedReference>) {
        (self.remaining, self.retained)
    }
}

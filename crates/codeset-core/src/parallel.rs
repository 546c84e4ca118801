//! Parallel Processing Module
//!
//! Rayon-backed implementations of the embarrassingly parallel parts of the
//! search: per-candidate filtering and pairwise distance computation.
//! Enable with the `parallel` feature flag.
//!
//! ## Usage
//!
//! ```toml
//! [dependencies]
//! codeset-core = { version = "0.1", features = ["parallel"] }
//! ```
//!
//! Filtering merges results order-preservingly, so candidate sets and
//! diagnostics are identical to the sequential pipeline. Greedy selection
//! is *not* parallelized: it must consume candidates in generation order to
//! stay reproducible.

use rayon::prelude::*;

use crate::distance::DistanceMatrix;
use crate::pipeline::{CandidatePipeline, CandidateSet, StageDiagnostics};
use crate::sequence_space::SequenceSpace;
use crate::types::{SearchResult, Sequence};

/// Parallel driver for a [`CandidatePipeline`].
pub struct ParallelFilter<'a> {
    pipeline: &'a CandidatePipeline,
}

impl<'a> ParallelFilter<'a> {
    pub fn new(pipeline: &'a CandidatePipeline) -> Self {
        Self { pipeline }
    }

    /// Run the pipeline with per-stage parallel filtering. Produces the
    /// same candidate set and diagnostics as [`CandidatePipeline::run`].
    pub fn run(&self, space: &SequenceSpace) -> SearchResult<(CandidateSet, Vec<StageDiagnostics>)> {
        for stage in self.pipeline.stages() {
            stage.validate(space.width())?;
        }

        let mut survivors: Vec<Sequence> = space.iter().collect();
        let mut diagnostics = Vec::with_capacity(self.pipeline.stages().len());
        for stage in self.pipeline.stages() {
            let entered = survivors.len();
            survivors = survivors
                .into_par_iter()
                .filter(|seq| stage.accept(seq))
                .collect();
            tracing::debug!(
                stage = stage.name(),
                entered,
                accepted = survivors.len(),
                "parallel pipeline stage complete"
            );
            diagnostics.push(StageDiagnostics {
                name: stage.name().to_string(),
                entered,
                accepted: survivors.len(),
            });
        }
        Ok((
            CandidateSet::from_sequences(space.width(), survivors)?,
            diagnostics,
        ))
    }
}

/// Build a [`DistanceMatrix`] with one parallel task per candidate row.
/// Identical layout and contents to [`DistanceMatrix::build`].
pub fn build_distance_matrix(candidates: &CandidateSet) -> DistanceMatrix {
    let seqs = candidates.as_slice();
    let n = seqs.len();
    let distances: Vec<u32> = (0..n)
        .into_par_iter()
        .flat_map_iter(|i| ((i + 1)..n).map(move |j| seqs[i].hamming_distance(&seqs[j])))
        .collect();
    DistanceMatrix::from_parts(n, candidates.width(), distances)
}

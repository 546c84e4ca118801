//! Candidate Pipeline — composable acceptance stages over a sequence space
//!
//! A [`CandidatePipeline`] is an ordered list of [`FilterStage`]s applied to
//! every sequence a [`SequenceSpace`] yields. Stages are independent and can
//! be reordered or reconfigured without touching each other; the reference
//! composition is run-length, then shift correlation (reject above a
//! maximum), then inner correlation (require above a minimum).
//!
//! Each stage reports how many candidates entered and how many it accepted,
//! both in the returned [`StageDiagnostics`] and as `tracing` debug events.
//! An empty survivor set is a valid outcome, not an error — the caller can
//! relax thresholds and retry.
//!
//! ## Example
//!
//! ```rust
//! use codeset_core::pipeline::CandidatePipeline;
//! use codeset_core::run_length::RunLengthLimits;
//! use codeset_core::sequence_space::{EnumerationStrategy, SequenceSpace};
//!
//! let space = SequenceSpace::new(8, EnumerationStrategy::odd()).unwrap();
//! let limits = RunLengthLimits { max_ones: 2, max_zeros: 2 };
//! let pipeline = CandidatePipeline::reference(limits, 1, 4, 2);
//! let (candidates, diagnostics) = pipeline.run(&space).unwrap();
//! assert_eq!(candidates.len(), 9);
//! assert_eq!(diagnostics.len(), 3);
//! ```

use serde::Serialize;

use crate::correlation::{
    inner_correlation, shift_correlation, CorrelationGate, ShiftDirection, ShiftFill,
};
use crate::run_length::{RunLengthFilter, RunLengthLimits};
use crate::sequence_space::SequenceSpace;
use crate::types::{SearchError, SearchResult, Sequence};

/// One acceptance stage of the pipeline.
///
/// `validate` runs once against the space width before any sequence is
/// examined, so `accept` can assume a compatible width.
pub trait FilterStage: Send + Sync {
    /// Short stage name used in diagnostics and log events.
    fn name(&self) -> &'static str;

    /// Check this stage's configuration against the sequence width.
    fn validate(&self, width: u8) -> SearchResult<()> {
        let _ = width;
        Ok(())
    }

    /// Whether `seq` survives this stage.
    fn accept(&self, seq: &Sequence) -> bool;
}

impl FilterStage for RunLengthFilter {
    fn name(&self) -> &'static str {
        "run-length"
    }

    fn accept(&self, seq: &Sequence) -> bool {
        RunLengthFilter::accept(self, seq)
    }
}

/// One shift-correlation test: a shift amount, direction, fill, and gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShiftCheck {
    pub shift: u8,
    pub direction: ShiftDirection,
    pub fill: ShiftFill,
    pub gate: CorrelationGate,
}

/// Stage rejecting sequences that correlate too strongly with their own
/// shifted copies. A sequence must pass every configured check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftCorrelationStage {
    checks: Vec<ShiftCheck>,
}

impl ShiftCorrelationStage {
    pub fn new(checks: Vec<ShiftCheck>) -> Self {
        Self { checks }
    }

    /// The reference checks: one left and one right shift of `shift` bits,
    /// reference fills, both rejecting scores above `max_correlation`.
    pub fn reference(shift: u8, max_correlation: u32) -> Self {
        let checks = [ShiftDirection::Left, ShiftDirection::Right]
            .into_iter()
            .map(|direction| ShiftCheck {
                shift,
                direction,
                fill: direction.reference_fill(),
                gate: CorrelationGate::RejectAbove(max_correlation),
            })
            .collect();
        Self { checks }
    }

    pub fn checks(&self) -> &[ShiftCheck] {
        &self.checks
    }
}

impl FilterStage for ShiftCorrelationStage {
    fn name(&self) -> &'static str {
        "shift-correlation"
    }

    fn validate(&self, width: u8) -> SearchResult<()> {
        for check in &self.checks {
            if check.shift > width {
                return Err(SearchError::ShiftTooLarge {
                    shift: check.shift,
                    width,
                });
            }
            if check.gate.threshold() > width as u32 {
                return Err(SearchError::ThresholdOutOfRange {
                    name: "shift correlation",
                    value: check.gate.threshold(),
                    max: width as u32,
                });
            }
        }
        Ok(())
    }

    fn accept(&self, seq: &Sequence) -> bool {
        self.checks.iter().all(|check| {
            match shift_correlation(seq, check.shift, check.direction, check.fill) {
                Ok(score) => check.gate.accepts(score),
                // Unreachable after validate(); treat as not accepted.
                Err(_) => false,
            }
        })
    }
}

/// Stage gating on the correlation between a sequence's halves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InnerCorrelationStage {
    gate: CorrelationGate,
}

impl InnerCorrelationStage {
    pub fn new(gate: CorrelationGate) -> Self {
        Self { gate }
    }

    /// The reference gate: keep sequences whose halves agree in strictly
    /// more than `min_correlation` positions.
    pub fn reference(min_correlation: u32) -> Self {
        Self {
            gate: CorrelationGate::RequireAbove(min_correlation),
        }
    }

    pub fn gate(&self) -> CorrelationGate {
        self.gate
    }
}

impl FilterStage for InnerCorrelationStage {
    fn name(&self) -> &'static str {
        "inner-correlation"
    }

    fn validate(&self, width: u8) -> SearchResult<()> {
        if width % 2 != 0 {
            return Err(SearchError::OddWidth(width));
        }
        let max = width as u32 / 2;
        if self.gate.threshold() > max {
            return Err(SearchError::ThresholdOutOfRange {
                name: "inner correlation",
                value: self.gate.threshold(),
                max,
            });
        }
        Ok(())
    }

    fn accept(&self, seq: &Sequence) -> bool {
        match inner_correlation(seq) {
            Ok(score) => self.gate.accepts(score),
            Err(_) => false,
        }
    }
}

/// Entered/accepted counts for one pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageDiagnostics {
    pub name: String,
    pub entered: usize,
    pub accepted: usize,
}

/// An ordered collection of sequences that passed every stage.
///
/// Order is enumeration order; all members share one width. Enumeration
/// sources are duplicate-free, so the set is too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateSet {
    width: u8,
    sequences: Vec<Sequence>,
}

impl CandidateSet {
    /// Build a set from pre-filtered sequences, checking width uniformity.
    pub fn from_sequences(width: u8, sequences: Vec<Sequence>) -> SearchResult<Self> {
        if width == 0 || width > crate::types::MAX_WIDTH {
            return Err(SearchError::InvalidWidth(width));
        }
        if let Some(seq) = sequences.iter().find(|s| s.width() != width) {
            return Err(SearchError::WidthMismatch {
                expected: width,
                actual: seq.width(),
            });
        }
        Ok(Self { width, sequences })
    }

    pub(crate) fn from_raw(width: u8, sequences: Vec<Sequence>) -> Self {
        Self { width, sequences }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Sequence> {
        self.sequences.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sequence> {
        self.sequences.iter()
    }

    pub fn as_slice(&self) -> &[Sequence] {
        &self.sequences
    }
}

/// Ordered stage composition applied to a sequence space.
pub struct CandidatePipeline {
    stages: Vec<Box<dyn FilterStage>>,
}

impl CandidatePipeline {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Append a stage, builder style.
    pub fn with_stage(mut self, stage: impl FilterStage + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    pub fn push_stage(&mut self, stage: impl FilterStage + 'static) {
        self.stages.push(Box::new(stage));
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub(crate) fn stages(&self) -> &[Box<dyn FilterStage>] {
        &self.stages
    }

    /// The reference composition: run-length limits, shift correlation of
    /// `shift` bits in both directions rejected above `max_shift_correlation`,
    /// then inner correlation required above `min_inner_correlation`.
    pub fn reference(
        limits: RunLengthLimits,
        shift: u8,
        max_shift_correlation: u32,
        min_inner_correlation: u32,
    ) -> Self {
        Self::new()
            .with_stage(RunLengthFilter::new(limits))
            .with_stage(ShiftCorrelationStage::reference(shift, max_shift_correlation))
            .with_stage(InnerCorrelationStage::reference(min_inner_correlation))
    }

    /// Run every stage over the space, in order, lazily consuming the
    /// enumeration for the first stage.
    pub fn run(&self, space: &SequenceSpace) -> SearchResult<(CandidateSet, Vec<StageDiagnostics>)> {
        for stage in &self.stages {
            stage.validate(space.width())?;
        }

        let mut diagnostics = Vec::with_capacity(self.stages.len());
        let mut survivors: Option<Vec<Sequence>> = None;
        for stage in &self.stages {
            let (entered, kept) = match survivors.take() {
                // First stage filters straight off the enumeration.
                None => {
                    let mut entered = 0usize;
                    let mut kept = Vec::new();
                    for seq in space.iter() {
                        entered += 1;
                        if stage.accept(&seq) {
                            kept.push(seq);
                        }
                    }
                    (entered, kept)
                }
                Some(mut current) => {
                    let entered = current.len();
                    current.retain(|seq| stage.accept(seq));
                    (entered, current)
                }
            };
            tracing::debug!(
                stage = stage.name(),
                entered,
                accepted = kept.len(),
                "pipeline stage complete"
            );
            diagnostics.push(StageDiagnostics {
                name: stage.name().to_string(),
                entered,
                accepted: kept.len(),
            });
            survivors = Some(kept);
        }

        let sequences = match survivors {
            Some(seqs) => seqs,
            // No stages configured: every enumerated sequence is a candidate.
            None => space.iter().collect(),
        };
        Ok((CandidateSet::from_raw(space.width(), sequences), diagnostics))
    }
}

impl Default for CandidatePipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence_space::EnumerationStrategy;

    fn space8() -> SequenceSpace {
        SequenceSpace::new(8, EnumerationStrategy::odd()).unwrap()
    }

    fn reference8() -> CandidatePipeline {
        let limits = RunLengthLimits {
            max_ones: 2,
            max_zeros: 2,
        };
        CandidatePipeline::reference(limits, 1, 4, 2)
    }

    #[test]
    fn test_reference_pipeline_eight_bit() {
        let (candidates, diagnostics) = reference8().run(&space8()).unwrap();

        let expected: Vec<String> = [
            "00110011", "01010101", "10011001", "10011011", "10101011", "10110011", "11001101",
            "11010101", "11011001",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        let got: Vec<String> = candidates.iter().map(|s| s.bits()).collect();
        assert_eq!(got, expected);

        assert_eq!(diagnostics.len(), 3);
        assert_eq!(diagnostics[0].name, "run-length");
        assert_eq!(diagnostics[0].entered, 128);
        assert_eq!(diagnostics[0].accepted, 34);
        assert_eq!(diagnostics[1].name, "shift-correlation");
        assert_eq!(diagnostics[1].entered, 34);
        assert_eq!(diagnostics[1].accepted, 34);
        assert_eq!(diagnostics[2].name, "inner-correlation");
        assert_eq!(diagnostics[2].entered, 34);
        assert_eq!(diagnostics[2].accepted, 9);
    }

    #[test]
    fn test_stage_counts_chain() {
        let (candidates, diagnostics) = reference8().run(&space8()).unwrap();
        for pair in diagnostics.windows(2) {
            assert_eq!(pair[1].entered, pair[0].accepted);
        }
        assert_eq!(diagnostics.last().unwrap().accepted, candidates.len());
    }

    #[test]
    fn test_empty_survivor_set_is_ok() {
        // No run fits within zero-length limits, so nothing survives.
        let limits = RunLengthLimits {
            max_ones: 0,
            max_zeros: 0,
        };
        let pipeline = CandidatePipeline::new().with_stage(RunLengthFilter::new(limits));
        let (candidates, diagnostics) = pipeline.run(&space8()).unwrap();
        assert!(candidates.is_empty());
        assert_eq!(diagnostics[0].accepted, 0);
    }

    #[test]
    fn test_no_stages_passes_everything() {
        let pipeline = CandidatePipeline::new();
        let (candidates, diagnostics) = pipeline.run(&space8()).unwrap();
        assert_eq!(candidates.len(), 128);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_stage_order_is_reconfigurable() {
        // Inner correlation first, run-length last: same survivors, counts
        // attributed differently.
        let limits = RunLengthLimits {
            max_ones: 2,
            max_zeros: 2,
        };
        let reordered = CandidatePipeline::new()
            .with_stage(InnerCorrelationStage::reference(2))
            .with_stage(ShiftCorrelationStage::reference(1, 4))
            .with_stage(RunLengthFilter::new(limits));
        let (candidates, _) = reordered.run(&space8()).unwrap();
        let (reference, _) = reference8().run(&space8()).unwrap();
        assert_eq!(candidates, reference);
    }

    #[test]
    fn test_validation_rejects_bad_stage_config() {
        let odd_space = SequenceSpace::new(7, EnumerationStrategy::odd()).unwrap();
        let pipeline = CandidatePipeline::new().with_stage(InnerCorrelationStage::reference(2));
        assert_eq!(pipeline.run(&odd_space).unwrap_err(), SearchError::OddWidth(7));

        let pipeline = CandidatePipeline::new().with_stage(ShiftCorrelationStage::reference(9, 4));
        assert_eq!(
            pipeline.run(&space8()).unwrap_err(),
            SearchError::ShiftTooLarge { shift: 9, width: 8 }
        );

        let pipeline =
            CandidatePipeline::new().with_stage(ShiftCorrelationStage::reference(1, 20));
        assert!(matches!(
            pipeline.run(&space8()).unwrap_err(),
            SearchError::ThresholdOutOfRange { .. }
        ));
    }

    #[test]
    fn test_candidate_set_width_check() {
        let seqs = vec![
            Sequence::new(0b0101, 4).unwrap(),
            Sequence::new(0b11, 2).unwrap(),
        ];
        assert_eq!(
            CandidateSet::from_sequences(4, seqs).unwrap_err(),
            SearchError::WidthMismatch {
                expected: 4,
                actual: 2
            }
        );
    }
}

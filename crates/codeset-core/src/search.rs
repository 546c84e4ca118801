//! Search Orchestration — one call from configuration to codeword table
//!
//! Wires the components together: enumerate the sequence space, run the
//! filter pipeline, build the distance matrix, select codewords, and map
//! data symbols. The report carries semantic values only (sequences,
//! counts, distances); rendering belongs to the caller.
//!
//! An empty candidate set and a codeword shortfall are results, not errors:
//! the caller can relax thresholds and run again. Only invalid
//! configuration fails the run.
//!
//! ## Example
//!
//! ```rust
//! use codeset_core::config::SearchConfig;
//! use codeset_core::run_length::RunLengthLimits;
//! use codeset_core::search;
//!
//! let config = SearchConfig {
//!     width: 8,
//!     run_length: RunLengthLimits { max_ones: 2, max_zeros: 2 },
//!     max_shift_correlation: 4,
//!     min_inner_correlation: 2,
//!     target_count: 4,
//!     distance_threshold: 2,
//!     ..SearchConfig::default()
//! };
//! let report = search::run(&config).unwrap();
//! assert_eq!(report.candidates.len(), 9);
//! assert!(report.assignment.is_some());
//! ```

use serde::Serialize;

use crate::config::SearchConfig;
use crate::distance::DistanceMatrix;
use crate::pipeline::{CandidateSet, StageDiagnostics};
use crate::selector::{CodewordAssignment, SelectionOutcome};
use crate::sequence_space::SequenceSpace;
use crate::types::SearchResult;

/// Everything a search run produces.
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    /// Sequences that survived every filter stage, in generation order.
    pub candidates: CandidateSet,
    /// Entered/accepted counts per pipeline stage.
    pub diagnostics: Vec<StageDiagnostics>,
    /// Smallest pairwise distance among the candidates, if any pair exists.
    pub min_distance: Option<u32>,
    /// Terminal selection state: complete set or reported shortfall.
    pub outcome: SelectionOutcome,
    /// Symbol table, present only when selection completed.
    pub assignment: Option<CodewordAssignment>,
}

/// Run a full search over the space the configuration describes.
pub fn run(config: &SearchConfig) -> SearchResult<SearchReport> {
    config.validate()?;
    let space = config.space()?;
    run_with_space(config, &space)
}

/// Run a full search over a caller-supplied space (e.g. root-derived
/// enumeration), using the configuration for filters and selection.
pub fn run_with_space(config: &SearchConfig, space: &SequenceSpace) -> SearchResult<SearchReport> {
    config.validate()?;
    let (candidates, diagnostics) = config.pipeline().run(space)?;
    if candidates.is_empty() {
        tracing::warn!("every candidate was filtered out; thresholds may be too tight");
    }

    let matrix = DistanceMatrix::build(&candidates);
    let outcome = config.selector().select(&candidates, &matrix);
    let assignment = match &outcome {
        SelectionOutcome::Complete(selected) => {
            CodewordAssignment::new(selected, config.target_count).ok()
        }
        SelectionOutcome::Shortfall { .. } => None,
    };

    tracing::info!(
        enumerated = space.len(),
        candidates = candidates.len(),
        selected = outcome.selected().len(),
        target = config.target_count,
        complete = outcome.is_complete(),
        "codeword search finished"
    );

    Ok(SearchReport {
        candidates,
        diagnostics,
        min_distance: matrix.min_distance(),
        outcome,
        assignment,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run_length::RunLengthLimits;
    use crate::selector::Shortfall;
    use crate::sequence_space::EnumerationStrategy;
    use crate::types::SearchError;

    fn config8() -> SearchConfig {
        SearchConfig {
            width: 8,
            run_length: RunLengthLimits {
                max_ones: 2,
                max_zeros: 2,
            },
            max_shift_correlation: 4,
            min_inner_correlation: 2,
            target_count: 4,
            distance_threshold: 2,
            ..SearchConfig::default()
        }
    }

    #[test]
    fn test_reference_sixteen_bit_search() {
        let report = run(&SearchConfig::default()).unwrap();

        assert_eq!(report.diagnostics[0].entered, 32768);
        assert_eq!(report.diagnostics[0].accepted, 4682);
        assert_eq!(report.diagnostics[1].accepted, 4657);
        assert_eq!(report.diagnostics[2].accepted, 45);
        assert_eq!(report.candidates.len(), 45);

        // Only two mutually separated codewords exist above distance 8, so
        // the sixteen-symbol target is a shortfall.
        assert_eq!(
            report.outcome.shortfall(),
            Some(Shortfall {
                achieved: 2,
                target: 16
            })
        );
        assert!(report.assignment.is_none());

        let selected = report.outcome.selected();
        assert_eq!(selected.sequences()[0].bits(), "1001001110010011");
        assert_eq!(selected.sequences()[1].bits(), "0010010100100101");
    }

    #[test]
    fn test_complete_eight_bit_search() {
        let report = run(&config8()).unwrap();
        assert_eq!(report.candidates.len(), 9);
        assert!(report.outcome.is_complete());

        let assignment = report.assignment.unwrap();
        assert_eq!(assignment.symbol_count(), 4);
        for (symbol, codeword) in assignment.iter() {
            assert_eq!(codeword.width(), 8);
            assert!(symbol < 4);
        }
    }

    #[test]
    fn test_search_is_reproducible() {
        let config = config8();
        let first = run(&config).unwrap();
        let second = run(&config).unwrap();
        assert_eq!(first.outcome, second.outcome);
        assert_eq!(first.candidates, second.candidates);
    }

    #[test]
    fn test_empty_candidate_set_is_a_result() {
        let config = SearchConfig {
            run_length: RunLengthLimits {
                max_ones: 0,
                max_zeros: 0,
            },
            ..SearchConfig::default()
        };
        let report = run(&config).unwrap();
        assert!(report.candidates.is_empty());
        assert_eq!(report.min_distance, None);
        assert_eq!(
            report.outcome.shortfall(),
            Some(Shortfall {
                achieved: 0,
                target: 16
            })
        );
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let config = SearchConfig {
            width: 15,
            ..SearchConfig::default()
        };
        assert_eq!(run(&config).unwrap_err(), SearchError::OddWidth(15));
    }

    #[test]
    fn test_run_with_root_derived_space() {
        fn spread(root: u32, width: u8) -> u32 {
            // Cheap deterministic spread of the root across the width.
            root.wrapping_mul(0x9E37).rotate_left(width as u32 / 2)
        }
        let config = config8();
        let space = SequenceSpace::new(
            8,
            EnumerationStrategy::RootDerived {
                roots: (1..=64).collect(),
                map: spread,
            },
        )
        .unwrap();
        let report = run_with_space(&config, &space).unwrap();
        // Odd roots only (coprime to 8), each mapped through `spread`.
        assert_eq!(report.diagnostics[0].entered, 32);
        for seq in report.candidates.iter() {
            assert_eq!(seq.width(), 8);
        }
    }
}

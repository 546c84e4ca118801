//! Codeword Selector — greedy maximum-separation subset and symbol mapping
//!
//! Picks a subset of the candidate set in which every pair of members is
//! well separated in Hamming distance, then maps data symbols onto the
//! members. Separation uses the distance report's "greater than" semantics:
//! a pair qualifies only when its distance strictly exceeds the configured
//! threshold.
//!
//! The greedy pass is deterministic and reproducible: it seeds with the
//! candidate that has the fewest neighbors at or below the threshold (ties
//! broken by generation order), then repeatedly scans the pool in
//! generation order and adds the first candidate separated from every
//! member selected so far. It stops when the target count is reached
//! (`Complete`) or the pool is exhausted (`Shortfall`, reporting achieved
//! of target); both states are terminal.
//!
//! ## Example
//!
//! ```rust
//! use codeset_core::distance::DistanceMatrix;
//! use codeset_core::pipeline::CandidateSet;
//! use codeset_core::selector::CodewordSelector;
//! use codeset_core::types::Sequence;
//!
//! let candidates = CandidateSet::from_sequences(
//!     16,
//!     vec![
//!         Sequence::new(0x9393, 16).unwrap(),
//!         Sequence::new(0x4949, 16).unwrap(),
//!         Sequence::new(0x9595, 16).unwrap(),
//!     ],
//! )
//! .unwrap();
//! let matrix = DistanceMatrix::build(&candidates);
//! let outcome = CodewordSelector::new(2, 8).select(&candidates, &matrix);
//! assert!(outcome.is_complete());
//! assert_eq!(outcome.selected().len(), 2);
//! ```

use serde::Serialize;

use crate::distance::DistanceMatrix;
use crate::pipeline::CandidateSet;
use crate::types::Sequence;

/// A reported gap between what was requested and what was achievable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Shortfall {
    pub achieved: usize,
    pub target: usize,
}

impl std::fmt::Display for Shortfall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "achieved {} of {} codewords", self.achieved, self.target)
    }
}

/// The selected codewords, in selection order, with their candidate indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedSet {
    width: u8,
    indices: Vec<usize>,
    sequences: Vec<Sequence>,
}

impl SelectedSet {
    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Candidate indices in selection order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Selected sequences in selection order.
    pub fn sequences(&self) -> &[Sequence] {
        &self.sequences
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Sequence)> + '_ {
        self.indices.iter().copied().zip(self.sequences.iter())
    }
}

/// Terminal result of a selection run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SelectionOutcome {
    /// The target count was reached.
    Complete(SelectedSet),
    /// The pool ran out first; never a silent partial success.
    Shortfall {
        shortfall: Shortfall,
        selected: SelectedSet,
    },
}

impl SelectionOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, SelectionOutcome::Complete(_))
    }

    pub fn selected(&self) -> &SelectedSet {
        match self {
            SelectionOutcome::Complete(set) => set,
            SelectionOutcome::Shortfall { selected, .. } => selected,
        }
    }

    pub fn shortfall(&self) -> Option<Shortfall> {
        match self {
            SelectionOutcome::Complete(_) => None,
            SelectionOutcome::Shortfall { shortfall, .. } => Some(*shortfall),
        }
    }
}

/// Greedy, deterministic maximum-separation selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CodewordSelector {
    target_count: usize,
    distance_threshold: u32,
}

impl CodewordSelector {
    /// A pair of codewords counts as separated when its Hamming distance
    /// strictly exceeds `distance_threshold`.
    pub fn new(target_count: usize, distance_threshold: u32) -> Self {
        Self {
            target_count,
            distance_threshold,
        }
    }

    pub fn target_count(&self) -> usize {
        self.target_count
    }

    pub fn distance_threshold(&self) -> u32 {
        self.distance_threshold
    }

    fn separated(&self, matrix: &DistanceMatrix, i: usize, j: usize) -> bool {
        matrix
            .distance(i, j)
            .is_some_and(|d| d > self.distance_threshold)
    }

    /// Select up to `target_count` mutually separated candidates.
    ///
    /// `matrix` must have been built from `candidates`.
    pub fn select(&self, candidates: &CandidateSet, matrix: &DistanceMatrix) -> SelectionOutcome {
        debug_assert_eq!(candidates.len(), matrix.candidate_count());
        let n = candidates.len();
        let mut indices: Vec<usize> = Vec::new();

        if self.target_count > 0 {
            // Seed with the least-conflicted candidate, ties to the earliest.
            let seed = (0..n)
                .min_by_key(|&i| (matrix.degree_at_or_below(i, self.distance_threshold), i));
            if let Some(seed) = seed {
                indices.push(seed);
                while indices.len() < self.target_count {
                    let next = (0..n).find(|&j| {
                        !indices.contains(&j)
                            && indices.iter().all(|&s| self.separated(matrix, j, s))
                    });
                    match next {
                        Some(j) => indices.push(j),
                        None => break,
                    }
                }
            }
        }

        let sequences = indices
            .iter()
            .map(|&i| candidates.as_slice()[i])
            .collect::<Vec<_>>();
        let selected = SelectedSet {
            width: candidates.width(),
            indices,
            sequences,
        };

        tracing::debug!(
            achieved = selected.len(),
            target = self.target_count,
            threshold = self.distance_threshold,
            "codeword selection finished"
        );

        if selected.len() == self.target_count {
            SelectionOutcome::Complete(selected)
        } else {
            SelectionOutcome::Shortfall {
                shortfall: Shortfall {
                    achieved: selected.len(),
                    target: self.target_count,
                },
                selected,
            }
        }
    }
}

/// A stable bijection from data-symbol index (ascending) to codeword
/// (selection order).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodewordAssignment {
    width: u8,
    codewords: Vec<Sequence>,
}

impl CodewordAssignment {
    /// Map `symbol_count` symbols onto the selected codewords. Asking for
    /// more symbols than there are codewords is a [`Shortfall`], never a
    /// silent partial mapping.
    pub fn new(selected: &SelectedSet, symbol_count: usize) -> Result<Self, Shortfall> {
        if symbol_count > selected.len() {
            return Err(Shortfall {
                achieved: selected.len(),
                target: symbol_count,
            });
        }
        Ok(Self {
            width: selected.width(),
            codewords: selected.sequences()[..symbol_count].to_vec(),
        })
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn symbol_count(&self) -> usize {
        self.codewords.len()
    }

    /// Codeword for a symbol, if the symbol is in the mapped domain.
    pub fn codeword(&self, symbol: u16) -> Option<&Sequence> {
        self.codewords.get(symbol as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u16, &Sequence)> + '_ {
        self.codewords
            .iter()
            .enumerate()
            .map(|(i, seq)| (i as u16, seq))
    }
}

//! # Codeword Set Search Library
//!
//! This crate searches a space of fixed-width binary sequences for a small
//! symbol alphabet suitable for noise-robust signaling, such as the
//! preamble and data codewords of a simple OOK/FSK RF link.
//!
//! ## Overview
//!
//! A usable codeword has to survive three constraints:
//!
//! - **Run-length limits**: no long stretches of identical bits, so clock
//!   recovery and AC coupling keep working.
//! - **Low shift autocorrelation**: the sequence must look unlike its own
//!   single-bit shifted copy, so symbol timing locks unambiguously.
//! - **High inner correlation**: the two halves of the sequence should
//!   agree, adding redundancy against burst errors.
//!
//! Among the survivors, codewords are chosen so that every selected pair
//! differs in as many bit positions as possible (maximized minimum pairwise
//! Hamming distance), then assigned to data symbols.
//!
//! ## Search Flow
//!
//! ```text
//! SequenceSpace → CandidatePipeline → CandidateSet
//!              → DistanceMatrix → CodewordSelector → CodewordAssignment
//! ```
//!
//! ## Example
//!
//! ```rust
//! use codeset_core::prelude::*;
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
//!
//! let report = codeset_core::search::run(&config).unwrap();
//! assert!(report.outcome.is_complete());
//! let table = report.assignment.unwrap();
//! assert_eq!(table.symbol_count(), 4);
//! ```

pub mod config;
pub mod correlation;
pub mod distance;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod pipeline;
pub mod run_length;
pub mod search;
pub mod selector;
pub mod sequence_space;
pub mod types;

/// Commonly used types, re-exported for convenience.
pub mod prelude {
    pub use crate::config::SearchConfig;
    pub use crate::correlation::{CorrelationGate, CorrelationProfile, ShiftDirection, ShiftFill};
    pub use crate::distance::DistanceMatrix;
    pub use crate::pipeline::{CandidatePipeline, CandidateSet, FilterStage, StageDiagnostics};
    pub use crate::run_length::{RunLengthFilter, RunLengthLimits};
    pub use crate::search::{run, SearchReport};
    pub use crate::selector::{
        CodewordAssignment, CodewordSelector, SelectedSet, SelectionOutcome, Shortfall,
    };
    pub use crate::sequence_space::{EnumerationStrategy, SequenceSpace};
    pub use crate::types::{SearchError, SearchResult, Sequence};
}

//! Run-Length Filter — consecutive-identical-bit limits
//!
//! Hardware links with AC-coupled or clock-recovering receivers tolerate
//! only short runs of identical bits. This filter rejects any sequence
//! whose longest run of ones exceeds `max_ones` or whose longest run of
//! zeros exceeds `max_zeros`.
//!
//! Runs are scanned directly over the integer encoding; no string
//! rendering is involved. An all-ones or all-zeros sequence is a single
//! run of the full width.
//!
//! ## Example
//!
//! ```rust
//! use codeset_core::run_length::{RunLengthFilter, RunLengthLimits};
//! use codeset_core::types::Sequence;
//!
//! let filter = RunLengthFilter::new(RunLengthLimits { max_ones: 3, max_zeros: 2 });
//! let good = Sequence::new(0x9393, 16).unwrap(); // 1001001110010011
//! let bad = Sequence::new(0xF001, 16).unwrap();  // 1111000000000001
//! assert!(filter.accept(&good));
//! assert!(!filter.accept(&bad));
//! ```

use serde::{Deserialize, Serialize};

use crate::types::Sequence;

/// Maximum tolerated run lengths, per bit value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunLengthLimits {
    /// Longest acceptable run of consecutive ones.
    pub max_ones: u8,
    /// Longest acceptable run of consecutive zeros.
    pub max_zeros: u8,
}

impl Default for RunLengthLimits {
    fn default() -> Self {
        Self {
            max_ones: 3,
            max_zeros: 2,
        }
    }
}

/// Pure run-length acceptance filter. O(width) per sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunLengthFilter {
    limits: RunLengthLimits,
}

impl RunLengthFilter {
    pub fn new(limits: RunLengthLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> RunLengthLimits {
        self.limits
    }

    /// Accept `seq` when no run exceeds the configured limits.
    pub fn accept(&self, seq: &Sequence) -> bool {
        let (ones, zeros) = longest_runs(seq);
        ones <= self.limits.max_ones as u32 && zeros <= self.limits.max_zeros as u32
    }
}

/// Longest run of ones and longest run of zeros in `seq`.
pub fn longest_runs(seq: &Sequence) -> (u32, u32) {
    let mut longest_ones = 0u32;
    let mut longest_zeros = 0u32;
    let mut current = seq.bit(seq.width() - 1);
    let mut run = 0u32;
    for index in (0..seq.width()).rev() {
        let bit = seq.bit(index);
        if bit == current {
            run += 1;
        } else {
            if current {
                longest_ones = longest_ones.max(run);
            } else {
                longest_zeros = longest_zeros.max(run);
            }
            current = bit;
            run = 1;
        }
    }
    if current {
        longest_ones = longest_ones.max(run);
    } else {
        longest_zeros = longest_zeros.max(run);
    }
    (longest_ones, longest_zeros)
}

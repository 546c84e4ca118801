//! Core types for the codeword search
//!
//! This module defines the fundamental value types used throughout the
//! library, particularly [`Sequence`], the fixed-width binary sequence all
//! filters and selectors operate on.
//!
//! ## Representation
//!
//! A sequence of width N (1..=32) is stored as the low N bits of a `u32`;
//! the constructor masks the value so bits above the width can never leak
//! into correlation or distance computations. The canonical display form is
//! the zero-padded, MSB-first binary string:
//!
//! ```text
//! Sequence::new(0x9393, 16)  →  "1001001110010011"
//! ```
//!
//! ## Example
//!
//! ```rust
//! use codeset_core::types::Sequence;
//!
//! let a = Sequence::new(0x9393, 16).unwrap();
//! let b = Sequence::new(0x4949, 16).unwrap();
//! assert_eq!(a.to_string(), "1001001110010011");
//! assert_eq!(a.hamming_distance(&b), 10);
//! ```

use serde::Serialize;

/// Widest supported sequence, bounded by the `u32` backing store.
pub const MAX_WIDTH: u8 = 32;

/// Result type for search operations.
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors that can occur while configuring or running a search.
///
/// All variants are configuration errors: they are surfaced immediately and
/// nothing is retried. Running out of candidates or codewords is *not* an
/// error; those cases are reported through [`crate::pipeline::CandidateSet`]
/// emptiness and [`crate::selector::Shortfall`] respectively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("invalid bit width: {0}. Must be between 1 and 32")]
    InvalidWidth(u8),

    #[error("enumeration stride must be nonzero")]
    ZeroStride,

    #[error("shift of {shift} bits exceeds sequence width {width}")]
    ShiftTooLarge { shift: u8, width: u8 },

    #[error("{name} threshold {value} out of range 0..={max}")]
    ThresholdOutOfRange {
        name: &'static str,
        value: u32,
        max: u32,
    },

    #[error("inner correlation requires an even bit width, got {0}")]
    OddWidth(u8),

    #[error("sequence width mismatch: expected {expected}, got {actual}")]
    WidthMismatch { expected: u8, actual: u8 },
}

/// Bit mask covering the low `width` bits.
pub(crate) fn width_mask(width: u8) -> u32 {
    if width >= 32 {
        u32::MAX
    } else {
        (1u32 << width) - 1
    }
}

/// A fixed-width binary sequence.
///
/// Immutable once constructed. Ordering follows the integer encoding, which
/// matches ascending generation order for stride enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Sequence {
    value: u32,
    width: u8,
}

impl Sequence {
    /// Create a sequence of `width` bits from the low bits of `value`.
    ///
    /// The value is masked to the width. Widths outside `1..=32` are
    /// rejected with [`SearchError::InvalidWidth`].
    pub fn new(value: u32, width: u8) -> SearchResult<Self> {
        if width == 0 || width > MAX_WIDTH {
            return Err(SearchError::InvalidWidth(width));
        }
        Ok(Self::from_raw(value, width))
    }

    /// Internal constructor for call sites that have already validated the
    /// width (e.g. enumeration from a validated space).
    pub(crate) fn from_raw(value: u32, width: u8) -> Self {
        Self {
            value: value & width_mask(width),
            width,
        }
    }

    /// The integer encoding (always masked to the width).
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Number of bits in the sequence.
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Mask covering this sequence's bits.
    pub fn mask(&self) -> u32 {
        width_mask(self.width)
    }

    /// Number of one bits.
    pub fn popcount(&self) -> u32 {
        self.value.count_ones()
    }

    /// Bit at position `index`, counted from the LSB. Out-of-range indices
    /// read as zero (they are above the mask).
    pub fn bit(&self, index: u8) -> bool {
        index < 32 && (self.value >> index) & 1 == 1
    }

    /// Number of bit positions in which `self` and `other` differ.
    ///
    /// Both sequences are expected to share a width; comparing sequences of
    /// different widths compares their zero-extended encodings.
    pub fn hamming_distance(&self, other: &Sequence) -> u32 {
        debug_assert_eq!(self.width, other.width);
        (self.value ^ other.value).count_ones()
    }

    /// Zero-padded, MSB-first binary rendering.
    pub fn bits(&self) -> String {
        format!("{:0width$b}", self.value, width = self.width as usize)
    }
}

impl std::fmt::Display for Sequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.bits())
    }
}

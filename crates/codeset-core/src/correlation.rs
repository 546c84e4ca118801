//! Correlation Analyzer — shift and inner self-correlation
//!
//! Two similarity measures over a single sequence, both computed with
//! XOR + popcount on the integer encoding:
//!
//! - **Shift correlation**: similarity between a sequence and a bit-shifted
//!   copy of itself. A high score means the sequence looks like its own
//!   shifted version, which is poor for clock and bit synchronization, so
//!   the reference pipeline rejects scores above a maximum.
//! - **Inner correlation**: similarity between the high and low halves of
//!   the sequence. Here a *high* score is desirable (redundancy between
//!   halves), so the reference pipeline requires scores above a minimum.
//!
//! The shifted copy uses an asymmetric fill rule: a left shift zero-fills
//! the vacated low bits, a right shift one-fills the vacated high bits.
//! The asymmetry approximates edge behavior differently per direction and
//! is preserved exactly; [`ShiftDirection::reference_fill`] captures it.
//!
//! ## Example
//!
//! ```rust
//! use codeset_core::correlation::{shift_correlation, inner_correlation, ShiftDirection, ShiftFill};
//! use codeset_core::types::Sequence;
//!
//! let seq = Sequence::new(0x9393, 16).unwrap();
//! let left = shift_correlation(&seq, 1, ShiftDirection::Left, ShiftFill::Zeros).unwrap();
//! let right = shift_correlation(&seq, 1, ShiftDirection::Right, ShiftFill::Ones).unwrap();
//! assert_eq!((left, right), (7, 8));
//! // Identical halves give the maximal inner score of width/2.
//! assert_eq!(inner_correlation(&seq).unwrap(), 8);
//! ```

use serde::{Deserialize, Serialize};

use crate::types::{width_mask, SearchError, SearchResult, Sequence};

/// Direction of the self-correlation shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftDirection {
    Left,
    Right,
}

impl ShiftDirection {
    /// The reference fill for this direction: left shifts zero-fill, right
    /// shifts one-fill.
    pub fn reference_fill(self) -> ShiftFill {
        match self {
            ShiftDirection::Left => ShiftFill::Zeros,
            ShiftDirection::Right => ShiftFill::Ones,
        }
    }
}

/// Fill value for the bit positions a shift vacates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftFill {
    Zeros,
    Ones,
}

/// Acceptance policy for a correlation score.
///
/// Shift correlation uses [`CorrelationGate::RejectAbove`] (too similar to
/// the shifted copy is bad); inner correlation uses
/// [`CorrelationGate::RequireAbove`] (half-to-half redundancy is good).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationGate {
    /// Accept scores at or below the threshold.
    RejectAbove(u32),
    /// Accept scores strictly above the threshold.
    RequireAbove(u32),
}

impl CorrelationGate {
    pub fn accepts(&self, score: u32) -> bool {
        match *self {
            CorrelationGate::RejectAbove(max) => score <= max,
            CorrelationGate::RequireAbove(min) => score > min,
        }
    }

    pub fn threshold(&self) -> u32 {
        match *self {
            CorrelationGate::RejectAbove(t) | CorrelationGate::RequireAbove(t) => t,
        }
    }
}

/// Correlation scores of one sequence under the reference transforms.
/// Computed on demand, never stored with the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CorrelationProfile {
    /// Left-shift correlation, zero-filled. Range `[0, width]`.
    pub left: u32,
    /// Right-shift correlation, one-filled. Range `[0, width]`.
    pub right: u32,
    /// High-half vs low-half correlation. Range `[0, width/2]`.
    pub inner: u32,
}

/// The shifted copy of `seq` under the given direction and fill.
fn shifted_value(seq: &Sequence, shift: u8, direction: ShiftDirection, fill: ShiftFill) -> u32 {
    if shift == 0 {
        return seq.value();
    }
    let width = seq.width() as u32;
    let s = shift as u32;
    let vacated_low = width_mask(shift);
    let vacated_high = vacated_low << (width - s);
    let base = if s >= width {
        0
    } else {
        match direction {
            ShiftDirection::Left => (seq.value() << s) & seq.mask(),
            ShiftDirection::Right => seq.value() >> s,
        }
    };
    match (direction, fill) {
        (_, ShiftFill::Zeros) => base,
        (ShiftDirection::Left, ShiftFill::Ones) => base | vacated_low,
        (ShiftDirection::Right, ShiftFill::Ones) => base | vacated_high,
    }
}

/// Correlation between `seq` and its shifted copy:
/// `width − popcount(seq XOR shifted)`.
///
/// A shift of zero scores the full width (a sequence is maximally
/// correlated with itself). Shifts beyond the width are rejected with
/// [`SearchError::ShiftTooLarge`].
pub fn shift_correlation(
    seq: &Sequence,
    shift: u8,
    direction: ShiftDirection,
    fill: ShiftFill,
) -> SearchResult<u32> {
    if shift > seq.width() {
        return Err(SearchError::ShiftTooLarge {
            shift,
            width: seq.width(),
        });
    }
    let xor = seq.value() ^ shifted_value(seq, shift, direction, fill);
    Ok(seq.width() as u32 - xor.count_ones())
}

/// Correlation between the high and low halves of `seq`:
/// `width/2 − popcount(high XOR low)`.
///
/// Requires an even width; odd widths are rejected with
/// [`SearchError::OddWidth`].
pub fn inner_correlation(seq: &Sequence) -> SearchResult<u32> {
    if seq.width() % 2 != 0 {
        return Err(SearchError::OddWidth(seq.width()));
    }
    let half = seq.width() / 2;
    let high = seq.value() >> half;
    let low = seq.value() & width_mask(half);
    Ok(half as u32 - (high ^ low).count_ones())
}

/// Profile of `seq` under the reference transforms at the given shift.
pub fn correlation_profile(seq: &Sequence, shift: u8) -> SearchResult<CorrelationProfile> {
    Ok(CorrelationProfile {
        left: shift_correlation(
            seq,
            shift,
            ShiftDirection::Left,
            ShiftDirection::Left.reference_fill(),
        )?,
        right: shift_correlation(
            seq,
            shift,
            ShiftDirection::Right,
            ShiftDirection::Right.reference_fill(),
        )?,
        inner: inner_correlation(seq)?,
    })
}

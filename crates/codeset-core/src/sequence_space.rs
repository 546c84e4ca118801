//! Sequence Space — enumeration of fixed-width binary sequences
//!
//! A [`SequenceSpace`] pairs a bit width with an enumeration strategy and
//! yields every sequence the strategy covers, lazily and in a fixed order.
//! Iteration is restartable: each call to [`SequenceSpace::iter`] starts a
//! fresh pass over the same values.
//!
//! Two strategies are supported:
//!
//! - [`EnumerationStrategy::Stride`]: all integers in `[start, 2^width)`
//!   with a fixed step, ascending. The usual configuration is odd integers
//!   only (start 1, stride 2), which guarantees a trailing one bit.
//! - [`EnumerationStrategy::RootDerived`]: sequences computed from a list
//!   of root indices by a caller-supplied mapping. Roots that are not
//!   coprime to the width are skipped; a root list with no valid roots
//!   yields an empty space, not an error.
//!
//! ## Example
//!
//! ```rust
//! use codeset_core::sequence_space::{EnumerationStrategy, SequenceSpace};
//!
//! let space = SequenceSpace::new(4, EnumerationStrategy::odd()).unwrap();
//! let values: Vec<u32> = space.iter().map(|s| s.value()).collect();
//! assert_eq!(values, vec![1, 3, 5, 7, 9, 11, 13, 15]);
//! ```

use crate::types::{SearchError, SearchResult, Sequence, MAX_WIDTH};

/// Mapping from a root index to a sequence value for root-derived
/// enumeration. The second argument is the sequence width.
pub type RootMap = fn(root: u32, width: u8) -> u32;

/// How a [`SequenceSpace`] enumerates its sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumerationStrategy {
    /// All integers in `[start, 2^width)`, stepping by `stride`.
    Stride { start: u32, stride: u32 },
    /// Values derived from root indices. Only roots coprime to the width
    /// are used; enumeration order is the order of `roots`.
    RootDerived { roots: Vec<u32>, map: RootMap },
}

impl EnumerationStrategy {
    /// Odd integers only (start 1, stride 2).
    pub fn odd() -> Self {
        EnumerationStrategy::Stride { start: 1, stride: 2 }
    }

    /// Every nonzero integer in the space.
    pub fn exhaustive() -> Self {
        EnumerationStrategy::Stride { start: 1, stride: 1 }
    }
}

/// A lazy, finite, restartable space of fixed-width sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceSpace {
    width: u8,
    strategy: EnumerationStrategy,
}

impl SequenceSpace {
    /// Create a space over `width`-bit sequences.
    pub fn new(width: u8, strategy: EnumerationStrategy) -> SearchResult<Self> {
        if width == 0 || width > MAX_WIDTH {
            return Err(SearchError::InvalidWidth(width));
        }
        if let EnumerationStrategy::Stride { stride, .. } = strategy {
            if stride == 0 {
                return Err(SearchError::ZeroStride);
            }
        }
        Ok(Self { width, strategy })
    }

    /// Bit width of every sequence in the space.
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Number of sequences the space will yield.
    pub fn len(&self) -> usize {
        let limit = 1u64 << self.width;
        match &self.strategy {
            EnumerationStrategy::Stride { start, stride } => {
                let start = *start as u64;
                if start >= limit {
                    0
                } else {
                    ((limit - start - 1) / *stride as u64 + 1) as usize
                }
            }
            EnumerationStrategy::RootDerived { roots, .. } => roots
                .iter()
                .filter(|&&r| gcd(r, self.width as u32) == 1)
                .count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Start a fresh pass over the space, in generation order.
    pub fn iter(&self) -> SpaceIter<'_> {
        let limit = 1u64 << self.width;
        let state = match &self.strategy {
            EnumerationStrategy::Stride { start, stride } => IterState::Stride {
                next: *start as u64,
                stride: *stride as u64,
            },
            EnumerationStrategy::RootDerived { roots, map } => IterState::Roots {
                roots: roots.iter(),
                map: *map,
            },
        };
        SpaceIter {
            width: self.width,
            limit,
            state,
        }
    }
}

/// Iterator over a [`SequenceSpace`].
#[derive(Debug, Clone)]
pub struct SpaceIter<'a> {
    width: u8,
    limit: u64,
    state: IterState<'a>,
}

#[derive(Debug, Clone)]
enum IterState<'a> {
    Stride { next: u64, stride: u64 },
    Roots { roots: std::slice::Iter<'a, u32>, map: RootMap },
}

impl Iterator for SpaceIter<'_> {
    type Item = Sequence;

    fn next(&mut self) -> Option<Sequence> {
        match &mut self.state {
            IterState::Stride { next, stride } => {
                if *next >= self.limit {
                    return None;
                }
                let value = *next as u32;
                *next += *stride;
                Some(Sequence::from_raw(value, self.width))
            }
            IterState::Roots { roots, map } => {
                for &root in roots.by_ref() {
                    if gcd(root, self.width as u32) == 1 {
                        return Some(Sequence::from_raw(map(root, self.width), self.width));
                    }
                }
                None
            }
        }
    }
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_odd_stride_enumeration() {
        let space = SequenceSpace::new(4, EnumerationStrategy::odd()).unwrap();
        let values: Vec<u32> = space.iter().map(|s| s.value()).collect();
        assert_eq!(values, vec![1, 3, 5, 7, 9, 11, 13, 15]);
        assert_eq!(space.len(), 8);
    }

    #[test]
    fn test_exhaustive_enumeration() {
        let space = SequenceSpace::new(3, EnumerationStrategy::exhaustive()).unwrap();
        let values: Vec<u32> = space.iter().map(|s| s.value()).collect();
        assert_eq!(values, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_iteration_is_restartable() {
        let space = SequenceSpace::new(6, EnumerationStrategy::odd()).unwrap();
        let first: Vec<Sequence> = space.iter().collect();
        let second: Vec<Sequence> = space.iter().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), space.len());
    }

    #[test]
    fn test_sixteen_bit_odd_count() {
        let space = SequenceSpace::new(16, EnumerationStrategy::odd()).unwrap();
        assert_eq!(space.len(), 32768);
    }

    #[test]
    fn test_root_derived_skips_non_coprime_roots() {
        fn triple(root: u32, _width: u8) -> u32 {
            root * 3
        }
        let space = SequenceSpace::new(
            16,
            EnumerationStrategy::RootDerived {
                roots: vec![1, 2, 3, 4, 5, 6, 7, 8],
                map: triple,
            },
        )
        .unwrap();
        // gcd(root, 16) == 1 keeps odd roots only.
        let values: Vec<u32> = space.iter().map(|s| s.value()).collect();
        assert_eq!(values, vec![3, 9, 15, 21]);
        assert_eq!(space.len(), 4);
    }

    #[test]
    fn test_root_derived_empty_is_not_an_error() {
        fn identity(root: u32, _width: u8) -> u32 {
            root
        }
        let space = SequenceSpace::new(
            16,
            EnumerationStrategy::RootDerived {
                roots: vec![2, 4, 6],
                map: identity,
            },
        )
        .unwrap();
        assert!(space.is_empty());
        assert_eq!(space.iter().count(), 0);
    }

    #[test]
    fn test_invalid_configuration() {
        assert_eq!(
            SequenceSpace::new(0, EnumerationStrategy::odd()).unwrap_err(),
            SearchError::InvalidWidth(0)
        );
        assert_eq!(
            SequenceSpace::new(8, EnumerationStrategy::Stride { start: 1, stride: 0 }).unwrap_err(),
            SearchError::ZeroStride
        );
    }

    #[test]
    fn test_start_beyond_space_is_empty() {
        let space =
            SequenceSpace::new(4, EnumerationStrategy::Stride { start: 16, stride: 1 }).unwrap();
        assert!(space.is_empty());
        assert_eq!(space.iter().count(), 0);
    }
}

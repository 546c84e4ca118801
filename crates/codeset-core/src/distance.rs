//! Distance Matrix — pairwise Hamming distance over a candidate set
//!
//! Stores the distance of every unordered candidate pair in a condensed
//! upper-triangular layout (`n·(n−1)/2` entries). Distance to self is
//! always zero and is excluded from storage and queries; `distance(i, i)`
//! returns `None`.
//!
//! Besides plain lookup the matrix answers the questions the selector and
//! diagnostic reports need: the global minimum distance, the pairs above or
//! below a threshold, and how many neighbors a candidate has at or below a
//! threshold (its conflict degree).
//!
//! ## Example
//!
//! ```rust
//! use codeset_core::distance::DistanceMatrix;
//! use codeset_core::pipeline::CandidateSet;
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
//! assert_eq!(matrix.distance(0, 1), Some(10));
//! assert_eq!(matrix.min_distance(), Some(4));
//! ```

use serde::Serialize;

use crate::pipeline::CandidateSet;

/// Symmetric pairwise Hamming distances, diagonal excluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistanceMatrix {
    count: usize,
    width: u8,
    /// Condensed upper triangle, row-major: (0,1), (0,2), …, (n−2,n−1).
    distances: Vec<u32>,
}

impl DistanceMatrix {
    /// Compute all unordered pair distances via XOR + popcount.
    pub fn build(candidates: &CandidateSet) -> Self {
        let seqs = candidates.as_slice();
        let n = seqs.len();
        let mut distances = Vec::with_capacity(n.saturating_sub(1) * n / 2);
        for i in 0..n {
            for j in (i + 1)..n {
                distances.push(seqs[i].hamming_distance(&seqs[j]));
            }
        }
        Self {
            count: n,
            width: candidates.width(),
            distances,
        }
    }

    pub(crate) fn from_parts(count: usize, width: u8, distances: Vec<u32>) -> Self {
        debug_assert_eq!(distances.len(), count.saturating_sub(1) * count / 2);
        Self {
            count,
            width,
            distances,
        }
    }

    /// Number of candidates the matrix covers.
    pub fn candidate_count(&self) -> usize {
        self.count
    }

    /// Number of stored unordered pairs.
    pub fn pair_count(&self) -> usize {
        self.distances.len()
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    fn pair_index(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < j);
        i * (2 * self.count - i - 1) / 2 + (j - i - 1)
    }

    /// Distance between candidates `i` and `j`. `None` on the diagonal or
    /// out of range.
    pub fn distance(&self, i: usize, j: usize) -> Option<u32> {
        if i == j || i >= self.count || j >= self.count {
            return None;
        }
        let (a, b) = if i < j { (i, j) } else { (j, i) };
        Some(self.distances[self.pair_index(a, b)])
    }

    /// Smallest pairwise distance, if the matrix has at least one pair.
    pub fn min_distance(&self) -> Option<u32> {
        self.distances.iter().copied().min()
    }

    /// The first pair (in pair order) achieving the minimum distance.
    pub fn min_distance_pair(&self) -> Option<(usize, usize, u32)> {
        let min = self.min_distance()?;
        self.pairs().find(|&(_, _, d)| d == min)
    }

    /// All pairs with distance strictly below `threshold`, in pair order.
    pub fn pairs_below(&self, threshold: u32) -> Vec<(usize, usize, u32)> {
        self.pairs().filter(|&(_, _, d)| d < threshold).collect()
    }

    /// All pairs with distance strictly above `threshold`, in pair order.
    pub fn pairs_above(&self, threshold: u32) -> Vec<(usize, usize, u32)> {
        self.pairs().filter(|&(_, _, d)| d > threshold).collect()
    }

    /// How many other candidates sit at distance ≤ `threshold` from
    /// candidate `i` — the complement of the strict-greater separation test,
    /// used to spot weak candidates worth excluding.
    pub fn degree_at_or_below(&self, i: usize, threshold: u32) -> usize {
        (0..self.count)
            .filter(|&j| j != i)
            .filter(|&j| self.distance(i, j).is_some_and(|d| d <= threshold))
            .count()
    }

    /// All stored pairs as `(i, j, distance)` with `i < j`.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize, u32)> + '_ {
        let n = self.count;
        (0..n)
            .flat_map(move |i| ((i + 1)..n).map(move |j| (i, j)))
            .zip(self.distances.iter().copied())
            .map(|((i, j), d)| (i, j, d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sequence;

    fn set16(values: &[u32]) -> CandidateSet {
        CandidateSet::from_sequences(
            16,
            values
                .iter()
                .map(|&v| Sequence::new(v, 16).unwrap())
                .collect(),
        )
        .unwrap()
    }

    fn trio() -> DistanceMatrix {
        DistanceMatrix::build(&set16(&[0x9393, 0x4949, 0x9595]))
    }

    #[test]
    fn test_trio_distances() {
        let matrix = trio();
        assert_eq!(matrix.candidate_count(), 3);
        assert_eq!(matrix.pair_count(), 3);
        assert_eq!(matrix.distance(0, 1), Some(10));
        assert_eq!(matrix.distance(0, 2), Some(4));
        assert_eq!(matrix.distance(1, 2), Some(10));
    }

    #[test]
    fn test_symmetry_and_diagonal() {
        let matrix = trio();
        for i in 0..3 {
            assert_eq!(matrix.distance(i, i), None);
            for j in 0..3 {
                assert_eq!(matrix.distance(i, j), matrix.distance(j, i));
            }
        }
        assert_eq!(matrix.distance(0, 3), None);
    }

    #[test]
    fn test_min_distance() {
        let matrix = trio();
        assert_eq!(matrix.min_distance(), Some(4));
        assert_eq!(matrix.min_distance_pair(), Some((0, 2, 4)));
    }

    #[test]
    fn test_threshold_queries() {
        let matrix = trio();
        assert_eq!(matrix.pairs_above(8), vec![(0, 1, 10), (1, 2, 10)]);
        assert_eq!(matrix.pairs_below(8), vec![(0, 2, 4)]);
        // Strict comparisons: a distance equal to the threshold is neither.
        assert_eq!(matrix.pairs_above(10), vec![]);
        assert_eq!(matrix.pairs_below(4), vec![]);
    }

    #[test]
    fn test_degree_at_or_below() {
        let matrix = trio();
        assert_eq!(matrix.degree_at_or_below(0, 8), 1);
        assert_eq!(matrix.degree_at_or_below(1, 8), 0);
        assert_eq!(matrix.degree_at_or_below(2, 8), 1);
        assert_eq!(matrix.degree_at_or_below(0, 10), 2);
    }

    #[test]
    fn test_triangle_inequality() {
        // Survivors of the 8-bit reference pipeline.
        let values = [
            0b0011_0011,
            0b0101_0101,
            0b1001_1001,
            0b1001_1011,
            0b1010_1011,
            0b1011_0011,
            0b1100_1101,
            0b1101_0101,
            0b1101_1001,
        ];
        let candidates = CandidateSet::from_sequences(
            8,
            values
                .iter()
                .map(|&v| Sequence::new(v, 8).unwrap())
                .collect(),
        )
        .unwrap();
        let matrix = DistanceMatrix::build(&candidates);
        let n = matrix.candidate_count();
        for i in 0..n {
            for j in 0..n {
                for k in 0..n {
                    if i == j || j == k || i == k {
                        continue;
                    }
                    let d_ij = matrix.distance(i, j).unwrap();
                    let d_jk = matrix.distance(j, k).unwrap();
                    let d_ik = matrix.distance(i, k).unwrap();
                    assert!(d_ik <= d_ij + d_jk);
                }
            }
        }
    }

    #[test]
    fn test_small_sets() {
        let empty = DistanceMatrix::build(&set16(&[]));
        assert_eq!(empty.pair_count(), 0);
        assert_eq!(empty.min_distance(), None);

        let single = DistanceMatrix::build(&set16(&[0x9393]));
        assert_eq!(single.pair_count(), 0);
        assert_eq!(single.distance(0, 0), None);
        assert_eq!(single.min_distance_pair(), None);
    }

    #[test]
    fn test_pairs_iteration_order() {
        let matrix = trio();
        let pairs: Vec<_> = matrix.pairs().collect();
        assert_eq!(pairs, vec![(0, 1, 10), (0, 2, 4), (1, 2, 10)]);
    }
}

//! `Solution` (spec §3, §6).

use crate::bucket::Bucket;
use crate::params::{EXTRA_NONCE_SIZE, JUINT_SIZE, PUZZLE_SIZE};
use crate::puzzle::Puzzle;

/// A claimed solution to a [`Puzzle`]: `{ puzzle, extra_nonce, selector,
/// buckets }` (spec §3). Written once by [`crate::prover::find_solution`]
/// and never mutated after return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub puzzle: Puzzle,
    pub extra_nonce: u32,
    pub selector: u64,
    pub buckets: Vec<Bucket>,
}

impl Solution {
    /// Reconstruct `full_nonce = puzzle ‖ extra_nonce` (spec §3, §6):
    /// `PUZZLE_SIZE + EXTRA_NONCE_SIZE` bytes, little-endian extra-nonce.
    pub fn full_nonce(&self) -> Vec<u8> {
        full_nonce(&self.puzzle, self.extra_nonce)
    }

    /// Concatenate the `K` selected buckets' explicit serialization, in
    /// order — the payload fed to the outer hashcash (spec §4.3 step 5b,
    /// §4.4 step 6).
    pub fn bucket_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for bucket in &self.buckets {
            out.extend_from_slice(&bucket.to_bytes());
        }
        out
    }

    /// Explicit LE serialization of the whole solution (spec §6):
    /// `Puzzle (32) ‖ extra_nonce (4, LE) ‖ selector (4, LE) ‖ K · Bucket`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            PUZZLE_SIZE + EXTRA_NONCE_SIZE + JUINT_SIZE + self.buckets.len() * 64,
        );
        out.extend_from_slice(self.puzzle.as_bytes());
        out.extend_from_slice(&self.extra_nonce.to_le_bytes());
        out.extend_from_slice(&(self.selector as u32).to_le_bytes());
        out.extend_from_slice(&self.bucket_bytes());
        out
    }
}

/// Build `full_nonce = puzzle ‖ extra_nonce` (spec §3, §6).
pub fn full_nonce(puzzle: &Puzzle, extra_nonce: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity(PUZZLE_SIZE + EXTRA_NONCE_SIZE);
    out.extend_from_slice(puzzle.as_bytes());
    out.extend_from_slice(&extra_nonce.to_le_bytes());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_nonce_has_expected_length() {
        let puzzle = Puzzle([3u8; PUZZLE_SIZE]);
        let fc = full_nonce(&puzzle, 7);
        assert_eq!(fc.len(), PUZZLE_SIZE + EXTRA_NONCE_SIZE);
        assert_eq!(&fc[..PUZZLE_SIZE], puzzle.as_bytes());
        assert_eq!(&fc[PUZZLE_SIZE..], &7u32.to_le_bytes());
    }

    #[test]
    fn bucket_bytes_concatenates_in_order() {
        let solution = Solution {
            puzzle: Puzzle([0u8; PUZZLE_SIZE]),
            extra_nonce: 0,
            selector: 0,
            buckets: vec![
                Bucket { prefix: 1, indices: vec![9, 8] },
                Bucket { prefix: 2, indices: vec![7, 6] },
            ],
        };
        let bytes = solution.bucket_bytes();
        let mut expected = solution.buckets[0].to_bytes();
        expected.extend_from_slice(&solution.buckets[1].to_bytes());
        assert_eq!(bytes, expected);
    }
}

//! `Puzzle` and `PuzzleFactory` (spec §3, §4.5).

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::JugglerResult;
use crate::params::PUZZLE_SIZE;

/// Opaque puzzle bytes. Created once by [`PuzzleFactory::create`], immutable
/// thereafter (spec §3 Lifecycle).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Puzzle(pub [u8; PUZZLE_SIZE]);

impl Puzzle {
    /// Borrow the raw puzzle bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; PUZZLE_SIZE] {
        &self.0
    }
}

/// Fills a [`Puzzle`] from a cryptographically secure random source
/// (spec §4.5). No seed or determinism knobs are exposed — the random-byte
/// source is an external collaborator per spec §1, but this crate must pick
/// a concrete one, and `OsRng` is it.
pub struct PuzzleFactory;

impl PuzzleFactory {
    /// Create a new random puzzle.
    ///
    /// Failure to read the OS random source is fatal (spec §4.5, §7): the
    /// caller is expected to terminate the process rather than retry.
    pub fn create() -> JugglerResult<Puzzle> {
        let mut bytes = [0u8; PUZZLE_SIZE];
        OsRng.try_fill_bytes(&mut bytes)?;
        Ok(Puzzle(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_distinct_puzzles() {
        let a = PuzzleFactory::create().unwrap();
        let b = PuzzleFactory::create().unwrap();
        assert_ne!(a, b, "two OS-random puzzles should (virtually always) differ");
    }

    #[test]
    fn puzzle_is_32_bytes() {
        let p = PuzzleFactory::create().unwrap();
        assert_eq!(p.as_bytes().len(), PUZZLE_SIZE);
    }
}

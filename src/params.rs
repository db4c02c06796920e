//! Compile-time-in-spirit, runtime-in-practice puzzle parameters.
//!
//! `spec.md` §3 describes `PREFIX_BITS`, `BUCKET_SIZE_BITS`, `DIFFICULTY_BITS`
//! and `INPUT_BUCKETS` as fixed compile-time constants. This crate keeps them
//! fixed per call but carries them as a plain `Params` value rather than a
//! pile of `const`s, so the small-parameter end-to-end scenarios in spec §8
//! (P=4, B=2, K=2, D=2) and the production parameters (P=20, B=6, D=18, K=4)
//! can both be exercised from the same build — see `SPEC_FULL.md` §3 for the
//! Open Question resolution this records.

use crate::error::{JugglerError, JugglerResult};

/// Byte width of [`Puzzle`](crate::puzzle::Puzzle).
pub const PUZZLE_SIZE: usize = 32;

/// Byte width of the prover's extra-nonce counter.
pub const EXTRA_NONCE_SIZE: usize = 4;

/// Byte width of `juint` (fixed at `u32` for every parameter set this crate
/// ships — see `SPEC_FULL.md` §3).
pub const JUINT_SIZE: usize = 4;

/// A fixed puzzle parameter set.
///
/// All fields come directly from spec §3: `P`, `B`, `D`, `K`. `juint` is
/// always `u32` in this crate (see module docs), so there is no separate
/// "integer width" field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    /// `PREFIX_BITS` (P): width of the bucket-selector suffix.
    pub prefix_bits: u32,
    /// `BUCKET_SIZE_BITS` (B): each bucket holds exactly `2^B` preimages.
    pub bucket_size_bits: u32,
    /// `DIFFICULTY_BITS` (D): trailing zero bits required of the outer hashcash.
    pub difficulty_bits: u32,
    /// `INPUT_BUCKETS` (K): buckets fed into the outer hashcash.
    pub input_buckets: usize,
}

impl Params {
    /// The final variant from spec §3: P=20, B=6, D=M-2=18, K=4.
    ///
    /// Prover working set at these parameters is
    /// `2^20 * (1 + 2^6) * 4` bytes ≈ 272 MiB (spec §4.3: "hundreds of MB").
    pub const PRODUCTION: Params = Params {
        prefix_bits: 20,
        bucket_size_bits: 6,
        difficulty_bits: 18,
        input_buckets: 4,
    };

    /// The small parameter set from spec §8's end-to-end scenarios
    /// (P=4, B=2, K=2, D=2), for fast tests.
    pub const TEST_SMALL: Params = Params {
        prefix_bits: 4,
        bucket_size_bits: 2,
        difficulty_bits: 2,
        input_buckets: 2,
    };

    /// `MEMORY_BITS` (M) = P + B: the prover scans preimages in `[0, 2^M)`.
    #[inline]
    pub fn memory_bits(&self) -> u32 {
        self.prefix_bits + self.bucket_size_bits
    }

    /// Number of buckets: `2^P`.
    #[inline]
    pub fn num_buckets(&self) -> usize {
        1usize << self.prefix_bits
    }

    /// Per-bucket capacity: `2^B`.
    #[inline]
    pub fn bucket_capacity(&self) -> usize {
        1usize << self.bucket_size_bits
    }

    /// Number of preimages the prover/verifier scan: `2^M`.
    #[inline]
    pub fn preimage_space(&self) -> u64 {
        1u64 << self.memory_bits()
    }

    /// Low-`P`-bits mask applied to every hash-derived prefix/suffix.
    #[inline]
    pub fn prefix_mask(&self) -> u32 {
        if self.prefix_bits >= 32 {
            u32::MAX
        } else {
            (1u32 << self.prefix_bits) - 1
        }
    }

    /// Selector upper bound (exclusive): `2^{D+2}` — spec §3 invariant 4 and
    /// the Design Notes' "selector-budget tightness" Open Question, fixed
    /// here at the final spec variant's value.
    #[inline]
    pub fn selector_bound(&self) -> u64 {
        1u64 << (self.difficulty_bits as u64 + 2)
    }

    /// Validate the structural constraints spec §3 places on a parameter set:
    /// `K · sizeof(juint) < 64` bytes (so one hash call yields all selectors),
    /// and that bucket/prefix counts are non-degenerate.
    pub fn validate(&self) -> JugglerResult<()> {
        if self.input_buckets == 0 {
            return Err(JugglerError::InvalidParams("input_buckets must be nonzero"));
        }
        if self.input_buckets * JUINT_SIZE >= 64 {
            return Err(JugglerError::InvalidParams(
                "K * sizeof(juint) must be < 64 bytes",
            ));
        }
        if self.prefix_bits == 0 {
            return Err(JugglerError::InvalidParams("prefix_bits must be nonzero"));
        }
        if self.memory_bits() >= u32::BITS {
            return Err(JugglerError::InvalidParams(
                "memory_bits must fit in a u32 juint",
            ));
        }
        Ok(())
    }
}

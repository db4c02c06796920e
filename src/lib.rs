//! `juggler_pow` — a memory-hard proof-of-work puzzle.
//!
//! Three operations, matching `spec.md` §1:
//! - [`puzzle::PuzzleFactory::create`] — create a random puzzle.
//! - [`prover::find_solution`] — find a solution (memory-hard; large working set).
//! - [`verifier::check_solution`] — check a proposed solution (cheap relative
//!   to finding one).
//!
//! Everything above [`hash`] and [`bucket`] is single-threaded and
//! synchronous (spec §5): each call owns its working memory for the
//! duration of the call and releases it on return.
//!
//! This crate has no I/O side effects of its own (no logging subscriber
//! initialization, no env var reads); see `src/bin/juggler.rs` for the CLI
//! entry point that wires `tracing-subscriber` on top.

#![deny(rust_2018_idioms, unused_must_use)]

pub mod bucket;
pub mod error;
pub mod hash;
pub mod params;
pub mod prover;
pub mod puzzle;
pub mod solution;
pub mod verifier;

pub use error::{JugglerError, JugglerResult};
pub use params::Params;
pub use prover::find_solution;
pub use puzzle::{Puzzle, PuzzleFactory};
pub use solution::Solution;
pub use verifier::check_solution;

//! CLI entry point: create a puzzle, solve it, verify it, report the result.
//!
//! Grounded on `examples/original_source/src/juggler.c`'s three-phase timing
//! report (create / find / check), rebuilt with `tracing` +
//! `tracing-subscriber` in place of raw `printf`, following the
//! `anyhow::Result`-returning `main` pattern used by
//! `examples/emilengler-arti/crates/arti/src/main.rs`.
//!
//! No arguments are required. `--quiet` suppresses the human-readable report
//! (only the exit code is meaningful then); `RUST_LOG` controls verbosity
//! via the standard `tracing-subscriber` `EnvFilter`. Neither touches the
//! fixed `Params::PRODUCTION` the core runs at (spec §6: "No persisted
//! state, no environment variables, no configuration file" for the core
//! itself). `--test-small` swaps in `Params::TEST_SMALL`; it exists purely
//! so the end-to-end CLI smoke test doesn't have to run a full memory-hard
//! search, and is not advertised anywhere else.

use std::time::Instant;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use juggler_pow::{check_solution, find_solution, Params, PuzzleFactory};

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let quiet = args.iter().any(|a| a == "--quiet" || a == "-q");
    let test_small = args.iter().any(|a| a == "--test-small");

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let params = if test_small { Params::TEST_SMALL } else { Params::PRODUCTION };
    params
        .validate()
        .context("built-in parameters failed validation (this is a bug)")?;

    let t0 = Instant::now();
    let puzzle = PuzzleFactory::create().context("failed to create a puzzle")?;
    let create_elapsed = t0.elapsed();

    let t1 = Instant::now();
    let solution = find_solution(&puzzle, &params);
    let find_elapsed = t1.elapsed();

    let t2 = Instant::now();
    let verified = check_solution(&puzzle, &solution, &params);
    let check_elapsed = t2.elapsed();

    if !quiet {
        let puzzle_hex_prefix: String = puzzle
            .as_bytes()
            .iter()
            .take(8)
            .map(|b| format!("{b:02x}"))
            .collect();

        println!("Puzzle:             {puzzle_hex_prefix}\u{2026}");
        println!("Solution size:      {} bytes", solution.to_bytes().len());
        println!("Time to create:     {create_elapsed:.2?}");
        println!("Time to find:       {find_elapsed:.2?}");
        println!("Time to verify:     {check_elapsed:.2?}");
        println!(
            "Result:             {}",
            if verified { "solution verified" } else { "solution is WRONG (bug!)" }
        );
    }

    if verified {
        Ok(())
    } else {
        tracing::error!("prover produced a solution that failed verification");
        std::process::exit(1);
    }
}

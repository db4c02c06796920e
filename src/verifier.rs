//! The verifier: `check_solution` (spec §4.4).

use tracing::debug;

use crate::bucket::BucketAccumulator;
use crate::hash::{hash_prefix, outer_pow, select_prefixes};
use crate::params::Params;
use crate::puzzle::Puzzle;
use crate::solution::Solution;

/// Check whether `solution` is a valid solution to `puzzle` under `params`.
///
/// Deterministic and single-pass, short-circuiting on the first failure
/// (spec §4.4). Returns a plain `bool` — an invalid solution is never an
/// `Err`, only ever `false` (spec §7).
pub fn check_solution(puzzle: &Puzzle, solution: &Solution, params: &Params) -> bool {
    // 1. Puzzle binding.
    if solution.puzzle != *puzzle {
        debug!("rejected: solution is bound to a different puzzle");
        return false;
    }

    // 2. Selector range (bounds the remaining work untrusted input can force).
    if solution.selector >= params.selector_bound() {
        debug!(selector = solution.selector, "rejected: selector out of range");
        return false;
    }

    // 3. Reconstruct full_nonce.
    let full_nonce = solution.full_nonce();

    // 4. Selector derivation: the submitted buckets must be the ones the
    //    selector actually picks.
    if solution.buckets.len() != params.input_buckets {
        debug!("rejected: wrong number of buckets");
        return false;
    }
    let prefixes = select_prefixes(params, &full_nonce, solution.selector);
    for (bucket, expected_prefix) in solution.buckets.iter().zip(prefixes.iter()) {
        if bucket.prefix != *expected_prefix {
            debug!("rejected: submitted buckets weren't the ones the selector chose");
            return false;
        }
        if bucket.indices.len() != params.bucket_capacity() {
            debug!("rejected: bucket has the wrong capacity");
            return false;
        }
    }

    // 5. Bucket re-derivation: scan every preimage in [0, 2^M) and fold the
    //    ones matching a selected prefix into a fresh accumulator, exactly
    //    as the prover did. This is the asymmetric "redo the memory-hard
    //    work, but only for K buckets" step (spec §4.4 rationale).
    let capacity = params.bucket_capacity();
    let mut fresh: Vec<BucketAccumulator> = prefixes
        .iter()
        .map(|_| BucketAccumulator::init(capacity))
        .collect();

    let n = params.preimage_space();
    for preimage in 0..n {
        let preimage = preimage as u32;
        let p = hash_prefix(params, &full_nonce, preimage);
        for (i, expected_prefix) in prefixes.iter().enumerate() {
            if p == *expected_prefix {
                fresh[i].update(preimage);
            }
        }
    }

    for (i, (acc, expected_prefix)) in fresh.into_iter().zip(prefixes.iter()).enumerate() {
        let recomputed = acc.finalize(*expected_prefix);
        if recomputed != solution.buckets[i] {
            debug!(
                bucket_index = i,
                "rejected: re-accumulated bucket does not match submitted bytes \
                 (malicious or corrupted solution)"
            );
            return false;
        }
    }

    // 6. Outer hashcash, recomputed exactly as the prover computed it.
    let concat = solution.bucket_bytes();
    let pow = outer_pow(params, &full_nonce, &concat);
    if pow != 0 {
        debug!("rejected: not a solution to the hashcash proof of work");
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prover::find_solution;

    fn fixture() -> (Puzzle, Solution, Params) {
        let params = Params::TEST_SMALL;
        let puzzle = Puzzle([1u8; 32]);
        let solution = find_solution(&puzzle, &params);
        (puzzle, solution, params)
    }

    #[test]
    fn soundness_prover_output_always_verifies() {
        // Testable property 1.
        let (puzzle, solution, params) = fixture();
        assert!(check_solution(&puzzle, &solution, &params));
    }

    #[test]
    fn puzzle_binding_rejects_wrong_puzzle() {
        // Testable property 2 / scenario S2.
        let (_, solution, params) = fixture();
        let mut wrong_bytes = *solution.puzzle.as_bytes();
        let last = wrong_bytes.len() - 1;
        wrong_bytes[last] ^= 0xFF;
        let wrong_puzzle = Puzzle(wrong_bytes);
        assert!(!check_solution(&wrong_puzzle, &solution, &params));
    }

    #[test]
    fn tampered_bucket_content_is_rejected() {
        // Testable property 5 / scenario S3.
        let (puzzle, mut solution, params) = fixture();
        solution.buckets[0].indices[0] ^= 1;
        assert!(!check_solution(&puzzle, &solution, &params));
    }

    #[test]
    fn tampered_selector_is_rejected() {
        // Testable property 3 / scenario S4.
        let (puzzle, mut solution, params) = fixture();
        solution.selector += 1;
        assert!(!check_solution(&puzzle, &solution, &params));
    }

    #[test]
    fn tampered_prefix_label_is_rejected() {
        // Testable property 4.
        let (puzzle, mut solution, params) = fixture();
        let num_buckets = params.num_buckets() as u32;
        solution.buckets[0].prefix = (solution.buckets[0].prefix + 1) % num_buckets;
        assert!(!check_solution(&puzzle, &solution, &params));
    }

    #[test]
    fn out_of_range_selector_is_rejected_without_preimage_scan() {
        // Testable property 6 / scenario S5. We can't directly observe "no
        // scan happened" from the boolean result, but the call must still
        // return promptly and reject regardless of what buckets look like.
        let (puzzle, mut solution, params) = fixture();
        solution.selector = params.selector_bound();
        assert!(!check_solution(&puzzle, &solution, &params));
    }

    #[test]
    fn swapped_buckets_failing_hashcash_are_rejected() {
        // Testable property 7: find two puzzles, take a structurally valid
        // bucket set from one attempt and splice it where it breaks the
        // hashcash condition for the original nonce/selector.
        let (puzzle, mut solution, params) = fixture();
        let other = find_solution(&Puzzle([2u8; 32]), &params);
        // Cross-splicing buckets from a different puzzle/full_nonce attempt
        // will, overwhelmingly likely, fail both the selector-derivation
        // check and the hashcash check; either way the result must be false.
        solution.buckets = other.buckets;
        assert!(!check_solution(&puzzle, &solution, &params));
    }

    #[test]
    fn wrong_bucket_count_is_rejected() {
        let (puzzle, mut solution, params) = fixture();
        solution.buckets.pop();
        assert!(!check_solution(&puzzle, &solution, &params));
    }
}

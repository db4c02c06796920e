//! The prover: `find_solution` (spec §4.3).

use tracing::debug;

use crate::bucket::BucketStore;
use crate::hash::{outer_pow, select_prefixes};
use crate::params::Params;
use crate::puzzle::Puzzle;
use crate::solution::{full_nonce, Solution};

/// Build a full [`Solution`] for `puzzle` under `params`.
///
/// Allocates one [`BucketStore`] and retries with successive `extra_nonce`
/// values until a selector draw satisfies the outer hashcash (spec §4.3).
/// This is the sequential reference implementation; spec §5 permits a
/// parallel prover as long as it reproduces byte-identical solutions, which
/// this crate does not attempt (see `DESIGN.md`).
pub fn find_solution(puzzle: &Puzzle, params: &Params) -> Solution {
    let mut store = BucketStore::new(params);
    let selector_bound = params.selector_bound();

    let mut extra_nonce: u32 = 0;
    loop {
        let nonce = full_nonce(puzzle, extra_nonce);
        debug!(extra_nonce, "building bucket table for this attempt");
        let buckets = store.build(&nonce);

        let mut selector: u64 = 0;
        while selector < selector_bound {
            let prefixes = select_prefixes(params, &nonce, selector);
            let selected: Vec<_> = prefixes
                .iter()
                .map(|&p| buckets[p as usize].clone())
                .collect();

            let concat = {
                let mut out = Vec::new();
                for bucket in &selected {
                    out.extend_from_slice(&bucket.to_bytes());
                }
                out
            };
            let pow = outer_pow(params, &nonce, &concat);

            if pow == 0 {
                debug!(extra_nonce, selector, "found a solution");
                return Solution {
                    puzzle: *puzzle,
                    extra_nonce,
                    selector,
                    buckets: selected,
                };
            }

            if selector % 100_000 == 0 {
                debug!(extra_nonce, selector, "tried another 100000 selectors");
            }
            selector += 1;
        }

        debug!(extra_nonce, "selector space exhausted, retrying with next extra_nonce");
        extra_nonce = extra_nonce.wrapping_add(1);
    }
}

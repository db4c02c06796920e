//! Bucket digests and the `BucketStore` (spec §4.2).
//!
//! A bucket digest is a commutative XOR accumulator over every preimage that
//! hashes to its prefix, plus a running count that doubles as the bucket's
//! label once finalized. The original C implementation repurposed a single
//! `prefix` field for both the running count and, later, the label
//! (`proofwork.c`: "we're re-using the 'prefix' field of bucket as the
//! current number of elements"). Design Notes §9 recommends modeling that as
//! a tagged sum instead so `finalize` can't be forgotten; [`BucketAccumulator`]
//! does exactly that.

use crate::params::{Params, JUINT_SIZE};

/// A finalized, on-wire bucket: `{ prefix, indices }` (spec §3).
///
/// `prefix` is the suffix value that labels the bucket; `indices` is the
/// XOR-accumulator digest, one word per slot (`2^B` of them).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub prefix: u32,
    pub indices: Vec<u32>,
}

impl Bucket {
    /// Explicit little-endian serialization: `prefix` then `indices`
    /// (spec §6, §9 — the documented fallback for languages, Rust among
    /// them, that cannot guarantee a padding-free packed struct layout
    /// without `unsafe`). This is what gets fed to the outer hashcash and
    /// to the verifier's prefix-membership check.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(JUINT_SIZE * (1 + self.indices.len()));
        out.extend_from_slice(&self.prefix.to_le_bytes());
        for word in &self.indices {
            out.extend_from_slice(&word.to_le_bytes());
        }
        out
    }

    /// Byte length of [`Bucket::to_bytes`] for a bucket with `capacity` slots
    /// (spec invariant 1: `sizeof(Bucket) == (1 + 2^B) * sizeof(juint)`).
    #[inline]
    pub fn expected_byte_len(capacity: usize) -> usize {
        JUINT_SIZE * (1 + capacity)
    }
}

/// A bucket mid-accumulation, or finalized — spec §4.2's "two distinct
/// semantics during the prover's lifecycle," modeled as a tagged sum per
/// Design Notes §9 rather than by repurposing a shared field.
#[derive(Debug, Clone)]
pub enum BucketAccumulator {
    /// Still receiving preimages. `count` is the number added so far
    /// (unbounded — it keeps counting past `slots.len()` so occupancy can
    /// exceed capacity without losing information about *which* slot the
    /// next item lands in).
    Accumulating { count: u64, slots: Vec<u32> },
    /// Done: `count` has been overwritten by a fixed prefix label.
    Finalized(Bucket),
}

impl BucketAccumulator {
    /// `init(bucket)` (spec §4.2): a fresh, empty accumulator with `capacity`
    /// (`2^B`) zeroed slots.
    pub fn init(capacity: usize) -> Self {
        BucketAccumulator::Accumulating {
            count: 0,
            slots: vec![0u32; capacity],
        }
    }

    /// `update(bucket, item)` (spec §4.2): `indices[count mod 2^B] ^= item;
    /// count++`.
    ///
    /// # Panics
    /// Panics if called on an already-finalized accumulator — that would be
    /// a programming error in this crate, not a condition an untrusted
    /// caller can trigger (no public API finalizes, then re-updates).
    pub fn update(&mut self, item: u32) {
        match self {
            BucketAccumulator::Accumulating { count, slots } => {
                let n = slots.len() as u64;
                let slot = (*count % n) as usize;
                slots[slot] ^= item;
                *count += 1;
            }
            BucketAccumulator::Finalized(_) => {
                panic!("BucketAccumulator::update called after finalize")
            }
        }
    }

    /// `finalize(bucket, prefix_label)` (spec §4.2): overwrite the count
    /// field with the bucket's prefix label. Consumes `self`.
    pub fn finalize(self, prefix: u32) -> Bucket {
        match self {
            BucketAccumulator::Accumulating { slots, .. } => Bucket { prefix, indices: slots },
            BucketAccumulator::Finalized(bucket) => bucket,
        }
    }

    /// Like [`finalize`](Self::finalize), but takes the slots out of a
    /// `&mut self` in place (leaving an empty accumulator behind) instead of
    /// consuming `self` by value. Used by [`BucketStore::build`] to finalize
    /// all `2^P` buckets without moving the whole store.
    fn take_and_finalize(&mut self, prefix: u32) -> Bucket {
        match self {
            BucketAccumulator::Accumulating { slots, .. } => {
                let indices = std::mem::take(slots);
                Bucket { prefix, indices }
            }
            BucketAccumulator::Finalized(bucket) => bucket.clone(),
        }
    }
}

/// The prover's transient working memory: one accumulator per prefix,
/// `2^P` of them (spec §3: "BucketStore (prover-only, transient)").
///
/// Allocated once per [`crate::prover::find_solution`] call and reused
/// across extra-nonce retries via [`BucketStore::build`], which re-zeroes
/// every accumulator before each scan — this avoids repeatedly allocating
/// and freeing the multi-hundred-megabyte table (spec §5's "released on
/// return" working-set discipline).
pub struct BucketStore {
    params: Params,
    buckets: Vec<BucketAccumulator>,
}

impl BucketStore {
    /// Allocate `2^P` empty accumulators of capacity `2^B`.
    pub fn new(params: &Params) -> Self {
        let capacity = params.bucket_capacity();
        let buckets = (0..params.num_buckets())
            .map(|_| BucketAccumulator::init(capacity))
            .collect();
        BucketStore {
            params: *params,
            buckets,
        }
    }

    /// Run spec §4.3 steps 2–4 for one `full_nonce`: reset every bucket,
    /// scan every preimage in `[0, 2^M)` into its hash-suffix bucket, then
    /// finalize all `2^P` buckets with their index as the label.
    pub fn build(&mut self, full_nonce: &[u8]) -> Vec<Bucket> {
        let capacity = self.params.bucket_capacity();
        for acc in self.buckets.iter_mut() {
            *acc = BucketAccumulator::init(capacity);
        }

        let n = self.params.preimage_space();
        for preimage in 0..n {
            // Safe: `Params::validate` requires `memory_bits() < 32`.
            let preimage = preimage as u32;
            let prefix = crate::hash::hash_prefix(&self.params, full_nonce, preimage);
            self.buckets[prefix as usize].update(preimage);
        }

        self.buckets
            .iter_mut()
            .enumerate()
            .map(|(i, acc)| acc.take_and_finalize(i as u32))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_independence_of_accumulation() {
        // Spec testable property 8: any two orderings of the preimage scan
        // produce identical finalized bucket bytes.
        let mut forward = BucketAccumulator::init(4);
        let mut backward = BucketAccumulator::init(4);
        let items = [10u32, 7, 99, 3, 1];

        for &x in items.iter() {
            forward.update(x);
        }
        for &x in items.iter().rev() {
            backward.update(x);
        }

        let a = forward.finalize(5);
        let b = backward.finalize(5);
        assert_eq!(a, b);
    }

    #[test]
    fn bucket_byte_len_matches_invariant_1() {
        let mut acc = BucketAccumulator::init(8);
        for x in 0..20u32 {
            acc.update(x);
        }
        let bucket = acc.finalize(3);
        assert_eq!(bucket.to_bytes().len(), Bucket::expected_byte_len(8));
    }

    #[test]
    fn build_labels_every_bucket_with_its_index() {
        let params = Params::TEST_SMALL;
        let mut store = BucketStore::new(&params);
        let full_nonce = [0u8; 36];
        let buckets = store.build(&full_nonce);
        assert_eq!(buckets.len(), params.num_buckets());
        for (i, bucket) in buckets.iter().enumerate() {
            assert_eq!(bucket.prefix, i as u32);
            assert_eq!(bucket.indices.len(), params.bucket_capacity());
        }
    }

    #[test]
    fn build_is_deterministic_across_calls() {
        let params = Params::TEST_SMALL;
        let mut store = BucketStore::new(&params);
        let full_nonce = [5u8; 36];
        let first = store.build(&full_nonce);
        let second = store.build(&full_nonce);
        assert_eq!(first, second);
    }

    #[test]
    fn every_preimage_in_memory_space_is_accounted_for() {
        // XOR-fold every index recorded across all buckets; since each
        // preimage in [0, 2^M) lands in exactly one bucket slot rotation,
        // re-deriving the multiset directly (not through XOR cancellation)
        // is done via the dedicated re-derivation test in verifier.rs. Here
        // we just check bucket occupancy sums to the full preimage space
        // when capacity isn't exceeded (TEST_SMALL: 2^6 preimages, 2^4
        // buckets * 2^2 capacity = 64 slots exactly).
        let params = Params::TEST_SMALL;
        let mut store = BucketStore::new(&params);
        let buckets = store.build(&[1u8; 36]);
        let total_slots: usize = buckets.iter().map(|b| b.indices.len()).sum();
        assert_eq!(total_slots as u64, params.preimage_space());
    }
}

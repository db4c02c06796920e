//! Domain-separated, keyed, extendable-output hashing (spec §4.1).
//!
//! Backed by BLAKE3 in `derive_key` mode: each [`DomainTag`] maps to a fixed
//! context string, which BLAKE3 uses to key the hash so outputs under
//! different tags are independent random oracles even on identical input
//! bytes. The hash's extendable output (XOF) lets [`hash`] return exactly
//! `out_len` bytes for any `out_len`, which is what `select_prefixes` needs
//! to draw `K` suffixes from a single call (spec §4.1's "one hash call
//! yields all selectors").
//!
//! Grounded on `animica_native::hash`'s `DsTag` / `HashFn` pattern
//! (`new_derive_key(tag.context())`); the concrete hash algorithm is an
//! external/interchangeable concern per spec §1, so this module is free to
//! pick BLAKE3 rather than the original C implementation's SHA-256.

use crate::params::{Params, JUINT_SIZE};

/// The three fixed domain-separation purposes from spec §4.1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainTag {
    /// `"juggler_selection"` — selector-to-prefixes expansion.
    Selection,
    /// `"juggler_getprefix"` — preimage-to-bucket-suffix.
    GetPrefix,
    /// `"juggler_proofwork"` — outer hashcash input.
    ProofWork,
}

impl DomainTag {
    /// The literal ASCII context string for this tag (spec §6: "fed as bytes
    /// without length prefix or terminator").
    #[inline]
    pub fn context(self) -> &'static str {
        match self {
            DomainTag::Selection => "juggler_selection",
            DomainTag::GetPrefix => "juggler_getprefix",
            DomainTag::ProofWork => "juggler_proofwork",
        }
    }
}

/// Hash `full_nonce ‖ payload` under `tag`, returning exactly `out_len` bytes.
///
/// `full_nonce` is always `PUZZLE_SIZE + EXTRA_NONCE_SIZE` bytes (spec §6).
pub fn hash(full_nonce: &[u8], tag: DomainTag, payload: &[u8], out_len: usize) -> Vec<u8> {
    let mut hasher = blake3::Hasher::new_derive_key(tag.context());
    hasher.update(full_nonce);
    hasher.update(payload);
    let mut out = vec![0u8; out_len];
    let mut reader = hasher.finalize_xof();
    reader.fill(&mut out);
    out
}

/// `hash_prefix(full_nonce, preimage) -> juint` (spec §4.1): hash the
/// preimage under `GetPrefix` and return the low `P` bits of a 4-byte
/// (`juint`) output.
///
/// Despite the name (kept for historical consistency, spec §9), this
/// extracts the *low* bits of the hash output, i.e. a suffix.
pub fn hash_prefix(params: &Params, full_nonce: &[u8], preimage: u32) -> u32 {
    let digest = hash(
        full_nonce,
        DomainTag::GetPrefix,
        &preimage.to_le_bytes(),
        JUINT_SIZE,
    );
    let word = u32::from_le_bytes(digest.try_into().expect("JUINT_SIZE bytes"));
    word & params.prefix_mask()
}

/// `select_prefixes(full_nonce, selector) -> [juint; K]` (spec §4.1): hash
/// the selector under `Selection` once, and split the `K·sizeof(juint)`-byte
/// output into `K` masked fields.
pub fn select_prefixes(params: &Params, full_nonce: &[u8], selector: u64) -> Vec<u32> {
    let selector_bytes = (selector as u32).to_le_bytes();
    let out_len = params.input_buckets * JUINT_SIZE;
    let digest = hash(full_nonce, DomainTag::Selection, &selector_bytes, out_len);

    let mask = params.prefix_mask();
    digest
        .chunks_exact(JUINT_SIZE)
        .map(|chunk| u32::from_le_bytes(chunk.try_into().expect("JUINT_SIZE bytes")) & mask)
        .collect()
}

/// Compute the outer hashcash value: the low `D` bits of
/// `HashOracle(full_nonce, ProofWork, concat(bucket_bytes), sizeof(juint))`.
///
/// `concat_bucket_bytes` is the concatenation of the `K` selected buckets'
/// explicit LE serialization (spec §9: explicit-serialization fallback for
/// "direct struct hashing").
pub fn outer_pow(params: &Params, full_nonce: &[u8], concat_bucket_bytes: &[u8]) -> u32 {
    let digest = hash(
        full_nonce,
        DomainTag::ProofWork,
        concat_bucket_bytes,
        JUINT_SIZE,
    );
    let word = u32::from_le_bytes(digest.try_into().expect("JUINT_SIZE bytes"));
    let bits = params.difficulty_bits;
    if bits >= 32 {
        word
    } else {
        word & ((1u32 << bits) - 1)
    }
}

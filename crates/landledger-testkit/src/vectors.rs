//! Golden test vectors for deterministic verification.
//!
//! These vectors pin the rolling digest and the canonical payload, so records
//! written by any conforming implementation keep verifying.

use landledger_core::{rolling32, ChainBuilder, GENESIS_HASH};

use crate::fixtures::sample_draft;

/// A golden digest vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Payload text.
    pub input: &'static str,
    /// Expected rolling digest (hex).
    pub expected: &'static str,
}

/// Get all golden digest vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "empty payload",
            input: "",
            expected: "00000000",
        },
        GoldenVector {
            name: "single char",
            input: "a",
            expected: "00000061",
        },
        GoldenVector {
            name: "two chars",
            input: "ab",
            expected: "00000c21",
        },
        GoldenVector {
            name: "hello",
            input: "hello",
            expected: "05e918d2",
        },
        GoldenVector {
            name: "Hello World",
            input: "Hello World",
            expected: "3369657c",
        },
        GoldenVector {
            name: "genesis hash",
            input: GENESIS_HASH,
            expected: "1889d000",
        },
        GoldenVector {
            name: "non-ascii text",
            input: "Colombo ශ්\u{200d}රී",
            expected: "52fa0727",
        },
    ]
}

/// Expected hashes of `sample_draft(0)` chained at genesis.
pub const GENESIS_SAMPLE_TRANSACTION_HASH: &str = "283ee674";
pub const GENESIS_SAMPLE_BLOCK_HASH: &str = "7dc2799a";

/// Verify all golden vectors, plus the genesis sample record.
///
/// Returns `(name, matches, actual)` for each vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    let mut results: Vec<_> = all_vectors()
        .iter()
        .map(|v| {
            let actual = rolling32(v.input).to_string();
            (v.name.to_string(), actual == v.expected, actual)
        })
        .collect();

    match ChainBuilder::default().chain(sample_draft(0), None) {
        Ok(record) => {
            let actual = format!("{}/{}", record.transaction_hash, record.block_hash);
            let expected = format!("{GENESIS_SAMPLE_TRANSACTION_HASH}/{GENESIS_SAMPLE_BLOCK_HASH}");
            results.push(("genesis sample record".to_string(), actual == expected, actual));
        }
        Err(e) => results.push(("genesis sample record".to_string(), false, e.to_string())),
    }

    results
}

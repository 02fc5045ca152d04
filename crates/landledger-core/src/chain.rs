//! Chain builder: turns a candidate record into a chained record.
//!
//! ```text
//! transaction_hash = digest(canonical_payload(draft, registration_date))
//! previous_hash    = tail.block_hash | GENESIS_HASH
//! block_hash       = digest(transaction_hash ++ previous_hash)
//! ```
//!
//! Building never touches storage. Appending the result is a separate step.

use crate::canonical::canonical_payload;
use crate::digest::{Digest, DigestAlgorithm};
use crate::error::CoreError;
use crate::record::{LandRecord, RecordDraft};

/// The previous hash for a record appended after `tail`.
pub fn previous_hash_for(tail: Option<&LandRecord>) -> Digest {
    tail.map(|r| r.block_hash.clone())
        .unwrap_or_else(Digest::genesis)
}

/// Computes chain fields with a fixed digest algorithm.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChainBuilder {
    algorithm: DigestAlgorithm,
}

impl ChainBuilder {
    pub fn new(algorithm: DigestAlgorithm) -> Self {
        Self { algorithm }
    }

    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    /// Digest of a draft's canonical payload at the given creation time.
    pub fn transaction_hash(&self, draft: &RecordDraft, timestamp: i64) -> Result<Digest, CoreError> {
        let payload = canonical_payload(draft, timestamp)?;
        Ok(self.algorithm.digest(&payload))
    }

    /// Digest of the string concatenation `transaction_hash ++ previous_hash`.
    pub fn block_hash(&self, transaction_hash: &Digest, previous_hash: &Digest) -> Digest {
        let mut joined = String::with_capacity(
            transaction_hash.as_str().len() + previous_hash.as_str().len(),
        );
        joined.push_str(transaction_hash.as_str());
        joined.push_str(previous_hash.as_str());
        self.algorithm.digest(&joined)
    }

    /// Chain a draft after the given tail (None for an empty chain).
    ///
    /// The draft is marked verified before hashing, so the stored record
    /// reproduces its own payload. The registration date doubles as the
    /// creation timestamp.
    pub fn chain(&self, mut draft: RecordDraft, tail: Option<&LandRecord>) -> Result<LandRecord, CoreError> {
        draft.is_verified = true;

        let transaction_hash = self.transaction_hash(&draft, draft.registration_date)?;
        let previous_hash = previous_hash_for(tail);
        let block_hash = self.block_hash(&transaction_hash, &previous_hash);

        Ok(LandRecord {
            entry: draft,
            transaction_hash,
            previous_hash,
            block_hash,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::GENESIS_HASH;
    use crate::record::LandType;

    fn draft(n: u32) -> RecordDraft {
        RecordDraft {
            id: format!("id-{n}"),
            registration_number: format!("WE-0000000{n}-ABC"),
            owner_name: "Owner".into(),
            owner_nic: "123456789012".into(),
            property_address: "Addr".into(),
            district: "Colombo".into(),
            province: "Western".into(),
            land_size: 1.0 + f64::from(n),
            land_type: LandType::Agricultural,
            registration_date: 1_700_000_000_000 + i64::from(n),
            last_verified: 1_700_000_000_000 + i64::from(n),
            is_verified: false,
            documents: vec![],
            coordinates: None,
        }
    }

    #[test]
    fn test_first_record_links_to_genesis() {
        let builder = ChainBuilder::default();
        let r0 = builder.chain(draft(0), None).unwrap();
        assert_eq!(r0.previous_hash.as_str(), GENESIS_HASH);
        assert!(r0.entry.is_verified);
        assert_eq!(r0.transaction_hash.as_str().len(), 8);
    }

    #[test]
    fn test_chain_linkage() {
        let builder = ChainBuilder::default();
        let r0 = builder.chain(draft(0), None).unwrap();
        let r1 = builder.chain(draft(1), Some(&r0)).unwrap();
        let r2 = builder.chain(draft(2), Some(&r1)).unwrap();

        assert_eq!(r1.previous_hash, r0.block_hash);
        assert_eq!(r2.previous_hash, r1.block_hash);
        assert_eq!(r1.block_hash, builder.block_hash(&r1.transaction_hash, &r1.previous_hash));
    }

    #[test]
    fn test_block_hash_is_string_concat() {
        let builder = ChainBuilder::default();
        let tx = Digest::from_hex("0000abcd").unwrap();
        let prev = Digest::genesis();
        let expected = DigestAlgorithm::Rolling32.digest("0000abcd0000000000000000");
        assert_eq!(builder.block_hash(&tx, &prev), expected);
    }

    #[test]
    fn test_blake3_builder() {
        let builder = ChainBuilder::new(DigestAlgorithm::Blake3);
        let r0 = builder.chain(draft(0), None).unwrap();
        assert_eq!(r0.transaction_hash.as_str().len(), 64);
        assert_eq!(r0.block_hash.as_str().len(), 64);
        assert!(r0.previous_hash.is_genesis());
    }
}

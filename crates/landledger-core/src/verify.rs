//! Verification by recomputation, and whole-chain audit.
//!
//! [`Verifier::verify`] checks one record: it finds the record for an
//! identity, rebuilds its canonical payload and compares the digest with the
//! stored transaction hash. With `verify_linkage` it also checks that record's
//! place in the chain. [`audit_chain`] replays the whole chain from genesis.

use serde::Serialize;

use crate::canonical::record_payload;
use crate::chain::ChainBuilder;
use crate::digest::{Digest, DigestAlgorithm};
use crate::error::CoreError;
use crate::record::LandRecord;
use crate::validation::{is_blank, is_valid_owner_nic};

/// Why a verification came out the way it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationOutcome {
    /// Record found and its transaction hash recomputes.
    Verified,
    /// Registration number or owner identifier was blank.
    MissingInput,
    /// Owner identifier is not 12 digits.
    MalformedOwnerId,
    /// No record for this identity.
    NotFound,
    /// Record found but its transaction hash does not recompute.
    HashMismatch,
    /// Record is intact but not linked to its predecessor.
    BrokenLink,
}

impl VerificationOutcome {
    pub fn is_valid(self) -> bool {
        matches!(self, VerificationOutcome::Verified)
    }

    /// User-facing message.
    pub fn message(self) -> &'static str {
        match self {
            Self::Verified => "Land registration verified successfully on the blockchain",
            Self::MissingInput => "Please provide both registration number and Aadhaar number",
            Self::MalformedOwnerId => "Aadhaar number must be exactly 12 digits",
            Self::NotFound => "No matching land registration found",
            Self::HashMismatch => "Land registration failed integrity verification",
            Self::BrokenLink => "Land registration is not linked to the chain",
        }
    }
}

/// Result of verifying one identity. Never persisted.
///
/// `record` is only attached when the outcome is [`VerificationOutcome::Verified`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub outcome: VerificationOutcome,
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<LandRecord>,
    pub message: String,
    /// Unix milliseconds.
    pub verification_time: i64,
}

impl VerificationResult {
    /// A result with no record attached.
    pub fn rejected(outcome: VerificationOutcome, verification_time: i64) -> Self {
        Self {
            outcome,
            is_valid: false,
            record: None,
            message: outcome.message().to_string(),
            verification_time,
        }
    }

    pub fn verified(record: LandRecord, verification_time: i64) -> Self {
        let outcome = VerificationOutcome::Verified;
        Self {
            outcome,
            is_valid: true,
            record: Some(record),
            message: outcome.message().to_string(),
            verification_time,
        }
    }
}

/// Kind of discrepancy found by an audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BreakKind {
    /// Stored transaction hash does not match the recomputed payload digest.
    TransactionHashMismatch { expected: Digest, found: Digest },
    /// `previous_hash` does not equal the predecessor's block hash (or genesis).
    PreviousHashMismatch { expected: Digest, found: Digest },
    /// Stored block hash does not match `digest(transaction ++ previous)`.
    BlockHashMismatch { expected: Digest, found: Digest },
}

/// One discrepancy at a chain position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainBreak {
    pub index: usize,
    pub registration_number: String,
    #[serde(flatten)]
    pub kind: BreakKind,
}

/// Result of replaying the chain from genesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainReport {
    pub length: usize,
    /// Block hash of the tail, or genesis for an empty chain.
    pub head: Digest,
    pub breaks: Vec<ChainBreak>,
}

impl ChainReport {
    pub fn is_intact(&self) -> bool {
        self.breaks.is_empty()
    }

    /// Index of the earliest broken record.
    pub fn first_break(&self) -> Option<usize> {
        self.breaks.iter().map(|b| b.index).min()
    }
}

/// Replay `records` from genesis and collect every discrepancy.
///
/// Each position is checked against the stored block hash of its predecessor,
/// so a single tampered record does not cascade into its successors.
pub fn audit_chain(records: &[LandRecord], algorithm: DigestAlgorithm) -> Result<ChainReport, CoreError> {
    let builder = ChainBuilder::new(algorithm);
    let mut breaks = Vec::new();
    let mut expected_prev = Digest::genesis();

    for (index, record) in records.iter().enumerate() {
        let push = |breaks: &mut Vec<ChainBreak>, kind| {
            breaks.push(ChainBreak {
                index,
                registration_number: record.entry.registration_number.clone(),
                kind,
            })
        };

        let tx = algorithm.digest(&record_payload(record)?);
        if tx != record.transaction_hash {
            push(
                &mut breaks,
                BreakKind::TransactionHashMismatch {
                    expected: tx,
                    found: record.transaction_hash.clone(),
                },
            );
        }

        if record.previous_hash != expected_prev {
            push(
                &mut breaks,
                BreakKind::PreviousHashMismatch {
                    expected: expected_prev.clone(),
                    found: record.previous_hash.clone(),
                },
            );
        }

        let block = builder.block_hash(&record.transaction_hash, &record.previous_hash);
        if block != record.block_hash {
            push(
                &mut breaks,
                BreakKind::BlockHashMismatch {
                    expected: block,
                    found: record.block_hash.clone(),
                },
            );
        }

        expected_prev = record.block_hash.clone();
    }

    Ok(ChainReport {
        length: records.len(),
        head: expected_prev,
        breaks,
    })
}

/// Verifies identities against a chain of records.
#[derive(Debug, Clone, Copy, Default)]
pub struct Verifier {
    algorithm: DigestAlgorithm,
    verify_linkage: bool,
}

impl Verifier {
    pub fn new(algorithm: DigestAlgorithm) -> Self {
        Self {
            algorithm,
            verify_linkage: false,
        }
    }

    /// Also require the matched record to be linked to its predecessor.
    pub fn with_linkage(mut self, verify_linkage: bool) -> Self {
        self.verify_linkage = verify_linkage;
        self
    }

    /// Input checks that run before any record is looked at.
    ///
    /// Returns the rejecting outcome, or `None` if the inputs are well-formed.
    pub fn precheck(registration_number: &str, owner_nic: &str) -> Option<VerificationOutcome> {
        if is_blank(registration_number) || is_blank(owner_nic) {
            return Some(VerificationOutcome::MissingInput);
        }
        if !is_valid_owner_nic(owner_nic.trim()) {
            return Some(VerificationOutcome::MalformedOwnerId);
        }
        None
    }

    /// Whether a record's transaction hash recomputes from its stored fields.
    pub fn verify_record(&self, record: &LandRecord) -> Result<bool, CoreError> {
        let expected = self.algorithm.digest(&record_payload(record)?);
        Ok(expected == record.transaction_hash)
    }

    /// Look up an identity in `records` and verify it.
    ///
    /// Inputs are trimmed before matching. `now` stamps the result.
    pub fn verify(
        &self,
        records: &[LandRecord],
        registration_number: &str,
        owner_nic: &str,
        now: i64,
    ) -> Result<VerificationResult, CoreError> {
        if let Some(outcome) = Self::precheck(registration_number, owner_nic) {
            return Ok(VerificationResult::rejected(outcome, now));
        }

        let registration_number = registration_number.trim();
        let owner_nic = owner_nic.trim();

        let Some((index, record)) = records
            .iter()
            .enumerate()
            .find(|(_, r)| r.matches(registration_number, owner_nic))
        else {
            return Ok(VerificationResult::rejected(VerificationOutcome::NotFound, now));
        };

        if !self.verify_record(record)? {
            return Ok(VerificationResult::rejected(VerificationOutcome::HashMismatch, now));
        }

        if self.verify_linkage && !self.is_linked(records, index) {
            return Ok(VerificationResult::rejected(VerificationOutcome::BrokenLink, now));
        }

        Ok(VerificationResult::verified(record.clone(), now))
    }

    /// Replay the whole chain. See [`audit_chain`].
    pub fn audit(&self, records: &[LandRecord]) -> Result<ChainReport, CoreError> {
        audit_chain(records, self.algorithm)
    }

    fn is_linked(&self, records: &[LandRecord], index: usize) -> bool {
        let record = &records[index];
        let expected_prev = match index {
            0 => Digest::genesis(),
            i => records[i - 1].block_hash.clone(),
        };
        let builder = ChainBuilder::new(self.algorithm);
        record.previous_hash == expected_prev
            && builder.block_hash(&record.transaction_hash, &record.previous_hash) == record.block_hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{LandType, RecordDraft};

    fn draft(reg: &str, nic: &str, n: i64) -> RecordDraft {
        RecordDraft {
            id: format!("id-{n}"),
            registration_number: reg.into(),
            owner_name: "Owner".into(),
            owner_nic: nic.into(),
            property_address: "Addr".into(),
            district: "Kandy".into(),
            province: "Central".into(),
            land_size: 3.25,
            land_type: LandType::Residential,
            registration_date: 1_700_000_000_000 + n,
            last_verified: 1_700_000_000_000 + n,
            is_verified: false,
            documents: vec![],
            coordinates: None,
        }
    }

    fn chain_of(n: i64) -> Vec<LandRecord> {
        let builder = ChainBuilder::default();
        let mut records: Vec<LandRecord> = Vec::new();
        for i in 0..n {
            let d = draft(&format!("CE-0000000{i}-XYZ"), "123456789012", i);
            let r = builder.chain(d, records.last()).unwrap();
            records.push(r);
        }
        records
    }

    #[test]
    fn test_precheck() {
        assert_eq!(Verifier::precheck("", "123456789012"), Some(VerificationOutcome::MissingInput));
        assert_eq!(Verifier::precheck("X", "   "), Some(VerificationOutcome::MissingInput));
        assert_eq!(Verifier::precheck("ANY", "12345"), Some(VerificationOutcome::MalformedOwnerId));
        assert_eq!(Verifier::precheck("ANY", " 123456789012 "), None);
    }

    #[test]
    fn test_verify_round_trip() {
        let records = chain_of(3);
        let verifier = Verifier::default();
        let result = verifier.verify(&records, "CE-00000001-XYZ", "123456789012", 99).unwrap();
        assert!(result.is_valid);
        assert_eq!(result.outcome, VerificationOutcome::Verified);
        assert_eq!(result.record.as_ref(), Some(&records[1]));
        assert_eq!(result.verification_time, 99);
    }

    #[test]
    fn test_verify_trims_inputs() {
        let records = chain_of(1);
        let result = Verifier::default()
            .verify(&records, "  CE-00000000-XYZ ", " 123456789012", 0)
            .unwrap();
        assert!(result.is_valid);
    }

    #[test]
    fn test_tamper_withholds_record() {
        let mut records = chain_of(2);
        records[0].entry.land_size = 300.0;
        let result = Verifier::default()
            .verify(&records, "CE-00000000-XYZ", "123456789012", 0)
            .unwrap();
        assert!(!result.is_valid);
        assert_eq!(result.outcome, VerificationOutcome::HashMismatch);
        assert!(result.record.is_none());
    }

    #[test]
    fn test_not_found() {
        let records = chain_of(1);
        let result = Verifier::default()
            .verify(&records, "CE-00000000-XYZ", "999999999999", 0)
            .unwrap();
        assert_eq!(result.outcome, VerificationOutcome::NotFound);
        assert!(result.record.is_none());
    }

    #[test]
    fn test_linkage_mode() {
        let mut records = chain_of(3);
        records[2].previous_hash = Digest::genesis();

        let narrow = Verifier::default();
        assert!(narrow.verify(&records, "CE-00000002-XYZ", "123456789012", 0).unwrap().is_valid);

        let strict = Verifier::default().with_linkage(true);
        let result = strict.verify(&records, "CE-00000002-XYZ", "123456789012", 0).unwrap();
        assert_eq!(result.outcome, VerificationOutcome::BrokenLink);
        assert!(strict.verify(&records, "CE-00000001-XYZ", "123456789012", 0).unwrap().is_valid);
    }

    #[test]
    fn test_audit_intact() {
        let records = chain_of(4);
        let report = audit_chain(&records, DigestAlgorithm::Rolling32).unwrap();
        assert!(report.is_intact());
        assert_eq!(report.length, 4);
        assert_eq!(report.head, records[3].block_hash);

        let empty = audit_chain(&[], DigestAlgorithm::Rolling32).unwrap();
        assert!(empty.is_intact());
        assert!(empty.head.is_genesis());
    }

    #[test]
    fn test_audit_reports_tamper_without_cascade() {
        let mut records = chain_of(3);
        records[1].entry.owner_name = "Mallory".into();
        let report = audit_chain(&records, DigestAlgorithm::Rolling32).unwrap();
        assert_eq!(report.breaks.len(), 1);
        assert_eq!(report.first_break(), Some(1));
        assert!(matches!(report.breaks[0].kind, BreakKind::TransactionHashMismatch { .. }));
    }

    #[test]
    fn test_audit_reports_broken_link() {
        let mut records = chain_of(3);
        records[2].previous_hash = records[0].block_hash.clone();
        let report = audit_chain(&records, DigestAlgorithm::Rolling32).unwrap();
        assert!(report
            .breaks
            .iter()
            .any(|b| b.index == 2 && matches!(b.kind, BreakKind::PreviousHashMismatch { .. })));
        // block_hash no longer matches the rewritten previous_hash either
        assert!(report
            .breaks
            .iter()
            .any(|b| b.index == 2 && matches!(b.kind, BreakKind::BlockHashMismatch { .. })));
    }
}

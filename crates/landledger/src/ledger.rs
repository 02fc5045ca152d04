//! The Ledger: unified API for the land registry.
//!
//! The Ledger owns an injected store handle and brings the chain builder,
//! verifier and auditor together behind one interface.

use std::path::Path;
use std::sync::{Arc, Mutex};

use landledger_core::{
    generate_registration_number, now_millis, ChainBuilder, ChainReport, DigestAlgorithm,
    LandRecord, RecordDraft, RegistrationRequest, VerificationOutcome, VerificationResult,
    VerificationToken, Verifier,
};
use landledger_store::{LedgerStore, SqliteStore, StoreError, DEFAULT_STORAGE_KEY};
use uuid::Uuid;

use crate::error::Result;
use crate::stats::LedgerStats;

/// Configuration for the Ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Digest used for transaction and block hashes.
    pub digest: DigestAlgorithm,
    /// Key the chain is persisted under.
    pub storage_key: String,
    /// Whether `verify` also checks the record's link to its predecessor.
    pub verify_linkage: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            digest: DigestAlgorithm::Rolling32,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            verify_linkage: false,
        }
    }
}

/// The main Ledger struct.
///
/// Provides a unified API for:
/// - Building and appending chained records
/// - Registering validated form input
/// - Verifying identities and certificate tokens
/// - Auditing the whole chain
pub struct Ledger<S: LedgerStore> {
    /// The storage backend.
    store: Arc<S>,
    /// Configuration.
    config: LedgerConfig,
    builder: ChainBuilder,
    verifier: Verifier,
    /// Serializes read-tail-then-append.
    writer: Mutex<()>,
}

impl Ledger<SqliteStore> {
    /// Open a SQLite-backed ledger, storing the chain under `config.storage_key`.
    pub fn open(path: impl AsRef<Path>, config: LedgerConfig) -> Result<Self> {
        let store = SqliteStore::open(path)?.with_key(config.storage_key.clone());
        Ok(Self::new(store, config))
    }
}

impl<S: LedgerStore> Ledger<S> {
    /// Create a new ledger over a store.
    pub fn new(store: S, config: LedgerConfig) -> Self {
        Self::from_shared(Arc::new(store), config)
    }

    /// Create a ledger over a store that is shared with other readers.
    pub fn from_shared(store: Arc<S>, config: LedgerConfig) -> Self {
        Self {
            store,
            builder: ChainBuilder::new(config.digest),
            verifier: Verifier::new(config.digest).with_linkage(config.verify_linkage),
            config,
            writer: Mutex::new(()),
        }
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Chain Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Chain a draft after the current tail without appending it.
    pub fn create_chained_record(&self, draft: RecordDraft) -> Result<LandRecord> {
        let tail = self.store.tail()?;
        Ok(self.builder.chain(draft, tail.as_ref())?)
    }

    /// Append an already-chained record.
    pub fn append(&self, record: &LandRecord) -> Result<()> {
        Ok(self.store.append(record)?)
    }

    /// Chain a draft and append it as one step.
    ///
    /// Holds the writer lock across the tail read and the append, so
    /// concurrent registrations through this ledger cannot fork the chain.
    pub fn register(&self, draft: RecordDraft) -> Result<LandRecord> {
        let _guard = self
            .writer
            .lock()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;

        let record = self.create_chained_record(draft)?;
        self.store.append(&record)?;

        tracing::info!(
            registration_number = %record.entry.registration_number,
            transaction_hash = %record.transaction_hash,
            block_hash = %record.block_hash,
            "registered land record"
        );
        Ok(record)
    }

    /// Validate form input, assign an id and registration number, and register.
    pub fn register_request(&self, request: &RegistrationRequest) -> Result<LandRecord> {
        let validated = request.validate()?;

        let now = now_millis();
        let registration_number =
            generate_registration_number(&validated.province, now, &mut rand::thread_rng());
        let id = Uuid::new_v4().to_string();

        self.register(validated.into_draft(id, registration_number, now))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Verification
    // ─────────────────────────────────────────────────────────────────────────

    /// Verify an identity against the stored chain.
    ///
    /// Malformed input is rejected before the store is read.
    pub fn verify(&self, registration_number: &str, owner_nic: &str) -> Result<VerificationResult> {
        let now = now_millis();

        if let Some(outcome) = Verifier::precheck(registration_number, owner_nic) {
            return Ok(VerificationResult::rejected(outcome, now));
        }

        let records = self.store.all()?;
        let result = self
            .verifier
            .verify(&records, registration_number, owner_nic, now)?;

        if result.is_valid {
            tracing::debug!(registration_number, "verification succeeded");
        } else {
            tracing::warn!(registration_number, outcome = ?result.outcome, "verification failed");
        }
        Ok(result)
    }

    /// Verify a certificate token.
    ///
    /// The identity must verify and the stored transaction hash must equal the
    /// one printed on the token.
    pub fn verify_token(&self, token: &VerificationToken) -> Result<VerificationResult> {
        let result = self.verify(&token.registration_number, &token.owner_nic)?;

        match &result.record {
            Some(record) if record.transaction_hash != token.transaction_hash => {
                tracing::warn!(
                    registration_number = %token.registration_number,
                    "token transaction hash does not match ledger"
                );
                Ok(VerificationResult::rejected(
                    VerificationOutcome::HashMismatch,
                    result.verification_time,
                ))
            }
            _ => Ok(result),
        }
    }

    /// Replay the whole chain from genesis.
    pub fn audit(&self) -> Result<ChainReport> {
        let records = self.store.all()?;
        let report = self.verifier.audit(&records)?;
        if !report.is_intact() {
            tracing::warn!(
                breaks = report.breaks.len(),
                first = ?report.first_break(),
                "chain audit found discrepancies"
            );
        }
        Ok(report)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Query Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// All records, in chain order.
    pub fn records(&self) -> Result<Vec<LandRecord>> {
        Ok(self.store.all()?)
    }

    /// Summary figures over the whole chain.
    pub fn stats(&self) -> Result<LedgerStats> {
        Ok(LedgerStats::from_records(&self.store.all()?))
    }
}

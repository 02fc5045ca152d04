//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::{Arc, RwLock};

use landledger::{Ledger, LedgerConfig};
use landledger_core::{LandRecord, LandType, RecordDraft, RegistrationRequest};
use landledger_store::{LedgerStore, Result, StoreError};

/// Fixed registration time used by sample drafts (2023-11-14T22:13:20Z).
pub const SAMPLE_TIME: i64 = 1_700_000_000_000;

/// A deterministic candidate record.
///
/// Registration numbers follow `WE-<8 digits>-ABC` and are unique per `n`.
pub fn sample_draft(n: u32) -> RecordDraft {
    RecordDraft {
        id: format!("00000000-0000-4000-8000-{n:012}"),
        registration_number: format!("WE-{:08}-ABC", 12_345_678u32.wrapping_add(n)),
        owner_name: format!("Owner {n}"),
        owner_nic: "123456789012".to_string(),
        property_address: format!("{} Galle Road", n + 1),
        district: "Colombo".to_string(),
        province: "Western".to_string(),
        land_size: 1.25 + f64::from(n),
        land_type: LandType::ALL[n as usize % LandType::ALL.len()],
        registration_date: SAMPLE_TIME + i64::from(n),
        last_verified: SAMPLE_TIME + i64::from(n),
        is_verified: true,
        documents: vec![format!("deed-{n}.pdf")],
        coordinates: None,
    }
}

/// A registration form submission that passes validation.
pub fn sample_request() -> RegistrationRequest {
    RegistrationRequest {
        owner_name: "Asha Perera".into(),
        owner_nic: "123456789012".into(),
        property_address: "12 Temple Road".into(),
        district: "Colombo".into(),
        province: "Western".into(),
        land_size: "2.5".into(),
        land_type: "Residential".into(),
        latitude: Some("6.9271".into()),
        longitude: Some("79.8612".into()),
    }
}

/// An in-memory store whose records can be rewritten in place.
///
/// Stands in for an attacker with write access to persisted state.
#[derive(Debug, Default)]
pub struct TamperStore {
    records: RwLock<Vec<LandRecord>>,
    reads: RwLock<usize>,
}

impl TamperStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutate the record at `index`. Panics if out of range.
    pub fn tamper(&self, index: usize, f: impl FnOnce(&mut LandRecord)) {
        let mut records = self.records.write().expect("tamper store lock");
        f(&mut records[index]);
    }

    /// How many times the chain has been read.
    pub fn reads(&self) -> usize {
        *self.reads.read().expect("tamper store lock")
    }
}

impl LedgerStore for TamperStore {
    fn append(&self, record: &LandRecord) -> Result<()> {
        self.records
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?
            .push(record.clone());
        Ok(())
    }

    fn all(&self) -> Result<Vec<LandRecord>> {
        *self
            .reads
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))? += 1;
        Ok(self
            .records
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?
            .clone())
    }
}

/// A ledger over a [`TamperStore`].
pub struct TestFixture {
    pub ledger: Ledger<TamperStore>,
}

impl TestFixture {
    /// Default configuration.
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    pub fn with_config(config: LedgerConfig) -> Self {
        Self {
            ledger: Ledger::new(TamperStore::new(), config),
        }
    }

    pub fn store(&self) -> &TamperStore {
        self.ledger.store()
    }

    /// See [`sample_draft`].
    pub fn draft(&self, n: u32) -> RecordDraft {
        sample_draft(n)
    }

    /// Register `count` sample drafts in order.
    pub fn populate(&self, count: u32) -> Vec<LandRecord> {
        (0..count)
            .map(|n| self.ledger.register(sample_draft(n)).expect("register sample"))
            .collect()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A ledger and a second handle to its store.
pub fn shared_fixture(config: LedgerConfig) -> (Arc<TamperStore>, Ledger<TamperStore>) {
    let store = Arc::new(TamperStore::new());
    let ledger = Ledger::from_shared(Arc::clone(&store), config);
    (store, ledger)
}

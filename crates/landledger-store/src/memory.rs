//! In-memory implementation of the LedgerStore trait.
//!
//! This is primarily for testing. Same semantics as SQLite, no persistence.

use std::sync::RwLock;

use landledger_core::LandRecord;

use crate::error::{Result, StoreError};
use crate::traits::LedgerStore;

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<LandRecord>>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with records, in order.
    pub fn from_records(records: Vec<LandRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

fn poisoned<T>(e: std::sync::PoisonError<T>) -> StoreError {
    StoreError::LockPoisoned(e.to_string())
}

impl LedgerStore for MemoryStore {
    fn append(&self, record: &LandRecord) -> Result<()> {
        let mut records = self.records.write().map_err(poisoned)?;
        records.push(record.clone());
        Ok(())
    }

    fn all(&self) -> Result<Vec<LandRecord>> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.clone())
    }

    fn tail(&self) -> Result<Option<LandRecord>> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.last().cloned())
    }

    fn len(&self) -> Result<usize> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use landledger_core::{ChainBuilder, LandType, RecordDraft};

    fn make_record(n: i64, tail: Option<&LandRecord>) -> LandRecord {
        let draft = RecordDraft {
            id: format!("id-{n}"),
            registration_number: format!("SO-0000000{n}-AAA"),
            owner_name: "Owner".into(),
            owner_nic: "123456789012".into(),
            property_address: "Addr".into(),
            district: "Galle".into(),
            province: "Southern".into(),
            land_size: 1.0,
            land_type: LandType::Agricultural,
            registration_date: 1_700_000_000_000 + n,
            last_verified: 1_700_000_000_000 + n,
            is_verified: true,
            documents: vec![],
            coordinates: None,
        };
        ChainBuilder::default().chain(draft, tail).unwrap()
    }

    #[test]
    fn test_memory_store_basic() {
        let store = MemoryStore::new();
        assert!(store.is_empty().unwrap());
        assert!(store.tail().unwrap().is_none());

        let r0 = make_record(0, None);
        store.append(&r0).unwrap();
        let r1 = make_record(1, Some(&r0));
        store.append(&r1).unwrap();

        assert_eq!(store.len().unwrap(), 2);
        assert_eq!(store.all().unwrap(), vec![r0, r1.clone()]);
        assert_eq!(store.tail().unwrap(), Some(r1));
    }

    #[test]
    fn test_memory_store_allows_duplicates() {
        let store = MemoryStore::new();
        let r0 = make_record(0, None);
        store.append(&r0).unwrap();
        store.append(&r0).unwrap();
        assert_eq!(store.len().unwrap(), 2);
    }
}

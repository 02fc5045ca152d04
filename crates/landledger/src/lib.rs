//! # Land Ledger
//!
//! The unified API for the land registry: a hash-chained, append-only ledger
//! that makes registered property records tamper-evident.
//!
//! ## Overview
//!
//! - **Register**: validate form input, chain the record, append it
//! - **Verify**: recompute a record's transaction hash from its stored fields
//! - **Audit**: replay every link from genesis
//!
//! ## Key Concepts
//!
//! - **Record**: Immutable once appended. Verification never rewrites it.
//! - **Chain**: Each record's `previous_hash` is its predecessor's `block_hash`.
//! - **Genesis**: The first record links to `"0000000000000000"`.
//! - **Single writer**: Registrations through one [`Ledger`] are serialized.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use landledger::{Ledger, LedgerConfig, RegistrationRequest};
//!
//! let ledger = Ledger::open("ledger.db", LedgerConfig::default()).unwrap();
//!
//! let record = ledger
//!     .register_request(&RegistrationRequest {
//!         owner_name: "Asha Perera".into(),
//!         owner_nic: "123456789012".into(),
//!         property_address: "12 Temple Road".into(),
//!         district: "Colombo".into(),
//!         province: "Western".into(),
//!         land_size: "2.5".into(),
//!         land_type: "Residential".into(),
//!         ..Default::default()
//!     })
//!     .unwrap();
//!
//! let result = ledger
//!     .verify(record.registration_number(), record.owner_nic())
//!     .unwrap();
//! assert!(result.is_valid);
//! ```
//!
//! ## Re-exports
//!
//! - `landledger::core` - Core primitives (LandRecord, Digest, Verifier, ...)
//! - `landledger::store` - Storage abstraction and SQLite

pub mod error;
pub mod ledger;
pub mod stats;

// Re-export component crates
pub use landledger_core as core;
pub use landledger_store as store;

// Re-export main types for convenience
pub use error::{LedgerError, Result};
pub use ledger::{Ledger, LedgerConfig};
pub use stats::LedgerStats;

// Re-export commonly used core types
pub use landledger_core::{
    ChainReport, Digest, DigestAlgorithm, LandRecord, LandType, RecordDraft, RegistrationRequest,
    VerificationOutcome, VerificationResult, VerificationToken, GENESIS_HASH,
};
pub use landledger_store::{LedgerStore, MemoryStore, SqliteStore};

//! # Land Ledger Store
//!
//! Storage abstraction for the Land Ledger. The chain is an ordered,
//! append-only sequence of [`LandRecord`](landledger_core::LandRecord)s
//! behind the [`LedgerStore`] trait.
//!
//! ## Key Types
//!
//! - [`LedgerStore`] - `append` and full-scan `all`
//! - [`SqliteStore`] - The whole chain as one JSON value under a named key
//! - [`MemoryStore`] - In-memory storage for tests
//!
//! ## Usage
//!
//! ```rust,no_run
//! use landledger_store::{LedgerStore, SqliteStore};
//!
//! let store = SqliteStore::open("ledger.db").unwrap();
//! for record in store.all().unwrap() {
//!     println!("{} {}", record.registration_number(), record.block_hash);
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Append-only**: no update, no delete, no position argument
//! - **No uniqueness**: the same registration number may be appended twice
//! - **Whole-value persistence**: SQLite reads and rewrites the entire chain
//! - **Corrupt state reads as empty**: an undecodable value is logged and
//!   treated as an empty chain

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::{SqliteStore, DEFAULT_STORAGE_KEY};
pub use traits::LedgerStore;

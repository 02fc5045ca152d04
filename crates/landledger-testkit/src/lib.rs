//! # Land Ledger Testkit
//!
//! Testing utilities for the Land Ledger.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known digest inputs and outputs
//! - **Generators**: Proptest strategies for drafts and registration input
//! - **Fixtures**: Sample records and a store that allows tampering
//!
//! ## Golden Vectors
//!
//! ```rust
//! use landledger_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, actual) in verify_all_vectors() {
//!     assert!(matches, "vector '{name}' produced {actual}");
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use landledger_testkit::generators::record_draft;
//!
//! proptest! {
//!     #[test]
//!     fn chaining_is_deterministic(draft in record_draft()) {
//!         let builder = ChainBuilder::default();
//!         prop_assert_eq!(builder.chain(draft.clone(), None).unwrap(), builder.chain(draft, None).unwrap());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use landledger_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let record = fixture.ledger.register(fixture.draft(0)).unwrap();
//! fixture.store().tamper(0, |r| r.entry.land_size = 99.0);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{sample_draft, sample_request, shared_fixture, TamperStore, TestFixture};
pub use generators::{record_draft, registration_request};
pub use vectors::{all_vectors, verify_all_vectors, GoldenVector};

//! # Land Ledger Core
//!
//! Pure primitives for the Land Ledger: digests, land records, canonical
//! payloads, chaining and verification.
//!
//! This crate contains no I/O and no storage. Everything here is a
//! deterministic computation over records handed in by the caller.
//!
//! ## Key Types
//!
//! - [`LandRecord`] - A registered land entry with its chain fields
//! - [`RecordDraft`] - A candidate record before chaining
//! - [`Digest`] - Fixed-width lowercase hex digest
//! - [`ChainBuilder`] - Computes transaction and block hashes
//! - [`Verifier`] - Recomputes and compares transaction hashes
//!
//! ## Canonicalization
//!
//! Transaction hashes are taken over a declaration-ordered JSON payload.
//! See the [`canonical`] module.

pub mod canonical;
pub mod chain;
pub mod digest;
pub mod error;
pub mod record;
pub mod registration;
pub mod token;
pub mod validation;
pub mod verify;

pub use canonical::{canonical_payload, record_payload};
pub use chain::{previous_hash_for, ChainBuilder};
pub use digest::{rolling32, Digest, DigestAlgorithm, GENESIS_HASH};
pub use error::{CoreError, FieldError, ValidationError};
pub use record::{now_millis, Coordinates, LandRecord, LandType, RecordDraft};
pub use registration::{generate_registration_number, RegistrationRequest, ValidatedRegistration};
pub use token::{VerificationToken, TOKEN_PREFIX};
pub use validation::{is_valid_owner_nic, OWNER_NIC_LEN};
pub use verify::{
    audit_chain, BreakKind, ChainBreak, ChainReport, VerificationOutcome, VerificationResult,
    Verifier,
};

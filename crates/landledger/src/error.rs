//! Error types for the Ledger.

use landledger_core::{CoreError, ValidationError};
use landledger_store::StoreError;
use thiserror::Error;

/// Errors that can occur during Ledger operations.
///
/// Lookup misses and hash mismatches are not errors; they come back as a
/// [`VerificationResult`](landledger_core::VerificationResult).
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Registration input was rejected.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Encoding or parsing error.
    #[error("core error: {0}")]
    Core(#[from] CoreError),
}

/// Result type for Ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

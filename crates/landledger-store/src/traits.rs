//! Store trait: the abstract interface for chain persistence.

use landledger_core::LandRecord;

use crate::error::Result;

/// An ordered, append-only sequence of land records.
///
/// # Design Notes
///
/// - `append` adds to the end. There is no position argument, no
///   deduplication and no uniqueness check on registration number or owner.
/// - `all` returns every record in insertion order.
/// - Implementations must be `Send + Sync`, but a store alone does not make
///   read-tail-then-append atomic. Callers that register concurrently
///   serialize through a single writer (see `landledger::Ledger`).
pub trait LedgerStore: Send + Sync {
    /// Append a record to the end of the chain.
    fn append(&self, record: &LandRecord) -> Result<()>;

    /// All records, in insertion order.
    fn all(&self) -> Result<Vec<LandRecord>>;

    /// The last record, or `None` for an empty chain.
    fn tail(&self) -> Result<Option<LandRecord>> {
        Ok(self.all()?.pop())
    }

    /// Number of records.
    fn len(&self) -> Result<usize> {
        Ok(self.all()?.len())
    }

    /// Whether the chain is empty.
    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

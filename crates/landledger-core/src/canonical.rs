//! Canonical payload encoding for transaction hashes.
//!
//! The payload is compact JSON with keys in a fixed declaration order:
//!
//! ```text
//! id, registrationNumber, ownerName, ownerNIC, propertyAddress, district,
//! province, landSize, landType, registrationDate, lastVerified, isVerified,
//! documents, coordinates?, timestamp
//! ```
//!
//! Timestamps are integer Unix milliseconds, documents keep their stored order
//! and `coordinates` is omitted when absent. The chain builder and the verifier
//! both go through [`canonical_payload`], so a stored record always reproduces
//! the bytes it was hashed from.

use serde::Serialize;

use crate::error::CoreError;
use crate::record::{Coordinates, LandRecord, LandType, RecordDraft};

/// Borrowed view of a draft in canonical field order.
///
/// Field order here IS the wire order. Do not reorder.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CanonicalPayload<'a> {
    id: &'a str,
    registration_number: &'a str,
    owner_name: &'a str,
    #[serde(rename = "ownerNIC")]
    owner_nic: &'a str,
    property_address: &'a str,
    district: &'a str,
    province: &'a str,
    land_size: f64,
    land_type: LandType,
    registration_date: i64,
    last_verified: i64,
    is_verified: bool,
    documents: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    coordinates: Option<&'a Coordinates>,
    timestamp: i64,
}

impl<'a> CanonicalPayload<'a> {
    fn new(draft: &'a RecordDraft, timestamp: i64) -> Self {
        Self {
            id: &draft.id,
            registration_number: &draft.registration_number,
            owner_name: &draft.owner_name,
            owner_nic: &draft.owner_nic,
            property_address: &draft.property_address,
            district: &draft.district,
            province: &draft.province,
            land_size: draft.land_size,
            land_type: draft.land_type,
            registration_date: draft.registration_date,
            last_verified: draft.last_verified,
            is_verified: draft.is_verified,
            documents: &draft.documents,
            coordinates: draft.coordinates.as_ref(),
            timestamp,
        }
    }
}

/// Encode a draft together with a creation timestamp.
pub fn canonical_payload(draft: &RecordDraft, timestamp: i64) -> Result<String, CoreError> {
    Ok(serde_json::to_string(&CanonicalPayload::new(draft, timestamp))?)
}

/// Reconstruct the payload a stored record was hashed from.
///
/// The creation timestamp is the record's registration date.
pub fn record_payload(record: &LandRecord) -> Result<String, CoreError> {
    canonical_payload(&record.entry, record.entry.registration_date)
}

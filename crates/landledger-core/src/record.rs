//! Land records: the unit of the ledger.
//!
//! A [`RecordDraft`] carries the registered fields. Chaining wraps it into a
//! [`LandRecord`] that adds the transaction, previous and block hashes.
//! Both persist as flat camelCase JSON objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::digest::Digest;
use crate::error::CoreError;

/// Category of registered land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LandType {
    Residential,
    Commercial,
    Agricultural,
    Industrial,
    Recreational,
}

impl LandType {
    /// Every land type, in form order.
    pub const ALL: [LandType; 5] = [
        LandType::Residential,
        LandType::Commercial,
        LandType::Agricultural,
        LandType::Industrial,
        LandType::Recreational,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            LandType::Residential => "Residential",
            LandType::Commercial => "Commercial",
            LandType::Agricultural => "Agricultural",
            LandType::Industrial => "Industrial",
            LandType::Recreational => "Recreational",
        }
    }
}

impl fmt::Display for LandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LandType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        LandType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::UnknownLandType(s.to_string()))
    }
}

/// Geographic position of a parcel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A candidate record: everything except the chain fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDraft {
    pub id: String,
    pub registration_number: String,
    pub owner_name: String,
    /// 12-digit national identifier.
    #[serde(rename = "ownerNIC")]
    pub owner_nic: String,
    pub property_address: String,
    pub district: String,
    pub province: String,
    pub land_size: f64,
    pub land_type: LandType,
    /// Unix milliseconds.
    pub registration_date: i64,
    /// Unix milliseconds.
    pub last_verified: i64,
    pub is_verified: bool,
    #[serde(default)]
    pub documents: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

/// A chained land record as stored in the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandRecord {
    #[serde(flatten)]
    pub entry: RecordDraft,
    /// Digest of the canonical payload at creation time.
    pub transaction_hash: Digest,
    /// Block hash of the tail when this record was chained, or genesis.
    pub previous_hash: Digest,
    /// Digest of `transaction_hash ++ previous_hash`.
    pub block_hash: Digest,
}

impl LandRecord {
    pub fn registration_number(&self) -> &str {
        &self.entry.registration_number
    }

    pub fn owner_nic(&self) -> &str {
        &self.entry.owner_nic
    }

    /// Whether this record claims to be the first in its chain.
    pub fn is_genesis(&self) -> bool {
        self.previous_hash.is_genesis()
    }

    /// Whether this record belongs to the given identity.
    pub fn matches(&self, registration_number: &str, owner_nic: &str) -> bool {
        self.entry.registration_number == registration_number && self.entry.owner_nic == owner_nic
    }
}

/// Current time in Unix milliseconds.
pub fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> RecordDraft {
        RecordDraft {
            id: "rec-1".into(),
            registration_number: "WE-12345678-ABC".into(),
            owner_name: "Asha Perera".into(),
            owner_nic: "123456789012".into(),
            property_address: "12 Temple Road".into(),
            district: "Colombo".into(),
            province: "Western".into(),
            land_size: 2.5,
            land_type: LandType::Residential,
            registration_date: 1_700_000_000_000,
            last_verified: 1_700_000_000_000,
            is_verified: true,
            documents: vec![],
            coordinates: None,
        }
    }

    #[test]
    fn test_land_type_parse() {
        assert_eq!("agricultural".parse::<LandType>().unwrap(), LandType::Agricultural);
        assert_eq!(" Industrial ".parse::<LandType>().unwrap(), LandType::Industrial);
        assert!("Swamp".parse::<LandType>().is_err());
    }

    #[test]
    fn test_record_json_layout() {
        let record = LandRecord {
            entry: draft(),
            transaction_hash: Digest::from_hex("0000abcd").unwrap(),
            previous_hash: Digest::genesis(),
            block_hash: Digest::from_hex("1234abcd").unwrap(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["ownerNIC"], "123456789012");
        assert_eq!(json["registrationNumber"], "WE-12345678-ABC");
        assert_eq!(json["landType"], "Residential");
        assert_eq!(json["previousHash"], "0000000000000000");
        assert!(json.get("coordinates").is_none());
        assert!(json.get("entry").is_none());

        let back: LandRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
        assert!(back.is_genesis());
        assert!(back.matches("WE-12345678-ABC", "123456789012"));
    }
}

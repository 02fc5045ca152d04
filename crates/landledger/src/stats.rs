//! Dashboard summary figures.

use std::collections::{BTreeMap, BTreeSet};

use landledger_core::{LandRecord, LandType};
use serde::Serialize;

/// Totals over every record in the chain.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerStats {
    pub total_records: usize,
    /// Sum of land sizes.
    pub total_land_size: f64,
    /// Number of distinct provinces.
    pub provinces: usize,
    /// Record count per land type. Types with no records are absent.
    pub land_types: BTreeMap<LandType, usize>,
}

impl LedgerStats {
    pub fn from_records(records: &[LandRecord]) -> Self {
        let mut land_types = BTreeMap::new();
        for record in records {
            *land_types.entry(record.entry.land_type).or_insert(0) += 1;
        }

        Self {
            total_records: records.len(),
            total_land_size: records.iter().map(|r| r.entry.land_size).sum(),
            provinces: records
                .iter()
                .map(|r| r.entry.province.as_str())
                .collect::<BTreeSet<_>>()
                .len(),
            land_types,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use landledger_core::{ChainBuilder, RecordDraft};

    fn draft(i: usize, province: &str, land_type: LandType, land_size: f64) -> RecordDraft {
        RecordDraft {
            id: format!("id-{i}"),
            registration_number: format!("REG-{i}"),
            owner_name: "Owner".into(),
            owner_nic: "123456789012".into(),
            property_address: "Addr".into(),
            district: "District".into(),
            province: province.into(),
            land_size,
            land_type,
            registration_date: 1_700_000_000_000,
            last_verified: 1_700_000_000_000,
            is_verified: true,
            documents: vec![],
            coordinates: None,
        }
    }

    #[test]
    fn test_stats() {
        let builder = ChainBuilder::default();
        let mut records: Vec<LandRecord> = Vec::new();
        for (i, (province, land_type, size)) in [
            ("Western", LandType::Residential, 1.5),
            ("Western", LandType::Commercial, 2.0),
            ("Uva", LandType::Residential, 0.5),
        ]
        .into_iter()
        .enumerate()
        {
            let record = builder
                .chain(draft(i, province, land_type, size), records.last())
                .unwrap();
            records.push(record);
        }

        let stats = LedgerStats::from_records(&records);
        assert_eq!(stats.total_records, 3);
        assert_eq!(stats.total_land_size, 4.0);
        assert_eq!(stats.provinces, 2);
        assert_eq!(stats.land_types.get(&LandType::Residential), Some(&2));
        assert_eq!(stats.land_types.get(&LandType::Commercial), Some(&1));
        assert_eq!(stats.land_types.get(&LandType::Industrial), None);

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["landTypes"]["Residential"], 2);
    }

    #[test]
    fn test_empty_stats() {
        assert_eq!(LedgerStats::from_records(&[]), LedgerStats::default());
    }
}

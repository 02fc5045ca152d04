//! Registration intake: raw form input to a validated candidate record.
//!
//! Validation collects every failing field rather than stopping at the first,
//! so a caller can show all messages at once. The chain builder never sees
//! unvalidated input.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{FieldError, ValidationError};
use crate::record::{Coordinates, LandType, RecordDraft};
use crate::validation::{is_blank, is_valid_latitude, is_valid_longitude, is_valid_owner_nic};

/// Raw registration form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub owner_name: String,
    #[serde(rename = "ownerNIC")]
    pub owner_nic: String,
    pub property_address: String,
    pub district: String,
    pub province: String,
    pub land_size: String,
    pub land_type: String,
    #[serde(default)]
    pub latitude: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
}

/// A registration that passed every field check. Values are trimmed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRegistration {
    pub owner_name: String,
    pub owner_nic: String,
    pub property_address: String,
    pub district: String,
    pub province: String,
    pub land_size: f64,
    pub land_type: LandType,
    pub coordinates: Option<Coordinates>,
}

impl RegistrationRequest {
    /// Check every field and report all failures.
    pub fn validate(&self) -> Result<ValidatedRegistration, ValidationError> {
        let mut errors = Vec::new();

        let required = [
            ("ownerName", &self.owner_name, "Owner name is required"),
            ("ownerNIC", &self.owner_nic, "NIC number is required"),
            ("propertyAddress", &self.property_address, "Property address is required"),
            ("district", &self.district, "District is required"),
            ("province", &self.province, "Province selection is required"),
        ];
        for (field, value, message) in required {
            if is_blank(value) {
                errors.push(FieldError::new(field, message));
            }
        }

        let owner_nic = self.owner_nic.trim();
        if !owner_nic.is_empty() && !is_valid_owner_nic(owner_nic) {
            errors.push(FieldError::new(
                "ownerNIC",
                "Aadhaar number must be exactly 12 digits",
            ));
        }

        let land_size = match self.land_size.trim().parse::<f64>() {
            Ok(size) if size.is_finite() && size > 0.0 => Some(size),
            _ => {
                errors.push(FieldError::new("landSize", "Valid land size is required"));
                None
            }
        };

        let land_type = if is_blank(&self.land_type) {
            errors.push(FieldError::new("landType", "Land type selection is required"));
            None
        } else {
            match self.land_type.parse::<LandType>() {
                Ok(t) => Some(t),
                Err(_) => {
                    errors.push(FieldError::new("landType", "Unknown land type"));
                    None
                }
            }
        };

        let coordinates = self.coordinates(&mut errors);

        match (land_size, land_type) {
            (Some(land_size), Some(land_type)) if errors.is_empty() => Ok(ValidatedRegistration {
                owner_name: self.owner_name.trim().to_string(),
                owner_nic: owner_nic.to_string(),
                property_address: self.property_address.trim().to_string(),
                district: self.district.trim().to_string(),
                province: self.province.trim().to_string(),
                land_size,
                land_type,
                coordinates,
            }),
            _ => Err(ValidationError::Fields(errors)),
        }
    }

    fn coordinates(&self, errors: &mut Vec<FieldError>) -> Option<Coordinates> {
        let lat = self.latitude.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let lon = self.longitude.as_deref().map(str::trim).filter(|s| !s.is_empty());

        match (lat, lon) {
            (None, None) => None,
            (Some(lat), Some(lon)) => {
                let latitude = lat.parse::<f64>().ok().filter(|v| is_valid_latitude(*v));
                let longitude = lon.parse::<f64>().ok().filter(|v| is_valid_longitude(*v));
                if latitude.is_none() {
                    errors.push(FieldError::new("latitude", "Latitude must be between -90 and 90"));
                }
                if longitude.is_none() {
                    errors.push(FieldError::new(
                        "longitude",
                        "Longitude must be between -180 and 180",
                    ));
                }
                Some(Coordinates {
                    latitude: latitude?,
                    longitude: longitude?,
                })
            }
            (Some(_), None) => {
                errors.push(FieldError::new("longitude", "Longitude is required with latitude"));
                None
            }
            (None, Some(_)) => {
                errors.push(FieldError::new("latitude", "Latitude is required with longitude"));
                None
            }
        }
    }
}

impl ValidatedRegistration {
    /// Build the candidate record registered at `now`.
    pub fn into_draft(self, id: String, registration_number: String, now: i64) -> RecordDraft {
        RecordDraft {
            id,
            registration_number,
            owner_name: self.owner_name,
            owner_nic: self.owner_nic,
            property_address: self.property_address,
            district: self.district,
            province: self.province,
            land_size: self.land_size,
            land_type: self.land_type,
            registration_date: now,
            last_verified: now,
            is_verified: true,
            documents: Vec::new(),
            coordinates: self.coordinates,
        }
    }
}

const BASE36_UPPER: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// `<PR>-<last 8 digits of now>-<3 random base-36 chars>`, e.g. `WE-12345678-K3Z`.
///
/// `PR` is the first two characters of the province, uppercased.
pub fn generate_registration_number<R: Rng + ?Sized>(province: &str, now: i64, rng: &mut R) -> String {
    let prefix: String = province.trim().chars().take(2).collect::<String>().to_uppercase();
    let ts = now.to_string();
    let tail = &ts[ts.len().saturating_sub(8)..];
    let suffix: String = (0..3)
        .map(|_| char::from(BASE36_UPPER[rng.gen_range(0..BASE36_UPPER.len())]))
        .collect();
    format!("{prefix}-{tail}-{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn request() -> RegistrationRequest {
        RegistrationRequest {
            owner_name: " Asha Perera ".into(),
            owner_nic: "123456789012".into(),
            property_address: "12 Temple Road".into(),
            district: "Colombo".into(),
            province: "Western".into(),
            land_size: "2.5".into(),
            land_type: "Residential".into(),
            latitude: None,
            longitude: None,
        }
    }

    #[test]
    fn test_valid_request() {
        let v = request().validate().unwrap();
        assert_eq!(v.owner_name, "Asha Perera");
        assert_eq!(v.land_size, 2.5);
        assert_eq!(v.land_type, LandType::Residential);
        assert!(v.coordinates.is_none());
    }

    #[test]
    fn test_collects_every_error() {
        let req = RegistrationRequest {
            owner_nic: "12345".into(),
            land_size: "-1".into(),
            ..Default::default()
        };
        let err = req.validate().unwrap_err();
        assert_eq!(err.message_for("ownerName"), Some("Owner name is required"));
        assert_eq!(
            err.message_for("ownerNIC"),
            Some("Aadhaar number must be exactly 12 digits")
        );
        assert_eq!(err.message_for("landSize"), Some("Valid land size is required"));
        assert_eq!(err.message_for("landType"), Some("Land type selection is required"));
        assert!(err.message_for("province").is_some());
    }

    #[test]
    fn test_land_size_must_be_positive_number() {
        for bad in ["0", "abc", "", "NaN", "inf"] {
            let req = RegistrationRequest {
                land_size: bad.into(),
                ..request()
            };
            assert!(req.validate().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_coordinates() {
        let req = RegistrationRequest {
            latitude: Some("6.9271".into()),
            longitude: Some("79.8612".into()),
            ..request()
        };
        let v = req.validate().unwrap();
        assert_eq!(
            v.coordinates,
            Some(Coordinates {
                latitude: 6.9271,
                longitude: 79.8612
            })
        );

        let half = RegistrationRequest {
            latitude: Some("6.9".into()),
            ..request()
        };
        assert!(half.validate().unwrap_err().message_for("longitude").is_some());

        let out_of_range = RegistrationRequest {
            latitude: Some("91".into()),
            longitude: Some("0".into()),
            ..request()
        };
        assert!(out_of_range.validate().unwrap_err().message_for("latitude").is_some());
    }

    #[test]
    fn test_into_draft() {
        let draft = request()
            .validate()
            .unwrap()
            .into_draft("id-1".into(), "WE-00000000-AAA".into(), 42);
        assert_eq!(draft.registration_date, 42);
        assert_eq!(draft.last_verified, 42);
        assert!(draft.documents.is_empty());
    }

    #[test]
    fn test_registration_number_format() {
        let mut rng = StdRng::seed_from_u64(7);
        let number = generate_registration_number("Western", 1_712_345_678_901, &mut rng);
        let parts: Vec<&str> = number.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "WE");
        assert_eq!(parts[1], "45678901");
        assert_eq!(parts[2].len(), 3);
        assert!(parts[2].bytes().all(|b| b.is_ascii_digit() || b.is_ascii_uppercase()));
    }

    #[test]
    fn test_registration_number_multibyte_province() {
        let mut rng = StdRng::seed_from_u64(1);
        let number = generate_registration_number("Ūva", 5, &mut rng);
        assert!(number.starts_with("ŪV-5-"));
    }
}

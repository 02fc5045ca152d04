//! Proptest generators for property-based testing.

use proptest::prelude::*;

use landledger_core::{Coordinates, LandType, RecordDraft, RegistrationRequest};

/// Generate a LandType.
pub fn land_type() -> impl Strategy<Value = LandType> {
    prop::sample::select(LandType::ALL.to_vec())
}

/// Generate a well-formed owner id (12 digits).
pub fn owner_nic() -> impl Strategy<Value = String> {
    "[0-9]{12}".prop_map(String::from)
}

/// Generate a registration number of the issued shape.
pub fn registration_number() -> impl Strategy<Value = String> {
    "[A-Z]{2}-[0-9]{8}-[0-9A-Z]{3}".prop_map(String::from)
}

/// Generate a reasonable timestamp (Unix ms).
pub fn timestamp() -> impl Strategy<Value = i64> {
    0i64..=4_102_444_800_000i64
}

/// Generate free text, including non-ASCII.
pub fn text() -> impl Strategy<Value = String> {
    "\\PC{1,40}".prop_map(String::from)
}

/// Generate optional in-range coordinates.
pub fn coordinates() -> impl Strategy<Value = Option<Coordinates>> {
    prop::option::of(
        (-90.0f64..=90.0, -180.0f64..=180.0)
            .prop_map(|(latitude, longitude)| Coordinates { latitude, longitude }),
    )
}

/// Generate a candidate record.
pub fn record_draft() -> impl Strategy<Value = RecordDraft> {
    (
        (any::<u128>(), registration_number(), text(), owner_nic()),
        (text(), text(), text()),
        (0.01f64..100_000.0, land_type(), timestamp()),
        (prop::collection::vec(text(), 0..4), coordinates()),
    )
        .prop_map(
            |(
                (id, registration_number, owner_name, owner_nic),
                (property_address, district, province),
                (land_size, land_type, registered),
                (documents, coordinates),
            )| RecordDraft {
                id: format!("{id:032x}"),
                registration_number,
                owner_name,
                owner_nic,
                property_address,
                district,
                province,
                land_size,
                land_type,
                registration_date: registered,
                last_verified: registered,
                is_verified: true,
                documents,
                coordinates,
            },
        )
}

/// Generate registration form input that passes validation.
pub fn registration_request() -> impl Strategy<Value = RegistrationRequest> {
    (
        ("[A-Za-z][A-Za-z ]{0,30}", owner_nic(), "[0-9]{1,3} [A-Za-z ]{1,20}"),
        ("[A-Z][a-z]{2,12}", "[A-Z][a-z]{2,12}"),
        (1u32..1_000_000, land_type()),
    )
        .prop_map(
            |((owner_name, owner_nic, property_address), (district, province), (centi, land_type))| {
                RegistrationRequest {
                    owner_name,
                    owner_nic,
                    property_address,
                    district,
                    province,
                    land_size: format!("{}.{:02}", centi / 100, centi % 100),
                    land_type: land_type.to_string(),
                    latitude: None,
                    longitude: None,
                }
            },
        )
}

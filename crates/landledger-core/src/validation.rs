//! Field-shape rules shared by registration intake and verification.

/// Length of an owner identifier.
pub const OWNER_NIC_LEN: usize = 12;

/// Whether `nic` is exactly 12 ASCII digits.
pub fn is_valid_owner_nic(nic: &str) -> bool {
    nic.len() == OWNER_NIC_LEN && nic.bytes().all(|b| b.is_ascii_digit())
}

/// Whether a field is empty after trimming.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Latitude in degrees, inclusive.
pub fn is_valid_latitude(lat: f64) -> bool {
    lat.is_finite() && (-90.0..=90.0).contains(&lat)
}

/// Longitude in degrees, inclusive.
pub fn is_valid_longitude(lon: f64) -> bool {
    lon.is_finite() && (-180.0..=180.0).contains(&lon)
}

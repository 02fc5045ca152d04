//! Verification tokens printed on registration certificates.
//!
//! Format: `LANDCHAIN_VERIFY:<registrationNumber>:<ownerNIC>:<transactionHash>`

use std::fmt;
use std::str::FromStr;

use crate::digest::Digest;
use crate::error::CoreError;
use crate::record::LandRecord;

pub const TOKEN_PREFIX: &str = "LANDCHAIN_VERIFY";

/// An identity plus the transaction hash it was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationToken {
    pub registration_number: String,
    pub owner_nic: String,
    pub transaction_hash: Digest,
}

impl VerificationToken {
    pub fn for_record(record: &LandRecord) -> Self {
        Self {
            registration_number: record.entry.registration_number.clone(),
            owner_nic: record.entry.owner_nic.clone(),
            transaction_hash: record.transaction_hash.clone(),
        }
    }
}

impl fmt::Display for VerificationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            TOKEN_PREFIX, self.registration_number, self.owner_nic, self.transaction_hash
        )
    }
}

impl FromStr for VerificationToken {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        let [prefix, registration_number, owner_nic, hash] = parts.as_slice() else {
            return Err(CoreError::MalformedToken(format!(
                "expected 4 ':'-separated fields, got {}",
                parts.len()
            )));
        };
        if *prefix != TOKEN_PREFIX {
            return Err(CoreError::MalformedToken(format!("unknown prefix {prefix:?}")));
        }
        if registration_number.is_empty() || owner_nic.is_empty() {
            return Err(CoreError::MalformedToken("empty identity field".into()));
        }
        let transaction_hash =
            Digest::from_hex(hash).map_err(|e| CoreError::MalformedToken(e.to_string()))?;

        Ok(Self {
            registration_number: registration_number.to_string(),
            owner_nic: owner_nic.to_string(),
            transaction_hash,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_parse() {
        let token: VerificationToken = "LANDCHAIN_VERIFY:WE-12345678-ABC:123456789012:0a1b2c3d"
            .parse()
            .unwrap();
        assert_eq!(token.registration_number, "WE-12345678-ABC");
        assert_eq!(token.owner_nic, "123456789012");
        assert_eq!(token.transaction_hash.as_str(), "0a1b2c3d");
        assert_eq!(
            token.to_string(),
            "LANDCHAIN_VERIFY:WE-12345678-ABC:123456789012:0a1b2c3d"
        );
    }

    #[test]
    fn test_token_rejects_malformed() {
        assert!("WE-1:123456789012:0a1b".parse::<VerificationToken>().is_err());
        assert!("OTHER:WE-1:123456789012:0a1b".parse::<VerificationToken>().is_err());
        assert!("LANDCHAIN_VERIFY:WE-1:123456789012:XYZ".parse::<VerificationToken>().is_err());
        assert!("LANDCHAIN_VERIFY::123456789012:0a1b".parse::<VerificationToken>().is_err());
    }
}

//! National Identification Number validation and hashing.
//!
//! The NIN itself never leaves the client unhashed: the contract only ever
//! sees a per-election voter hash derived from the SHA-256 digest of the NIN.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Required NIN length in digits.
const NIN_DIGITS: usize = 11;

/// A validated National Identification Number.
///
/// # Examples
///
/// ```
/// use psephos_core::Nin;
///
/// assert!(Nin::parse("12345678901").is_some());
/// assert!(Nin::parse("1234").is_none());
/// assert!(Nin::parse("1234567890a").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Nin(String);

impl Nin {
    /// Validate and wrap a raw NIN string.
    ///
    /// Returns `None` unless the input is exactly eleven ASCII digits.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.len() == NIN_DIGITS && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(trimmed.to_string()))
        } else {
            None
        }
    }

    /// The validated digits.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// SHA-256 digest of the NIN.
    pub fn hash(&self) -> NinHash {
        NinHash::digest(self.as_str())
    }
}

/// SHA-256 digest of a NIN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NinHash([u8; 32]);

impl NinHash {
    /// Hash a raw NIN string.
    pub fn digest(nin: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(nin.as_bytes());
        Self(hasher.finalize().into())
    }

    /// Hex rendering with a `0x` prefix, as stored off chain.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Derive the per-election voter-uniqueness hash.
    ///
    /// The election id is folded in so the same voter produces distinct
    /// hashes across elections; the contract keys its duplicate-vote check
    /// on this value.
    pub fn voter_hash(&self, election_id: u64) -> VoterHash {
        let mut hasher = Sha256::new();
        hasher.update(election_id.to_be_bytes());
        hasher.update(self.0);
        VoterHash(hasher.finalize().into())
    }
}

/// Per-election voter-uniqueness hash submitted with a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoterHash([u8; 32]);

impl VoterHash {
    /// Hex rendering with a `0x` prefix, as sent to the contract.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nin_requires_eleven_digits() {
        assert!(Nin::parse("12345678901").is_some());
        assert!(Nin::parse(" 12345678901 ").is_some());
        assert!(Nin::parse("123456789012").is_none());
        assert!(Nin::parse("123456789o1").is_none());
        assert!(Nin::parse("").is_none());
    }

    #[test]
    fn nin_hash_is_stable() {
        let a = NinHash::digest("12345678901");
        let b = NinHash::digest("12345678901");
        assert_eq!(a, b);
        assert!(a.to_hex().starts_with("0x"));
        assert_eq!(a.to_hex().len(), 2 + 64);
    }

    #[test]
    fn voter_hash_varies_by_election() {
        let nin_hash = NinHash::digest("12345678901");
        assert_ne!(nin_hash.voter_hash(1), nin_hash.voter_hash(2));
        assert_eq!(nin_hash.voter_hash(3), nin_hash.voter_hash(3));
    }
}

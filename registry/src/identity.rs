//! Caller and owner identities.
//!
//! The host authenticates every call before it reaches the registry, so an
//! identity here is only an opaque 32-byte account key.

use std::fmt;

use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

use crate::serializer::ReaderError;

pub const IDENTITY_SIZE: usize = 32;

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Identity([u8; IDENTITY_SIZE]);

impl Identity {
    pub const fn new(bytes: [u8; IDENTITY_SIZE]) -> Self {
        Self(bytes)
    }

    /// The zero identity, never a valid owner
    pub const fn zero() -> Self {
        Self([0u8; IDENTITY_SIZE])
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; IDENTITY_SIZE]
    }

    pub fn as_bytes(&self) -> &[u8; IDENTITY_SIZE] {
        &self.0
    }

    pub fn to_bytes(self) -> [u8; IDENTITY_SIZE] {
        self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a 64 hex chars identity, with or without a `0x` prefix
    pub fn from_hex(value: &str) -> Result<Self, ReaderError> {
        let value = value.strip_prefix("0x").unwrap_or(value);
        let bytes = hex::decode(value).map_err(|_| ReaderError::InvalidHex)?;
        let bytes: [u8; IDENTITY_SIZE] = bytes.try_into().map_err(|_| ReaderError::InvalidSize)?;
        Ok(Self(bytes))
    }
}

impl From<[u8; IDENTITY_SIZE]> for Identity {
    fn from(bytes: [u8; IDENTITY_SIZE]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({})", self.to_hex())
    }
}

impl Serialize for Identity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Identity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Identity::from_hex(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing_accepts_prefix() {
        let raw = "0x".to_string() + &"11".repeat(32);
        let identity = Identity::from_hex(&raw).unwrap();
        assert_eq!(identity, Identity::new([0x11; 32]));
        assert_eq!(identity.to_string(), raw);
    }

    #[test]
    fn test_hex_parsing_rejects_wrong_size() {
        assert_eq!(Identity::from_hex("abcd"), Err(ReaderError::InvalidSize));
        assert_eq!(Identity::from_hex("zz"), Err(ReaderError::InvalidHex));
    }

    #[test]
    fn test_json_form_is_plain_hex() {
        let identity = Identity::new([0x01; 32]);
        let json = serde_json::to_string(&identity).unwrap();
        assert_eq!(json, format!("\"{}\"", "01".repeat(32)));
        let back: Identity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, identity);
    }

    #[test]
    fn test_zero_identity() {
        assert!(Identity::zero().is_zero());
        assert!(!Identity::new([1; 32]).is_zero());
    }
}

use serde::{Deserialize, Serialize};

use crate::types::TokenKind;

pub const VERSION: &str = env!("BUILD_VERSION");

// Locator rules
// Every token of a type shares one metadata document:
// <prefix><type id>.json
pub const LOCATOR_SUFFIX: &str = ".json";
// Matches the base URI limit used by the marketplace indexers
pub const MAX_LOCATOR_PREFIX_LENGTH: usize = 256;

// Type catalog rules
pub const MAX_NAME_LENGTH: usize = 64;
// Ability names shown on the character card
pub const MAX_SKILL_LENGTH: usize = 64;

// Collection rules
pub const MAX_COLLECTION_NAME_LENGTH: usize = 64;
pub const MAX_COLLECTION_SYMBOL_LENGTH: usize = 8;

// Progression rules
// Freshly minted tokens start at level 1 with an empty counter
pub const INITIAL_LEVEL: u32 = 1;
pub const INITIAL_COUNTER: u64 = 0;
// Token ids are assigned sequentially, 0 is never a valid token
pub const FIRST_TOKEN_ID: u64 = 1;

// Batch rules
// An operator usually pushes one match worth of updates at once
pub const MAX_BATCH_SIZE: usize = 100;

// Static checks
const _: () = assert!(
    INITIAL_LEVEL >= 1,
    "Initial level must be within the bounds of every type"
);
const _: () = assert!(FIRST_TOKEN_ID > 0, "Token id 0 is reserved");
const _: () = assert!(
    MAX_LOCATOR_PREFIX_LENGTH <= u16::MAX as usize,
    "Locator prefix must fit the u16 string length of the codec"
);
const _: () = assert!(
    MAX_NAME_LENGTH <= u16::MAX as usize && MAX_SKILL_LENGTH <= u16::MAX as usize,
    "Names must fit the u16 string length of the codec"
);

/// Static settings of a registry instance
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Collection display name
    pub name: String,
    /// Collection ticker
    pub symbol: String,
    /// What the tokens of this collection are
    pub kind: TokenKind,
    /// Locator prefix used until an admin replaces it
    #[serde(default)]
    pub locator_prefix: String,
    /// Largest batch accepted by `execute`
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,
}

fn default_max_batch_size() -> usize {
    MAX_BATCH_SIZE
}

impl RegistryConfig {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            kind,
            locator_prefix: String::new(),
            max_batch_size: MAX_BATCH_SIZE,
        }
    }

    pub fn with_locator_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.locator_prefix = prefix.into();
        self
    }

    pub fn with_max_batch_size(mut self, max_batch_size: usize) -> Self {
        self.max_batch_size = max_batch_size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = RegistryConfig::new("Prime Games Weapon", "PGW", TokenKind::Weapon);
        assert_eq!(config.max_batch_size, MAX_BATCH_SIZE);
        assert!(config.locator_prefix.is_empty());
    }

    #[test]
    fn test_config_from_json_uses_defaults() {
        let json = r#"{"name":"Prime Games Character","symbol":"PGC","kind":"character"}"#;
        let config: RegistryConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.kind, TokenKind::Character);
        assert_eq!(config.max_batch_size, MAX_BATCH_SIZE);
        assert_eq!(config.locator_prefix, "");
    }

    #[test]
    fn test_version_is_stamped() {
        assert!(VERSION.starts_with(env!("CARGO_PKG_VERSION")));
    }
}

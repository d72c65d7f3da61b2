use thiserror::Error;

use crate::error::RegistryError;

/// Errors that can occur while loading and applying a genesis file
#[derive(Error, Debug)]
pub enum GenesisError {
    #[error("Invalid format version: expected 1, got {0}")]
    InvalidFormatVersion(u32),

    #[error("Invalid identity for {field}: {value}")]
    InvalidIdentity { field: String, value: String },

    #[error("Unknown role: {0}")]
    InvalidRole(String),

    #[error("Genesis file not found: {0}")]
    FileNotFound(String),

    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
}

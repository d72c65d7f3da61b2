use serde::{Deserialize, Serialize};

use crate::config::RegistryConfig;
use crate::types::{TypeId, TypeRecord};

/// Root structure of a genesis JSON file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenesisState {
    /// Format version - must be 1
    pub format_version: u32,

    /// Collection settings
    pub collection: RegistryConfig,

    /// First administrator (64 hex chars)
    pub admin: String,

    /// Extra role grants, applied in order by the administrator
    #[serde(default)]
    pub grants: Vec<RoleGrant>,

    /// Initial type catalog
    #[serde(default)]
    pub types: Vec<TypeEntry>,
}

/// One role grant entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleGrant {
    /// Role name ("operator", "minter", "admin") or 64 hex chars role id
    pub role: String,

    /// Grantee (64 hex chars)
    pub identity: String,
}

/// One type catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeEntry {
    pub id: TypeId,
    pub record: TypeRecord,
}

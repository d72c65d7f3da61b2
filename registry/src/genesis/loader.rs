use std::path::Path;

use log::info;

use super::{
    error::GenesisError,
    types::{GenesisState, RoleGrant},
};
use crate::identity::Identity;
use crate::roles::{parse_role, RoleId};

pub const GENESIS_FORMAT_VERSION: u32 = 1;

/// Load a genesis file from disk
pub fn load_genesis(path: &Path) -> Result<GenesisState, GenesisError> {
    if !path.exists() {
        return Err(GenesisError::FileNotFound(
            path.to_string_lossy().to_string(),
        ));
    }

    let content = std::fs::read_to_string(path)?;
    let state = parse_genesis(&content)?;

    if log::log_enabled!(log::Level::Info) {
        info!(
            "Loaded genesis {} for {} ({}): {} types, {} role grants",
            path.display(),
            state.collection.name,
            state.collection.kind,
            state.types.len(),
            state.grants.len()
        );
    }
    Ok(state)
}

/// Parse a genesis document
pub fn parse_genesis(content: &str) -> Result<GenesisState, GenesisError> {
    let state: GenesisState = serde_json::from_str(content)?;

    if state.format_version != GENESIS_FORMAT_VERSION {
        return Err(GenesisError::InvalidFormatVersion(state.format_version));
    }

    Ok(state)
}

/// Parse an identity field (64 hex chars, optional 0x prefix)
pub fn parse_identity(value: &str, field: &str) -> Result<Identity, GenesisError> {
    let identity = Identity::from_hex(value).map_err(|_| GenesisError::InvalidIdentity {
        field: field.to_string(),
        value: value.to_string(),
    })?;
    if identity.is_zero() {
        return Err(GenesisError::InvalidIdentity {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
    Ok(identity)
}

/// Parse the role grants of a genesis file
pub fn parse_grants(grants: &[RoleGrant]) -> Result<Vec<(RoleId, Identity)>, GenesisError> {
    grants
        .iter()
        .enumerate()
        .map(|(i, grant)| {
            let role = parse_role(&grant.role)
                .ok_or_else(|| GenesisError::InvalidRole(grant.role.clone()))?;
            let identity = parse_identity(&grant.identity, &format!("grants[{}].identity", i))?;
            Ok((role, identity))
        })
        .collect()
}

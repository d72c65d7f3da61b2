//! Registry Role System
//!
//! Role ids are Keccak-256 hashes of the role name, the same derivation the
//! deployed collections use, so role grants can be carried over unchanged.

use sha3::{Digest, Keccak256};

/// Role identifier (32 bytes)
pub type RoleId = [u8; 32];

/// Create a RoleId from a role name (keccak256 of the name)
pub fn role_id_from_name(name: &str) -> RoleId {
    let mut hasher = Keccak256::new();
    hasher.update(name.as_bytes());
    hasher.finalize().into()
}

/// Admin role - manages types, roles (itself included) and the locator prefix
pub const ADMIN_ROLE: RoleId = [0u8; 32];

/// Operator role - mutates token progression
/// keccak256("ROLE_OPERATOR")
pub const OPERATOR_ROLE: RoleId = [
    0xaa, 0x3e, 0xdb, 0x77, 0xf7, 0xc8, 0xcc, 0x9e, 0x38, 0xe8, 0xaf, 0xe7, 0x89, 0x54, 0xf7, 0x03,
    0xae, 0xed, 0xa7, 0xff, 0xfe, 0x01, 0x4e, 0xeb, 0x6e, 0x56, 0xea, 0x84, 0xe6, 0x2f, 0x6d, 0xa7,
];

/// Minter role - creates new tokens
/// keccak256("ROLE_MINTER")
pub const MINTER_ROLE: RoleId = [
    0xae, 0xae, 0xf4, 0x61, 0x86, 0xeb, 0x59, 0xf8, 0x84, 0xe3, 0x69, 0x29, 0xb6, 0xd6, 0x82, 0xa6,
    0xae, 0x35, 0xe1, 0xe4, 0x3d, 0x8f, 0x05, 0xf0, 0x58, 0xdc, 0xef, 0xb9, 0x2b, 0x60, 0x14, 0x61,
];

/// Every role the registry checks
pub const PREDEFINED_ROLES: [RoleId; 3] = [ADMIN_ROLE, MINTER_ROLE, OPERATOR_ROLE];

/// Check if a role is a predefined role
pub fn is_predefined_role(role: &RoleId) -> bool {
    PREDEFINED_ROLES.contains(role)
}

/// Get the name of a predefined role
pub fn predefined_role_name(role: &RoleId) -> Option<&'static str> {
    if *role == ADMIN_ROLE {
        Some("ADMIN")
    } else if *role == MINTER_ROLE {
        Some("MINTER")
    } else if *role == OPERATOR_ROLE {
        Some("OPERATOR")
    } else {
        None
    }
}

/// Human readable role, falls back to the hex id for custom roles
pub fn role_display_name(role: &RoleId) -> String {
    match predefined_role_name(role) {
        Some(name) => name.to_string(),
        None => format!("0x{}", hex::encode(role)),
    }
}

/// Resolve a role from configuration: a predefined name or a 64 hex chars id
pub fn parse_role(value: &str) -> Option<RoleId> {
    match value.to_ascii_uppercase().as_str() {
        "ADMIN" | "DEFAULT_ADMIN" | "DEFAULT_ADMIN_ROLE" => return Some(ADMIN_ROLE),
        "MINTER" | "ROLE_MINTER" => return Some(MINTER_ROLE),
        "OPERATOR" | "ROLE_OPERATOR" => return Some(OPERATOR_ROLE),
        _ => {}
    }

    let raw = value.strip_prefix("0x").unwrap_or(value);
    hex::decode(raw).ok()?.try_into().ok()
}

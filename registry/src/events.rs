use std::fmt;

use serde::{Deserialize, Serialize};

use crate::identity::Identity;
use crate::roles::{role_display_name, RoleId};
use crate::types::{TokenId, TypeId};

/// Domain events, handed to the host once the producing call has committed
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RegistryEvent {
    RoleChanged {
        #[serde(with = "hex::serde")]
        role: RoleId,
        identity: Identity,
        granted: bool,
    },
    TypeAdded {
        id: TypeId,
    },
    Minted {
        token_id: TokenId,
        owner: Identity,
        type_id: TypeId,
    },
    LevelUp {
        token_id: TokenId,
        new_level: u32,
    },
    CounterUpdated {
        token_id: TokenId,
        new_value: u64,
    },
}

impl fmt::Display for RegistryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryEvent::RoleChanged {
                role,
                identity,
                granted,
            } => {
                let action = if *granted { "granted to" } else { "revoked from" };
                write!(f, "role {} {} {}", role_display_name(role), action, identity)
            }
            RegistryEvent::TypeAdded { id } => write!(f, "type {} added", id),
            RegistryEvent::Minted {
                token_id,
                owner,
                type_id,
            } => write!(f, "token {} of type {} minted to {}", token_id, type_id, owner),
            RegistryEvent::LevelUp {
                token_id,
                new_level,
            } => write!(f, "token {} reached level {}", token_id, new_level),
            RegistryEvent::CounterUpdated {
                token_id,
                new_value,
            } => write!(f, "token {} counter set to {}", token_id, new_value),
        }
    }
}

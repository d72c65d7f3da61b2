#![allow(clippy::module_inception)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::needless_return)]

pub mod config;
pub mod encoding;
pub mod error;
pub mod events;
pub mod genesis;
pub mod identity;
pub mod memory;
pub mod operations;
pub mod overlay;
pub mod registry;
pub mod roles;
pub mod serializer;
pub mod types;

pub use config::RegistryConfig;
pub use error::{RegistryError, RegistryResult};
pub use events::RegistryEvent;
pub use genesis::{load_genesis, parse_genesis, GenesisError, GenesisState};
pub use identity::Identity;
pub use memory::MemoryStorage;
pub use operations::{CallContext, Operation, RegistryStorage};
pub use registry::Registry;
pub use roles::{RoleId, ADMIN_ROLE, MINTER_ROLE, OPERATOR_ROLE};
pub use types::{Rarity, TokenId, TokenKind, TokenRecord, TypeId, TypeRecord, TypeTraits};

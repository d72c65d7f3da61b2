// Genesis seeding
// A genesis file creates a registry with its administrator, the initial
// role holders and the type catalog.

pub mod error;
pub mod loader;
pub mod types;

pub use error::GenesisError;
pub use loader::{load_genesis, parse_genesis, parse_grants, parse_identity, GENESIS_FORMAT_VERSION};
pub use types::{GenesisState, RoleGrant, TypeEntry};

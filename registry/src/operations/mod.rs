// Registry Operations Module
// This module contains the core business logic of the registry.
//
// The operations are runtime-agnostic:
// - Storage is abstracted via the RegistryStorage trait
// - The authenticated caller is passed in a CallContext
// - Atomicity is provided by staging writes in a RegistryOverlay

mod access;
mod batch;
mod catalog;
mod locator;
mod mint;
mod progress;
mod query;
mod validation;

pub use access::*;
pub use batch::*;
pub use catalog::*;
pub use locator::*;
pub use mint::*;
pub use progress::*;
pub use query::*;
pub use validation::*;

use crate::error::{RegistryError, RegistryResult};
use crate::events::RegistryEvent;
use crate::identity::Identity;
use crate::overlay::RegistryChanges;
use crate::roles::RoleId;
use crate::types::{TokenId, TokenKind, TokenRecord, TypeId, TypeRecord};

// ========================================
// Storage Trait (for dependency injection)
// ========================================

/// Abstract storage interface for registry operations
/// Runtime implementations provide concrete storage backends
pub trait RegistryStorage {
    /// Kind of tokens held by this collection
    fn kind(&self) -> TokenKind;

    // Role operations
    fn has_role(&self, role: &RoleId, account: &Identity) -> bool;
    fn set_role(&mut self, role: &RoleId, account: &Identity, granted: bool) -> RegistryResult<()>;
    fn role_members(&self, role: &RoleId) -> Vec<Identity>;

    // Type operations
    fn get_type(&self, id: TypeId) -> Option<TypeRecord>;
    fn set_type(&mut self, id: TypeId, record: &TypeRecord) -> RegistryResult<()>;
    fn type_ids(&self) -> Vec<TypeId>;

    fn type_exists(&self, id: TypeId) -> bool {
        self.get_type(id).is_some()
    }

    // Token operations
    fn get_token(&self, id: TokenId) -> Option<TokenRecord>;
    fn set_token(&mut self, token: &TokenRecord) -> RegistryResult<()>;

    fn token_exists(&self, id: TokenId) -> bool {
        self.get_token(id).is_some()
    }

    // Token id counter
    fn get_next_token_id(&self) -> TokenId;
    fn set_next_token_id(&mut self, id: TokenId) -> RegistryResult<()>;

    // Locator prefix
    fn get_locator_prefix(&self) -> String;
    fn set_locator_prefix(&mut self, prefix: &str) -> RegistryResult<()>;

    // Events
    fn emit(&mut self, event: RegistryEvent);
    /// Take the journaled events, oldest first
    fn drain_events(&mut self) -> Vec<RegistryEvent>;

    /// Apply a staged change set.
    ///
    /// The default writes the changes one setter at a time, so it is only
    /// atomic when the setters cannot fail. A backend whose setters can fail
    /// must override this and write the change set in one commit, otherwise
    /// a failure part way leaves the earlier writes applied.
    fn commit_changes(&mut self, changes: RegistryChanges) -> RegistryResult<()> {
        changes.apply_each(self)
    }
}

// ========================================
// Call Context
// ========================================

/// Context of an authenticated call
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallContext {
    /// Identity the host authenticated for this call
    pub caller: Identity,
}

impl CallContext {
    pub fn new(caller: Identity) -> Self {
        Self { caller }
    }
}

// ========================================
// Permission Checking Utilities
// ========================================

/// Check that `account` holds `role`
pub fn require_role<S: RegistryStorage + ?Sized>(
    storage: &S,
    role: &RoleId,
    account: &Identity,
) -> RegistryResult<()> {
    if storage.has_role(role, account) {
        Ok(())
    } else {
        Err(RegistryError::Unauthorized {
            account: *account,
            role: *role,
        })
    }
}

// Registry service
//
// Owns the state of one collection and serializes every mutating call:
// writers take the lock exclusively, queries share it. Each call runs in a
// staging overlay and only a successful call reaches the storage.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, warn};

use crate::config::RegistryConfig;
use crate::error::{RegistryError, RegistryResult};
use crate::events::RegistryEvent;
use crate::genesis::{parse_grants, parse_identity, GenesisError, GenesisState};
use crate::identity::Identity;
use crate::memory::MemoryStorage;
use crate::operations::{
    self, decode_operations, execute_batch, seed_admin, validate_batch_limit,
    validate_collection, validate_locator_prefix, CallContext, Operation, RegistryStorage,
};
use crate::overlay::{transact, RegistryOverlay};
use crate::roles::RoleId;
use crate::types::{TokenId, TokenKind, TokenRecord, TypeId, TypeRecord};

pub struct Registry<S: RegistryStorage = MemoryStorage> {
    name: String,
    symbol: String,
    max_batch_size: usize,
    storage: RwLock<S>,
}

impl Registry<MemoryStorage> {
    /// Create an empty in-memory registry administered by `admin`
    pub fn new(config: RegistryConfig, admin: &Identity) -> RegistryResult<Self> {
        let mut storage = MemoryStorage::new(config.kind);
        transact(&mut storage, |overlay| {
            seed_admin(overlay, admin)?;
            if !config.locator_prefix.is_empty() {
                validate_locator_prefix(&config.locator_prefix)?;
                overlay.set_locator_prefix(&config.locator_prefix)?;
            }
            Ok(())
        })?;
        Self::from_storage(config, storage)
    }

    /// Create a registry from a genesis file
    ///
    /// Role grants and types are applied by the genesis administrator in
    /// file order; any rejected entry fails the whole genesis.
    pub fn from_genesis(state: &GenesisState) -> Result<Self, GenesisError> {
        let admin = parse_identity(&state.admin, "admin")?;
        let grants = parse_grants(&state.grants)?;

        let registry = Self::new(state.collection.clone(), &admin)?;
        registry.apply("genesis", &admin, |overlay, ctx| {
            for (role, account) in &grants {
                operations::grant_role(overlay, ctx, role, account)?;
            }
            for entry in &state.types {
                operations::add_type(overlay, ctx, entry.id, entry.record.clone())?;
            }
            Ok(())
        })?;

        Ok(registry)
    }
}

impl<S: RegistryStorage> Registry<S> {
    /// Wrap an existing storage backend
    pub fn from_storage(config: RegistryConfig, storage: S) -> RegistryResult<Self> {
        validate_collection(&config.name, &config.symbol)?;
        validate_batch_limit(config.max_batch_size)?;
        if storage.kind() != config.kind {
            return Err(RegistryError::TraitsMismatch {
                expected: config.kind,
            });
        }

        Ok(Self {
            name: config.name,
            symbol: config.symbol,
            max_batch_size: config.max_batch_size,
            storage: RwLock::new(storage),
        })
    }

    fn read(&self) -> RwLockReadGuard<'_, S> {
        match self.storage.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, S> {
        match self.storage.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Run one mutating call in its own overlay
    fn apply<T, F>(&self, call: &str, caller: &Identity, f: F) -> RegistryResult<T>
    where
        F: FnOnce(&mut RegistryOverlay<'_, S>, &CallContext) -> RegistryResult<T>,
    {
        let ctx = CallContext::new(*caller);
        let mut storage = self.write();
        let result = transact(&mut *storage, |overlay| f(overlay, &ctx));
        self.log_result(call, caller, &result);
        result
    }

    fn log_result<T>(&self, call: &str, caller: &Identity, result: &RegistryResult<T>) {
        if !log::log_enabled!(log::Level::Debug) {
            return;
        }
        match result {
            Ok(_) => debug!("{}: {} by {} committed", self.symbol, call, caller),
            Err(e) => debug!(
                "{}: {} by {} rejected (code {}): {}",
                self.symbol,
                call,
                caller,
                e.code(),
                e
            ),
        }
    }

    // ========================================
    // Collection
    // ========================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn kind(&self) -> TokenKind {
        self.read().kind()
    }

    pub fn max_batch_size(&self) -> usize {
        self.max_batch_size
    }

    // ========================================
    // Access control
    // ========================================

    pub fn has_role(&self, role: &RoleId, identity: &Identity) -> bool {
        self.read().has_role(role, identity)
    }

    pub fn role_members(&self, role: &RoleId) -> Vec<Identity> {
        self.read().role_members(role)
    }

    pub fn role_member_count(&self, role: &RoleId) -> usize {
        operations::role_member_count(&*self.read(), role)
    }

    pub fn grant_role(
        &self,
        role: &RoleId,
        identity: &Identity,
        caller: &Identity,
    ) -> RegistryResult<()> {
        self.apply("grant_role", caller, |overlay, ctx| {
            operations::grant_role(overlay, ctx, role, identity)
        })
    }

    pub fn revoke_role(
        &self,
        role: &RoleId,
        identity: &Identity,
        caller: &Identity,
    ) -> RegistryResult<()> {
        self.apply("revoke_role", caller, |overlay, ctx| {
            operations::revoke_role(overlay, ctx, role, identity)
        })
    }

    pub fn renounce_role(
        &self,
        role: &RoleId,
        identity: &Identity,
        caller: &Identity,
    ) -> RegistryResult<()> {
        self.apply("renounce_role", caller, |overlay, ctx| {
            operations::renounce_role(overlay, ctx, role, identity)
        })
    }

    // ========================================
    // Type catalog
    // ========================================

    pub fn add_type(
        &self,
        id: TypeId,
        record: TypeRecord,
        caller: &Identity,
    ) -> RegistryResult<()> {
        self.apply("add_type", caller, |overlay, ctx| {
            operations::add_type(overlay, ctx, id, record)
        })
    }

    pub fn get_type(&self, id: TypeId) -> RegistryResult<TypeRecord> {
        operations::get_type(&*self.read(), id)
    }

    pub fn type_ids(&self) -> Vec<TypeId> {
        self.read().type_ids()
    }

    pub fn type_count(&self) -> usize {
        operations::type_count(&*self.read())
    }

    // ========================================
    // Tokens
    // ========================================

    pub fn mint(
        &self,
        owner: &Identity,
        type_id: TypeId,
        caller: &Identity,
    ) -> RegistryResult<TokenId> {
        self.apply("mint", caller, |overlay, ctx| {
            operations::mint(overlay, ctx, owner, type_id)
        })
    }

    pub fn level_up(
        &self,
        token_id: TokenId,
        new_level: u32,
        caller: &Identity,
    ) -> RegistryResult<()> {
        self.apply("level_up", caller, |overlay, ctx| {
            operations::level_up(overlay, ctx, token_id, new_level)
        })
    }

    pub fn update_counter(
        &self,
        token_id: TokenId,
        new_value: u64,
        caller: &Identity,
    ) -> RegistryResult<()> {
        self.apply("update_counter", caller, |overlay, ctx| {
            operations::update_counter(overlay, ctx, token_id, new_value)
        })
    }

    pub fn update(
        &self,
        token_id: TokenId,
        new_level: u32,
        new_counter: u64,
        caller: &Identity,
    ) -> RegistryResult<()> {
        self.apply("update", caller, |overlay, ctx| {
            operations::update(overlay, ctx, token_id, new_level, new_counter)
        })
    }

    pub fn token(&self, token_id: TokenId) -> RegistryResult<TokenRecord> {
        operations::get_token(&*self.read(), token_id)
    }

    pub fn level(&self, token_id: TokenId) -> RegistryResult<u32> {
        operations::level(&*self.read(), token_id)
    }

    pub fn counter(&self, token_id: TokenId) -> RegistryResult<u64> {
        operations::counter(&*self.read(), token_id)
    }

    pub fn owner_of(&self, token_id: TokenId) -> RegistryResult<Identity> {
        operations::owner_of(&*self.read(), token_id)
    }

    pub fn exists(&self, token_id: TokenId) -> bool {
        operations::exists(&*self.read(), token_id)
    }

    pub fn total_supply(&self) -> u64 {
        operations::total_supply(&*self.read())
    }

    pub fn next_token_id(&self) -> TokenId {
        self.read().get_next_token_id()
    }

    // ========================================
    // Locator
    // ========================================

    pub fn locator(&self, token_id: TokenId) -> RegistryResult<String> {
        operations::locator(&*self.read(), token_id)
    }

    pub fn locator_prefix(&self) -> String {
        self.read().get_locator_prefix()
    }

    pub fn set_locator_prefix(&self, prefix: &str, caller: &Identity) -> RegistryResult<()> {
        self.apply("set_locator_prefix", caller, |overlay, ctx| {
            operations::set_locator_prefix(overlay, ctx, prefix)
        })
    }

    // ========================================
    // Batches
    // ========================================

    /// Execute a batch atomically, returning the ids it minted
    pub fn execute(
        &self,
        operations: &[Operation],
        caller: &Identity,
    ) -> RegistryResult<Vec<TokenId>> {
        let ctx = CallContext::new(*caller);
        let result = {
            let mut storage = self.write();
            execute_batch(&mut *storage, &ctx, operations, self.max_batch_size)
        };

        if let Err(RegistryError::SubOperationFailed { index, cause }) = &result {
            if log::log_enabled!(log::Level::Warn) {
                warn!(
                    "{}: batch of {} by {} rolled back at #{} (code {}): {}",
                    self.symbol,
                    operations.len(),
                    caller,
                    index,
                    cause.code(),
                    cause
                );
            }
        }
        self.log_result("execute", caller, &result);
        result
    }

    /// Decode and execute a batch of encoded operations
    ///
    /// Every entry is decoded before anything runs.
    pub fn execute_encoded<B: AsRef<[u8]>>(
        &self,
        encoded: &[B],
        caller: &Identity,
    ) -> RegistryResult<Vec<TokenId>> {
        let operations = match decode_operations(encoded) {
            Ok(operations) => operations,
            Err(e) => {
                self.log_result::<()>("execute_encoded", caller, &Err(e.clone()));
                return Err(e);
            }
        };
        self.execute(&operations, caller)
    }

    // ========================================
    // Events
    // ========================================

    /// Take the events of every committed call so far, oldest first
    pub fn drain_events(&self) -> Vec<RegistryEvent> {
        self.write().drain_events()
    }
}

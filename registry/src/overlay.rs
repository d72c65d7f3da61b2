use indexmap::{IndexMap, IndexSet};
use log::trace;

use crate::error::RegistryResult;
use crate::events::RegistryEvent;
use crate::identity::Identity;
use crate::operations::RegistryStorage;
use crate::roles::RoleId;
use crate::types::{TokenId, TokenKind, TokenRecord, TypeId, TypeRecord};

/// Writes accumulated by an overlay, in the order they were made
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryChanges {
    /// Role membership updates ((role, account) → granted)
    pub roles: IndexMap<(RoleId, Identity), bool>,
    pub types: IndexMap<TypeId, TypeRecord>,
    pub tokens: IndexMap<TokenId, TokenRecord>,
    pub next_token_id: Option<TokenId>,
    pub locator_prefix: Option<String>,
    /// Events emitted by the staged calls, in emission order
    pub events: Vec<RegistryEvent>,
}

impl RegistryChanges {
    /// Check if there is nothing to commit
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
            && self.types.is_empty()
            && self.tokens.is_empty()
            && self.next_token_id.is_none()
            && self.locator_prefix.is_none()
            && self.events.is_empty()
    }

    /// Merge another change set into this one (other's changes take precedence)
    pub fn merge(&mut self, other: RegistryChanges) {
        self.roles.extend(other.roles);
        self.types.extend(other.types);
        self.tokens.extend(other.tokens);
        if other.next_token_id.is_some() {
            self.next_token_id = other.next_token_id;
        }
        if other.locator_prefix.is_some() {
            self.locator_prefix = other.locator_prefix;
        }
        self.events.extend(other.events);
    }

    /// Write every change through the storage setters
    pub fn apply_each<S: RegistryStorage + ?Sized>(self, storage: &mut S) -> RegistryResult<()> {
        for ((role, account), granted) in &self.roles {
            storage.set_role(role, account, *granted)?;
        }
        for (id, record) in &self.types {
            storage.set_type(*id, record)?;
        }
        for token in self.tokens.values() {
            storage.set_token(token)?;
        }
        if let Some(next) = self.next_token_id {
            storage.set_next_token_id(next)?;
        }
        if let Some(prefix) = &self.locator_prefix {
            storage.set_locator_prefix(prefix)?;
        }
        for event in self.events {
            storage.emit(event);
        }
        Ok(())
    }
}

/// Copy-on-write staging layer over a storage backend
///
/// Reads fall through to the base storage unless the key was written in the
/// overlay. Writes never touch the base: they are only applied by
/// committing the changes returned by [`RegistryOverlay::into_changes`].
/// Dropping the overlay discards them.
pub struct RegistryOverlay<'a, S: RegistryStorage + ?Sized> {
    base: &'a S,
    changes: RegistryChanges,
}

impl<'a, S: RegistryStorage + ?Sized> RegistryOverlay<'a, S> {
    pub fn new(base: &'a S) -> Self {
        Self {
            base,
            changes: RegistryChanges::default(),
        }
    }

    pub fn changes(&self) -> &RegistryChanges {
        &self.changes
    }

    pub fn into_changes(self) -> RegistryChanges {
        self.changes
    }
}

impl<S: RegistryStorage + ?Sized> RegistryStorage for RegistryOverlay<'_, S> {
    fn kind(&self) -> TokenKind {
        self.base.kind()
    }

    fn has_role(&self, role: &RoleId, account: &Identity) -> bool {
        match self.changes.roles.get(&(*role, *account)) {
            Some(granted) => *granted,
            None => self.base.has_role(role, account),
        }
    }

    fn set_role(&mut self, role: &RoleId, account: &Identity, granted: bool) -> RegistryResult<()> {
        self.changes.roles.insert((*role, *account), granted);
        Ok(())
    }

    fn role_members(&self, role: &RoleId) -> Vec<Identity> {
        let mut members: IndexSet<Identity> = self.base.role_members(role).into_iter().collect();
        for ((staged_role, account), granted) in &self.changes.roles {
            if staged_role != role {
                continue;
            }
            if *granted {
                members.insert(*account);
            } else {
                members.shift_remove(account);
            }
        }
        members.into_iter().collect()
    }

    fn get_type(&self, id: TypeId) -> Option<TypeRecord> {
        match self.changes.types.get(&id) {
            Some(record) => Some(record.clone()),
            None => self.base.get_type(id),
        }
    }

    fn set_type(&mut self, id: TypeId, record: &TypeRecord) -> RegistryResult<()> {
        self.changes.types.insert(id, record.clone());
        Ok(())
    }

    fn type_ids(&self) -> Vec<TypeId> {
        let mut ids = self.base.type_ids();
        ids.extend(
            self.changes
                .types
                .keys()
                .filter(|id| !self.base.type_exists(**id)),
        );
        ids.sort_unstable();
        ids
    }

    fn get_token(&self, id: TokenId) -> Option<TokenRecord> {
        match self.changes.tokens.get(&id) {
            Some(token) => Some(token.clone()),
            None => self.base.get_token(id),
        }
    }

    fn set_token(&mut self, token: &TokenRecord) -> RegistryResult<()> {
        self.changes.tokens.insert(token.id, token.clone());
        Ok(())
    }

    fn get_next_token_id(&self) -> TokenId {
        self.changes
            .next_token_id
            .unwrap_or_else(|| self.base.get_next_token_id())
    }

    fn set_next_token_id(&mut self, id: TokenId) -> RegistryResult<()> {
        self.changes.next_token_id = Some(id);
        Ok(())
    }

    fn get_locator_prefix(&self) -> String {
        match &self.changes.locator_prefix {
            Some(prefix) => prefix.clone(),
            None => self.base.get_locator_prefix(),
        }
    }

    fn set_locator_prefix(&mut self, prefix: &str) -> RegistryResult<()> {
        self.changes.locator_prefix = Some(prefix.to_string());
        Ok(())
    }

    fn emit(&mut self, event: RegistryEvent) {
        trace!("staging event: {}", event);
        self.changes.events.push(event);
    }

    fn drain_events(&mut self) -> Vec<RegistryEvent> {
        std::mem::take(&mut self.changes.events)
    }

    fn commit_changes(&mut self, changes: RegistryChanges) -> RegistryResult<()> {
        self.changes.merge(changes);
        Ok(())
    }
}

/// Run `f` against a fresh overlay and commit its changes only if it succeeds
pub fn transact<S, T, F>(storage: &mut S, f: F) -> RegistryResult<T>
where
    S: RegistryStorage + ?Sized,
    F: FnOnce(&mut RegistryOverlay<'_, S>) -> RegistryResult<T>,
{
    let mut overlay = RegistryOverlay::new(&*storage);
    let value = f(&mut overlay)?;
    let changes = overlay.into_changes();
    if !changes.is_empty() {
        storage.commit_changes(changes)?;
    }
    Ok(value)
}

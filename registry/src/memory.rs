use std::collections::BTreeMap;

use indexmap::{IndexMap, IndexSet};

use crate::config::FIRST_TOKEN_ID;
use crate::error::RegistryResult;
use crate::events::RegistryEvent;
use crate::identity::Identity;
use crate::operations::RegistryStorage;
use crate::roles::{RoleId, ADMIN_ROLE};
use crate::types::{TokenId, TokenKind, TokenRecord, TypeId, TypeRecord};

/// In-memory registry state
///
/// Holds the three mappings (role membership, types, tokens), the two
/// scalars (next token id, locator prefix) and the journal of committed
/// events waiting to be drained by the host.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    kind: TokenKind,
    roles: IndexMap<RoleId, IndexSet<Identity>>,
    types: BTreeMap<TypeId, TypeRecord>,
    tokens: BTreeMap<TokenId, TokenRecord>,
    next_token_id: TokenId,
    locator_prefix: String,
    events: Vec<RegistryEvent>,
}

impl MemoryStorage {
    pub fn new(kind: TokenKind) -> Self {
        Self {
            kind,
            roles: IndexMap::new(),
            types: BTreeMap::new(),
            tokens: BTreeMap::new(),
            next_token_id: FIRST_TOKEN_ID,
            locator_prefix: String::new(),
            events: Vec::new(),
        }
    }

    /// Empty state with `admin` already holding the admin role
    pub fn with_admin(kind: TokenKind, admin: Identity) -> Self {
        let mut storage = Self::new(kind);
        storage
            .roles
            .entry(ADMIN_ROLE)
            .or_default()
            .insert(admin);
        storage
    }

    /// Committed events not yet handed to the host
    pub fn events(&self) -> &[RegistryEvent] {
        &self.events
    }

    pub fn tokens(&self) -> impl Iterator<Item = &TokenRecord> {
        self.tokens.values()
    }
}

impl RegistryStorage for MemoryStorage {
    fn kind(&self) -> TokenKind {
        self.kind
    }

    fn has_role(&self, role: &RoleId, account: &Identity) -> bool {
        self.roles
            .get(role)
            .map(|members| members.contains(account))
            .unwrap_or(false)
    }

    fn set_role(&mut self, role: &RoleId, account: &Identity, granted: bool) -> RegistryResult<()> {
        if granted {
            self.roles.entry(*role).or_default().insert(*account);
        } else if let Some(members) = self.roles.get_mut(role) {
            members.shift_remove(account);
        }
        Ok(())
    }

    fn role_members(&self, role: &RoleId) -> Vec<Identity> {
        self.roles
            .get(role)
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default()
    }

    fn get_type(&self, id: TypeId) -> Option<TypeRecord> {
        self.types.get(&id).cloned()
    }

    fn set_type(&mut self, id: TypeId, record: &TypeRecord) -> RegistryResult<()> {
        self.types.insert(id, record.clone());
        Ok(())
    }

    fn type_ids(&self) -> Vec<TypeId> {
        self.types.keys().copied().collect()
    }

    fn type_exists(&self, id: TypeId) -> bool {
        self.types.contains_key(&id)
    }

    fn get_token(&self, id: TokenId) -> Option<TokenRecord> {
        self.tokens.get(&id).cloned()
    }

    fn set_token(&mut self, token: &TokenRecord) -> RegistryResult<()> {
        self.tokens.insert(token.id, token.clone());
        Ok(())
    }

    fn token_exists(&self, id: TokenId) -> bool {
        self.tokens.contains_key(&id)
    }

    fn get_next_token_id(&self) -> TokenId {
        self.next_token_id
    }

    fn set_next_token_id(&mut self, id: TokenId) -> RegistryResult<()> {
        self.next_token_id = id;
        Ok(())
    }

    fn get_locator_prefix(&self) -> String {
        self.locator_prefix.clone()
    }

    fn set_locator_prefix(&mut self, prefix: &str) -> RegistryResult<()> {
        self.locator_prefix = prefix.to_string();
        Ok(())
    }

    fn emit(&mut self, event: RegistryEvent) {
        self.events.push(event);
    }

    fn drain_events(&mut self) -> Vec<RegistryEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::MINTER_ROLE;

    #[test]
    fn test_role_membership_keeps_grant_order() {
        let mut storage = MemoryStorage::new(TokenKind::Character);
        let first = Identity::new([1; 32]);
        let second = Identity::new([2; 32]);

        storage.set_role(&MINTER_ROLE, &second, true).unwrap();
        storage.set_role(&MINTER_ROLE, &first, true).unwrap();
        assert_eq!(storage.role_members(&MINTER_ROLE), vec![second, first]);

        storage.set_role(&MINTER_ROLE, &second, false).unwrap();
        assert_eq!(storage.role_members(&MINTER_ROLE), vec![first]);
        assert!(!storage.has_role(&MINTER_ROLE, &second));
    }

    #[test]
    fn test_new_storage_is_empty() {
        let storage = MemoryStorage::new(TokenKind::Weapon);
        assert_eq!(storage.get_next_token_id(), FIRST_TOKEN_ID);
        assert!(storage.type_ids().is_empty());
        assert!(storage.role_members(&ADMIN_ROLE).is_empty());
        assert!(storage.events().is_empty());
    }

    #[test]
    fn test_drain_events_empties_journal() {
        let mut storage = MemoryStorage::new(TokenKind::Weapon);
        storage.emit(RegistryEvent::TypeAdded { id: 1 });
        assert_eq!(storage.drain_events().len(), 1);
        assert!(storage.drain_events().is_empty());
    }
}

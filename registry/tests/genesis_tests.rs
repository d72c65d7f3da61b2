//! Seeding registries from genesis files

#![allow(clippy::disallowed_methods)]

mod common;

use std::path::PathBuf;

use common::{admin, operator, token_owner};
use pgt_registry::{
    load_genesis, parse_genesis, GenesisError, Rarity, Registry, RegistryError, RegistryEvent,
    TokenKind, MINTER_ROLE, OPERATOR_ROLE,
};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_weapon_genesis() {
    common::init_logger();
    let state = load_genesis(&fixture("weapon_genesis.json")).unwrap();
    let registry = Registry::from_genesis(&state).unwrap();

    assert_eq!(registry.name(), "Prime Games Weapon");
    assert_eq!(registry.kind(), TokenKind::Weapon);
    assert_eq!(registry.type_count(), 10);
    assert!(registry.has_role(&OPERATOR_ROLE, &operator()));
    assert!(registry.has_role(&MINTER_ROLE, &admin()));

    let legendary = registry.get_type(5).unwrap();
    assert_eq!(legendary.name, "Ocelot Mk. 2");
    assert_eq!(legendary.rarity, Rarity::Legendary);
    assert_eq!(legendary.max_level, 40);

    let token_id = registry.mint(&token_owner(), 7, &admin()).unwrap();
    assert_eq!(
        registry.locator(token_id).unwrap(),
        "ipfs://bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi/weapon/7.json"
    );
}

#[test]
fn test_character_genesis_events() {
    common::init_logger();
    let state = load_genesis(&fixture("character_genesis.json")).unwrap();
    let registry = Registry::from_genesis(&state).unwrap();

    assert_eq!(registry.type_ids(), vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(registry.locator_prefix(), "");

    // Seeded admin and minter roles, the operator grant, then the types
    let events = registry.drain_events();
    assert_eq!(events.len(), 2 + 1 + 6);
    assert_eq!(
        events[1],
        RegistryEvent::RoleChanged {
            role: MINTER_ROLE,
            identity: admin(),
            granted: true
        }
    );
    assert_eq!(
        events[2],
        RegistryEvent::RoleChanged {
            role: OPERATOR_ROLE,
            identity: operator(),
            granted: true
        }
    );
    assert_eq!(events[8], RegistryEvent::TypeAdded { id: 6 });
}

#[test]
fn test_genesis_duplicate_type_fails() {
    let json = format!(
        r#"{{
            "format_version": 1,
            "collection": {{"name": "Prime Games Weapon", "symbol": "PGW", "kind": "weapon"}},
            "admin": "{admin}",
            "types": [
                {{"id": 1, "record": {{"name": "Old Rifle", "max_level": 10, "rarity": 0,
                    "kind": "weapon", "improvement_slots": 0, "minting_epoch": 0}}}},
                {{"id": 1, "record": {{"name": "Patriot", "max_level": 20, "rarity": 1,
                    "kind": "weapon", "improvement_slots": 1, "minting_epoch": 0}}}}
            ]
        }}"#,
        admin = admin().to_hex()
    );
    let state = parse_genesis(&json).unwrap();

    assert!(matches!(
        Registry::from_genesis(&state),
        Err(GenesisError::Registry(RegistryError::DuplicateType(1)))
    ));
}

#[test]
fn test_genesis_kind_mismatch_fails() {
    let json = format!(
        r#"{{
            "format_version": 1,
            "collection": {{"name": "Prime Games Character", "symbol": "PGC", "kind": "character"}},
            "admin": "{admin}",
            "types": [
                {{"id": 1, "record": {{"name": "Old Rifle", "max_level": 10, "rarity": 0,
                    "kind": "weapon", "improvement_slots": 0, "minting_epoch": 0}}}}
            ]
        }}"#,
        admin = admin().to_hex()
    );
    let state = parse_genesis(&json).unwrap();

    assert!(matches!(
        Registry::from_genesis(&state),
        Err(GenesisError::Registry(RegistryError::TraitsMismatch { .. }))
    ));
}

#[test]
fn test_genesis_rejects_bad_admin() {
    let json = r#"{
        "format_version": 1,
        "collection": {"name": "Prime Games Weapon", "symbol": "PGW", "kind": "weapon"},
        "admin": "not-an-identity"
    }"#;
    let state = parse_genesis(json).unwrap();

    assert!(matches!(
        Registry::from_genesis(&state),
        Err(GenesisError::InvalidIdentity { .. })
    ));
}

#[test]
fn test_genesis_rejects_out_of_range_rarity() {
    let json = format!(
        r#"{{
            "format_version": 1,
            "collection": {{"name": "Prime Games Weapon", "symbol": "PGW", "kind": "weapon"}},
            "admin": "{admin}",
            "types": [
                {{"id": 1, "record": {{"name": "Old Rifle", "max_level": 10, "rarity": 5,
                    "kind": "weapon", "improvement_slots": 0, "minting_epoch": 0}}}}
            ]
        }}"#,
        admin = admin().to_hex()
    );

    assert!(matches!(
        parse_genesis(&json),
        Err(GenesisError::JsonParseError(_))
    ));
}

//! Atomic batch execution

#![allow(clippy::disallowed_methods)]

mod common;

use common::{admin, operator, token_owner};
use pgt_registry::{
    serializer::Serializer, Operation, Rarity, Registry, RegistryError, RegistryEvent,
    TokenKind, TypeRecord, MINTER_ROLE,
};

const MAX_LEVEL: u32 = 40;

// Type 1 with max level 40 and token 1 minted to the token owner
fn setup() -> Registry {
    let registry = common::registry("Prime Games Character", "PGC", TokenKind::Character);
    registry
        .add_type(
            1,
            TypeRecord::character(
                "Agent Becker",
                MAX_LEVEL,
                Rarity::Common,
                "K-56 grenade",
                "Medpack",
                0,
            ),
            &admin(),
        )
        .unwrap();
    registry.mint(&token_owner(), 1, &admin()).unwrap();
    registry.drain_events();
    registry
}

#[test]
fn test_progress_scenario() {
    let registry = setup();

    assert_eq!(registry.level(1), Ok(1));
    assert_eq!(registry.counter(1), Ok(0));

    registry.level_up(1, 5, &operator()).unwrap();
    assert_eq!(registry.level(1), Ok(5));
    assert!(matches!(
        registry.level_up(1, 4, &operator()),
        Err(RegistryError::LevelDecrease { .. })
    ));
    assert!(matches!(
        registry.level_up(1, 41, &operator()),
        Err(RegistryError::LevelExceedsMax { .. })
    ));
    assert!(matches!(
        registry.level_up(1, 6, &token_owner()),
        Err(RegistryError::Unauthorized { .. })
    ));
    assert_eq!(registry.level(1), Ok(5));
}

#[test]
fn test_batch_scenario() {
    let registry = setup();

    registry
        .execute(
            &[
                Operation::LevelUp {
                    token_id: 1,
                    level: 10,
                },
                Operation::UpdateCounter {
                    token_id: 1,
                    value: 100,
                },
            ],
            &operator(),
        )
        .unwrap();
    assert_eq!(registry.level(1), Ok(10));
    assert_eq!(registry.counter(1), Ok(100));
    registry.drain_events();

    let err = registry
        .execute(
            &[
                Operation::LevelUp {
                    token_id: 1,
                    level: 20,
                },
                Operation::Mint {
                    owner: token_owner(),
                    type_id: 1,
                },
            ],
            &operator(),
        )
        .unwrap_err();

    assert_eq!(err.failed_index(), Some(1));
    assert_eq!(
        err.root_cause(),
        &RegistryError::Unauthorized {
            account: operator(),
            role: MINTER_ROLE
        }
    );
    assert_eq!(registry.level(1), Ok(10));
    assert_eq!(registry.total_supply(), 1);
    assert!(registry.drain_events().is_empty());
}

#[test]
fn test_failing_tail_discards_valid_head() {
    let registry = setup();
    let mut ops: Vec<Operation> = (2..=6)
        .map(|level| Operation::LevelUp { token_id: 1, level })
        .collect();
    ops.push(Operation::UpdateCounter {
        token_id: 7,
        value: 1,
    });

    let err = registry.execute(&ops, &operator()).unwrap_err();

    assert_eq!(err.failed_index(), Some(5));
    assert_eq!(err.root_cause(), &RegistryError::UnknownToken(7));
    assert_eq!(registry.level(1), Ok(1));
}

#[test]
fn test_batch_events_follow_operation_order() {
    let registry = setup();
    let minted = registry
        .execute(
            &[
                Operation::Mint {
                    owner: token_owner(),
                    type_id: 1,
                },
                Operation::Mint {
                    owner: admin(),
                    type_id: 1,
                },
                Operation::SetLocatorPrefix {
                    prefix: "ipfs://pgc/".to_string(),
                },
            ],
            &admin(),
        )
        .unwrap();

    assert_eq!(minted, vec![2, 3]);
    assert_eq!(registry.locator(3).unwrap(), "ipfs://pgc/1.json");
    assert_eq!(
        registry.drain_events(),
        vec![
            RegistryEvent::Minted {
                token_id: 2,
                owner: token_owner(),
                type_id: 1
            },
            RegistryEvent::Minted {
                token_id: 3,
                owner: admin(),
                type_id: 1
            },
        ]
    );
}

#[test]
fn test_empty_batch() {
    let registry = setup();
    assert_eq!(
        registry.execute(&[], &operator()),
        Err(RegistryError::EmptyBatch)
    );
}

#[test]
fn test_oversize_batch() {
    let registry = setup();
    let ops = vec![
        Operation::UpdateCounter {
            token_id: 1,
            value: 1
        };
        registry.max_batch_size() + 1
    ];
    assert!(matches!(
        registry.execute(&ops, &operator()),
        Err(RegistryError::BatchTooLarge { .. })
    ));
}

#[test]
fn test_encoded_batch() {
    let registry = setup();
    let encoded: Vec<Vec<u8>> = [
        Operation::Update {
            token_id: 1,
            level: 12,
            counter: 30,
        },
        Operation::LevelUp {
            token_id: 1,
            level: 13,
        },
    ]
    .iter()
    .map(|op| op.to_bytes())
    .collect();

    registry.execute_encoded(&encoded, &operator()).unwrap();
    assert_eq!(registry.level(1), Ok(13));
    assert_eq!(registry.counter(1), Ok(30));
}

#[test]
fn test_malformed_entry_runs_nothing() {
    let registry = setup();
    let mut truncated = Operation::LevelUp {
        token_id: 1,
        level: 9,
    }
    .to_bytes();
    truncated.pop();
    let encoded = vec![
        Operation::LevelUp {
            token_id: 1,
            level: 8,
        }
        .to_bytes(),
        truncated,
    ];

    let err = registry.execute_encoded(&encoded, &operator()).unwrap_err();

    assert_eq!(err.failed_index(), Some(1));
    assert!(matches!(err.root_cause(), RegistryError::Decode(_)));
    assert_eq!(registry.level(1), Ok(1));
}

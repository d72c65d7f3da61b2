//! Shared registry driven from several threads

#![allow(clippy::disallowed_methods)]

mod common;

use std::sync::Arc;
use std::thread;

use common::{admin, operator, token_owner};
use pgt_registry::{
    Identity, Rarity, Registry, RegistryError, RegistryEvent, TokenKind, TypeRecord,
};

const THREADS: u8 = 8;
const MINTS_PER_THREAD: u64 = 50;
const MAX_LEVEL: u32 = 40;

fn setup() -> Arc<Registry> {
    let registry = common::registry("Prime Games Weapon", "PGW", TokenKind::Weapon);
    registry
        .add_type(
            1,
            TypeRecord::weapon("Old revolver", MAX_LEVEL, Rarity::Common, 0, 0),
            &admin(),
        )
        .unwrap();
    registry.drain_events();
    Arc::new(registry)
}

#[test]
fn test_concurrent_mints_get_dense_ids() {
    let registry = setup();

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let owner = Identity::new([t + 1; 32]);
                (0..MINTS_PER_THREAD)
                    .map(|_| registry.mint(&owner, 1, &admin()).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut ids: Vec<u64> = Vec::new();
    for handle in handles {
        let minted = handle.join().unwrap();
        // Ids handed to one caller keep increasing
        assert!(minted.windows(2).all(|w| w[0] < w[1]));
        ids.extend(minted);
    }
    ids.sort_unstable();

    let total = THREADS as u64 * MINTS_PER_THREAD;
    assert_eq!(ids, (1..=total).collect::<Vec<_>>());
    assert_eq!(registry.total_supply(), total);
    assert_eq!(registry.next_token_id(), total + 1);

    let minted_events: Vec<u64> = registry
        .drain_events()
        .into_iter()
        .filter_map(|event| match event {
            RegistryEvent::Minted { token_id, .. } => Some(token_id),
            _ => None,
        })
        .collect();
    assert_eq!(minted_events, (1..=total).collect::<Vec<_>>());
}

#[test]
fn test_concurrent_level_ups_keep_the_highest_accepted() {
    let registry = setup();
    registry.mint(&token_owner(), 1, &admin()).unwrap();
    registry.drain_events();

    let handles: Vec<_> = (0..THREADS as u32)
        .map(|t| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let mut accepted = Vec::new();
                for i in 0..MAX_LEVEL {
                    let level = (i * 7 + t * 3) % MAX_LEVEL + 1;
                    match registry.level_up(1, level, &operator()) {
                        Ok(()) => accepted.push(level),
                        Err(RegistryError::LevelDecrease { .. }) => {}
                        Err(e) => panic!("unexpected error: {}", e),
                    }
                }
                accepted
            })
        })
        .collect();

    let mut accepted: Vec<u32> = Vec::new();
    for handle in handles {
        accepted.extend(handle.join().unwrap());
    }

    let highest = accepted.iter().copied().max().unwrap();
    assert_eq!(highest, MAX_LEVEL);
    assert_eq!(registry.level(1), Ok(highest));

    // Every accepted call committed in lock order, so the journal never goes down
    let levels: Vec<u32> = registry
        .drain_events()
        .into_iter()
        .filter_map(|event| match event {
            RegistryEvent::LevelUp { new_level, .. } => Some(new_level),
            _ => None,
        })
        .collect();
    assert_eq!(levels.len(), accepted.len());
    assert!(levels.windows(2).all(|w| w[0] <= w[1]));
}

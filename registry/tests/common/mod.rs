//! Shared fixtures for the registry integration tests

#![allow(dead_code)]

use pgt_registry::{Identity, Registry, RegistryConfig, TokenKind, OPERATOR_ROLE};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn admin() -> Identity {
    Identity::new([0xa1; 32])
}

pub fn operator() -> Identity {
    Identity::new([0xb2; 32])
}

pub fn token_owner() -> Identity {
    Identity::new([0xc3; 32])
}

/// Registry with an operator; the admin holds the admin and minter roles
pub fn registry(name: &str, symbol: &str, kind: TokenKind) -> Registry {
    init_logger();
    let registry = Registry::new(RegistryConfig::new(name, symbol, kind), &admin())
        .expect("registry config is valid");
    registry
        .grant_role(&OPERATOR_ROLE, &operator(), &admin())
        .expect("admin grants operator");
    registry.drain_events();
    registry
}

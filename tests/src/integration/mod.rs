//! # Integration Tests
//!
//! Cross-component flows driven through the public `TokenApi` surface.

pub mod conservation;
pub mod reentrancy;
pub mod transfer_flows;

use std::sync::Arc;
use tessera_ledger::prelude::*;

/// Builds a 20-byte address from a single byte.
#[must_use]
pub fn addr(n: u8) -> Address {
    Address::new([n; 20])
}

/// Builds a ledger service with an in-memory discovery registry and a
/// single-owner gate, returning both so tests can register hooks.
#[must_use]
pub fn setup(
    granularity: u64,
    legacy: bool,
) -> (TokenService, Arc<InMemoryCapabilityRegistry>, Address) {
    let owner = addr(99);
    let registry = Arc::new(InMemoryCapabilityRegistry::new());
    let config = TokenConfig::new(
        "Tessera",
        "TSR",
        U256::from(granularity),
        addr(200),
    )
    .unwrap();
    let service = TokenService::new(
        config,
        registry.clone(),
        Arc::new(SingleOwnerGate::new(owner)),
        legacy,
    );
    (service, registry, owner)
}

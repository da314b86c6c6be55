//! # In-Memory Capability Registry
//!
//! Discovery-registry adapter for tests and single-process deployments.
//! A production deployment would adapt a shared external registry instead.

use crate::domain::value_objects::Address;
use crate::ports::outbound::{CapabilityRegistry, TokensRecipient};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

/// In-memory implementation of the discovery collaborator.
#[derive(Default)]
pub struct InMemoryCapabilityRegistry {
    /// (account, capability) -> registered hook.
    hooks: RwLock<HashMap<(Address, String), Arc<dyn TokensRecipient>>>,
    /// Accounts that host executable code.
    code_accounts: RwLock<HashSet<Address>>,
    /// (account, capability) pairs currently advertised.
    advertised: RwLock<HashSet<(Address, String)>>,
}

impl InMemoryCapabilityRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `hook` as `account`'s implementation of `capability`.
    pub fn register_hook(
        &self,
        account: Address,
        capability: &str,
        hook: Arc<dyn TokensRecipient>,
    ) {
        self.hooks
            .write()
            .unwrap()
            .insert((account, capability.to_string()), hook);
    }

    /// Removes `account`'s implementation of `capability`, if any.
    pub fn unregister_hook(&self, account: Address, capability: &str) {
        self.hooks
            .write()
            .unwrap()
            .remove(&(account, capability.to_string()));
    }

    /// Marks `account` as hosting executable code.
    pub fn mark_code(&self, account: Address) {
        self.code_accounts.write().unwrap().insert(account);
    }
}

impl CapabilityRegistry for InMemoryCapabilityRegistry {
    fn lookup(&self, account: Address, capability: &str) -> Option<Arc<dyn TokensRecipient>> {
        self.hooks
            .read()
            .unwrap()
            .get(&(account, capability.to_string()))
            .cloned()
    }

    fn has_code(&self, account: Address) -> bool {
        self.code_accounts.read().unwrap().contains(&account)
    }

    fn set_advertised(&self, account: Address, capability: &str, advertised: bool) {
        let key = (account, capability.to_string());
        let mut entries = self.advertised.write().unwrap();
        if advertised {
            entries.insert(key);
        } else {
            entries.remove(&key);
        }
    }

    fn is_advertised(&self, account: Address, capability: &str) -> bool {
        self.advertised
            .read()
            .unwrap()
            .contains(&(account, capability.to_string()))
    }
}

// =============================================================================
// TESTS
// =============================================================================

//! # Driven Ports (SPI - Outbound)
//!
//! Interfaces the ledger depends on. External adapters implement these
//! traits to provide:
//! - capability discovery (which account registered which hook)
//! - recipient hooks (arbitrary logic reacting to incoming value)
//! - the administrative ownership gate
//!
//! The ledger is never hardwired to a particular registry implementation;
//! the discovery collaborator is injected at construction.

use crate::errors::RecipientError;
use crate::events::TransferNotice;
use crate::domain::value_objects::Address;
use crate::ports::inbound::TokenApi;
use std::sync::Arc;

/// Capability names the ledger publishes and looks up.
pub mod capabilities {
    /// Capability a recipient registers to be notified of incoming value.
    pub const TOKENS_RECIPIENT: &str = "TokensRecipient";

    /// Capability the ledger advertises for itself while the legacy
    /// compatibility layer is active.
    pub const LEGACY_TOKEN: &str = "LegacyToken";
}

// =============================================================================
// RECIPIENT HOOK
// =============================================================================

/// Callback a recipient account registers to observe, react to, or reject
/// incoming transfers.
///
/// The hook runs synchronously in the middle of the transfer, after the
/// ledger has been mutated. The `ledger` handle lets the hook re-enter any
/// ledger operation; every re-entrant call observes the already-credited
/// post-transfer book.
///
/// Returning an error aborts the entire outer transfer, including any
/// committed re-entrant calls the hook made before failing.
pub trait TokensRecipient: Send + Sync {
    /// Invoked once per incoming transfer to the registering account.
    fn on_tokens_received(
        &self,
        ledger: &mut dyn TokenApi,
        notice: &TransferNotice,
    ) -> Result<(), RecipientError>;
}

// =============================================================================
// CAPABILITY DISCOVERY
// =============================================================================

/// External registry mapping an account to its registered capability
/// implementations.
///
/// "Not found" is a normal outcome, not an error: most accounts register
/// nothing.
pub trait CapabilityRegistry: Send + Sync {
    /// Looks up the hook `account` registered under `capability`.
    fn lookup(&self, account: Address, capability: &str) -> Option<Arc<dyn TokensRecipient>>;

    /// True if `account` hosts executable code. A native transfer to a
    /// code-bearing account with no registered recipient hook is rejected
    /// so value cannot be locked in logic that will never react to it.
    fn has_code(&self, account: Address) -> bool;

    /// Publishes or withdraws an advertised capability for `account`.
    fn set_advertised(&self, account: Address, capability: &str, advertised: bool);

    /// True if `account` currently advertises `capability`.
    fn is_advertised(&self, account: Address, capability: &str) -> bool;
}

// =============================================================================
// ADMINISTRATIVE GATE
// =============================================================================

/// Ownership check gating mint, burn, and the compatibility toggle.
pub trait AdminGate: Send + Sync {
    /// True iff `caller` holds administrative ownership of the ledger.
    fn is_owner(&self, caller: Address) -> bool;
}

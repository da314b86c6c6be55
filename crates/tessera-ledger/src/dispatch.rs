//! # Notification Dispatcher
//!
//! Resolves and invokes the recipient hook for a transfer. The dispatcher
//! never mutates ledger state itself; it only decides whether the absence
//! of a hook is fatal and propagates hook failures to the engine.

use crate::domain::value_objects::Address;
use crate::errors::{LedgerError, LedgerResult};
use crate::events::TransferNotice;
use crate::ports::inbound::TokenApi;
use crate::ports::outbound::{capabilities, CapabilityRegistry};
use std::sync::Arc;
use tracing::debug;

/// Looks up a recipient's registered hook through the discovery collaborator
/// and invokes it synchronously.
#[derive(Clone)]
pub struct NotificationDispatcher {
    registry: Arc<dyn CapabilityRegistry>,
}

impl NotificationDispatcher {
    /// Creates a dispatcher over the injected discovery registry.
    #[must_use]
    pub fn new(registry: Arc<dyn CapabilityRegistry>) -> Self {
        Self { registry }
    }

    /// The discovery registry this dispatcher queries.
    #[must_use]
    pub fn registry(&self) -> &Arc<dyn CapabilityRegistry> {
        &self.registry
    }

    /// Notifies `notice.to` of an incoming transfer.
    ///
    /// The recipient's hook, if registered, runs with a re-entrant handle to
    /// the ledger and sees the already-mutated book. With `must_succeed` set
    /// (native transfers and mints), a code-bearing recipient without a hook
    /// is rejected; legacy transfers waive that policy to stay compatible
    /// with recipients unaware of the hook protocol.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::RecipientRejected`] if the hook raised a failure
    /// - [`LedgerError::RecipientUnreachable`] if `must_succeed` and the
    ///   recipient hosts code but registered no hook
    pub fn notify(
        &self,
        ledger: &mut dyn TokenApi,
        notice: &TransferNotice,
        must_succeed: bool,
    ) -> LedgerResult<()> {
        match self
            .registry
            .lookup(notice.to, capabilities::TOKENS_RECIPIENT)
        {
            Some(hook) => {
                debug!(to = %notice.to, amount = %notice.amount, "invoking recipient hook");
                hook.on_tokens_received(ledger, notice)
                    .map_err(|rejection| LedgerError::RecipientRejected(rejection.reason))
            }
            None if must_succeed && self.registry.has_code(notice.to) => {
                Err(LedgerError::RecipientUnreachable {
                    account: notice.to,
                })
            }
            None => Ok(()),
        }
    }

    /// True if `account` hosts code but has no recipient hook, i.e. a native
    /// transfer to it would be rejected.
    #[must_use]
    pub fn is_unreachable(&self, account: Address) -> bool {
        self.registry
            .lookup(account, capabilities::TOKENS_RECIPIENT)
            .is_none()
            && self.registry.has_code(account)
    }
}

// =============================================================================
// TESTS
// =============================================================================

//! # Legacy Compatibility Shim
//!
//! Allowance-based transfer entry points expressed on top of the transfer
//! engine, active only while the compatibility flag is set. Every entry
//! point fails with `CompatibilityDisabled` otherwise.
//!
//! Legacy transfers run with the anti-lock-in policy waived: recipients
//! unaware of the hook protocol must keep receiving value. Any engine
//! failure is a hard abort — the shim never converts an abort into a
//! silent `false` return.

use crate::domain::value_objects::{Address, U256};
use crate::errors::{LedgerError, LedgerResult};
use crate::events::{ApprovalEvent, LedgerEvent};
use crate::ports::outbound::capabilities;
use crate::service::TokenService;
use tracing::info;

/// Display precision of the legacy token surface.
const LEGACY_DECIMALS: u8 = 18;

impl TokenService {
    /// Legacy transfer from the caller to `to`: empty payloads, missing
    /// recipient-hook support is not an error.
    pub fn legacy_transfer(
        &mut self,
        caller: Address,
        to: Address,
        amount: U256,
    ) -> LedgerResult<()> {
        self.require_legacy()?;
        self.transfer_internal(caller, caller, to, amount, Vec::new(), Vec::new(), false)
    }

    /// Legacy delegated transfer.
    ///
    /// The allowance budget is consumed before the underlying transfer
    /// runs, so a re-entrant legacy transfer triggered by the recipient's
    /// hook cannot double-spend the same budget. A transfer failure
    /// restores the budget along with everything else.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::AllowanceExceeded`] if the remaining budget
    /// is smaller than `amount`.
    pub fn legacy_transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> LedgerResult<()> {
        self.require_legacy()?;

        let checkpoint = self.checkpoint();
        self.authorizations.consume_allowance(from, caller, amount)?;
        if let Err(err) =
            self.transfer_internal(caller, from, to, amount, Vec::new(), Vec::new(), false)
        {
            self.rollback(checkpoint);
            return Err(err);
        }
        Ok(())
    }

    /// Overwrites the allowance budget granted by the caller to `spender`.
    ///
    /// The overwrite semantics are deliberate legacy behavior: a spender
    /// observing an allowance change can spend the old budget before the
    /// overwrite lands and the new one after it. Callers mitigate by
    /// approving zero first.
    pub fn approve(&mut self, caller: Address, spender: Address, amount: U256) -> LedgerResult<()> {
        self.require_legacy()?;
        self.authorizations.set_allowance(caller, spender, amount);
        self.events.push(LedgerEvent::Approval(ApprovalEvent {
            owner: caller,
            spender,
            amount,
        }));
        info!(owner = %caller, spender = %spender, amount = %amount, "allowance set");
        Ok(())
    }

    /// Remaining allowance budget for `(owner, spender)`.
    pub fn allowance(&self, owner: Address, spender: Address) -> LedgerResult<U256> {
        self.require_legacy()?;
        Ok(self.authorizations.allowance_of(owner, spender))
    }

    /// Legacy display precision, fixed at 18.
    pub fn decimals(&self) -> LedgerResult<u8> {
        self.require_legacy()?;
        Ok(LEGACY_DECIMALS)
    }

    /// Toggles the compatibility layer (privileged) and updates whether the
    /// ledger advertises legacy-token support to the discovery registry.
    pub fn set_legacy_enabled(&mut self, caller: Address, enabled: bool) -> LedgerResult<()> {
        if !self.gate.is_owner(caller) {
            return Err(LedgerError::NotAuthorized);
        }
        self.legacy_enabled = enabled;
        self.dispatcher.registry().set_advertised(
            self.config.ledger_account,
            capabilities::LEGACY_TOKEN,
            enabled,
        );
        info!(enabled, "legacy compatibility toggled");
        Ok(())
    }

    fn require_legacy(&self) -> LedgerResult<()> {
        if self.legacy_enabled {
            Ok(())
        } else {
            Err(LedgerError::CompatibilityDisabled)
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

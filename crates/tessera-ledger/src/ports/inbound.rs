//! # Driving Ports (API - Inbound)
//!
//! The entry-point surface of the ledger. Callers (and re-entering recipient
//! hooks) interact with the ledger exclusively through [`TokenApi`].
//!
//! Mutating operations take the caller's account explicitly; the host
//! environment is responsible for authenticating it. The trait is
//! object-safe so a recipient hook can be handed `&mut dyn TokenApi` and
//! call back into the ledger mid-transfer.

use crate::domain::value_objects::{Address, U256};
use crate::errors::LedgerResult;

/// Full query and operation surface of the ledger.
///
/// Every mutating operation is atomic: it either commits completely or
/// fails with an error and no observable state change.
pub trait TokenApi {
    // =========================================================================
    // Query surface (read-only, no side effects)
    // =========================================================================

    /// Human-readable token name.
    fn name(&self) -> &str;

    /// Token symbol.
    fn symbol(&self) -> &str;

    /// Smallest transferable unit; all amounts are exact multiples of it.
    fn granularity(&self) -> U256;

    /// Aggregate issuance.
    fn total_supply(&self) -> U256;

    /// Balance of an account, zero for unseen accounts.
    fn balance_of(&self, account: Address) -> U256;

    /// True iff `operator` may move value held by `owner`.
    fn is_operator_for(&self, operator: Address, owner: Address) -> bool;

    /// True while the legacy compatibility layer is active.
    fn legacy_enabled(&self) -> bool;

    // =========================================================================
    // Native operations
    // =========================================================================

    /// Moves `amount` from the caller to `to`, notifying the recipient.
    /// Fails with `RecipientUnreachable` for hookless code-bearing
    /// recipients.
    fn send(
        &mut self,
        caller: Address,
        to: Address,
        amount: U256,
        user_payload: Vec<u8>,
    ) -> LedgerResult<()>;

    /// Moves `amount` from `from` to `to` on behalf of `from`. The caller
    /// must be `from` itself or an authorized operator.
    fn operator_send(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        amount: U256,
        user_payload: Vec<u8>,
        operator_payload: Vec<u8>,
    ) -> LedgerResult<()>;

    /// Grants `operator` standing authorization over the caller's value.
    fn authorize_operator(&mut self, caller: Address, operator: Address) -> LedgerResult<()>;

    /// Revokes a previously granted authorization. Idempotent.
    fn revoke_operator(&mut self, caller: Address, operator: Address) -> LedgerResult<()>;

    /// Issues `amount` to `to` (privileged). Notifies the recipient with the
    /// null account as the source.
    fn mint(
        &mut self,
        caller: Address,
        to: Address,
        amount: U256,
        operator_payload: Vec<u8>,
    ) -> LedgerResult<()>;

    /// Destroys `amount` held by `owner` (privileged). No notification:
    /// there is no recipient.
    fn burn(
        &mut self,
        caller: Address,
        owner: Address,
        amount: U256,
        user_payload: Vec<u8>,
        operator_payload: Vec<u8>,
    ) -> LedgerResult<()>;

    // =========================================================================
    // Legacy operations (fail with CompatibilityDisabled while the flag is off)
    // =========================================================================

    /// Legacy transfer from the caller to `to`: empty payloads, never blocks
    /// on missing recipient-hook support.
    fn legacy_transfer(&mut self, caller: Address, to: Address, amount: U256) -> LedgerResult<()>;

    /// Legacy delegated transfer: consumes the caller's allowance from
    /// `from`, then transfers.
    fn legacy_transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> LedgerResult<()>;

    /// Overwrites the allowance budget granted by the caller to `spender`.
    fn approve(&mut self, caller: Address, spender: Address, amount: U256) -> LedgerResult<()>;

    /// Remaining allowance budget for `(owner, spender)`.
    fn allowance(&self, owner: Address, spender: Address) -> LedgerResult<U256>;

    /// Legacy display precision, fixed at 18.
    fn decimals(&self) -> LedgerResult<u8>;

    // =========================================================================
    // Administration
    // =========================================================================

    /// Toggles the legacy compatibility layer (privileged) and updates the
    /// ledger's advertised capabilities in the discovery registry.
    fn set_legacy_enabled(&mut self, caller: Address, enabled: bool) -> LedgerResult<()>;
}

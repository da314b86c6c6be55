//! # Token Service
//!
//! The transfer engine. Owns the two domain books, orchestrates transfers,
//! and is the single component that reasons about re-entrancy ordering:
//!
//! 1. validate (granularity, recipient, authorization)
//! 2. mutate the books — debit before credit, strictly before any external
//!    call, so a re-entering hook always observes a fully consistent,
//!    already-updated ledger
//! 3. notify the recipient hook, which may re-enter through
//!    [`TokenApi`](crate::ports::inbound::TokenApi)
//! 4. emit events
//!
//! Any failure after step 2 restores the checkpoint taken at operation
//! entry, unwinding every book mutation and event appended below it —
//! including committed re-entrant inner operations.

use crate::dispatch::NotificationDispatcher;
use crate::domain::entities::{
    AuthorizationRegistry, Ledger, LedgerSnapshot, RegistrySnapshot, TokenConfig,
};
use crate::domain::invariants::{check_all_invariants, InvariantCheckResult};
use crate::domain::value_objects::{Address, U256};
use crate::errors::{LedgerError, LedgerResult};
use crate::events::{
    BurnedEvent, LedgerEvent, MintedEvent, OperatorEvent, SentEvent, TransferEvent, TransferNotice,
};
use crate::ports::inbound::TokenApi;
use crate::ports::outbound::{capabilities, AdminGate, CapabilityRegistry};
use std::sync::Arc;
use tracing::{info, warn};

// =============================================================================
// STATS
// =============================================================================

/// Operation counters for the service.
#[derive(Debug, Default, Clone)]
pub struct LedgerStats {
    /// Committed transfers (native and legacy).
    pub transfers_executed: u64,
    /// Committed mints.
    pub mints_executed: u64,
    /// Committed burns.
    pub burns_executed: u64,
    /// Operations that progressed past validation and were rolled back.
    pub failed_operations: u64,
}

// =============================================================================
// CHECKPOINT
// =============================================================================

/// Point-in-time copy of everything a failed operation must unwind.
pub(crate) struct Checkpoint {
    ledger: LedgerSnapshot,
    authorizations: RegistrySnapshot,
    events_len: usize,
}

// =============================================================================
// TOKEN SERVICE
// =============================================================================

/// The ledger service: transfer engine plus the state it owns.
///
/// All mutable state — balances, supply, approvals, allowances, the
/// compatibility flag, and the event log — lives inside one service
/// instance. External collaborators (discovery registry, admin gate) are
/// injected at construction and reached only through their ports.
pub struct TokenService {
    pub(crate) config: TokenConfig,
    pub(crate) ledger: Ledger,
    pub(crate) authorizations: AuthorizationRegistry,
    pub(crate) dispatcher: NotificationDispatcher,
    pub(crate) gate: Arc<dyn AdminGate>,
    pub(crate) legacy_enabled: bool,
    pub(crate) events: Vec<LedgerEvent>,
    pub(crate) stats: LedgerStats,
}

impl TokenService {
    /// Creates a ledger service over the injected collaborators.
    ///
    /// The initial compatibility mode is advertised to the discovery
    /// registry immediately.
    #[must_use]
    pub fn new(
        config: TokenConfig,
        registry: Arc<dyn CapabilityRegistry>,
        gate: Arc<dyn AdminGate>,
        legacy_enabled: bool,
    ) -> Self {
        registry.set_advertised(
            config.ledger_account,
            capabilities::LEGACY_TOKEN,
            legacy_enabled,
        );
        Self {
            config,
            ledger: Ledger::new(),
            authorizations: AuthorizationRegistry::new(),
            dispatcher: NotificationDispatcher::new(registry),
            gate,
            legacy_enabled,
            events: Vec::new(),
            stats: LedgerStats::default(),
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Human-readable token name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Token symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.config.symbol
    }

    /// Smallest transferable unit.
    #[must_use]
    pub const fn granularity(&self) -> U256 {
        self.config.granularity
    }

    /// Aggregate issuance.
    #[must_use]
    pub const fn total_supply(&self) -> U256 {
        self.ledger.total_supply()
    }

    /// Balance of an account, zero for unseen accounts.
    #[must_use]
    pub fn balance_of(&self, account: Address) -> U256 {
        self.ledger.balance_of(account)
    }

    /// True iff `operator` may move value held by `owner`.
    #[must_use]
    pub fn is_operator_for(&self, operator: Address, owner: Address) -> bool {
        self.authorizations.is_authorized(operator, owner)
    }

    /// True while the legacy compatibility layer is active.
    #[must_use]
    pub const fn legacy_enabled(&self) -> bool {
        self.legacy_enabled
    }

    /// Events committed so far, oldest first.
    #[must_use]
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Drains and returns the committed events.
    pub fn take_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Current operation counters.
    #[must_use]
    pub fn stats(&self) -> &LedgerStats {
        &self.stats
    }

    /// Verifies the numeric ledger invariants against the live books.
    #[must_use]
    pub fn check_invariants(&self) -> InvariantCheckResult {
        check_all_invariants(&self.ledger, &self.config)
    }

    // =========================================================================
    // Native operations
    // =========================================================================

    /// Moves `amount` from the caller to `to` with the anti-lock-in policy
    /// active: a hookless code-bearing recipient is rejected.
    pub fn send(
        &mut self,
        caller: Address,
        to: Address,
        amount: U256,
        user_payload: Vec<u8>,
    ) -> LedgerResult<()> {
        self.transfer_internal(caller, caller, to, amount, user_payload, Vec::new(), true)
    }

    /// Moves `amount` from `from` to `to` on behalf of `from`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotAuthorized`] unless the caller is `from`
    /// itself or holds an active operator grant.
    pub fn operator_send(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        amount: U256,
        user_payload: Vec<u8>,
        operator_payload: Vec<u8>,
    ) -> LedgerResult<()> {
        if !self.authorizations.is_authorized(caller, from) {
            warn!(caller = %caller, from = %from, "operator transfer without grant");
            return Err(LedgerError::NotAuthorized);
        }
        self.transfer_internal(caller, from, to, amount, user_payload, operator_payload, true)
    }

    /// Grants `operator` standing authorization over the caller's value.
    pub fn authorize_operator(&mut self, caller: Address, operator: Address) -> LedgerResult<()> {
        self.authorizations.grant_operator(caller, operator)?;
        self.events.push(LedgerEvent::AuthorizedOperator(OperatorEvent {
            operator,
            owner: caller,
        }));
        info!(owner = %caller, operator = %operator, "operator authorized");
        Ok(())
    }

    /// Revokes a previously granted authorization. Idempotent.
    pub fn revoke_operator(&mut self, caller: Address, operator: Address) -> LedgerResult<()> {
        self.authorizations.revoke_operator(caller, operator)?;
        self.events.push(LedgerEvent::RevokedOperator(OperatorEvent {
            operator,
            owner: caller,
        }));
        info!(owner = %caller, operator = %operator, "operator revoked");
        Ok(())
    }

    /// Issues `amount` to `to`, growing balance and supply together.
    ///
    /// Privileged: the caller must pass the admin gate. The recipient is
    /// notified with the null account as the source and the anti-lock-in
    /// policy active.
    pub fn mint(
        &mut self,
        caller: Address,
        to: Address,
        amount: U256,
        operator_payload: Vec<u8>,
    ) -> LedgerResult<()> {
        if !self.gate.is_owner(caller) {
            warn!(caller = %caller, "mint by non-owner rejected");
            return Err(LedgerError::NotAuthorized);
        }
        self.require_aligned(amount)?;
        if to.is_zero() {
            return Err(LedgerError::InvalidRecipient);
        }

        let checkpoint = self.checkpoint();
        match self.apply_mint(caller, to, amount, operator_payload) {
            Ok(()) => {
                self.stats.mints_executed += 1;
                info!(to = %to, amount = %amount, "minted");
                Ok(())
            }
            Err(err) => {
                self.rollback(checkpoint);
                self.stats.failed_operations += 1;
                warn!(to = %to, amount = %amount, error = %err, "mint aborted");
                Err(err)
            }
        }
    }

    /// Destroys `amount` held by `owner`, shrinking balance and supply
    /// together. Privileged. No notification: there is no recipient.
    pub fn burn(
        &mut self,
        caller: Address,
        owner: Address,
        amount: U256,
        user_payload: Vec<u8>,
        operator_payload: Vec<u8>,
    ) -> LedgerResult<()> {
        if !self.gate.is_owner(caller) {
            warn!(caller = %caller, "burn by non-owner rejected");
            return Err(LedgerError::NotAuthorized);
        }
        self.require_aligned(amount)?;
        self.ledger.burn(owner, amount)?;

        self.events.push(LedgerEvent::Burned(BurnedEvent {
            operator: caller,
            from: owner,
            amount,
            user_payload,
            operator_payload,
        }));
        if self.legacy_enabled {
            self.events.push(LedgerEvent::Transfer(TransferEvent {
                from: owner,
                to: Address::ZERO,
                amount,
            }));
        }
        self.stats.burns_executed += 1;
        info!(from = %owner, amount = %amount, "burned");
        Ok(())
    }

    // =========================================================================
    // Transfer engine
    // =========================================================================

    /// Runs one transfer as an atomic unit: validation, debit-then-credit,
    /// notification, events. Shared by the native and legacy entry points;
    /// only `must_succeed` differs between them.
    pub(crate) fn transfer_internal(
        &mut self,
        operator: Address,
        from: Address,
        to: Address,
        amount: U256,
        user_payload: Vec<u8>,
        operator_payload: Vec<u8>,
        must_succeed: bool,
    ) -> LedgerResult<()> {
        self.require_aligned(amount)?;
        if to.is_zero() {
            return Err(LedgerError::InvalidRecipient);
        }

        let checkpoint = self.checkpoint();
        let outcome = self.apply_transfer(
            operator,
            from,
            to,
            amount,
            user_payload,
            operator_payload,
            must_succeed,
        );
        match outcome {
            Ok(()) => {
                self.stats.transfers_executed += 1;
                info!(from = %from, to = %to, amount = %amount, "transfer committed");
                Ok(())
            }
            Err(err) => {
                self.rollback(checkpoint);
                self.stats.failed_operations += 1;
                warn!(from = %from, to = %to, amount = %amount, error = %err, "transfer aborted");
                Err(err)
            }
        }
    }

    fn apply_transfer(
        &mut self,
        operator: Address,
        from: Address,
        to: Address,
        amount: U256,
        user_payload: Vec<u8>,
        operator_payload: Vec<u8>,
        must_succeed: bool,
    ) -> LedgerResult<()> {
        // Debit before credit, both strictly before the external call.
        self.ledger.debit(from, amount)?;
        self.ledger.credit(to, amount)?;

        let notice = TransferNotice {
            operator,
            from,
            to,
            amount,
            user_payload,
            operator_payload,
        };
        let dispatcher = self.dispatcher.clone();
        dispatcher.notify(self, &notice, must_succeed)?;

        let TransferNotice {
            user_payload,
            operator_payload,
            ..
        } = notice;
        self.events.push(LedgerEvent::Sent(SentEvent {
            operator,
            from,
            to,
            amount,
            user_payload,
            operator_payload,
        }));
        if self.legacy_enabled {
            self.events
                .push(LedgerEvent::Transfer(TransferEvent { from, to, amount }));
        }
        Ok(())
    }

    fn apply_mint(
        &mut self,
        caller: Address,
        to: Address,
        amount: U256,
        operator_payload: Vec<u8>,
    ) -> LedgerResult<()> {
        self.ledger.mint(to, amount)?;

        let notice = TransferNotice {
            operator: caller,
            from: Address::ZERO,
            to,
            amount,
            user_payload: Vec::new(),
            operator_payload,
        };
        let dispatcher = self.dispatcher.clone();
        dispatcher.notify(self, &notice, true)?;

        let TransferNotice {
            operator_payload, ..
        } = notice;
        self.events.push(LedgerEvent::Minted(MintedEvent {
            operator: caller,
            to,
            amount,
            operator_payload,
        }));
        if self.legacy_enabled {
            self.events.push(LedgerEvent::Transfer(TransferEvent {
                from: Address::ZERO,
                to,
                amount,
            }));
        }
        Ok(())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    pub(crate) fn require_aligned(&self, amount: U256) -> LedgerResult<()> {
        if self.config.is_aligned(amount) {
            Ok(())
        } else {
            Err(LedgerError::InvalidAmount {
                amount,
                granularity: self.config.granularity,
            })
        }
    }

    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            ledger: self.ledger.snapshot(),
            authorizations: self.authorizations.snapshot(),
            events_len: self.events.len(),
        }
    }

    pub(crate) fn rollback(&mut self, checkpoint: Checkpoint) {
        self.ledger.restore(checkpoint.ledger);
        self.authorizations.restore(checkpoint.authorizations);
        self.events.truncate(checkpoint.events_len);
    }
}

// =============================================================================
// INBOUND PORT IMPLEMENTATION
// =============================================================================

impl TokenApi for TokenService {
    fn name(&self) -> &str {
        TokenService::name(self)
    }

    fn symbol(&self) -> &str {
        TokenService::symbol(self)
    }

    fn granularity(&self) -> U256 {
        TokenService::granularity(self)
    }

    fn total_supply(&self) -> U256 {
        TokenService::total_supply(self)
    }

    fn balance_of(&self, account: Address) -> U256 {
        TokenService::balance_of(self, account)
    }

    fn is_operator_for(&self, operator: Address, owner: Address) -> bool {
        TokenService::is_operator_for(self, operator, owner)
    }

    fn legacy_enabled(&self) -> bool {
        TokenService::legacy_enabled(self)
    }

    fn send(
        &mut self,
        caller: Address,
        to: Address,
        amount: U256,
        user_payload: Vec<u8>,
    ) -> LedgerResult<()> {
        TokenService::send(self, caller, to, amount, user_payload)
    }

    fn operator_send(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        amount: U256,
        user_payload: Vec<u8>,
        operator_payload: Vec<u8>,
    ) -> LedgerResult<()> {
        TokenService::operator_send(self, caller, from, to, amount, user_payload, operator_payload)
    }

    fn authorize_operator(&mut self, caller: Address, operator: Address) -> LedgerResult<()> {
        TokenService::authorize_operator(self, caller, operator)
    }

    fn revoke_operator(&mut self, caller: Address, operator: Address) -> LedgerResult<()> {
        TokenService::revoke_operator(self, caller, operator)
    }

    fn mint(
        &mut self,
        caller: Address,
        to: Address,
        amount: U256,
        operator_payload: Vec<u8>,
    ) -> LedgerResult<()> {
        TokenService::mint(self, caller, to, amount, operator_payload)
    }

    fn burn(
        &mut self,
        caller: Address,
        owner: Address,
        amount: U256,
        user_payload: Vec<u8>,
        operator_payload: Vec<u8>,
    ) -> LedgerResult<()> {
        TokenService::burn(self, caller, owner, amount, user_payload, operator_payload)
    }

    fn legacy_transfer(&mut self, caller: Address, to: Address, amount: U256) -> LedgerResult<()> {
        TokenService::legacy_transfer(self, caller, to, amount)
    }

    fn legacy_transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> LedgerResult<()> {
        TokenService::legacy_transfer_from(self, caller, from, to, amount)
    }

    fn approve(&mut self, caller: Address, spender: Address, amount: U256) -> LedgerResult<()> {
        TokenService::approve(self, caller, spender, amount)
    }

    fn allowance(&self, owner: Address, spender: Address) -> LedgerResult<U256> {
        TokenService::allowance(self, owner, spender)
    }

    fn decimals(&self) -> LedgerResult<u8> {
        TokenService::decimals(self)
    }

    fn set_legacy_enabled(&mut self, caller: Address, enabled: bool) -> LedgerResult<()> {
        TokenService::set_legacy_enabled(self, caller, enabled)
    }
}

// =============================================================================
// TESTS
// =============================================================================

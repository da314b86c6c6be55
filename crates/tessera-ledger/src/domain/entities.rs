//! # Domain Entities
//!
//! The two books the ledger owns: balance/supply state ([`Ledger`]) and
//! authorization state ([`AuthorizationRegistry`]). Pure bookkeeping, no
//! external calls. Each book exposes `snapshot` / `restore` so the transfer
//! engine can unwind a whole operation when an external notification fails.

use crate::domain::value_objects::{Address, U256};
use crate::errors::{LedgerError, LedgerResult};
use std::collections::{HashMap, HashSet};

// =============================================================================
// TOKEN CONFIG
// =============================================================================

/// Immutable configuration fixed at ledger creation.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Human-readable token name.
    pub name: String,
    /// Token symbol.
    pub symbol: String,
    /// Smallest transferable unit. Every balance-changing amount must be an
    /// exact multiple of this. Immutable after creation.
    pub granularity: U256,
    /// Account the ledger itself occupies in the capability-discovery
    /// registry, used when advertising legacy-token support.
    pub ledger_account: Address,
}

impl TokenConfig {
    /// Creates a configuration, rejecting granularity zero.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidGranularity`] if `granularity` is zero.
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        granularity: U256,
        ledger_account: Address,
    ) -> LedgerResult<Self> {
        if granularity.is_zero() {
            return Err(LedgerError::InvalidGranularity);
        }
        Ok(Self {
            name: name.into(),
            symbol: symbol.into(),
            granularity,
            ledger_account,
        })
    }

    /// Returns true if `amount` is an exact multiple of the granularity.
    #[must_use]
    pub fn is_aligned(&self, amount: U256) -> bool {
        (amount % self.granularity).is_zero()
    }
}

// =============================================================================
// LEDGER (balances + total supply)
// =============================================================================

/// Per-account balances and total issuance.
///
/// ## Invariants
/// - `sum(balances) == total_supply` after every operation
/// - a failed operation mutates nothing (all-or-nothing)
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    /// Balance per account. Unseen accounts hold zero.
    balances: HashMap<Address, U256>,
    /// Aggregate issuance, mutated only by mint and burn.
    total_supply: U256,
}

/// Point-in-time copy of the balance book, used for whole-operation rollback.
#[derive(Debug, Clone)]
pub struct LedgerSnapshot {
    balances: HashMap<Address, U256>,
    total_supply: U256,
}

impl Ledger {
    /// Creates an empty ledger with zero supply.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the balance of an account, zero for unseen accounts.
    #[must_use]
    pub fn balance_of(&self, account: Address) -> U256 {
        self.balances.get(&account).copied().unwrap_or_default()
    }

    /// Returns the aggregate supply.
    #[must_use]
    pub const fn total_supply(&self) -> U256 {
        self.total_supply
    }

    /// Iterates over all accounts with a recorded balance.
    pub fn accounts(&self) -> impl Iterator<Item = (&Address, &U256)> {
        self.balances.iter()
    }

    /// Increases an account balance. Supply is unchanged; this is the
    /// receiving half of a transfer.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Overflow`] if the balance would wrap.
    pub fn credit(&mut self, account: Address, amount: U256) -> LedgerResult<()> {
        let updated = self
            .balance_of(account)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.balances.insert(account, updated);
        Ok(())
    }

    /// Decreases an account balance. Supply is unchanged; this is the
    /// sending half of a transfer.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InsufficientBalance`] if the account holds
    /// less than `amount`. The book is untouched on failure.
    pub fn debit(&mut self, account: Address, amount: U256) -> LedgerResult<()> {
        let have = self.balance_of(account);
        if have < amount {
            return Err(LedgerError::InsufficientBalance { have, need: amount });
        }
        self.balances.insert(account, have - amount);
        Ok(())
    }

    /// Issues new value: credits the account and grows supply together.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Overflow`] if balance or supply would wrap.
    /// Nothing is mutated on failure.
    pub fn mint(&mut self, account: Address, amount: U256) -> LedgerResult<()> {
        let balance = self
            .balance_of(account)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        let supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.balances.insert(account, balance);
        self.total_supply = supply;
        Ok(())
    }

    /// Destroys value: debits the account and shrinks supply together.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InsufficientBalance`] if the account holds
    /// less than `amount`. Nothing is mutated on failure.
    pub fn burn(&mut self, account: Address, amount: U256) -> LedgerResult<()> {
        let have = self.balance_of(account);
        if have < amount {
            return Err(LedgerError::InsufficientBalance { have, need: amount });
        }
        // Conservation guarantees supply >= any single balance.
        self.balances.insert(account, have - amount);
        self.total_supply = self
            .total_supply
            .checked_sub(amount)
            .ok_or(LedgerError::Overflow)?;
        Ok(())
    }

    /// Captures the current book for later [`Ledger::restore`].
    #[must_use]
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            balances: self.balances.clone(),
            total_supply: self.total_supply,
        }
    }

    /// Reinstates a previously captured book, discarding every change made
    /// since the snapshot.
    pub fn restore(&mut self, snapshot: LedgerSnapshot) {
        self.balances = snapshot.balances;
        self.total_supply = snapshot.total_supply;
    }
}

// =============================================================================
// AUTHORIZATION REGISTRY (operators + legacy allowances)
// =============================================================================

/// Operator approvals and legacy per-spender allowance budgets.
///
/// The two authorization models are independent: an operator grant never
/// creates an allowance, and consuming an allowance never touches grants.
#[derive(Debug, Clone, Default)]
pub struct AuthorizationRegistry {
    /// owner -> set of granted operators.
    operators: HashMap<Address, HashSet<Address>>,
    /// (owner, spender) -> remaining spending budget.
    allowances: HashMap<(Address, Address), U256>,
}

/// Point-in-time copy of the authorization book.
#[derive(Debug, Clone)]
pub struct RegistrySnapshot {
    operators: HashMap<Address, HashSet<Address>>,
    allowances: HashMap<(Address, Address), U256>,
}

impl AuthorizationRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an operator grant from `owner` to `operator`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidOperator`] if `operator == owner`;
    /// self-authorization is implicit and must not be recorded.
    pub fn grant_operator(&mut self, owner: Address, operator: Address) -> LedgerResult<()> {
        if operator == owner {
            return Err(LedgerError::InvalidOperator);
        }
        self.operators.entry(owner).or_default().insert(operator);
        Ok(())
    }

    /// Clears an operator grant. Revoking a non-granted operator is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidOperator`] if `operator == owner`.
    pub fn revoke_operator(&mut self, owner: Address, operator: Address) -> LedgerResult<()> {
        if operator == owner {
            return Err(LedgerError::InvalidOperator);
        }
        if let Some(granted) = self.operators.get_mut(&owner) {
            granted.remove(&operator);
        }
        Ok(())
    }

    /// Returns true iff `caller` may move value held by `owner`: either the
    /// caller is the owner, or an active grant exists.
    #[must_use]
    pub fn is_authorized(&self, caller: Address, owner: Address) -> bool {
        caller == owner
            || self
                .operators
                .get(&owner)
                .is_some_and(|granted| granted.contains(&caller))
    }

    /// Overwrites the allowance budget for `(owner, spender)`.
    ///
    /// This is NOT additive: the prior value is replaced unconditionally,
    /// matching the legacy standard. A spender observing an allowance change
    /// can spend the old budget before the overwrite lands and the new one
    /// after it; callers mitigate by setting the budget to zero first.
    pub fn set_allowance(&mut self, owner: Address, spender: Address, amount: U256) {
        self.allowances.insert((owner, spender), amount);
    }

    /// Decrements the allowance budget by `amount`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::AllowanceExceeded`] if the remaining budget is
    /// smaller than `amount`. The budget is untouched on failure.
    pub fn consume_allowance(
        &mut self,
        owner: Address,
        spender: Address,
        amount: U256,
    ) -> LedgerResult<()> {
        let remaining = self.allowance_of(owner, spender);
        if amount > remaining {
            return Err(LedgerError::AllowanceExceeded {
                requested: amount,
                remaining,
            });
        }
        self.allowances.insert((owner, spender), remaining - amount);
        Ok(())
    }

    /// Returns the remaining budget for `(owner, spender)`, default zero.
    #[must_use]
    pub fn allowance_of(&self, owner: Address, spender: Address) -> U256 {
        self.allowances
            .get(&(owner, spender))
            .copied()
            .unwrap_or_default()
    }

    /// Captures the current book for later [`AuthorizationRegistry::restore`].
    #[must_use]
    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            operators: self.operators.clone(),
            allowances: self.allowances.clone(),
        }
    }

    /// Reinstates a previously captured book.
    pub fn restore(&mut self, snapshot: RegistrySnapshot) {
        self.operators = snapshot.operators;
        self.allowances = snapshot.allowances;
    }
}

// =============================================================================
// TESTS
// =============================================================================

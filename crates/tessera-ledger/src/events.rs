//! # Event Schema
//!
//! Structured, immutable records of completed ledger operations, observable
//! by external watchers. No event is ever emitted for a failed operation:
//! the engine appends events only after an operation commits, and rollback
//! truncates anything appended below a failed outer call.
//!
//! While compatibility mode is active, value movements additionally emit
//! legacy-style [`TransferEvent`] / [`ApprovalEvent`] records so watchers of
//! the old standard keep working.

use crate::domain::value_objects::{Address, U256};
use serde::{Deserialize, Serialize};

// =============================================================================
// TRANSFER NOTICE (hook invocation payload)
// =============================================================================

/// Parameters handed to a recipient hook on every incoming transfer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransferNotice {
    /// Account that initiated the movement (sender or authorized operator).
    pub operator: Address,
    /// Debited account; the null account for mints.
    pub from: Address,
    /// Credited account.
    pub to: Address,
    /// Amount moved.
    pub amount: U256,
    /// Opaque payload supplied by the sender.
    pub user_payload: Vec<u8>,
    /// Opaque payload supplied by the operator.
    pub operator_payload: Vec<u8>,
}

// =============================================================================
// NATIVE EVENTS
// =============================================================================

/// A completed value transfer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentEvent {
    /// Sender or authorized operator that ran the transfer.
    pub operator: Address,
    /// Debited account.
    pub from: Address,
    /// Credited account.
    pub to: Address,
    /// Amount moved.
    pub amount: U256,
    /// Sender-supplied payload.
    pub user_payload: Vec<u8>,
    /// Operator-supplied payload.
    pub operator_payload: Vec<u8>,
}

/// New value issued to an account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintedEvent {
    /// Privileged caller that issued the value.
    pub operator: Address,
    /// Credited account.
    pub to: Address,
    /// Amount issued.
    pub amount: U256,
    /// Operator-supplied payload.
    pub operator_payload: Vec<u8>,
}

/// Value destroyed from an account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurnedEvent {
    /// Privileged caller that destroyed the value.
    pub operator: Address,
    /// Debited account.
    pub from: Address,
    /// Amount destroyed.
    pub amount: U256,
    /// Holder-supplied payload.
    pub user_payload: Vec<u8>,
    /// Operator-supplied payload.
    pub operator_payload: Vec<u8>,
}

/// An operator grant or revocation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorEvent {
    /// The operator the grant concerns.
    pub operator: Address,
    /// The account whose value the operator may (no longer) move.
    pub owner: Address,
}

// =============================================================================
// LEGACY EVENTS (emitted only while compatibility mode is active)
// =============================================================================

/// Legacy-style transfer record: `(from, to, amount)` only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferEvent {
    /// Debited account; the null account for mints.
    pub from: Address,
    /// Credited account; the null account for burns.
    pub to: Address,
    /// Amount moved.
    pub amount: U256,
}

/// Legacy-style allowance record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalEvent {
    /// Account granting the budget.
    pub owner: Address,
    /// Account allowed to spend it.
    pub spender: Address,
    /// The new budget (an overwrite, never an increment).
    pub amount: U256,
}

// =============================================================================
// EVENT LOG ENTRY
// =============================================================================

/// Any observable ledger event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    /// A completed transfer.
    Sent(SentEvent),
    /// New value issued.
    Minted(MintedEvent),
    /// Value destroyed.
    Burned(BurnedEvent),
    /// Operator authorized.
    AuthorizedOperator(OperatorEvent),
    /// Operator revoked.
    RevokedOperator(OperatorEvent),
    /// Legacy transfer record.
    Transfer(TransferEvent),
    /// Legacy approval record.
    Approval(ApprovalEvent),
}

// =============================================================================
// TESTS
// =============================================================================

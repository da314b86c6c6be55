//! # Error Types
//!
//! All error types for ledger operations.
//!
//! Every error aborts the entire operation with full rollback. There is no
//! local recovery: a failed call leaves balances, authorizations, and the
//! event log exactly as they were before the call.

use crate::domain::value_objects::{Address, U256};
use thiserror::Error;

// =============================================================================
// LEDGER ERRORS
// =============================================================================

/// Errors that can occur during ledger operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Amount is not a multiple of the ledger granularity.
    #[error("invalid amount {amount}: not a multiple of granularity {granularity}")]
    InvalidAmount {
        /// The offending amount.
        amount: U256,
        /// The ledger granularity.
        granularity: U256,
    },

    /// Sender balance is too low for the requested amount.
    #[error("insufficient balance: have {have}, need {need}")]
    InsufficientBalance {
        /// Current balance of the debited account.
        have: U256,
        /// Amount the operation required.
        need: U256,
    },

    /// Transfer destination is the null account, which is reserved for
    /// destruction and never a valid ordinary recipient.
    #[error("invalid recipient: the null account only receives burns")]
    InvalidRecipient,

    /// Caller is neither the account owner nor an authorized operator,
    /// or a privileged operation was attempted by a non-owner.
    #[error("caller is not authorized for this operation")]
    NotAuthorized,

    /// Legacy transfer requested more than the remaining allowance budget.
    #[error("allowance exceeded: requested {requested}, remaining {remaining}")]
    AllowanceExceeded {
        /// Amount the spender tried to consume.
        requested: U256,
        /// Budget still available to the spender.
        remaining: U256,
    },

    /// Self-referential operator grant or revoke. An account is always its
    /// own operator; recording that explicitly is rejected.
    #[error("invalid operator: an account cannot grant or revoke itself")]
    InvalidOperator,

    /// Native transfer to a code-bearing account that registered no
    /// recipient hook. Legacy transfers waive this check.
    #[error("recipient unreachable: {account} hosts code but no recipient hook")]
    RecipientUnreachable {
        /// The hookless code-bearing account.
        account: Address,
    },

    /// A legacy entry point was called while compatibility mode is off.
    #[error("legacy compatibility is disabled")]
    CompatibilityDisabled,

    /// The recipient hook raised a failure, aborting the whole transfer.
    #[error("recipient rejected transfer: {0}")]
    RecipientRejected(String),

    /// Ledger construction was attempted with granularity zero.
    #[error("granularity must be at least 1")]
    InvalidGranularity,

    /// Checked arithmetic overflowed 256 bits.
    #[error("arithmetic overflow")]
    Overflow,
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

// =============================================================================
// RECIPIENT ERRORS
// =============================================================================

/// Failure raised by a recipient hook to reject an incoming transfer.
///
/// The transfer engine converts this into [`LedgerError::RecipientRejected`]
/// and unwinds the whole transfer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct RecipientError {
    /// Why the recipient refused the transfer.
    pub reason: String,
}

impl RecipientError {
    /// Creates a rejection with the given reason.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

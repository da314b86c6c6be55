//! # Domain Invariants
//!
//! Numeric invariants that MUST hold across every ledger operation.
//! These are checkable at runtime; the test suite asserts them after each
//! mutation.
//!
//! - Conservation: sum of all balances equals total supply
//! - Alignment: every balance is a multiple of the granularity
//! - Non-negativity: structural, balances are unsigned 256-bit integers

use crate::domain::entities::{Ledger, TokenConfig};
use crate::domain::value_objects::U256;

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// Conservation: `sum(balances) == total_supply`.
///
/// Holds unconditionally because transfers debit before crediting and
/// mint/burn move balance and supply together. A sum that overflows 256 bits
/// is itself a violation.
#[must_use]
pub fn check_conservation_invariant(ledger: &Ledger) -> bool {
    let mut sum = U256::zero();
    for (_, balance) in ledger.accounts() {
        match sum.checked_add(*balance) {
            Some(next) => sum = next,
            None => return false,
        }
    }
    sum == ledger.total_supply()
}

/// Alignment: every recorded balance is a multiple of the granularity.
///
/// Follows from all balance-changing amounts being aligned and every account
/// starting at zero.
#[must_use]
pub fn check_alignment_invariant(ledger: &Ledger, config: &TokenConfig) -> bool {
    ledger
        .accounts()
        .all(|(_, balance)| (*balance % config.granularity).is_zero())
}

/// Check all ledger invariants at once.
#[must_use]
pub fn check_all_invariants(ledger: &Ledger, config: &TokenConfig) -> InvariantCheckResult {
    let mut violations = Vec::new();

    if !check_conservation_invariant(ledger) {
        violations.push(InvariantViolation::ConservationBroken {
            total_supply: ledger.total_supply(),
        });
    }

    if !check_alignment_invariant(ledger, config) {
        violations.push(InvariantViolation::MisalignedBalance {
            granularity: config.granularity,
        });
    }

    if violations.is_empty() {
        InvariantCheckResult::Valid
    } else {
        InvariantCheckResult::Invalid(violations)
    }
}

// =============================================================================
// INVARIANT TYPES
// =============================================================================

/// Result of checking all invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantCheckResult {
    /// All invariants hold.
    Valid,
    /// One or more invariants violated.
    Invalid(Vec<InvariantViolation>),
}

impl InvariantCheckResult {
    /// Returns true if all invariants hold.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Specific invariant violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Balances no longer sum to the total supply.
    ConservationBroken {
        /// The recorded aggregate supply.
        total_supply: U256,
    },
    /// A balance is not a multiple of the granularity.
    MisalignedBalance {
        /// The ledger granularity.
        granularity: U256,
    },
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConservationBroken { total_supply } => {
                write!(f, "balances do not sum to total supply {total_supply}")
            }
            Self::MisalignedBalance { granularity } => {
                write!(f, "balance not aligned to granularity {granularity}")
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

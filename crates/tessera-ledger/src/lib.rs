//! # Tessera Ledger - Fungible-Value Transfer Engine
//!
//! A fungible-value ledger with pluggable transfer notifications and dual
//! compatibility with a legacy allowance-based transfer model. Tracks
//! per-account balances and total issuance, enforces a minimum transferable
//! unit (granularity), lets accounts delegate transfer rights to operators,
//! and notifies recipients of incoming value through a capability-discovery
//! lookup so recipient logic can react to, or reject, transfers.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Conservation: balances sum to total supply | `domain/entities.rs` - debit-before-credit, mint/burn move both books together |
//! | Granularity: amounts are exact multiples | `service.rs` - `require_aligned()` on every balance-changing path |
//! | Mutate-then-notify: hooks see the committed book | `service.rs` - `apply_transfer()` orders debit/credit before dispatch |
//! | Atomic rollback: failed operations mutate nothing | `service.rs` - `checkpoint()` / `rollback()` around every engine run |
//! | No double-spend across authorization models | `shim.rs` - allowance reserved before the underlying transfer |
//!
//! ## Architecture
//!
//! Hexagonal: a pure domain core, trait ports on both sides, and in-memory
//! adapters for the external collaborators.
//!
//! | Component | Location |
//! |-----------|----------|
//! | Balance/supply book | `domain/entities.rs` (`Ledger`) |
//! | Operator/allowance book | `domain/entities.rs` (`AuthorizationRegistry`) |
//! | Notification dispatch | `dispatch.rs` |
//! | Transfer engine | `service.rs` (`TokenService`) |
//! | Legacy shim | `shim.rs` |
//! | Discovery/hook/admin ports | `ports/outbound.rs` |
//! | Entry-point surface | `ports/inbound.rs` (`TokenApi`) |
//!
//! ## Re-entrancy
//!
//! A recipient hook runs synchronously in the middle of a transfer and is
//! handed a `&mut dyn TokenApi`, through which it may call back into any
//! ledger operation. The books are mutated strictly before the hook runs,
//! so every re-entrant call observes post-transfer state; a failure
//! anywhere unwinds the whole outer operation, committed inner calls
//! included.
//!
//! ## Usage Example
//!
//! ```
//! use std::sync::Arc;
//! use tessera_ledger::prelude::*;
//!
//! let registry = Arc::new(InMemoryCapabilityRegistry::new());
//! let owner = Address::new([9u8; 20]);
//! let gate = Arc::new(SingleOwnerGate::new(owner));
//! let config = TokenConfig::new(
//!     "Tessera",
//!     "TSR",
//!     U256::from(1),
//!     Address::new([200u8; 20]),
//! )
//! .unwrap();
//!
//! let mut ledger = TokenService::new(config, registry, gate, true);
//! let alice = Address::new([1u8; 20]);
//! let bob = Address::new([2u8; 20]);
//!
//! ledger.mint(owner, alice, U256::from(1000), vec![]).unwrap();
//! ledger.send(alice, bob, U256::from(300), vec![]).unwrap();
//!
//! assert_eq!(ledger.balance_of(bob), U256::from(300));
//! assert_eq!(ledger.total_supply(), U256::from(1000));
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod dispatch;
pub mod domain;
pub mod errors;
pub mod events;
pub mod ports;
pub mod service;
pub mod shim;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain
    pub use crate::domain::entities::{AuthorizationRegistry, Ledger, TokenConfig};
    pub use crate::domain::invariants::{
        check_all_invariants, check_alignment_invariant, check_conservation_invariant,
        InvariantCheckResult, InvariantViolation,
    };
    pub use crate::domain::value_objects::{Address, U256};

    // Ports
    pub use crate::ports::inbound::TokenApi;
    pub use crate::ports::outbound::{
        capabilities, AdminGate, CapabilityRegistry, TokensRecipient,
    };

    // Events
    pub use crate::events::{
        ApprovalEvent, BurnedEvent, LedgerEvent, MintedEvent, OperatorEvent, SentEvent,
        TransferEvent, TransferNotice,
    };

    // Errors
    pub use crate::errors::{LedgerError, LedgerResult, RecipientError};

    // Dispatch
    pub use crate::dispatch::NotificationDispatcher;

    // Adapters
    pub use crate::adapters::{InMemoryCapabilityRegistry, SingleOwnerGate};

    // Service
    pub use crate::service::{LedgerStats, TokenService};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// TESTS
// =============================================================================

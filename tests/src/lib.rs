//! # Tessera Test Suite
//!
//! Unified test crate containing cross-component flows that exercise the
//! whole ledger through its public surface.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── transfer_flows.rs   # End-to-end mint/send/burn scenarios
//!     ├── reentrancy.rs       # Hooks calling back into the ledger
//!     ├── legacy_shim.rs      # Allowance shim and compatibility gating
//!     └── conservation.rs     # Randomized operation-sequence properties
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p tessera-tests
//!
//! # By category
//! cargo test -p tessera-tests integration::reentrancy
//! ```

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;

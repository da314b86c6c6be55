//! # Domain Layer (Inner Hexagon)
//!
//! Pure bookkeeping for the value ledger.
//! NO I/O, NO external calls, NO references into other components' state.
//!
//! - Dependencies point INWARD only (adapters depend on this, not vice versa).
//! - The [`entities::Ledger`] exclusively owns balance/supply state; the
//!   [`entities::AuthorizationRegistry`] exclusively owns approval/allowance
//!   state.

pub mod entities;
pub mod invariants;
pub mod value_objects;

pub use entities::*;
pub use invariants::*;
pub use value_objects::*;

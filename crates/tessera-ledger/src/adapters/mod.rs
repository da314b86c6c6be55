//! # Adapters Layer (Outer Hexagon)
//!
//! Concrete implementations of the driven ports for tests and
//! single-process deployments.
//!
//! - Adapters implement ports; the domain never depends on them.
//! - Production deployments substitute their own discovery registry and
//!   ownership gate through the same traits.

pub mod gate;
pub mod registry;

pub use gate::*;
pub use registry::*;

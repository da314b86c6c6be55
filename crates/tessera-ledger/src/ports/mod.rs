//! # Ports Layer (Middle Hexagon)
//!
//! Trait definitions between the ledger and the outside world.
//!
//! - **Driving Port (Inbound)**: [`inbound::TokenApi`]
//! - **Driven Ports (Outbound)**: [`outbound::CapabilityRegistry`],
//!   [`outbound::TokensRecipient`], [`outbound::AdminGate`]
//! - No concrete implementations in this module

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;

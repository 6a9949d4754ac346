//! Shared store contract and in-memory backend.
//!
//! The real deployment talks to a hosted backend exposing row-level
//! CRUD plus change notifications; this crate captures that contract as
//! a trait and provides a deterministic in-memory implementation for
//! sessions, demos, and tests.
//!
//! # Invariants
//! - Presence writes are last-writer-wins on a single row keyed by
//!   participant id; no cross-row transactions exist or are needed.
//! - Every presence mutation is fanned out to every open subscription,
//!   including the writer's own (consumers filter their own id).
//! - Change queues are drained by polling; nothing is pushed into
//!   consumer code.

pub mod contract;
pub mod memory;
pub mod rows;

pub use contract::{PresenceChange, SharedStore, StoreError, SubscriptionId};
pub use memory::MemoryStore;
pub use rows::{CartItem, PresenceRow, Product, UserRecord};

pub fn crate_info() -> &'static str {
    "mallspace-store v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("store"));
    }
}

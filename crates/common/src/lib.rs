//! Shared types for the mallspace storefront.
//!
//! # Invariants
//! - Types here are plain data; no crate-level state, no I/O.
//! - Wire enums (`FacingDirection`, `AvatarVariant`) parse leniently:
//!   unknown strings fall back to a default instead of failing.

pub mod types;

pub use types::{
    AvatarVariant, FacingDirection, MoveIntent, ParticipantId, PlayerKinematicState,
};

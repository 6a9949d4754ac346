//! Simulation core: per-frame movement resolution against a static
//! obstacle set, multi-level vertical navigation, and facing
//! classification.
//!
//! # Invariants
//! - `MovementResolver::step` is pure and total: same inputs, same
//!   output, bit for bit; no randomness, no clock reads.
//! - Horizontal rejection is all-or-nothing per frame; there is no
//!   axis-separated sliding.
//! - The vertical coordinate only ever moves by exponential smoothing
//!   toward a target elevation; it never snaps.

pub mod door;
pub mod environment;
pub mod facing;
pub mod obstacle;
pub mod resolver;

pub use door::{DoorConfig, FittingRoomDoor};
pub use environment::{Environment, WorldBounds};
pub use facing::{FacingTracker, classify_direction};
pub use obstacle::{Footprint, Obstacle};
pub use resolver::{MovementResolver, ResolverConfig, VerticalNav};

pub fn crate_info() -> &'static str {
    "mallspace-sim v0.1.0"
}

//! Input mapping: raw key events to the shared directional intent.
//!
//! # Invariants
//! - The same intent type feeds local simulation and presence publishing;
//!   no layer consumes raw key events directly.
//! - Interact is edge-triggered: one activation per physical press.

pub mod keyboard;

pub use keyboard::{InputState, Key, KeyBindings};

pub fn crate_info() -> &'static str {
    "mallspace-input v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("input"));
    }
}

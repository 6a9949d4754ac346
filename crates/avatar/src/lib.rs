//! Avatar presentation: what a participant looks like and how it
//! animates, decoupled from where it is.
//!
//! Movement truth lives in the simulation; this crate derives visual
//! state from it. Poses are pure functions of elapsed walk time, and
//! remote participants are smoothed toward their replicated targets so
//! sparse network updates never read as teleports.

pub mod animation;
pub mod palette;
pub mod presenter;
pub mod smoothing;

pub use animation::{AvatarPose, WalkCycle};
pub use palette::VariantPalette;
pub use presenter::{AvatarInstance, AvatarScene, DebugTextPresenter, Presenter};
pub use smoothing::RemoteSmoother;

pub fn crate_info() -> &'static str {
    "mallspace-avatar v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("avatar"));
    }
}

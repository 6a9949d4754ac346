use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Fitting-room door tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoorConfig {
    /// Maximum horizontal distance at which interact reaches the door.
    pub interact_range: f32,
    /// Hinge angle when fully open.
    pub open_angle: f32,
    /// Per-frame exponential smoothing factor for the hinge.
    pub smoothing: f32,
}

impl Default for DoorConfig {
    fn default() -> Self {
        Self {
            interact_range: 3.0,
            open_angle: -std::f32::consts::FRAC_PI_2,
            smoothing: 0.1,
        }
    }
}

/// A fitting-room door that toggles on interact and animates its hinge
/// by exponential smoothing, never snapping.
#[derive(Debug, Clone)]
pub struct FittingRoomDoor {
    config: DoorConfig,
    anchor_x: f32,
    anchor_z: f32,
    open: bool,
    angle: f32,
}

impl FittingRoomDoor {
    pub fn new(config: DoorConfig, anchor_x: f32, anchor_z: f32) -> Self {
        Self {
            config,
            anchor_x,
            anchor_z,
            open: false,
            angle: 0.0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Current hinge angle in radians.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Attempt a toggle from the given player position. Distance is
    /// measured on the horizontal plane only. Returns whether the door
    /// state flipped. Callers are expected to pass edge-triggered
    /// interact signals; a held key must not reach here every frame.
    pub fn interact(&mut self, player: Vec3) -> bool {
        let dx = player.x - self.anchor_x;
        let dz = player.z - self.anchor_z;
        if (dx * dx + dz * dz).sqrt() < self.config.interact_range {
            self.open = !self.open;
            tracing::debug!(open = self.open, "fitting room door toggled");
            true
        } else {
            false
        }
    }

    /// Advance the hinge animation one frame.
    pub fn update(&mut self) {
        let target = if self.open { self.config.open_angle } else { 0.0 };
        self.angle += (target - self.angle) * self.config.smoothing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn door() -> FittingRoomDoor {
        FittingRoomDoor::new(DoorConfig::default(), 26.8, 11.1)
    }

    #[test]
    fn toggle_requires_proximity() {
        let mut d = door();
        assert!(!d.interact(Vec3::new(0.0, 1.7, 0.0)));
        assert!(!d.is_open());
        assert!(d.interact(Vec3::new(26.0, 1.7, 10.5)));
        assert!(d.is_open());
    }

    #[test]
    fn second_interact_closes() {
        let mut d = door();
        let near = Vec3::new(26.8, 1.7, 10.0);
        assert!(d.interact(near));
        assert!(d.interact(near));
        assert!(!d.is_open());
    }

    #[test]
    fn hinge_never_snaps() {
        let mut d = door();
        d.interact(Vec3::new(26.8, 1.7, 10.0));
        let mut prev = d.angle();
        for _ in 0..100 {
            d.update();
            let delta = (d.angle() - prev).abs();
            assert!(delta <= 0.1 * (d.config.open_angle - prev).abs() + 1e-6);
            prev = d.angle();
        }
        assert!((prev - d.config.open_angle).abs() < 0.01);
    }

    #[test]
    fn vertical_offset_does_not_affect_range() {
        let mut d = door();
        // Same spot on the plane, different height.
        assert!(d.interact(Vec3::new(26.8, 7.7, 10.0)));
    }
}

use glam::Vec3;
use mallspace_common::FacingDirection;
use std::f32::consts::FRAC_PI_4;

/// Quantize a normalized horizontal movement vector into one of the
/// four coarse facing directions.
///
/// `atan2(x, z)` is split into four 90-degree sectors centered on the
/// cardinals: down, right, up, left in angular order starting from the
/// forward-aligned sector.
pub fn classify_direction(direction: Vec3) -> FacingDirection {
    let angle = direction.x.atan2(direction.z);
    if angle > -FRAC_PI_4 && angle <= FRAC_PI_4 {
        FacingDirection::Down
    } else if angle > FRAC_PI_4 && angle <= 3.0 * FRAC_PI_4 {
        FacingDirection::Right
    } else if angle > 3.0 * FRAC_PI_4 || angle <= -3.0 * FRAC_PI_4 {
        FacingDirection::Up
    } else {
        FacingDirection::Left
    }
}

/// Sticky facing state: updates only while moving, otherwise retains
/// the last computed direction.
#[derive(Debug, Clone, Copy, Default)]
pub struct FacingTracker {
    current: FacingDirection,
}

impl FacingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> FacingDirection {
        self.current
    }

    /// Feed one frame's movement. `direction` is the normalized
    /// horizontal movement vector; it is ignored unless `moving`.
    pub fn update(&mut self, moving: bool, direction: Vec3) -> FacingDirection {
        if moving && direction.length_squared() > 0.0 {
            self.current = classify_direction(direction);
        }
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinal_sectors() {
        assert_eq!(
            classify_direction(Vec3::new(0.0, 0.0, 1.0)),
            FacingDirection::Down
        );
        assert_eq!(
            classify_direction(Vec3::new(1.0, 0.0, 0.0)),
            FacingDirection::Right
        );
        assert_eq!(
            classify_direction(Vec3::new(0.0, 0.0, -1.0)),
            FacingDirection::Up
        );
        assert_eq!(
            classify_direction(Vec3::new(-1.0, 0.0, 0.0)),
            FacingDirection::Left
        );
    }

    #[test]
    fn sector_boundaries() {
        // 45 degrees exactly belongs to the lower sector per the
        // half-open comparisons.
        let diag = Vec3::new(1.0, 0.0, 1.0).normalize();
        assert_eq!(classify_direction(diag), FacingDirection::Down);
        let diag = Vec3::new(1.0, 0.0, -1.0).normalize();
        assert_eq!(classify_direction(diag), FacingDirection::Right);
    }

    #[test]
    fn sticky_when_not_moving() {
        let mut tracker = FacingTracker::new();
        assert_eq!(tracker.current(), FacingDirection::Down);
        tracker.update(true, Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(tracker.current(), FacingDirection::Left);
        // Stopping retains the last direction.
        tracker.update(false, Vec3::ZERO);
        tracker.update(false, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(tracker.current(), FacingDirection::Left);
    }

    #[test]
    fn zero_vector_while_moving_is_ignored() {
        let mut tracker = FacingTracker::new();
        tracker.update(true, Vec3::new(0.0, 0.0, -1.0));
        tracker.update(true, Vec3::ZERO);
        assert_eq!(tracker.current(), FacingDirection::Up);
    }
}

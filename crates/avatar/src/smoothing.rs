use glam::Vec3;

/// Exponential smoother for a remote participant's replicated state.
///
/// Network updates arrive sparsely (throttled at the publisher), so the
/// rendered position chases the latest target by a fixed per-frame
/// fraction instead of jumping. The first sample snaps; a participant
/// must appear where they are, not glide in from the origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoteSmoother {
    current: Option<(Vec3, f32)>,
    target_position: Vec3,
    target_yaw: f32,
}

impl RemoteSmoother {
    const POSITION_FACTOR: f32 = 0.15;
    const YAW_FACTOR: f32 = 0.2;

    pub fn new() -> Self {
        Self::default()
    }

    /// Record the latest replicated target.
    pub fn set_target(&mut self, position: Vec3, yaw: f32) {
        self.target_position = position;
        self.target_yaw = yaw;
        if self.current.is_none() {
            self.current = Some((position, yaw));
        }
    }

    /// Advance one frame toward the target. Returns the smoothed
    /// (position, yaw) to present.
    pub fn step(&mut self) -> (Vec3, f32) {
        let (mut pos, mut yaw) = self.current.unwrap_or((self.target_position, self.target_yaw));
        pos += (self.target_position - pos) * Self::POSITION_FACTOR;
        yaw += shortest_arc(yaw, self.target_yaw) * Self::YAW_FACTOR;
        self.current = Some((pos, yaw));
        (pos, yaw)
    }
}

/// Signed shortest angular distance from `from` to `to`.
fn shortest_arc(from: f32, to: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let mut delta = (to - from) % TAU;
    if delta > PI {
        delta -= TAU;
    } else if delta < -PI {
        delta += TAU;
    }
    delta
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn first_sample_snaps() {
        let mut s = RemoteSmoother::new();
        s.set_target(Vec3::new(5.0, 0.0, -3.0), PI);
        let (pos, yaw) = s.step();
        assert!((pos - Vec3::new(5.0, 0.0, -3.0)).length() < 1e-6);
        assert!((yaw - PI).abs() < 1e-6);
    }

    #[test]
    fn later_samples_converge_without_snapping() {
        let mut s = RemoteSmoother::new();
        s.set_target(Vec3::ZERO, 0.0);
        s.step();
        s.set_target(Vec3::new(10.0, 0.0, 0.0), 0.0);

        let (first, _) = s.step();
        assert!((first.x - 1.5).abs() < 1e-5);

        let mut pos = first;
        for _ in 0..200 {
            pos = s.step().0;
        }
        assert!((pos.x - 10.0).abs() < 1e-3);
    }

    #[test]
    fn yaw_takes_the_short_way_around() {
        let mut s = RemoteSmoother::new();
        s.set_target(Vec3::ZERO, -FRAC_PI_2 - 0.3);
        s.step();
        // Crossing the ±π seam must not spin the long way.
        s.set_target(Vec3::ZERO, FRAC_PI_2 + 2.0);
        let (_, yaw) = s.step();
        assert!(yaw < -FRAC_PI_2 - 0.3, "moved the wrong direction: {yaw}");
    }
}

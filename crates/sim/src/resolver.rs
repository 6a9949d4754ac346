use crate::environment::Environment;
use glam::{Quat, Vec3};
use mallspace_common::MoveIntent;
use serde::{Deserialize, Serialize};

/// Vertical navigation layout: stair and escalator ramp zones plus the
/// upper-floor hold region. All geometry is configuration; defaults
/// match the reference store layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerticalNav {
    /// Default target elevation (standing eye height).
    pub eye_height: f32,
    /// Elevation gained over a full ramp traversal.
    pub floor_rise: f32,
    /// Above this height the player counts as being on the upper floor.
    pub upper_threshold: f32,
    /// Behind this z line, an already-elevated player holds floor height.
    pub upper_back_boundary: f32,
    /// Central stairs: |x| < half_width, z in (z_back, z_front).
    pub stair_half_width: f32,
    pub stair_z_front: f32,
    /// Ramp parameter t = clamp((ramp_start - z) / ramp_depth, 0, 1).
    pub stair_ramp_start: f32,
    pub stair_ramp_depth: f32,
    /// Escalators: ||x| - center_x| < half_width, z in (z_back, z_front).
    pub escalator_center_x: f32,
    pub escalator_half_width: f32,
    pub escalator_z_front: f32,
    pub escalator_ramp_start: f32,
    pub escalator_ramp_depth: f32,
    /// Shared back boundary of both ramp zones.
    pub ramp_z_back: f32,
}

impl Default for VerticalNav {
    fn default() -> Self {
        Self {
            eye_height: 1.7,
            floor_rise: 6.0,
            upper_threshold: 5.0,
            upper_back_boundary: -5.7,
            stair_half_width: 3.2,
            stair_z_front: 5.2,
            stair_ramp_start: 5.0,
            stair_ramp_depth: 10.5,
            escalator_center_x: 10.0,
            escalator_half_width: 1.4,
            escalator_z_front: 8.45,
            escalator_ramp_start: 8.25,
            escalator_ramp_depth: 13.75,
            ramp_z_back: -5.7,
        }
    }
}

impl VerticalNav {
    /// Target elevation for a candidate horizontal position.
    ///
    /// Zone precedence matches the reference layout: stairs, then
    /// escalators, then the upper-floor hold (which applies only when
    /// the player is already elevated), then standing eye height.
    pub fn target_elevation(&self, x: f32, z: f32, current_y: f32) -> f32 {
        if x.abs() < self.stair_half_width && z < self.stair_z_front && z > self.ramp_z_back {
            let t = ((self.stair_ramp_start - z) / self.stair_ramp_depth).clamp(0.0, 1.0);
            return self.eye_height + t * self.floor_rise;
        }
        if (x.abs() - self.escalator_center_x).abs() < self.escalator_half_width
            && z < self.escalator_z_front
            && z > self.ramp_z_back
        {
            let t = ((self.escalator_ramp_start - z) / self.escalator_ramp_depth).clamp(0.0, 1.0);
            return self.eye_height + t * self.floor_rise;
        }
        if z < self.upper_back_boundary && current_y > self.upper_threshold {
            return self.eye_height + self.floor_rise;
        }
        self.eye_height
    }
}

/// Tuning for the per-frame movement resolver. The buffer and smoothing
/// factors are deliberately configurable rather than hard-coded; the
/// defaults reproduce the reference behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Walking speed in distance units per second.
    pub walk_speed: f32,
    /// Footprints are expanded by this much on all sides for collision.
    pub collision_buffer: f32,
    /// Per-frame exponential smoothing factor for the vertical axis.
    pub vertical_smoothing: f32,
    pub nav: VerticalNav,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            walk_speed: 4.2,
            collision_buffer: 0.5,
            vertical_smoothing: 0.2,
            nav: VerticalNav::default(),
        }
    }
}

/// Per-frame movement and collision resolver.
///
/// Pure function of (position, intent, yaw, dt) against an immutable
/// environment: no randomness, no clocks, no hidden state. Rejection is
/// all-or-nothing on the horizontal plane; the vertical coordinate is
/// always reached by exponential smoothing, never snapped.
#[derive(Debug, Clone)]
pub struct MovementResolver {
    config: ResolverConfig,
}

impl MovementResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Horizontal movement direction for an intent, rotated into the
    /// camera frame and projected onto the ground plane. Unit length,
    /// or zero when the intent nets out to nothing.
    pub fn movement_direction(&self, intent: MoveIntent, yaw: f32) -> Vec3 {
        let raw = Vec3::new(
            (intent.right as i32 - intent.left as i32) as f32,
            0.0,
            (intent.back as i32 - intent.forward as i32) as f32,
        );
        let rotated = Quat::from_rotation_y(yaw) * raw.normalize_or_zero();
        Vec3::new(rotated.x, 0.0, rotated.z).normalize_or_zero()
    }

    /// Advance one frame. Returns the next position.
    pub fn step(
        &self,
        env: &Environment,
        position: Vec3,
        intent: MoveIntent,
        yaw: f32,
        dt: f32,
    ) -> Vec3 {
        let cfg = &self.config;
        let direction = self.movement_direction(intent, yaw);

        let mut candidate = position;
        if intent.any() {
            candidate += direction * (cfg.walk_speed * dt);
        }

        // Collision: first blocking hit rejects the whole horizontal
        // move. Ground-floor blockers are exempt while elevated.
        let elevated = position.y > cfg.nav.upper_threshold;
        let mut blocked = false;
        for obstacle in env.obstacles() {
            if elevated && !obstacle.is_climbable() {
                continue;
            }
            if obstacle
                .footprint()
                .contains(candidate.x, candidate.z, cfg.collision_buffer)
                && !obstacle.is_climbable()
            {
                tracing::trace!(x = candidate.x, z = candidate.z, "movement blocked");
                blocked = true;
                break;
            }
        }

        let mut next = position;
        if !blocked {
            let target_y = cfg
                .nav
                .target_elevation(candidate.x, candidate.z, position.y);
            next.x = candidate.x;
            next.z = candidate.z;
            next.y = position.y + (target_y - position.y) * cfg.vertical_smoothing;
        }

        let bounds = env.bounds();
        next.x = bounds.clamp_x(next.x);
        next.z = bounds.clamp_z(next.z);
        next
    }
}

impl Default for MovementResolver {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}

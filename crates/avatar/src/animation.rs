use serde::{Deserialize, Serialize};

/// Joint angles and body offset for one animation frame, in radians
/// and world units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AvatarPose {
    pub left_leg_swing: f32,
    pub right_leg_swing: f32,
    pub left_arm_swing: f32,
    pub right_arm_swing: f32,
    /// Vertical body offset from the stride bounce.
    pub bob: f32,
}

/// Procedural walk cycle driven by accumulated walk time.
///
/// The clock advances only while the participant moves, so a walker
/// that stops mid-stride resumes from the same phase. Idle frames
/// return the neutral pose.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkCycle {
    elapsed: f32,
}

impl WalkCycle {
    const LEG_FREQUENCY: f32 = 4.0;
    const LEG_AMPLITUDE: f32 = 0.3;
    const BOB_FREQUENCY: f32 = 8.0;
    const BOB_AMPLITUDE: f32 = 0.05;

    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the cycle and produce this frame's pose.
    pub fn advance(&mut self, dt: f32, is_moving: bool) -> AvatarPose {
        if !is_moving {
            return AvatarPose::default();
        }
        self.elapsed += dt;
        let swing = (self.elapsed * Self::LEG_FREQUENCY).sin() * Self::LEG_AMPLITUDE;
        AvatarPose {
            left_leg_swing: swing,
            right_leg_swing: -swing,
            // Arms counter the legs at half amplitude.
            left_arm_swing: -swing * 0.5,
            right_arm_swing: swing * 0.5,
            bob: (self.elapsed * Self::BOB_FREQUENCY).sin().abs() * Self::BOB_AMPLITUDE,
        }
    }
}

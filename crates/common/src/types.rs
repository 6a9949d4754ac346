use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a connected participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticipantId(pub Uuid);

impl ParticipantId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ParticipantId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Coarse facing direction, quantized from the movement vector angle.
///
/// The four values correspond to 90-degree sectors of `atan2(x, z)` in
/// the order down, right, up, left starting from the forward-aligned
/// sector. Serialized lowercase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacingDirection {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl FacingDirection {
    /// Wire string for this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Lenient parse: unknown strings map to `Down` rather than failing.
    pub fn parse(s: &str) -> Self {
        match s {
            "up" => Self::Up,
            "left" => Self::Left,
            "right" => Self::Right,
            _ => Self::Down,
        }
    }

    /// Avatar yaw (rotation about +Y) for this direction.
    pub fn yaw_radians(self) -> f32 {
        match self {
            Self::Up => std::f32::consts::PI,
            Self::Down => 0.0,
            Self::Left => std::f32::consts::FRAC_PI_2,
            Self::Right => -std::f32::consts::FRAC_PI_2,
        }
    }
}

/// Appearance profile: one of a fixed closed set of color palettes.
///
/// Unknown wire strings resolve to `Default` so a malformed appearance
/// never fails a join or a roster merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvatarVariant {
    #[default]
    Default,
    Sporty,
    Elegant,
    Casual,
    Professional,
    Vibrant,
}

impl AvatarVariant {
    pub const ALL: [AvatarVariant; 6] = [
        Self::Default,
        Self::Sporty,
        Self::Elegant,
        Self::Casual,
        Self::Professional,
        Self::Vibrant,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Sporty => "sporty",
            Self::Elegant => "elegant",
            Self::Casual => "casual",
            Self::Professional => "professional",
            Self::Vibrant => "vibrant",
        }
    }

    /// Lenient parse with fallback to `Default`.
    pub fn parse(s: &str) -> Self {
        match s {
            "sporty" => Self::Sporty,
            "elegant" => Self::Elegant,
            "casual" => Self::Casual,
            "professional" => Self::Professional,
            "vibrant" => Self::Vibrant,
            _ => Self::Default,
        }
    }
}

/// Four-way directional intent for one frame. Inputs are not mutually
/// exclusive; diagonal combinations are normalized by the resolver and
/// opposite pairs cancel there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoveIntent {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveIntent {
    pub const NONE: MoveIntent = MoveIntent {
        forward: false,
        back: false,
        left: false,
        right: false,
    };

    /// Whether any directional key is held this frame.
    pub fn any(self) -> bool {
        self.forward || self.back || self.left || self.right
    }
}

/// Last known kinematic state of a participant, local or remote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerKinematicState {
    /// World position; y is the vertical (floor) coordinate.
    pub position: Vec3,
    pub facing: FacingDirection,
    pub is_moving: bool,
    pub variant: AvatarVariant,
    pub username: String,
}

impl PlayerKinematicState {
    /// State for a participant that just joined at the given spot.
    pub fn at(position: Vec3, username: impl Into<String>) -> Self {
        Self {
            position,
            facing: FacingDirection::Down,
            is_moving: false,
            variant: AvatarVariant::Default,
            username: username.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn participant_id_uniqueness() {
        let a = ParticipantId::new();
        let b = ParticipantId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn facing_roundtrip() {
        for d in [
            FacingDirection::Up,
            FacingDirection::Down,
            FacingDirection::Left,
            FacingDirection::Right,
        ] {
            assert_eq!(FacingDirection::parse(d.as_str()), d);
        }
    }

    #[test]
    fn facing_unknown_defaults_down() {
        assert_eq!(FacingDirection::parse("sideways"), FacingDirection::Down);
        assert_eq!(FacingDirection::parse(""), FacingDirection::Down);
    }

    #[test]
    fn variant_unknown_defaults() {
        assert_eq!(AvatarVariant::parse("neon"), AvatarVariant::Default);
        assert_eq!(AvatarVariant::parse("sporty"), AvatarVariant::Sporty);
    }

    #[test]
    fn variant_roundtrip_all() {
        for v in AvatarVariant::ALL {
            assert_eq!(AvatarVariant::parse(v.as_str()), v);
        }
    }

    #[test]
    fn intent_any() {
        assert!(!MoveIntent::NONE.any());
        let i = MoveIntent {
            left: true,
            ..MoveIntent::NONE
        };
        assert!(i.any());
    }

    #[test]
    fn kinematic_state_at() {
        let s = PlayerKinematicState::at(Vec3::new(1.0, 1.7, 2.0), "ada");
        assert_eq!(s.facing, FacingDirection::Down);
        assert!(!s.is_moving);
        assert_eq!(s.username, "ada");
    }
}

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangular footprint on the horizontal plane.
///
/// `x`/`z` are the center, `w`/`d` the full width (along x) and depth
/// (along z).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub x: f32,
    pub z: f32,
    pub w: f32,
    pub d: f32,
}

impl Footprint {
    pub fn new(x: f32, z: f32, w: f32, d: f32) -> Self {
        assert!(w > 0.0 && d > 0.0, "footprint extents must be positive");
        Self { x, z, w, d }
    }

    /// Containment test against the footprint expanded by `buffer` on
    /// all four sides. Boundary-exclusive, matching the resolver's
    /// strict comparisons.
    pub fn contains(&self, x: f32, z: f32, buffer: f32) -> bool {
        x > self.x - self.w / 2.0 - buffer
            && x < self.x + self.w / 2.0 + buffer
            && z > self.z - self.d / 2.0 - buffer
            && z < self.z + self.d / 2.0 + buffer
    }
}

/// Collision policy as a sum type rather than a boolean flag: a
/// blocking footprint rejects horizontal movement, a climbable one
/// permits occupancy and defers elevation to the vertical-nav logic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Obstacle {
    Blocking(Footprint),
    Climbable(Footprint),
}

impl Obstacle {
    pub fn blocking(x: f32, z: f32, w: f32, d: f32) -> Self {
        Self::Blocking(Footprint::new(x, z, w, d))
    }

    pub fn climbable(x: f32, z: f32, w: f32, d: f32) -> Self {
        Self::Climbable(Footprint::new(x, z, w, d))
    }

    pub fn footprint(&self) -> &Footprint {
        match self {
            Self::Blocking(f) | Self::Climbable(f) => f,
        }
    }

    pub fn is_climbable(&self) -> bool {
        matches!(self, Self::Climbable(_))
    }
}

use crate::obstacle::Obstacle;
use serde::{Deserialize, Serialize};

/// Rectangular world boundary; the final position of every frame is
/// clamped into it regardless of collision outcome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            min_x: -28.5,
            max_x: 28.5,
            min_z: -38.5,
            max_z: 38.5,
        }
    }
}

impl WorldBounds {
    pub fn clamp_x(&self, x: f32) -> f32 {
        x.clamp(self.min_x, self.max_x)
    }

    pub fn clamp_z(&self, z: f32) -> f32 {
        z.clamp(self.min_z, self.max_z)
    }
}

/// A store environment: immutable obstacle set plus world bounds.
/// Injected into the resolver at construction; never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Environment {
    obstacles: Vec<Obstacle>,
    bounds: WorldBounds,
}

impl Environment {
    pub fn new(obstacles: Vec<Obstacle>, bounds: WorldBounds) -> Self {
        Self { obstacles, bounds }
    }

    /// Empty floor with default bounds, useful for open-field tests.
    pub fn open(bounds: WorldBounds) -> Self {
        Self {
            obstacles: Vec::new(),
            bounds,
        }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    /// Flagship store floor: central stairs flanked by two escalators,
    /// display tables, racks, fitting rooms, and the billing counter.
    pub fn flagship() -> Self {
        let obstacles = vec![
            Obstacle::blocking(0.0, 15.0, 6.5, 4.5), // central table
            Obstacle::climbable(-10.0, 1.37, 2.5, 13.75), // escalator left
            Obstacle::climbable(10.0, 1.37, 2.5, 13.75), // escalator right
            Obstacle::climbable(0.0, -0.25, 6.5, 10.5), // central stairs
            Obstacle::blocking(-15.0, 25.0, 2.0, 4.0), // sofa left
            Obstacle::blocking(15.0, 25.0, 2.0, 4.0),  // sofa right
            Obstacle::blocking(26.8, 11.1, 2.2, 2.2),  // fitting room 1
            Obstacle::blocking(26.8, 8.9, 2.2, 2.2),   // fitting room 2
            Obstacle::blocking(26.8, 4.5, 2.2, 2.2),   // fitting room 4
            Obstacle::blocking(-27.0, 25.0, 1.5, 8.0), // billing counter
            Obstacle::blocking(-20.0, -38.0, 8.0, 2.0), // window display left
            Obstacle::blocking(20.0, -38.0, 8.0, 2.0), // window display right
            Obstacle::blocking(-15.0, 15.0, 2.5, 1.5), // clothes table 1
            Obstacle::blocking(15.0, 15.0, 2.5, 1.5),  // clothes table 2
            Obstacle::blocking(-15.0, 5.0, 2.5, 0.5),  // hanging rack 1
            Obstacle::blocking(15.0, 5.0, 2.5, 0.5),   // hanging rack 2
            Obstacle::blocking(0.0, -15.0, 1.6, 1.6),  // circular rack
            Obstacle::blocking(-25.0, 5.0, 2.0, 0.5),  // accessory rack 1
            Obstacle::blocking(25.0, 5.0, 2.0, 0.5),   // accessory rack 2
        ];
        Self::new(obstacles, WorldBounds::default())
    }

    /// Boutique floor: same vertical core, smaller fixture set.
    pub fn boutique() -> Self {
        let obstacles = vec![
            Obstacle::blocking(0.0, 15.0, 6.5, 4.5),
            Obstacle::climbable(-10.0, 1.37, 2.5, 13.75),
            Obstacle::climbable(10.0, 1.37, 2.5, 13.75),
            Obstacle::climbable(0.0, -0.25, 6.4, 10.5),
            Obstacle::blocking(-29.5, 25.0, 1.0, 5.0),
            Obstacle::blocking(22.0, 0.0, 4.5, 4.5),
            Obstacle::blocking(-15.0, 25.0, 2.0, 1.5),
            Obstacle::blocking(15.0, 25.0, 2.0, 1.5),
            Obstacle::blocking(27.9, 10.0, 2.0, 9.0),
            Obstacle::blocking(-15.0, 15.0, 2.6, 1.6),
            Obstacle::blocking(15.0, 15.0, 2.6, 1.6),
            Obstacle::blocking(-15.0, 5.0, 2.5, 0.5),
            Obstacle::blocking(15.0, 5.0, 2.5, 0.5),
            Obstacle::blocking(0.0, -15.0, 1.6, 1.6),
            Obstacle::blocking(-25.0, 5.0, 2.0, 0.5),
            Obstacle::blocking(25.0, 5.0, 2.0, 0.5),
        ];
        Self::new(obstacles, WorldBounds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_clamp() {
        let b = WorldBounds::default();
        assert_eq!(b.clamp_x(-100.0), -28.5);
        assert_eq!(b.clamp_x(100.0), 28.5);
        assert_eq!(b.clamp_z(-100.0), -38.5);
        assert_eq!(b.clamp_z(0.0), 0.0);
    }

    #[test]
    fn flagship_has_three_climbables() {
        let env = Environment::flagship();
        let climbable = env.obstacles().iter().filter(|o| o.is_climbable()).count();
        assert_eq!(climbable, 3);
    }

    #[test]
    fn boutique_shares_vertical_core() {
        let env = Environment::boutique();
        let climbable: Vec<_> = env
            .obstacles()
            .iter()
            .filter(|o| o.is_climbable())
            .collect();
        assert_eq!(climbable.len(), 3);
        // Escalators sit at x = +/-10 in both layouts.
        assert!(climbable.iter().any(|o| o.footprint().x == -10.0));
        assert!(climbable.iter().any(|o| o.footprint().x == 10.0));
    }
}

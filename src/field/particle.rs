use bevy::prelude::*;
use rand::{Rng, RngExt};

use crate::config::{RADIUS_MIN, RADIUS_SPAN, VELOCITY_SPREAD};

/// One drifting dot. Plain value data; the field owns the whole collection
/// and rebuilds it wholesale on resize, so particles carry no identity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Surface-space position (origin top-left, +y down, px).
    pub position: Vec2,
    /// Drift per frame, px.
    pub velocity: Vec2,
    /// Disc radius, fixed at creation, uniform in [1, 3).
    pub radius: f32,
}

impl Particle {
    /// Roll a fresh particle somewhere on an `extent`-sized surface.
    pub fn random(rng: &mut impl Rng, extent: Vec2) -> Self {
        Self {
            position: Vec2::new(
                rng.random::<f32>() * extent.x,
                rng.random::<f32>() * extent.y,
            ),
            velocity: Vec2::new(
                (rng.random::<f32>() - 0.5) * VELOCITY_SPREAD,
                (rng.random::<f32>() - 0.5) * VELOCITY_SPREAD,
            ),
            radius: rng.random::<f32>() * RADIUS_SPAN + RADIUS_MIN,
        }
    }

    /// Advance one frame, then reflect off the surface edges per axis.
    /// The check runs on the already-moved position and does not clamp, so
    /// a dot can sit slightly past an edge for one frame before the flipped
    /// velocity pulls it back.
    pub fn step(&mut self, extent: Vec2) {
        self.position += self.velocity;
        if self.position.x < 0.0 || self.position.x > extent.x {
            self.velocity.x = -self.velocity.x;
        }
        if self.position.y < 0.0 || self.position.y > extent.y {
            self.velocity.y = -self.velocity.y;
        }
    }
}

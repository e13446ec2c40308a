use bevy::prelude::*;
use rand::Rng;
use tracing::debug;

use super::particle::Particle;
use crate::config::{CONNECTION_DISTANCE, LINE_ALPHA_MAX, PARTICLE_COUNT};

/// A straight segment between two close particles, with its faded alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
    pub a: Vec2,
    pub b: Vec2,
    pub alpha: f32,
}

/// The particle collection plus the surface it drifts over.
///
/// One instance per app, held as a resource with explicit construction;
/// all mutation goes through these methods. Positions live in surface
/// space (origin top-left, +y down), the coordinate system the renderer
/// converts from when it paints.
#[derive(Resource, Clone, Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    extent: Vec2,
}

impl ParticleField {
    /// An empty field over a `width` x `height` surface. Call [`Self::init`]
    /// to populate it.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            particles: Vec::new(),
            extent: Vec2::new(width, height),
        }
    }

    pub fn extent(&self) -> Vec2 {
        self.extent
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Adopt new surface dimensions. Leaves the particle collection alone;
    /// the resize handler pairs this with [`Self::init`].
    pub fn resize(&mut self, width: f32, height: f32) {
        self.extent = Vec2::new(width, height);
    }

    /// Throw away the current population and roll [`PARTICLE_COUNT`] fresh
    /// particles across the surface. Full reset, never a top-up.
    pub fn init(&mut self, rng: &mut impl Rng) {
        self.particles.clear();
        self.particles
            .extend((0..PARTICLE_COUNT).map(|_| Particle::random(rng, self.extent)));
        debug!(
            width = self.extent.x,
            height = self.extent.y,
            count = self.particles.len(),
            "particle field initialized"
        );
    }

    /// One simulation frame: every particle drifts and reflects.
    pub fn update(&mut self) {
        for p in &mut self.particles {
            p.step(self.extent);
        }
    }

    /// Full pairwise scan, every unordered pair (i < j) exactly once.
    /// O(N^2) on purpose: N is 100, a spatial index would cost more than
    /// the 4950 distance checks it saves.
    pub fn connections(&self) -> Vec<Connection> {
        let mut links = Vec::new();
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                let distance = a.position.distance(b.position);
                if let Some(alpha) = link_alpha(distance) {
                    links.push(Connection {
                        a: a.position,
                        b: b.position,
                        alpha,
                    });
                }
            }
        }
        links
    }
}

/// Alpha for a pair `distance` px apart: [`LINE_ALPHA_MAX`] at 0, fading
/// linearly to nothing at [`CONNECTION_DISTANCE`]. `None` at or past the
/// threshold (the line at exactly 150 px would be fully transparent anyway).
pub fn link_alpha(distance: f32) -> Option<f32> {
    (distance < CONNECTION_DISTANCE)
        .then(|| (1.0 - distance / CONNECTION_DISTANCE) * LINE_ALPHA_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn seeded_field(width: f32, height: f32, seed: u64) -> ParticleField {
        let mut field = ParticleField::new(width, height);
        field.init(&mut StdRng::seed_from_u64(seed));
        field
    }

    #[test]
    fn init_populates_exactly_the_fixed_count_inside_bounds() {
        let field = seeded_field(800.0, 600.0, 42);
        assert_eq!(field.particles().len(), PARTICLE_COUNT);
        for p in field.particles() {
            assert!(p.position.x >= 0.0 && p.position.x < 800.0);
            assert!(p.position.y >= 0.0 && p.position.y < 600.0);
            assert!(p.velocity.x >= -0.25 && p.velocity.x <= 0.25);
            assert!(p.velocity.y >= -0.25 && p.velocity.y <= 0.25);
            assert!(p.radius >= 1.0 && p.radius < 3.0);
        }
    }

    #[test]
    fn init_is_a_full_reset() {
        let mut field = seeded_field(800.0, 600.0, 1);
        let before = field.particles().to_vec();
        field.init(&mut StdRng::seed_from_u64(2));
        assert_eq!(field.particles().len(), PARTICLE_COUNT);
        assert_ne!(field.particles(), &before[..]);
    }

    #[test]
    fn resize_with_unchanged_dimensions_is_a_noop() {
        let mut field = seeded_field(800.0, 600.0, 7);
        let before = field.particles().to_vec();
        field.resize(800.0, 600.0);
        assert_eq!(field.extent(), Vec2::new(800.0, 600.0));
        assert_eq!(field.particles(), &before[..]);
    }

    #[test]
    fn resize_alone_never_touches_the_particles() {
        let mut field = seeded_field(800.0, 600.0, 7);
        let before = field.particles().to_vec();
        field.resize(1024.0, 768.0);
        assert_eq!(field.extent(), Vec2::new(1024.0, 768.0));
        // Re-initialization is a separate, coupled call made by the handler.
        assert_eq!(field.particles(), &before[..]);
    }

    #[test]
    fn update_reflects_against_the_current_extent() {
        let mut field = ParticleField {
            particles: vec![Particle {
                position: Vec2::new(99.0, 50.0),
                velocity: Vec2::new(6.0, 0.0),
                radius: 1.0,
            }],
            extent: Vec2::new(100.0, 100.0),
        };
        field.update();
        let p = field.particles()[0];
        assert_eq!(p.position.x, 105.0);
        assert_eq!(p.velocity.x, -6.0);
    }

    #[test]
    fn connections_visit_each_unordered_pair_once() {
        // Four coincident particles: every pair links, so the scan count is
        // exactly n * (n - 1) / 2 with no self pairs and no duplicates.
        let at = |x: f32| Particle {
            position: Vec2::new(x, 10.0),
            velocity: Vec2::ZERO,
            radius: 1.0,
        };
        let field = ParticleField {
            particles: vec![at(10.0), at(20.0), at(30.0), at(40.0)],
            extent: Vec2::new(800.0, 600.0),
        };
        let links = field.connections();
        assert_eq!(links.len(), 6);
        let mut endpoints: Vec<(u32, u32)> = links
            .iter()
            .map(|l| (l.a.x as u32, l.b.x as u32))
            .collect();
        endpoints.sort_unstable();
        endpoints.dedup();
        assert_eq!(endpoints.len(), 6);
        assert!(endpoints.iter().all(|(a, b)| a != b));
    }

    #[test]
    fn connections_skip_pairs_at_or_past_the_threshold() {
        let at = |x: f32, y: f32| Particle {
            position: Vec2::new(x, y),
            velocity: Vec2::ZERO,
            radius: 1.0,
        };
        let field = ParticleField {
            // 0 <-> 150 sits exactly on the threshold: no line.
            // 150 <-> 260 is 110 apart: one line.
            particles: vec![at(0.0, 0.0), at(150.0, 0.0), at(260.0, 0.0)],
            extent: Vec2::new(800.0, 600.0),
        };
        let links = field.connections();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].a, Vec2::new(150.0, 0.0));
        assert_eq!(links[0].b, Vec2::new(260.0, 0.0));
    }

    #[test]
    fn link_alpha_fades_linearly_between_the_endpoints() {
        assert_eq!(link_alpha(0.0), Some(0.3));
        assert_eq!(link_alpha(150.0), None);
        assert_eq!(link_alpha(200.0), None);
        let mid = link_alpha(75.0).unwrap();
        assert!((mid - 0.15).abs() < 1e-6);
    }
}

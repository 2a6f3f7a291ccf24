//! Logo particles
//!
//! Particles seeded along the anchor polylines of the "SA" monogram. Each
//! particle drifts slowly and is snapped back next to the nearest anchor of
//! its own path once it strays too far.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::particles::Particle;
use crate::consts::REFERENCE_FPS;

/// Anchor points per path, in units of the logo size
pub const LOGO_PATHS: [&[(f32, f32)]; 4] = [
    // S
    &[
        (0.25, 0.3),
        (0.35, 0.25),
        (0.45, 0.25),
        (0.45, 0.4),
        (0.45, 0.55),
        (0.25, 0.5),
        (0.25, 0.65),
        (0.25, 0.8),
        (0.35, 0.75),
        (0.45, 0.75),
    ],
    // A, left stroke
    &[(0.55, 0.75), (0.625, 0.5), (0.7, 0.25)],
    // A, right stroke
    &[(0.7, 0.25), (0.775, 0.5), (0.85, 0.75)],
    // A, crossbar
    &[(0.6, 0.55), (0.7, 0.55), (0.8, 0.55)],
];

/// Particles seeded per anchor segment
pub const PARTICLES_PER_SEGMENT: usize = 10;
/// Stray distance, as a fraction of the logo size
pub const RESET_DISTANCE: f32 = 0.035;

const SEED_SPEED: f32 = 0.25;
const RESET_SPEED: f32 = 0.15;
const RESET_JITTER: f32 = 2.0;

/// Logo scene state
#[derive(Debug, Clone)]
pub struct LogoState {
    size: f32,
    anchors: Vec<Vec<Vec2>>,
    pub particles: Vec<Particle>,
    rng: Pcg32,
}

fn symmetric(rng: &mut Pcg32, span: f32) -> f32 {
    (rng.random::<f32>() - 0.5) * span
}

impl LogoState {
    pub fn new(size: f32, mut rng: Pcg32) -> Self {
        let anchors: Vec<Vec<Vec2>> = LOGO_PATHS
            .iter()
            .map(|path| path.iter().map(|&(x, y)| Vec2::new(x, y) * size).collect())
            .collect();

        let mut particles = Vec::new();
        for (index, path) in anchors.iter().enumerate() {
            for pair in path.windows(2) {
                for pos in crate::renderer::shapes::segment_points(pair[0], pair[1], PARTICLES_PER_SEGMENT) {
                    let drift = Vec2::new(symmetric(&mut rng, SEED_SPEED), symmetric(&mut rng, SEED_SPEED));
                    particles.push(Particle {
                        pos,
                        vel: drift,
                        drift,
                        size: rng.random::<f32>() * 1.8 + 0.8,
                        opacity: 0.7 + rng.random::<f32>() * 0.3,
                        path: Some(index),
                    });
                }
            }
        }

        Self {
            size,
            anchors,
            particles,
            rng,
        }
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    /// Distance beyond which a particle is reset
    pub fn reset_threshold(&self) -> f32 {
        self.size * RESET_DISTANCE
    }

    /// Nearest anchor of `path` to `pos`, with its distance
    pub fn nearest_anchor(&self, path: usize, pos: Vec2) -> Option<(Vec2, f32)> {
        self.anchors
            .get(path)?
            .iter()
            .map(|a| (*a, a.distance(pos)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Advance by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        let frames = dt * REFERENCE_FPS;
        if frames <= 0.0 {
            return;
        }
        let threshold = self.reset_threshold();

        for i in 0..self.particles.len() {
            let p = &mut self.particles[i];
            p.pos += p.vel * frames;

            let Some(path) = p.path else { continue };
            let pos = p.pos;
            let Some((anchor, distance)) = self.nearest_anchor(path, pos) else {
                continue;
            };
            if distance > threshold {
                let jitter = Vec2::new(
                    symmetric(&mut self.rng, RESET_JITTER),
                    symmetric(&mut self.rng, RESET_JITTER),
                );
                let speed = Vec2::new(
                    symmetric(&mut self.rng, RESET_SPEED),
                    symmetric(&mut self.rng, RESET_SPEED),
                );
                let p = &mut self.particles[i];
                p.pos = anchor + jitter;
                p.vel = speed;
                p.drift = speed;
            }
        }
    }
}

//! Particle fields
//!
//! Free particles drift, react to the cursor, relax back to their drift
//! velocity and wrap at the canvas bounds. Velocities are expressed in pixels
//! per reference frame (1/60 s) and scaled by the actual step length.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{CURSOR_RADIUS, PARTICLE_DAMPING, REFERENCE_FPS};
use crate::{Size, wrap_coordinate};

/// A particle
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    /// Current velocity (px per reference frame)
    pub vel: Vec2,
    /// Velocity the particle relaxes back to
    pub drift: Vec2,
    pub size: f32,
    pub opacity: f32,
    /// Path the particle is bound to (logo), `None` for free particles
    pub path: Option<usize>,
}

impl Particle {
    pub fn free(pos: Vec2, drift: Vec2, size: f32, opacity: f32) -> Self {
        Self {
            pos,
            vel: drift,
            drift,
            size,
            opacity,
            path: None,
        }
    }
}

/// How the cursor acts on a field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CursorForce {
    None,
    /// Whole-field drift away from the center toward the cursor.
    ///
    /// The offset is `cursor - center`, divided by the canvas size when
    /// `normalized`, times `gain`, in px per reference frame.
    Parallax { gain: f32, normalized: bool },
    /// Pull toward the cursor inside `radius`, linear falloff
    Attract { radius: f32, strength: f32 },
    /// Push away from the cursor inside `radius`, linear falloff
    Repel { radius: f32, strength: f32 },
}

impl Default for CursorForce {
    fn default() -> Self {
        CursorForce::Repel {
            radius: CURSOR_RADIUS,
            strength: 0.5,
        }
    }
}

impl CursorForce {
    /// Shared displacement per reference frame (parallax only)
    fn parallax(&self, cursor: Option<Vec2>, bounds: Vec2) -> Vec2 {
        match (*self, cursor) {
            (CursorForce::Parallax { gain, normalized }, Some(cursor)) => {
                let offset = cursor - bounds / 2.0;
                if normalized {
                    if bounds.x <= 0.0 || bounds.y <= 0.0 {
                        return Vec2::ZERO;
                    }
                    offset / bounds * gain
                } else {
                    offset * gain
                }
            }
            _ => Vec2::ZERO,
        }
    }

    /// Velocity change per reference frame for a particle at `pos`
    fn impulse(&self, pos: Vec2, cursor: Option<Vec2>) -> Vec2 {
        let Some(cursor) = cursor else {
            return Vec2::ZERO;
        };
        let (radius, strength, sign) = match *self {
            CursorForce::Attract { radius, strength } => (radius, strength, 1.0),
            CursorForce::Repel { radius, strength } => (radius, strength, -1.0),
            _ => return Vec2::ZERO,
        };
        let to_cursor = cursor - pos;
        let distance = to_cursor.length();
        if distance >= radius || distance <= f32::EPSILON {
            return Vec2::ZERO;
        }
        let falloff = 1.0 - distance / radius;
        to_cursor / distance * strength * falloff * sign
    }
}

/// Random ranges for scattering a field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnRanges {
    /// Radius range (px)
    pub size: (f32, f32),
    /// Per-axis drift speed is drawn from `[-speed, speed]`
    pub speed: f32,
    pub opacity: (f32, f32),
}

impl Default for SpawnRanges {
    fn default() -> Self {
        Self {
            size: (1.0, 6.0),
            speed: 1.0,
            opacity: (0.1, 0.6),
        }
    }
}

fn range<R: Rng>(rng: &mut R, (lo, hi): (f32, f32)) -> f32 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}

/// Pair of particles closer than the link distance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    /// `1 - d / max_distance`, in (0, 1]
    pub strength: f32,
}

/// A set of free particles in a bounded box
#[derive(Debug, Clone)]
pub struct ParticleField {
    pub particles: Vec<Particle>,
    bounds: Vec2,
    force: CursorForce,
    damping: f32,
}

impl ParticleField {
    /// Scatter `count` particles uniformly over `bounds`
    pub fn scatter<R: Rng>(
        count: usize,
        bounds: Size,
        spawn: &SpawnRanges,
        force: CursorForce,
        rng: &mut R,
    ) -> Self {
        let extent = bounds.as_vec2();
        let particles = (0..count)
            .map(|_| {
                let pos = Vec2::new(rng.random::<f32>() * extent.x, rng.random::<f32>() * extent.y);
                let drift = Vec2::new(
                    range(rng, (-spawn.speed, spawn.speed)),
                    range(rng, (-spawn.speed, spawn.speed)),
                );
                Particle::free(
                    Vec2::new(wrap_coordinate(pos.x, extent.x), wrap_coordinate(pos.y, extent.y)),
                    drift,
                    range(rng, spawn.size),
                    range(rng, spawn.opacity),
                )
            })
            .collect();
        Self {
            particles,
            bounds: extent,
            force,
            damping: PARTICLE_DAMPING,
        }
    }

    pub fn set_force(&mut self, force: CursorForce) {
        self.force = force;
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    /// New canvas size; particles outside are wrapped back in
    pub fn resize(&mut self, size: Size) {
        self.bounds = size.as_vec2();
        for p in &mut self.particles {
            p.pos.x = wrap_coordinate(p.pos.x, self.bounds.x);
            p.pos.y = wrap_coordinate(p.pos.y, self.bounds.y);
        }
    }

    /// Advance by `dt` seconds
    pub fn step(&mut self, cursor: Option<Vec2>, dt: f32) {
        let frames = dt * REFERENCE_FPS;
        if frames <= 0.0 {
            return;
        }
        let parallax = self.force.parallax(cursor, self.bounds);
        let decay = self.damping.powf(frames);

        for p in &mut self.particles {
            p.vel += self.force.impulse(p.pos, cursor) * frames;
            p.vel = p.drift + (p.vel - p.drift) * decay;

            let next = p.pos + (p.vel + parallax) * frames;
            p.pos.x = wrap_coordinate(next.x, self.bounds.x);
            p.pos.y = wrap_coordinate(next.y, self.bounds.y);
        }
    }

    /// Pairs closer than `max_distance`, each pair once
    pub fn links(&self, max_distance: f32) -> Vec<Link> {
        let mut links = Vec::new();
        if max_distance <= 0.0 {
            return links;
        }
        for (i, a) in self.particles.iter().enumerate() {
            for (j, b) in self.particles.iter().enumerate().skip(i + 1) {
                let d = a.pos.distance(b.pos);
                if d < max_distance {
                    links.push(Link {
                        a: i,
                        b: j,
                        strength: 1.0 - d / max_distance,
                    });
                }
            }
        }
        links
    }
}

//! Scene state module
//!
//! Owned, per-scene state and its update rules. Nothing here touches the
//! canvas or the host:
//! - Fixed update step only
//! - Seeded RNG only
//! - Velocities in pixels per reference frame

pub mod functions;
pub mod logo;
pub mod particles;
pub mod plot;
pub mod surface;

pub use functions::{CATALOG, FunctionDescriptor, FunctionKind};
pub use logo::LogoState;
pub use particles::{CursorForce, Link, Particle, ParticleField, SpawnRanges};
pub use plot::{Marker, PlotGeometry, PlotState};
pub use surface::{Camera, Projector, SurfaceState};

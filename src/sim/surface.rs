//! 3D activation surface
//!
//! A height field `y = f(x)` over a square grid, turned about the Y axis, with
//! an animated probe point on the `z = 0` slice. A perspective camera projects
//! world points to canvas pixels.

use glam::{Mat4, Vec2, Vec3};

use super::functions::{FunctionDescriptor, FunctionKind};
use crate::Size;
use crate::consts::REFERENCE_FPS;

/// Surface grid extent along x and z
pub const SURFACE_RANGE: f32 = 5.0;
/// Vertices per grid side (50 segments)
pub const SURFACE_RESOLUTION: usize = 51;
/// Ground grid: full width and divisions
pub const GROUND_SIZE: f32 = 10.0;
pub const GROUND_DIVISIONS: usize = 20;
/// Axis helper length and label offset
pub const AXIS_LENGTH: f32 = 5.0;
pub const AXIS_LABEL_AT: f32 = 5.3;
/// Probe sweep amplitude (domain units)
pub const PROBE_AMPLITUDE: f32 = 3.0;

/// Yaw per reference frame at rotation speed 1
const YAW_PER_FRAME: f32 = 0.002;
/// Animation speed that runs the probe clock at 1 rad/s
const NOMINAL_ANIMATION_SPEED: f32 = 50.0;

/// Perspective camera looking at the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub fov_y_deg: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 3.0, 7.0),
            target: Vec3::ZERO,
            fov_y_deg: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Camera {
    /// View-projection matrix for a canvas of `size`
    pub fn view_proj(&self, size: Size) -> Mat4 {
        let aspect = if size.height == 0 {
            1.0
        } else {
            size.width as f32 / size.height as f32
        };
        let proj = Mat4::perspective_rh(self.fov_y_deg.to_radians(), aspect.max(1e-3), self.near, self.far);
        let view = Mat4::look_at_rh(self.eye, self.target, Vec3::Y);
        proj * view
    }
}

/// World to canvas projection for one canvas size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    view_proj: Mat4,
    size: Vec2,
}

impl Projector {
    pub fn new(camera: &Camera, size: Size) -> Self {
        Self {
            view_proj: camera.view_proj(size),
            size: size.as_vec2(),
        }
    }

    /// Canvas pixel for a world point, `None` behind the camera
    pub fn project(&self, world: Vec3) -> Option<Vec2> {
        let clip = self.view_proj * world.extend(1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.size.x,
            (1.0 - ndc.y) * 0.5 * self.size.y,
        ))
    }
}

/// Surface scene state
#[derive(Debug, Clone)]
pub struct SurfaceState {
    kinds: Vec<FunctionKind>,
    camera: Camera,
    projector: Projector,
    /// Surface yaw (radians)
    pub yaw: f32,
    /// Probe clock (radians of the sine sweep)
    pub clock: f32,
    /// Probe x of the last update
    pub probe_x: f32,
}

impl SurfaceState {
    pub fn new(kinds: Vec<FunctionKind>, size: Size) -> Self {
        let camera = Camera::default();
        Self {
            kinds,
            projector: Projector::new(&camera, size),
            camera,
            yaw: 0.0,
            clock: 0.0,
            probe_x: 0.0,
        }
    }

    pub fn kinds(&self) -> &[FunctionKind] {
        &self.kinds
    }

    pub fn descriptor(&self, selected: usize) -> &'static FunctionDescriptor {
        if self.kinds.is_empty() {
            return FunctionKind::Relu.descriptor();
        }
        self.kinds[selected % self.kinds.len()].descriptor()
    }

    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    /// Reproject for a new canvas size (aspect follows the container)
    pub fn resize(&mut self, size: Size) {
        self.projector = Projector::new(&self.camera, size);
    }

    /// Advance rotation and the probe.
    ///
    /// While paused the probe sits at `manual_x` and the clock holds.
    pub fn step(&mut self, dt: f32, rotation_speed: f32, animation_speed: f32, playing: bool, manual_x: f32) {
        let frames = dt * REFERENCE_FPS;
        self.yaw = (self.yaw + YAW_PER_FRAME * rotation_speed.max(0.0) * frames) % std::f32::consts::TAU;

        if playing {
            self.clock += dt * animation_speed / NOMINAL_ANIMATION_SPEED;
            self.probe_x = PROBE_AMPLITUDE * self.clock.sin();
        } else {
            self.probe_x = manual_x;
        }
    }

    /// Probe point `(x, f(x), 0)` for the selected descriptor
    pub fn probe(&self, selected: usize) -> Vec3 {
        let x = self.probe_x;
        Vec3::new(x, (self.descriptor(selected).eval)(x), 0.0)
    }

    /// Surface grid in world space: rows of constant z, then columns of
    /// constant x, each row already turned by the current yaw
    pub fn surface_lines(&self, selected: usize) -> Vec<Vec<Vec3>> {
        let f = self.descriptor(selected).eval;
        let rotation = Mat4::from_rotation_y(self.yaw);
        let n = SURFACE_RESOLUTION;
        let coord = |i: usize| -SURFACE_RANGE + 2.0 * SURFACE_RANGE * i as f32 / (n - 1) as f32;
        let vertex = |x: f32, z: f32| rotation.transform_point3(Vec3::new(x, f(x), z));

        let mut lines = Vec::with_capacity(2 * n);
        for row in 0..n {
            let z = coord(row);
            lines.push((0..n).map(|i| vertex(coord(i), z)).collect());
        }
        for col in 0..n {
            let x = coord(col);
            lines.push((0..n).map(|i| vertex(x, coord(i))).collect());
        }
        lines
    }

    /// Ground grid segments on `y = 0`
    pub fn ground_lines() -> Vec<(Vec3, Vec3)> {
        let half = GROUND_SIZE / 2.0;
        (0..=GROUND_DIVISIONS)
            .flat_map(|i| {
                let t = -half + GROUND_SIZE * i as f32 / GROUND_DIVISIONS as f32;
                [
                    (Vec3::new(t, 0.0, -half), Vec3::new(t, 0.0, half)),
                    (Vec3::new(-half, 0.0, t), Vec3::new(half, 0.0, t)),
                ]
            })
            .collect()
    }
}

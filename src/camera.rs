//! Perspective camera used to build picking rays.

use crate::float::Float;
use crate::input::WindowSize;
use crate::vec::{Ray, Vec2, Vec3};

/// Default vertical field of view, in degrees.
pub const DEFAULT_FOV_DEGREES: f32 = 45.0;

/// Camera looking down -z at the window plane.
///
/// The eye sits over the window centre at the distance where the z = 0
/// plane maps 1:1 onto window pixels, so a ray through a pixel meets the
/// plane at that same pixel.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera<F: Float> {
    size: WindowSize,
    fov_y: F,
    eye: Vec3<F>,
}

impl<F: Float> Camera<F> {
    pub fn new(size: WindowSize) -> Self {
        Self::with_fov(size, F::from_f32(DEFAULT_FOV_DEGREES).to_radians())
    }

    pub fn with_fov(size: WindowSize, fov_y: F) -> Self {
        let mut camera = Camera { size, fov_y, eye: Vec3::zero() };
        camera.place_eye();
        camera
    }

    pub fn set_viewport(&mut self, size: WindowSize) {
        self.size = size;
        self.place_eye();
    }

    pub fn viewport(&self) -> WindowSize { self.size }
    pub fn eye(&self) -> Vec3<F> { self.eye }

    fn place_eye(&mut self) {
        let half_w = F::from_f32(self.size.width as f32) * F::half();
        let half_h = F::from_f32(self.size.height as f32) * F::half();
        let distance = half_h / (self.fov_y * F::half()).tan();
        self.eye = Vec3::new(half_w, half_h, distance);
    }

    /// Ray from the eye through a window pixel.
    pub fn picking_ray(&self, screen: Vec2<F>) -> Ray<F> {
        let target = screen.extend(F::zero());
        Ray::new(self.eye, target - self.eye)
    }
}

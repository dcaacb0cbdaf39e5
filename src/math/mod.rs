mod random;
mod sample;
mod vec;

pub use random::random_on_unit_sphere;
pub use sample::{RandomSampler, Sample1D, Sample2D, Sample3D, Sampler};
pub use std::f32::consts::PI;
pub use std::f32::INFINITY;
pub use vec::Vec3;

pub fn lerp(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a * (1.0 - t) + b * t
}

#[derive(Copy, Clone, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub const fn new(origin: Vec3, direction: Vec3) -> Self {
        Ray { origin, direction }
    }

    pub fn point_at_parameter(self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

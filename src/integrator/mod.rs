mod pt;

pub use pt::PathTracingIntegrator;

use crate::math::{Ray, Sampler, Vec3};

pub trait SamplerIntegrator: Sync + Send {
    /// Estimate of the radiance arriving at the camera along `camera_ray`.
    fn color(&self, sampler: &mut dyn Sampler, camera_ray: Ray) -> Vec3;
}

use crate::math::{Ray, Sampler, Vec3};

/// Pinhole camera looking down +z with pixel (0, 0) at the top left of the
/// image. The sensor is centered on the optical axis and scaled by the
/// longer image side, so portrait and landscape framings share a pixel
/// pitch.
pub struct PinholeCamera {
    origin: Vec3,
    width: usize,
    height: usize,
    fov: f32,
    sample_variation: f32,
    sensor_side: f32,
}

impl PinholeCamera {
    pub fn new(
        origin: Vec3,
        width: usize,
        height: usize,
        fov: f32,
        sample_variation: f32,
    ) -> PinholeCamera {
        PinholeCamera {
            origin,
            width,
            height,
            fov,
            sample_variation,
            sensor_side: width.max(height) as f32,
        }
    }

    /// Ray through pixel (px, py), jittered per sample by up to
    /// `sample_variation` in each sensor axis.
    pub fn get_ray(&self, sampler: &mut dyn Sampler, px: usize, py: usize) -> Ray {
        let jitter = sampler.draw_2d();
        let x = px as f32 - self.width as f32 / 2.0;
        let y = self.height as f32 / 2.0 - 1.0 - py as f32;
        let direction = Vec3::new(
            x / self.sensor_side + (jitter.x * 2.0 - 1.0) * self.sample_variation,
            y / self.sensor_side + (jitter.y * 2.0 - 1.0) * self.sample_variation,
            1.0 / self.fov,
        )
        .normalized();
        Ray::new(self.origin, direction)
    }
}

use anyhow::{bail, Result};

use crate::material::MaterialId;
use crate::math::{Ray, Vec3};

pub struct Sphere {
    center: Vec3,
    radius: f32,
    material_id: MaterialId,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32, material_id: MaterialId) -> Result<Sphere> {
        if !radius.is_finite() || radius <= 0.0 {
            bail!("sphere radius must be positive, got {}", radius);
        }
        Ok(Sphere {
            center,
            radius,
            material_id,
        })
    }

    /// Nearer root of the ray/sphere quadratic. May be zero or negative when
    /// the ray starts on or inside the sphere, so callers must window the
    /// returned t against their clip range.
    pub fn intersect(&self, ray: Ray) -> Option<f32> {
        let oc = ray.origin - self.center;
        let b = ray.direction.dot(oc);
        let c = oc.norm_squared() - self.radius * self.radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            None
        } else if discriminant == 0.0 {
            Some(-b)
        } else {
            Some(-b - discriminant.sqrt())
        }
    }

    pub fn surface_normal(&self, point: Vec3) -> Vec3 {
        (point - self.center) / self.radius
    }

    pub fn material_id(&self) -> MaterialId {
        self.material_id
    }
}

use anyhow::{bail, Result};

use crate::geometry::Plane;
use crate::material::MaterialId;
use crate::math::{Ray, Vec3};

/// A plane restricted to a circular region around `center`. Points exactly
/// on the rim count as outside.
pub struct Disk {
    plane: Plane,
    center: Vec3,
    radius: f32,
}

impl Disk {
    pub fn new(center: Vec3, normal: Vec3, radius: f32, material_id: MaterialId) -> Result<Disk> {
        if !radius.is_finite() || radius <= 0.0 {
            bail!("disk radius must be positive, got {}", radius);
        }
        Ok(Disk {
            plane: Plane::new(center, normal, material_id)?,
            center,
            radius,
        })
    }

    pub fn from_points(
        center: Vec3,
        p1: Vec3,
        p2: Vec3,
        radius: f32,
        material_id: MaterialId,
    ) -> Result<Disk> {
        if !radius.is_finite() || radius <= 0.0 {
            bail!("disk radius must be positive, got {}", radius);
        }
        Ok(Disk {
            plane: Plane::from_points(center, p1, p2, material_id)?,
            center,
            radius,
        })
    }

    pub fn intersect(&self, ray: Ray) -> Option<f32> {
        let t = self.plane.intersect(ray)?;
        let hit = ray.point_at_parameter(t);
        if (hit - self.center).norm_squared() >= self.radius * self.radius {
            return None;
        }
        Some(t)
    }

    pub fn normal(&self) -> Vec3 {
        self.plane.normal()
    }

    pub fn material_id(&self) -> MaterialId {
        self.plane.material_id()
    }
}

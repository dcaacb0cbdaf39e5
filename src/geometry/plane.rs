use anyhow::{bail, Result};

use crate::material::MaterialId;
use crate::math::{Ray, Vec3};

// hits shallower than this against the front face count as parallel
pub const PLANE_EPSILON: f32 = 1e-6;

/// Infinite one-sided plane. Rays only register when travelling against the
/// stored normal, so the back face is invisible.
pub struct Plane {
    point: Vec3,
    normal: Vec3,
    material_id: MaterialId,
}

impl Plane {
    pub fn new(point: Vec3, normal: Vec3, material_id: MaterialId) -> Result<Plane> {
        if normal.norm_squared() < PLANE_EPSILON * PLANE_EPSILON {
            bail!("degenerate plane normal {:?}", normal);
        }
        Ok(Plane {
            point,
            normal: normal.normalized(),
            material_id,
        })
    }

    /// Plane through three points, with the normal taken from the winding
    /// order of `p0`, `p1`, `p2`.
    pub fn from_points(p0: Vec3, p1: Vec3, p2: Vec3, material_id: MaterialId) -> Result<Plane> {
        let normal = (p1 - p0).cross(p2 - p0);
        if normal.norm_squared() < PLANE_EPSILON * PLANE_EPSILON {
            bail!("collinear plane points {:?}, {:?}, {:?}", p0, p1, p2);
        }
        Plane::new(p0, normal, material_id)
    }

    pub fn intersect(&self, ray: Ray) -> Option<f32> {
        let denominator = ray.direction.dot(-self.normal);
        if denominator <= PLANE_EPSILON {
            return None;
        }
        let t = (self.point - ray.origin).dot(-self.normal) / denominator;
        if t <= 0.0 {
            return None;
        }
        Some(t)
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn material_id(&self) -> MaterialId {
        self.material_id
    }
}

use anyhow::{bail, Result};

use crate::geometry::Primitive;
use crate::material::{Material, MaterialId, MaterialTable};
use crate::math::{Ray, Vec3};

#[derive(Copy, Clone, Debug)]
pub struct HitRecord {
    pub t: f32,
    pub point: Vec3,
    pub normal: Vec3,
    pub material_id: MaterialId,
}

/// Flat list of primitives plus the material table they index into.
/// Intersection is a linear scan, which is fine at this primitive count.
pub struct Scene {
    primitives: Vec<Primitive>,
    materials: MaterialTable,
}

impl Scene {
    pub fn new(primitives: Vec<Primitive>, materials: MaterialTable) -> Result<Scene> {
        for (index, primitive) in primitives.iter().enumerate() {
            let id: usize = primitive.material_id().into();
            if id >= materials.len() {
                bail!(
                    "primitive {} refers to material {} but the table only holds {}",
                    index,
                    id,
                    materials.len()
                );
            }
        }
        Ok(Scene {
            primitives,
            materials,
        })
    }

    /// Nearest hit with t strictly inside (near, far). Exact ties go to the
    /// earliest-inserted primitive.
    pub fn hit(&self, ray: Ray, near: f32, far: f32) -> Option<HitRecord> {
        let mut closest = far;
        let mut winner: Option<&Primitive> = None;
        for primitive in &self.primitives {
            if let Some(t) = primitive.intersect(ray) {
                if t > near && t < closest {
                    closest = t;
                    winner = Some(primitive);
                }
            }
        }
        winner.map(|primitive| {
            let point = ray.point_at_parameter(closest);
            HitRecord {
                t: closest,
                point,
                normal: primitive.surface_normal(point),
                material_id: primitive.material_id(),
            }
        })
    }

    pub fn get_material(&self, material_id: MaterialId) -> &Material {
        let id: usize = material_id.into();
        &self.materials[id]
    }

    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }
}

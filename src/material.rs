use crate::math::Vec3;

// id into the material table
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq)]
pub struct MaterialId(pub u16);

impl From<u16> for MaterialId {
    fn from(value: u16) -> Self {
        MaterialId(value)
    }
}

impl From<MaterialId> for usize {
    fn from(value: MaterialId) -> Self {
        value.0 as usize
    }
}

/// Surface description shared by any number of primitives.
///
/// `emission` is radiance added whenever a path lands on the surface,
/// `specular` is the per-channel reflectance that attenuates the path
/// throughput, and `roughness` in [0, 1] blends the scatter direction
/// between a perfect mirror (0.0) and a uniform sphere draw (1.0).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Material {
    pub emission: Vec3,
    pub specular: Vec3,
    pub roughness: f32,
}

impl Material {
    pub const fn new(emission: Vec3, specular: Vec3, roughness: f32) -> Material {
        Material {
            emission,
            specular,
            roughness,
        }
    }
}

pub type MaterialTable = Vec<Material>;

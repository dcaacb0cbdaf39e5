use std::collections::HashMap;

use anyhow::{bail, Result};
use serde::Deserialize;

use crate::geometry::{Disk, Plane, Primitive, Sphere};
use crate::material::MaterialId;
use crate::parsing::Vec3Data;

#[derive(Deserialize, Clone)]
pub struct PlaneData {
    pub point: Vec3Data,
    pub normal: Vec3Data,
    pub material: String,
}

#[derive(Deserialize, Clone)]
pub struct DiskData {
    pub center: Vec3Data,
    pub normal: Vec3Data,
    pub radius: f32,
    pub material: String,
}

#[derive(Deserialize, Clone)]
pub struct SphereData {
    pub center: Vec3Data,
    pub radius: f32,
    pub material: String,
}

#[derive(Deserialize, Clone)]
#[serde(tag = "type")]
pub enum PrimitiveData {
    Plane(PlaneData),
    Disk(DiskData),
    Sphere(SphereData),
}

impl PrimitiveData {
    pub fn parse_with(self, material_mapping: &HashMap<String, MaterialId>) -> Result<Primitive> {
        match self {
            PrimitiveData::Plane(data) => {
                let material_id = lookup_material(&data.material, material_mapping)?;
                let plane = Plane::new(data.point.into(), data.normal.into(), material_id)?;
                info!("parsed plane data");
                Ok(plane.into())
            }
            PrimitiveData::Disk(data) => {
                let material_id = lookup_material(&data.material, material_mapping)?;
                let disk = Disk::new(
                    data.center.into(),
                    data.normal.into(),
                    data.radius,
                    material_id,
                )?;
                info!("parsed disk data");
                Ok(disk.into())
            }
            PrimitiveData::Sphere(data) => {
                let material_id = lookup_material(&data.material, material_mapping)?;
                let sphere = Sphere::new(data.center.into(), data.radius, material_id)?;
                info!("parsed sphere data");
                Ok(sphere.into())
            }
        }
    }
}

fn lookup_material(
    name: &str,
    material_mapping: &HashMap<String, MaterialId>,
) -> Result<MaterialId> {
    match material_mapping.get(name) {
        Some(id) => Ok(*id),
        None => bail!("primitive references unknown material {:?}", name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tagged_primitives() {
        let data: Vec<PrimitiveData> = toml::from_str::<HashMap<String, Vec<PrimitiveData>>>(
            r#"
[[primitives]]
type = "Plane"
point = [0.0, -1.0, 0.0]
normal = [0.0, 1.0, 0.0]
material = "white"

[[primitives]]
type = "Sphere"
center = [0.0, 0.0, 5.0]
radius = 1.0
material = "white"
"#,
        )
        .unwrap()
        .remove("primitives")
        .unwrap();

        let mut material_mapping = HashMap::new();
        material_mapping.insert(String::from("white"), MaterialId::from(0u16));
        for primitive in data {
            primitive.parse_with(&material_mapping).unwrap();
        }
    }

    #[test]
    fn test_unknown_material_name_is_rejected() {
        let data = PrimitiveData::Sphere(SphereData {
            center: [0.0, 0.0, 5.0],
            radius: 1.0,
            material: String::from("missing"),
        });
        assert!(data.parse_with(&HashMap::new()).is_err());
    }

    #[test]
    fn test_degenerate_primitive_is_rejected() {
        let data = PrimitiveData::Sphere(SphereData {
            center: [0.0, 0.0, 5.0],
            radius: -1.0,
            material: String::from("white"),
        });
        let mut material_mapping = HashMap::new();
        material_mapping.insert(String::from("white"), MaterialId::from(0u16));
        assert!(data.parse_with(&material_mapping).is_err());
    }
}

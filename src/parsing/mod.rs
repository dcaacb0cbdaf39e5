pub mod config;
pub mod primitives;

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::geometry::{Plane, Sphere};
use crate::material::{Material, MaterialId, MaterialTable};
use crate::math::Vec3;
use crate::scene::Scene;

pub use config::{get_settings, Config, RenderSettings, TOMLConfig};
pub use primitives::PrimitiveData;

pub type Vec3Data = [f32; 3];

#[derive(Deserialize, Copy, Clone)]
pub struct MaterialData {
    pub emission: Vec3Data,
    pub specular: Vec3Data,
    pub roughness: f32,
}

#[derive(Deserialize, Copy, Clone)]
pub struct CameraData {
    pub look_from: Option<Vec3Data>,
}

#[derive(Deserialize, Clone)]
pub struct SceneData {
    pub camera: Option<CameraData>,
    pub materials: HashMap<String, MaterialData>,
    pub primitives: Vec<PrimitiveData>,
}

pub fn load_scene(filepath: &str) -> Result<SceneData> {
    let mut input = String::new();
    File::open(filepath)
        .and_then(|mut f| f.read_to_string(&mut input))
        .with_context(|| format!("failed to read scene file at {}", filepath))?;
    info!("loaded scene file at {}, {} bytes", filepath, input.len());
    let scene: SceneData = toml::from_str(&input)
        .with_context(|| format!("failed to parse scene file at {}", filepath))?;
    Ok(scene)
}

/// Builds the scene and the camera position from parsed scene data.
pub fn construct_scene(data: SceneData) -> Result<(Scene, Vec3)> {
    let mut materials: MaterialTable = Vec::new();
    let mut material_names_to_ids: HashMap<String, MaterialId> = HashMap::new();

    // sort so material ids do not depend on hash order
    let mut entries: Vec<(String, MaterialData)> = data.materials.into_iter().collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    for (name, material) in entries {
        if !(0.0..=1.0).contains(&material.roughness) {
            bail!(
                "material {:?} has roughness {} outside of [0, 1]",
                name,
                material.roughness
            );
        }
        let id = MaterialId::from(materials.len() as u16);
        materials.push(Material::new(
            material.emission.into(),
            material.specular.into(),
            material.roughness,
        ));
        info!("added material {} as {:?}", &name, id);
        material_names_to_ids.insert(name, id);
    }

    let mut primitives = Vec::new();
    for primitive in data.primitives {
        primitives.push(primitive.parse_with(&material_names_to_ids)?);
    }
    info!(
        "constructed scene with {} materials and {} primitives",
        materials.len(),
        primitives.len()
    );

    let look_from = data
        .camera
        .and_then(|camera| camera.look_from)
        .map(Vec3::from)
        .unwrap_or(Vec3::ZERO);
    let scene = Scene::new(primitives, materials)?;
    Ok((scene, look_from))
}

/// Two emissive spheres over a rough floor, viewed from the origin.
/// Used when no scene file is configured.
pub fn default_scene() -> Result<(Scene, Vec3)> {
    let materials = vec![
        Material::new(Vec3::ZERO, Vec3::new(0.9, 0.9, 0.9), 0.5),
        Material::new(Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO, 0.0),
        Material::new(Vec3::new(0.0, 0.0, 1.0), Vec3::ZERO, 0.0),
    ];

    let floor = Plane::from_points(
        Vec3::new(0.0, -1.0, 0.0),
        Vec3::new(1.0, -1.0, 0.0),
        Vec3::new(0.0, -1.0, 1.0),
        MaterialId::from(0u16),
    )?;
    let red_light = Sphere::new(Vec3::new(-1.2, 0.0, 5.0), 1.0, MaterialId::from(1u16))?;
    let blue_light = Sphere::new(Vec3::new(1.2, 0.0, 5.0), 1.0, MaterialId::from(2u16))?;

    let scene = Scene::new(
        vec![floor.into(), red_light.into(), blue_light.into()],
        materials,
    )?;
    Ok((scene, Vec3::ZERO))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = r#"
[camera]
look_from = [0.0, 1.0, -4.0]

[materials.white_light]
emission = [1.0, 1.0, 1.0]
specular = [0.0, 0.0, 0.0]
roughness = 0.0

[materials.mirror]
emission = [0.0, 0.0, 0.0]
specular = [1.0, 1.0, 1.0]
roughness = 0.0

[[primitives]]
type = "Plane"
point = [0.0, -1.0, 0.0]
normal = [0.0, 1.0, 0.0]
material = "mirror"

[[primitives]]
type = "Disk"
center = [0.0, 3.0, 5.0]
normal = [0.0, -1.0, 0.0]
radius = 2.0
material = "white_light"

[[primitives]]
type = "Sphere"
center = [0.0, 0.0, 5.0]
radius = 1.0
material = "white_light"
"#;

    #[test]
    fn test_construct_scene_from_toml() {
        let data: SceneData = toml::from_str(SCENE).unwrap();
        let (scene, look_from) = construct_scene(data).unwrap();
        assert_eq!(scene.primitive_count(), 3);
        assert_eq!(look_from, Vec3::new(0.0, 1.0, -4.0));
    }

    #[test]
    fn test_missing_camera_defaults_to_origin() {
        let mut data: SceneData = toml::from_str(SCENE).unwrap();
        data.camera = None;
        let (_, look_from) = construct_scene(data).unwrap();
        assert_eq!(look_from, Vec3::ZERO);
    }

    #[test]
    fn test_roughness_outside_unit_range_is_rejected() {
        let mut data: SceneData = toml::from_str(SCENE).unwrap();
        if let Some(material) = data.materials.get_mut("mirror") {
            material.roughness = 1.5;
        }
        assert!(construct_scene(data).is_err());
    }

    #[test]
    fn test_default_scene_constructs() {
        let (scene, look_from) = default_scene().unwrap();
        assert_eq!(scene.primitive_count(), 3);
        assert_eq!(look_from, Vec3::ZERO);
    }
}

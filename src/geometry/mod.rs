mod disk;
mod plane;
mod sphere;

pub use disk::Disk;
pub use plane::{Plane, PLANE_EPSILON};
pub use sphere::Sphere;

use crate::material::MaterialId;
use crate::math::{Ray, Vec3};

pub enum Primitive {
    Plane(Plane),
    Disk(Disk),
    Sphere(Sphere),
}

impl From<Plane> for Primitive {
    fn from(data: Plane) -> Self {
        Primitive::Plane(data)
    }
}

impl From<Disk> for Primitive {
    fn from(data: Disk) -> Self {
        Primitive::Disk(data)
    }
}

impl From<Sphere> for Primitive {
    fn from(data: Sphere) -> Self {
        Primitive::Sphere(data)
    }
}

impl Primitive {
    /// Parametric distance along the ray, if the ray meets the surface at
    /// all. Sphere hits may sit at non-positive t, see [`Sphere::intersect`].
    pub fn intersect(&self, ray: Ray) -> Option<f32> {
        match self {
            Primitive::Plane(plane) => plane.intersect(ray),
            Primitive::Disk(disk) => disk.intersect(ray),
            Primitive::Sphere(sphere) => sphere.intersect(ray),
        }
    }

    /// Unit normal at `point`, which is assumed to lie on the surface.
    pub fn surface_normal(&self, point: Vec3) -> Vec3 {
        match self {
            Primitive::Plane(plane) => plane.normal(),
            Primitive::Disk(disk) => disk.normal(),
            Primitive::Sphere(sphere) => sphere.surface_normal(point),
        }
    }

    pub fn material_id(&self) -> MaterialId {
        match self {
            Primitive::Plane(plane) => plane.material_id(),
            Primitive::Disk(disk) => disk.material_id(),
            Primitive::Sphere(sphere) => sphere.material_id(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_dispatch() {
        let plane = Plane::new(Vec3::new(0.0, 0.0, 9.0), -Vec3::Z, MaterialId(0)).unwrap();
        let disk = Disk::new(Vec3::new(0.0, 0.0, 7.0), -Vec3::Z, 2.0, MaterialId(1)).unwrap();
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, MaterialId(2)).unwrap();

        let primitives: Vec<Primitive> = vec![plane.into(), disk.into(), sphere.into()];
        let test_ray = Ray::new(Vec3::ZERO, Vec3::Z);

        let ts: Vec<Option<f32>> = primitives.iter().map(|p| p.intersect(test_ray)).collect();
        assert_eq!(ts, vec![Some(9.0), Some(7.0), Some(4.0)]);
        assert_eq!(primitives[2].material_id(), MaterialId(2));

        let hit = test_ray.point_at_parameter(4.0);
        let normal = primitives[2].surface_normal(hit);
        assert!((normal.norm() - 1.0).abs() < 1e-5);
        assert!((normal - (-Vec3::Z)).norm() < 1e-5);
    }
}

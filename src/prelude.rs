pub use rayon::prelude::*;

pub use crate::camera::PinholeCamera;
pub use crate::geometry::{Disk, Plane, Primitive, Sphere};
pub use crate::material::{Material, MaterialId, MaterialTable};
pub use crate::math::{lerp, random_on_unit_sphere, RandomSampler, Ray, Sampler, Vec3};
pub use crate::renderer::Film;
pub use crate::scene::{HitRecord, Scene};

pub use crate::math::{INFINITY, PI};

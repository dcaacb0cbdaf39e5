use crate::math::{Sample2D, Vec3, PI};

pub fn random_on_unit_sphere(r: Sample2D) -> Vec3 {
    let phi = r.x * 2.0 * PI;
    let z = r.y * 2.0 - 1.0;
    let radius = (1.0 - z * z).sqrt();
    let (sin_phi, cos_phi) = phi.sin_cos();
    Vec3::new(radius * cos_phi, radius * sin_phi, z)
}

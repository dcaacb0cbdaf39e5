use std::sync::Arc;

use crate::integrator::SamplerIntegrator;
use crate::prelude::*;

/// Emission-at-every-bounce path tracer. Paths end when they escape the
/// scene, exhaust `max_bounces`, or their throughput drops to
/// `specular_clipping` or below.
pub struct PathTracingIntegrator {
    pub max_bounces: u16,
    pub near_clip: f32,
    pub far_clip: f32,
    pub specular_clipping: f32,
    pub scene: Arc<Scene>,
}

impl SamplerIntegrator for PathTracingIntegrator {
    fn color(&self, sampler: &mut dyn Sampler, camera_ray: Ray) -> Vec3 {
        let mut ray = camera_ray;
        let mut radiance = Vec3::ZERO;
        let mut throughput = Vec3::ONE;

        for _ in 0..self.max_bounces {
            match self.scene.hit(ray, self.near_clip, self.far_clip) {
                Some(hit) => {
                    debug_assert!(hit.point.is_finite(), "ray {:?}, {:?}", ray, hit);
                    let material = self.scene.get_material(hit.material_id);

                    radiance += throughput * material.emission;
                    throughput *= material.specular;
                    if throughput.max_element() <= self.specular_clipping {
                        // cheaper stand-in for russian roulette, biased dark
                        break;
                    }

                    let mirror =
                        ray.direction - hit.normal * (2.0 * ray.direction.dot(hit.normal));
                    let mut scatter = random_on_unit_sphere(sampler.draw_2d());
                    if scatter.dot(hit.normal) < 0.0 {
                        scatter = -scatter;
                    }
                    let direction = lerp(mirror, scatter, material.roughness).normalized();
                    debug_assert!(direction.is_finite(), "{:?} {:?}", mirror, scatter);

                    // self intersection is fended off by near_clip, not by
                    // offsetting the origin along the normal
                    ray = Ray::new(hit.point, direction);
                }
                None => {
                    break;
                }
            }
        }
        debug_assert!(radiance.is_finite(), "{:?}", radiance);
        radiance
    }
}

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;

use super::output_film;
use crate::integrator::{PathTracingIntegrator, SamplerIntegrator};
use crate::parsing::config::RenderSettings;
use crate::prelude::*;

// decorrelates the per pixel rng streams between passes. the seeding path
// already mixes this through splitmix64, so plain offsets are enough
fn sampler_seed(base: u64, sample_index: u32, pixel_index: usize) -> u64 {
    base.wrapping_add((sample_index as u64) << 40)
        .wrapping_add(pixel_index as u64)
}

/// Progressive whole-frame renderer. Pixels within a pass run in parallel,
/// passes run back to back until a sample or wall-clock bound trips.
pub struct ProgressiveRenderer {}

impl ProgressiveRenderer {
    pub fn new() -> ProgressiveRenderer {
        ProgressiveRenderer {}
    }

    pub fn render(
        &self,
        scene: Arc<Scene>,
        camera: &PinholeCamera,
        settings: &RenderSettings,
    ) -> Result<Film<Vec3>> {
        let (width, height) = (settings.width, settings.height);
        info!(
            "starting render at {}x{} over {} primitives",
            width,
            height,
            scene.primitive_count()
        );

        let integrator = PathTracingIntegrator {
            max_bounces: settings.max_bounces,
            near_clip: settings.near_clip,
            far_clip: settings.far_clip,
            specular_clipping: settings.specular_clipping,
            scene,
        };

        let mut film: Film<Vec3> = Film::new(width, height, Vec3::ZERO);
        let start = Instant::now();
        let mut samples_done: u32 = 0;

        loop {
            let sample_index = samples_done;
            film.buffer
                .par_iter_mut()
                .enumerate()
                .for_each(|(pixel_index, pixel_ref)| {
                    let y: usize = pixel_index / width;
                    let x: usize = pixel_index - width * y;
                    let mut sampler =
                        RandomSampler::new(sampler_seed(settings.seed, sample_index, pixel_index));
                    let ray = camera.get_ray(&mut sampler, x, y);
                    let color = integrator.color(&mut sampler, ray);
                    debug_assert!(color.is_finite(), "pixel ({}, {}) got {:?}", x, y, color);
                    *pixel_ref += color;
                });
            samples_done += 1;

            let elapsed = start.elapsed().as_secs_f32();
            log_progress(settings, samples_done, elapsed);

            let out_of_samples = settings.max_samples > 0 && samples_done >= settings.max_samples;
            let out_of_time = settings.max_seconds > 0 && elapsed >= settings.max_seconds as f32;
            if out_of_samples || out_of_time {
                break;
            }
            if settings.snapshot_interval > 0 && samples_done % settings.snapshot_interval == 0 {
                output_film(settings, &film, samples_done)?;
            }
        }

        output_film(settings, &film, samples_done)?;

        let elapsed = start.elapsed().as_secs_f32();
        let camera_rays = film.total_pixels() as u64 * samples_done as u64;
        info!(
            "rendered {} samples over {} pixels in {:.2}s, {:.3}M camera rays per second",
            samples_done,
            film.total_pixels(),
            elapsed,
            camera_rays as f32 / elapsed.max(f32::EPSILON) / 1e6
        );
        Ok(film)
    }
}

fn log_progress(settings: &RenderSettings, samples_done: u32, elapsed: f32) {
    if settings.max_samples > 0 {
        let remaining = settings.max_samples.saturating_sub(samples_done);
        let eta = elapsed / samples_done as f32 * remaining as f32;
        info!(
            "sample {}/{} ({}%) done, elapsed {:.1}s, eta {:.1}s",
            samples_done,
            settings.max_samples,
            100 * samples_done as u64 / settings.max_samples as u64,
            elapsed,
            eta
        );
    } else {
        info!(
            "sample {} done, elapsed {:.1}s of the {}s limit",
            samples_done, elapsed, settings.max_seconds
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Sphere;
    use crate::material::{Material, MaterialId};
    use crate::math::Vec3;

    fn test_scene() -> Arc<Scene> {
        let material = Material::new(Vec3::ONE, Vec3::ZERO, 0.0);
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, MaterialId(0)).unwrap();
        Arc::new(Scene::new(vec![sphere.into()], vec![material]).unwrap())
    }

    fn test_settings(filename: &str, max_samples: u32, max_seconds: u64) -> RenderSettings {
        RenderSettings {
            width: 8,
            height: 8,
            fov: 1.0,
            gamma: 1.0,
            sensitivity: 255.0,
            max_bounces: 2,
            max_samples,
            max_seconds,
            sample_variation: 0.0,
            near_clip: 0.01,
            far_clip: 100.0,
            specular_clipping: 0.1,
            snapshot_interval: 1,
            filename: std::env::temp_dir()
                .join(filename)
                .to_string_lossy()
                .into_owned(),
            seed: 99,
            threads: 1,
        }
    }

    #[test]
    fn test_sample_bound_and_snapshots_leave_accumulation_intact() {
        let settings = test_settings("pathlight_driver_bound.png", 3, 0);
        let scene = test_scene();
        let camera = PinholeCamera::new(
            Vec3::ZERO,
            settings.width,
            settings.height,
            settings.fov,
            settings.sample_variation,
        );
        let film = ProgressiveRenderer::new()
            .render(scene, &camera, &settings)
            .unwrap();
        // the center pixel hits the emitter every pass, and the snapshots
        // taken along the way must not have disturbed the running sum
        assert_eq!(film.at(4, 3), Vec3::new(3.0, 3.0, 3.0));
        assert_eq!(film.at(0, 0), Vec3::ZERO);
        assert!(std::fs::metadata(&settings.filename).is_ok());
    }

    #[test]
    fn test_identical_seeds_render_identical_films() {
        let settings = test_settings("pathlight_driver_seeded.png", 2, 0);
        let scene = test_scene();
        let camera = PinholeCamera::new(
            Vec3::ZERO,
            settings.width,
            settings.height,
            settings.fov,
            settings.sample_variation,
        );
        let renderer = ProgressiveRenderer::new();
        let first = renderer
            .render(scene.clone(), &camera, &settings)
            .unwrap();
        let second = renderer.render(scene, &camera, &settings).unwrap();
        assert_eq!(first.buffer, second.buffer);
    }

    #[test]
    fn test_time_bound_terminates() {
        let settings = test_settings("pathlight_driver_timed.png", 0, 1);
        let scene = test_scene();
        let camera = PinholeCamera::new(
            Vec3::ZERO,
            settings.width,
            settings.height,
            settings.fov,
            settings.sample_variation,
        );
        let film = ProgressiveRenderer::new()
            .render(scene, &camera, &settings)
            .unwrap();
        // at least one full pass happened before the clock ran out
        assert!(film.at(4, 3).x >= 1.0);
    }

    #[test]
    fn test_seed_mixing_differs_per_pixel_and_pass() {
        assert_ne!(sampler_seed(0, 0, 1), sampler_seed(0, 0, 2));
        assert_ne!(sampler_seed(0, 0, 1), sampler_seed(0, 1, 1));
        assert_eq!(sampler_seed(7, 3, 11), sampler_seed(7, 3, 11));
    }
}

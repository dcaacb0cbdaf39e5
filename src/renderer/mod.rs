mod film;
mod progressive;

pub use film::Film;
pub use progressive::ProgressiveRenderer;

use anyhow::Result;

use crate::math::Vec3;
use crate::parsing::config::RenderSettings;
use crate::tonemap::{write_png, GammaClamp};

/// Tonemap the film after `samples` full passes and write it to the
/// configured output file. The film stays untouched so accumulation can
/// continue afterwards.
pub fn output_film(
    render_settings: &RenderSettings,
    film: &Film<Vec3>,
    samples: u32,
) -> Result<()> {
    assert!(samples > 0);
    let tonemapper = GammaClamp::new(render_settings.gamma, render_settings.sensitivity);
    write_png(&tonemapper, film, samples, &render_settings.filename)
}

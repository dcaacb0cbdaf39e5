use anyhow::{Context, Result};

use crate::math::Vec3;
use crate::renderer::Film;

/// Maps accumulated radiance to 8 bit output as
/// `clamp(floor(pow(value / samples, gamma) * sensitivity), 0, 255)`.
pub struct GammaClamp {
    pub gamma: f32,
    pub sensitivity: f32,
}

impl GammaClamp {
    pub const fn new(gamma: f32, sensitivity: f32) -> GammaClamp {
        GammaClamp { gamma, sensitivity }
    }

    /// Non-positive input pins to zero so the power never sees a negative
    /// base. Out of range results saturate instead of wrapping.
    pub fn map_channel(&self, value: f32) -> u8 {
        if value <= 0.0 {
            return 0;
        }
        let scaled = value.powf(self.gamma) * self.sensitivity;
        scaled.floor().clamp(0.0, 255.0) as u8
    }

    pub fn map(&self, value: Vec3, samples: u32) -> [u8; 3] {
        let averaged = value / samples as f32;
        [
            self.map_channel(averaged.x),
            self.map_channel(averaged.y),
            self.map_channel(averaged.z),
        ]
    }
}

/// Tonemap the additive film after `samples` full passes and save it as a
/// PNG. The film buffer itself is not modified.
pub fn write_png(
    tonemapper: &GammaClamp,
    film: &Film<Vec3>,
    samples: u32,
    filename: &str,
) -> Result<()> {
    assert!(samples > 0);
    let mut img: image::RgbImage = image::ImageBuffer::new(film.width as u32, film.height as u32);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        *pixel = image::Rgb(tonemapper.map(film.at(x as usize, y as usize), samples));
    }
    img.save(filename)
        .with_context(|| format!("failed to save image to {}", filename))
}

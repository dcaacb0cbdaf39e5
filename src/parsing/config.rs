use std::fs::File;
use std::io::Read;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

#[derive(Deserialize, Copy, Clone)]
pub struct Resolution {
    pub width: usize,
    pub height: usize,
}

/// Render settings as they appear on disk. Everything except the resolution
/// is optional and falls back to the reference defaults in `From<TOMLConfig>`.
#[derive(Deserialize, Clone)]
pub struct TOMLRenderSettings {
    pub resolution: Resolution,
    pub filename: Option<String>,
    pub fov: Option<f32>,
    pub gamma: Option<f32>,
    pub sensitivity: Option<f32>,
    pub max_bounces: Option<u16>,
    pub max_samples: Option<u32>,
    pub max_seconds: Option<u64>,
    pub sample_variation: Option<f32>,
    pub near_clip: Option<f32>,
    pub far_clip: Option<f32>,
    pub specular_clipping: Option<f32>,
    pub snapshot_interval: Option<u32>,
    pub seed: Option<u64>,
    pub threads: Option<u16>,
}

#[derive(Deserialize, Clone)]
pub struct TOMLConfig {
    pub default_scene_file: Option<String>,
    pub render: TOMLRenderSettings,
}

#[derive(Clone)]
pub struct RenderSettings {
    pub width: usize,
    pub height: usize,
    pub fov: f32,
    pub gamma: f32,
    pub sensitivity: f32,
    pub max_bounces: u16,
    pub max_samples: u32,
    pub max_seconds: u64,
    pub sample_variation: f32,
    pub near_clip: f32,
    pub far_clip: f32,
    pub specular_clipping: f32,
    pub snapshot_interval: u32,
    pub filename: String,
    pub seed: u64,
    pub threads: u16,
}

#[derive(Clone)]
pub struct Config {
    pub scene_file: Option<String>,
    pub render: RenderSettings,
}

impl From<TOMLConfig> for Config {
    fn from(data: TOMLConfig) -> Self {
        let render = data.render;
        // unseeded runs take the wall clock so repeated invocations differ
        let seed = render.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_secs())
                .unwrap_or(0)
        });
        Config {
            scene_file: data.default_scene_file,
            render: RenderSettings {
                width: render.resolution.width,
                height: render.resolution.height,
                fov: render.fov.unwrap_or(1.0),
                gamma: render.gamma.unwrap_or(1.0),
                sensitivity: render.sensitivity.unwrap_or(255.0),
                max_bounces: render.max_bounces.unwrap_or(2),
                max_samples: render.max_samples.unwrap_or(100),
                max_seconds: render.max_seconds.unwrap_or(0),
                sample_variation: render.sample_variation.unwrap_or(0.001),
                near_clip: render.near_clip.unwrap_or(0.01),
                far_clip: render.far_clip.unwrap_or(100.0),
                specular_clipping: render.specular_clipping.unwrap_or(0.1),
                snapshot_interval: render.snapshot_interval.unwrap_or(0),
                filename: render
                    .filename
                    .unwrap_or_else(|| String::from("render.png")),
                seed,
                threads: render.threads.unwrap_or(num_cpus::get() as u16),
            },
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        let render = &self.render;
        if render.width == 0 || render.height == 0 {
            bail!(
                "resolution must be nonzero, got {}x{}",
                render.width,
                render.height
            );
        }
        if !render.fov.is_finite() || render.fov <= 0.0 {
            bail!("fov must be positive and finite, got {}", render.fov);
        }
        if render.max_samples == 0 && render.max_seconds == 0 {
            bail!("render would never terminate: set max_samples or max_seconds to a nonzero value");
        }
        if !render.near_clip.is_finite() || render.near_clip < 0.0 {
            bail!("near_clip must be nonnegative, got {}", render.near_clip);
        }
        if !render.far_clip.is_finite() || render.far_clip <= render.near_clip {
            bail!(
                "far_clip ({}) must be finite and beyond near_clip ({})",
                render.far_clip,
                render.near_clip
            );
        }
        if !render.sample_variation.is_finite() || render.sample_variation < 0.0 {
            bail!(
                "sample_variation must be nonnegative, got {}",
                render.sample_variation
            );
        }
        Ok(())
    }
}

pub fn get_settings(filepath: &str) -> Result<TOMLConfig> {
    let mut input = String::new();
    File::open(filepath)
        .and_then(|mut f| f.read_to_string(&mut input))
        .with_context(|| format!("failed to read config file at {}", filepath))?;
    let settings: TOMLConfig = toml::from_str(&input)
        .with_context(|| format!("failed to parse config file at {}", filepath))?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shipped_config() {
        let settings = get_settings("data/config.toml").unwrap();
        let config = Config::from(settings);
        config.validate().unwrap();
        assert_eq!(config.render.width, 400);
        assert_eq!(config.render.height, 400);
        assert!(config.scene_file.is_some());
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let settings: TOMLConfig = toml::from_str(
            r#"
[render]
resolution = { width = 32, height = 32 }
"#,
        )
        .unwrap();
        let config = Config::from(settings);
        assert_eq!(config.render.fov, 1.0);
        assert_eq!(config.render.max_bounces, 2);
        assert_eq!(config.render.max_samples, 100);
        assert_eq!(config.render.specular_clipping, 0.1);
        assert_eq!(config.render.filename, "render.png");
        config.validate().unwrap();
    }

    #[test]
    fn test_rejects_config_without_termination_bound() {
        let settings: TOMLConfig = toml::from_str(
            r#"
[render]
resolution = { width = 32, height = 32 }
max_samples = 0
max_seconds = 0
"#,
        )
        .unwrap();
        let config = Config::from(settings);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_clip_window() {
        let settings: TOMLConfig = toml::from_str(
            r#"
[render]
resolution = { width = 32, height = 32 }
near_clip = 5.0
far_clip = 1.0
"#,
        )
        .unwrap();
        let config = Config::from(settings);
        assert!(config.validate().is_err());
    }
}

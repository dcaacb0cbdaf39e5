use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

#[derive(Debug)]
pub struct Sample1D {
    pub x: f32,
}

impl Sample1D {
    pub const fn new(x: f32) -> Self {
        Sample1D { x }
    }
}

#[derive(Debug)]
pub struct Sample2D {
    pub x: f32,
    pub y: f32,
}

impl Sample2D {
    pub const fn new(x: f32, y: f32) -> Self {
        Sample2D { x, y }
    }
}

#[derive(Debug)]
pub struct Sample3D {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Sample3D {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Sample3D { x, y, z }
    }
}

pub trait Sampler {
    fn draw_1d(&mut self) -> Sample1D;
    fn draw_2d(&mut self) -> Sample2D;
    fn draw_3d(&mut self) -> Sample3D;
}

/// Seeded uniform sampler. Every draw is in [0, 1), and two samplers built
/// from the same seed produce the same sequence.
pub struct RandomSampler {
    rng: SmallRng,
}

impl RandomSampler {
    pub fn new(seed: u64) -> RandomSampler {
        RandomSampler {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Sampler for RandomSampler {
    fn draw_1d(&mut self) -> Sample1D {
        Sample1D::new(self.rng.gen())
    }
    fn draw_2d(&mut self) -> Sample2D {
        Sample2D::new(self.rng.gen(), self.rng.gen())
    }
    fn draw_3d(&mut self) -> Sample3D {
        Sample3D::new(self.rng.gen(), self.rng.gen(), self.rng.gen())
    }
}

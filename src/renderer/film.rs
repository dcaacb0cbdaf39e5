/// Row-major pixel buffer. Index math lives here so every consumer agrees
/// that pixel (x, y) sits at `y * width + x`.
#[derive(Clone, Debug)]
pub struct Film<T> {
    pub buffer: Vec<T>,
    pub width: usize,
    pub height: usize,
}

impl<T: Copy> Film<T> {
    pub fn new(width: usize, height: usize, fill_value: T) -> Film<T> {
        Film {
            buffer: vec![fill_value; width * height],
            width,
            height,
        }
    }

    pub fn at(&self, x: usize, y: usize) -> T {
        self.buffer[y * self.width + x]
    }
}

impl<T> Film<T> {
    pub fn total_pixels(&self) -> usize {
        self.width * self.height
    }
}

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Subjects the trending shelf rotates through.
pub const POPULAR_CATEGORIES: [&str; 8] = [
    "fiction",
    "fantasy",
    "science",
    "history",
    "biography",
    "romance",
    "mystery",
    "thriller",
];

/// Source of the trending category choice. Returns an index below `len`;
/// `len` is never zero.
pub trait CategoryPicker: Send {
    fn pick(&mut self, len: usize) -> usize;
}

/// Uniform pick from an entropy-seeded generator.
pub struct RandomPicker {
    rng: StdRng,
}

impl RandomPicker {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl CategoryPicker for RandomPicker {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Always picks the same slot, wrapping when out of range.
#[derive(Debug, Clone, Copy)]
pub struct FixedPicker(pub usize);

impl CategoryPicker for FixedPicker {
    fn pick(&mut self, len: usize) -> usize {
        self.0 % len
    }
}

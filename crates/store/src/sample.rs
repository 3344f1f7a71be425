//! Deterministic sample catalogs for demos, benches and tests.

use facetta_core::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DEFAULT_SEED: u64 = 0x5eed_fa11;

pub struct SampleDataBuilder {
    count: usize,
    seed: u64,
}

impl SampleDataBuilder {
    pub fn new(count: usize) -> Self { Self { count, seed: DEFAULT_SEED } }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Items with registry-drawn colors and sizes and ids from the same RNG,
    /// so a given seed always yields the same catalog.
    pub fn build(&self) -> Vec<Item> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        (0..self.count)
            .map(|_| {
                let id = uuid::Builder::from_random_bytes(rng.gen()).into_uuid();
                let color = pick(&mut rng, Color::ALL);
                let size = pick(&mut rng, Size::ALL);
                Item::new(id, format!("{} - {}", color, size), size, color)
            })
            .collect()
    }
}

fn pick<F: Facet>(rng: &mut StdRng, all: &[F]) -> F {
    all[rng.gen_range(0..all.len())]
}

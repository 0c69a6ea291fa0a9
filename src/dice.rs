/*
 * Copyright (c) 2020. Beautiful Code BV, Rotterdam, Netherlands
 * Licensed under GNU GENERAL PUBLIC LICENSE Version 3.
 */

use rand::Rng;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// A source of uniformly distributed numbers in `[0, 1)`.
///
/// Every wheel owns one, so a seeded source makes a whole session reproducible.
pub trait RandomSource {
    fn unit(&mut self) -> f64;
}

/// Seeded PRNG used by the wheels.
pub struct Dice {
    rng: ChaCha8Rng,
}

impl Dice {
    /// Same seed, same sequence of spins.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self::seeded(rand::random())
    }
}

impl RandomSource for Dice {
    fn unit(&mut self) -> f64 {
        self.rng.random()
    }
}

/// Choose an index in range [0, len).
pub fn choose(source: &mut dyn RandomSource, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let index = (source.unit() * len as f64).floor() as usize;
    index.min(len - 1)
}

/// Pick one element uniformly, or nothing from an empty slice.
pub fn select<'a, T>(source: &mut dyn RandomSource, options: &'a [T]) -> Option<&'a T> {
    if options.is_empty() {
        return None;
    }
    options.get(choose(source, options.len()))
}

/// A value in a range [min, max).
pub fn pick(source: &mut dyn RandomSource, min: f64, max: f64) -> f64 {
    min + source.unit() * (max - min)
}

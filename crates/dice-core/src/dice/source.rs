//! Where dice get their randomness.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniform draws over `1..=sides`.
///
/// Dice own a boxed source, so tests can swap the RNG for
/// [`ScriptedDraws`](crate::testing::ScriptedDraws).
pub trait DrawSource: std::fmt::Debug {
    /// Draw one value in `1..=sides`.
    fn draw(&mut self, sides: u32) -> u32;
}

impl DrawSource for StdRng {
    fn draw(&mut self, sides: u32) -> u32 {
        self.random_range(1..=sides)
    }
}

/// A source seeded from the operating system's entropy.
pub fn os_rng() -> Box<dyn DrawSource> {
    Box::new(StdRng::from_os_rng())
}

/// A deterministic source for the given seed.
pub fn seeded(seed: u64) -> Box<dyn DrawSource> {
    Box::new(StdRng::seed_from_u64(seed))
}

//! Configuration for a set of standard dice.

use crate::ability::ExpungePolicy;
use crate::dice::{DrawSource, Pacing, source};
use crate::error::{DiceError, DiceResult};

/// Environment variable holding a `u64` RNG seed.
pub const SEED_VAR: &str = "DICE_SEED";
/// Environment variable holding the pacing strategy.
pub const PACING_VAR: &str = "DICE_PACING";

/// Configuration for building [`StandardDice`](crate::StandardDice).
#[derive(Debug, Clone, Default)]
pub struct DiceConfig {
    /// RNG seed for reproducible rolls. `None` seeds each die from the OS.
    pub seed: Option<u64>,
    /// Pause applied after each single numeric roll.
    pub pacing: Pacing,
    /// Policy for discarding weak ability sets.
    pub expunge: ExpungePolicy,
}

impl DiceConfig {
    /// Read `DICE_SEED` and `DICE_PACING` from the process environment.
    pub fn from_env() -> DiceResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> DiceResult<Self> {
        let mut config = Self::default();
        if let Some(seed) = lookup(SEED_VAR) {
            let seed = seed.trim().parse().map_err(|_| {
                DiceError::InvalidArgument(format!("{SEED_VAR} must be an unsigned integer, got '{seed}'"))
            })?;
            config.seed = Some(seed);
        }
        if let Some(pacing) = lookup(PACING_VAR) {
            config.pacing = pacing.parse()?;
        }
        Ok(config)
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the pacing strategy.
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Set the ability set expunge policy.
    pub fn with_expunge(mut self, expunge: ExpungePolicy) -> Self {
        self.expunge = expunge;
        self
    }

    /// A draw source for the die at `index` in a registry.
    ///
    /// With a seed, each index gets its own deterministic stream.
    pub fn source_for(&self, index: u64) -> Box<dyn DrawSource> {
        match self.seed {
            Some(seed) => source::seeded(seed.wrapping_add(index)),
            None => source::os_rng(),
        }
    }
}

//! Pauses after a roll, for presentation layers that animate dice.

use std::str::FromStr;
use std::time::Duration;

use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::error::DiceError;

/// Candidate pauses after a presentation-paced roll, in milliseconds.
pub const PRESENTATION_DELAYS_MS: [u64; 7] = [100, 200, 300, 400, 500, 600, 700];

/// How long a numeric die waits after rolling.
///
/// The pause never influences the rolled value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pacing {
    /// Return immediately.
    #[default]
    Instant,
    /// Sleep for one of [`PRESENTATION_DELAYS_MS`], picked at random.
    Presentation,
}

impl Pacing {
    /// The pause to take after a roll, if any.
    pub fn delay(self) -> Option<Duration> {
        match self {
            Self::Instant => None,
            Self::Presentation => PRESENTATION_DELAYS_MS
                .choose(&mut rand::rng())
                .map(|&ms| Duration::from_millis(ms)),
        }
    }

    /// Block the current thread for [`Pacing::delay`].
    pub fn pause(self) {
        if let Some(delay) = self.delay() {
            std::thread::sleep(delay);
        }
    }
}

impl FromStr for Pacing {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "instant" | "none" => Ok(Self::Instant),
            "presentation" => Ok(Self::Presentation),
            other => Err(DiceError::InvalidArgument(format!(
                "unknown pacing '{other}', expected 'instant' or 'presentation'"
            ))),
        }
    }
}

impl std::fmt::Display for Pacing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Instant => write!(f, "instant"),
            Self::Presentation => write!(f, "presentation"),
        }
    }
}

//! Dice: numeric dice, coins, and the shared [`Rollable`] interface.
//!
//! A die's mode is fixed when it is built. [`Die::new`] picks the variant
//! from the side count: more than two sides gives a [`NumericDie`] that can
//! `roll` and `roll_many`, exactly two gives a [`CoinDie`] that can only
//! `flip`. Asking a die for the other mode's operation fails with
//! [`DiceError::UnsupportedOperation`].

pub mod coin;
pub mod numeric;
pub mod pacing;
pub mod source;

pub use coin::CoinDie;
pub use numeric::NumericDie;
pub use pacing::Pacing;
pub use source::DrawSource;

use serde::{Deserialize, Serialize};

use crate::error::{DiceError, DiceResult};
use crate::notify::{Notification, SubscriptionId};

/// Behavior shared by every die, whatever its mode.
///
/// The mode-specific operations default to `UnsupportedOperation`; each die
/// type overrides the ones it actually supports.
pub trait Rollable: std::fmt::Display {
    /// Number of sides on this die.
    fn sides(&self) -> u32;

    /// The most recent outcome, or `None` if the die was never used.
    fn last_outcome(&self) -> Option<&Outcome>;

    /// Register an observer that is called after every roll, flip, or check.
    fn subscribe(&mut self, observer: Box<dyn FnMut(&Notification)>) -> SubscriptionId;

    /// Remove a previously registered observer. Returns false if it was not registered.
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;

    /// Long-form description, e.g. "8-sided die" or "coin".
    fn describe(&self) -> String {
        if self.sides() > 2 {
            format!("{}-sided die", self.sides())
        } else {
            "coin".to_string()
        }
    }

    /// Roll once, returning a value in `1..=sides`.
    fn roll(&mut self) -> DiceResult<u32> {
        Err(DiceError::unsupported("roll", self))
    }

    /// Roll `quantity` times, returning either every value or just their sum.
    fn roll_many(&mut self, _quantity: u32, _sum_only: bool) -> DiceResult<BatchRoll> {
        Err(DiceError::unsupported("roll", self))
    }

    /// Flip like a coin.
    fn flip(&mut self) -> DiceResult<CoinFace> {
        Err(DiceError::unsupported("flip", self))
    }
}

/// The two faces of a coin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoinFace {
    /// Heads.
    Heads,
    /// Tails.
    Tails,
}

impl std::fmt::Display for CoinFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Heads => write!(f, "heads"),
            Self::Tails => write!(f, "tails"),
        }
    }
}

/// What a die last produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// A single roll, or the sum of a summed batch.
    Value(u32),
    /// Every value of an unsummed batch, in draw order.
    Sequence(Vec<u32>),
    /// A coin flip.
    Face(CoinFace),
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v}"),
            Self::Sequence(values) => {
                let values: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", values.join(", "))
            }
            Self::Face(face) => write!(f, "{face}"),
        }
    }
}

/// The result of [`Rollable::roll_many`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchRoll {
    /// Every value, in draw order.
    Sequence(Vec<u32>),
    /// Only the sum of the values.
    Total(u32),
}

impl BatchRoll {
    /// Sum of the batch, whichever form it was kept in.
    ///
    /// Widened to `u64` so a sequence from a huge die always has a total.
    pub fn total(&self) -> u64 {
        match self {
            Self::Sequence(values) => values.iter().copied().map(u64::from).sum(),
            Self::Total(total) => u64::from(*total),
        }
    }
}

impl From<BatchRoll> for Outcome {
    fn from(batch: BatchRoll) -> Self {
        match batch {
            BatchRoll::Sequence(values) => Self::Sequence(values),
            BatchRoll::Total(total) => Self::Value(total),
        }
    }
}

/// A die built by side count: numeric above two sides, a coin at two.
#[derive(Debug)]
pub enum Die {
    /// A die with more than two sides.
    Numeric(NumericDie),
    /// A two-sided die, used as a coin.
    Coin(CoinDie),
}

impl Die {
    /// Build a die seeded from the operating system's entropy.
    pub fn new(sides: u32) -> DiceResult<Self> {
        Self::with_source(sides, source::os_rng())
    }

    /// Build a die with a deterministic seed.
    pub fn seeded(sides: u32, seed: u64) -> DiceResult<Self> {
        Self::with_source(sides, source::seeded(seed))
    }

    /// Build a die that draws from the given source.
    pub fn with_source(sides: u32, source: Box<dyn DrawSource>) -> DiceResult<Self> {
        match sides {
            0 | 1 => Err(DiceError::InvalidSides(sides)),
            2 => Ok(Self::Coin(CoinDie::new(source))),
            _ => NumericDie::new(sides, source).map(Self::Numeric),
        }
    }

    /// Set the pacing strategy. Coins never pause.
    pub fn with_pacing(self, pacing: Pacing) -> Self {
        match self {
            Self::Numeric(die) => Self::Numeric(die.with_pacing(pacing)),
            coin @ Self::Coin(_) => coin,
        }
    }

    /// Returns true if this die is a coin.
    pub fn is_coin(&self) -> bool {
        matches!(self, Self::Coin(_))
    }

    fn as_rollable(&self) -> &dyn Rollable {
        match self {
            Self::Numeric(die) => die,
            Self::Coin(die) => die,
        }
    }

    fn as_rollable_mut(&mut self) -> &mut dyn Rollable {
        match self {
            Self::Numeric(die) => die,
            Self::Coin(die) => die,
        }
    }
}

impl Rollable for Die {
    fn sides(&self) -> u32 {
        self.as_rollable().sides()
    }

    fn last_outcome(&self) -> Option<&Outcome> {
        self.as_rollable().last_outcome()
    }

    fn subscribe(&mut self, observer: Box<dyn FnMut(&Notification)>) -> SubscriptionId {
        self.as_rollable_mut().subscribe(observer)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.as_rollable_mut().unsubscribe(id)
    }

    fn roll(&mut self) -> DiceResult<u32> {
        self.as_rollable_mut().roll()
    }

    fn roll_many(&mut self, quantity: u32, sum_only: bool) -> DiceResult<BatchRoll> {
        self.as_rollable_mut().roll_many(quantity, sum_only)
    }

    fn flip(&mut self) -> DiceResult<CoinFace> {
        self.as_rollable_mut().flip()
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Numeric(die) => std::fmt::Display::fmt(die, f),
            Self::Coin(die) => std::fmt::Display::fmt(die, f),
        }
    }
}

impl From<&Die> for u32 {
    fn from(die: &Die) -> Self {
        die.sides()
    }
}

//! Polyhedral dice for tabletop role-playing games.
//!
//! Provides numeric dice and coins behind the [`Rollable`] trait, a d20
//! [`CheckDie`] with critical success and failure rules, free functions for
//! rolling loosely specified dice, "best three of five d6" ability score
//! generation, and a [`StandardDice`] registry. Every roll, batch, flip, and
//! check is announced synchronously to subscribed observers.

pub mod ability;
pub mod aggregate;
pub mod check;
pub mod config;
pub mod dice;
pub mod error;
pub mod notify;
pub mod registry;
pub mod testing;

pub use ability::{
    AbilityScore, AbilitySet, ExpungePolicy, ability_modifier, ability_roll, ability_rolls,
};
pub use aggregate::{DieSpec, roll, roll_batch, roll_sequence};
pub use check::{CheckDie, CheckOutcome, CheckReport, resolve_check};
pub use config::DiceConfig;
pub use dice::{
    BatchRoll, CoinDie, CoinFace, Die, DrawSource, NumericDie, Outcome, Pacing, Rollable,
};
pub use error::{DiceError, DiceResult};
pub use notify::{DieEvent, Notification, SubscriptionId};
pub use registry::{STANDARD_NAMES, StandardDice};

//! Ability checks on a d20.
//!
//! A check rolls one d20 and adds a modifier; the total must meet or beat
//! the difficulty class (DC). A natural 20 always succeeds and a natural 1
//! always fails, whatever the modifier and DC.

use serde::{Deserialize, Serialize};

use crate::dice::{BatchRoll, DrawSource, NumericDie, Outcome, Pacing, Rollable, source};
use crate::error::DiceResult;
use crate::notify::{DieEvent, Notification, SubscriptionId};

/// How a check resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckOutcome {
    /// Natural 20.
    CriticalSuccess,
    /// The modified roll met or beat the DC.
    Success {
        /// How far the total exceeded the DC.
        margin: u64,
    },
    /// The modified roll fell short of the DC.
    Failure,
    /// Natural 1.
    CriticalFailure,
}

impl CheckOutcome {
    /// Returns true for both kinds of success.
    pub fn succeeded(self) -> bool {
        matches!(self, Self::CriticalSuccess | Self::Success { .. })
    }
}

impl std::fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CriticalSuccess => write!(f, "Critical Success"),
            Self::Success { margin } => write!(f, "Success (margin {margin})"),
            Self::Failure => write!(f, "Failure"),
            Self::CriticalFailure => write!(f, "Critical Failure"),
        }
    }
}

/// `natural + modifier`, widened so no modifier can overflow it.
fn check_total(natural: u32, modifier: i32) -> i64 {
    i64::from(natural) + i64::from(modifier)
}

/// Apply the check rules to a natural d20 roll.
///
/// Any `i32` modifier and DC are accepted; the arithmetic is done in `i64`.
pub fn resolve_check(natural: u32, modifier: i32, dc: i32) -> CheckOutcome {
    match natural {
        20 => CheckOutcome::CriticalSuccess,
        1 => CheckOutcome::CriticalFailure,
        _ => {
            let total = check_total(natural, modifier);
            let dc = i64::from(dc);
            if total >= dc {
                CheckOutcome::Success {
                    margin: (total - dc).unsigned_abs(),
                }
            } else {
                CheckOutcome::Failure
            }
        }
    }
}

/// Everything about a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    /// The unmodified d20 roll.
    pub natural: u32,
    /// Modifier added to the roll.
    pub modifier: i32,
    /// Difficulty class to meet or beat.
    pub dc: i32,
    /// `natural + modifier`.
    pub total: i64,
    /// How the check resolved.
    pub outcome: CheckOutcome,
}

impl CheckReport {
    /// Build a report from a natural roll.
    pub fn new(natural: u32, modifier: i32, dc: i32) -> Self {
        Self {
            natural,
            modifier,
            dc,
            total: check_total(natural, modifier),
            outcome: resolve_check(natural, modifier, dc),
        }
    }

    /// Whether the check succeeded.
    pub fn succeeded(&self) -> bool {
        self.outcome.succeeded()
    }
}

impl std::fmt::Display for CheckReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.modifier < 0 { '-' } else { '+' };
        write!(
            f,
            "{} {sign} {} = {} vs DC {}: {}",
            self.natural,
            self.modifier.unsigned_abs(),
            self.total,
            self.dc,
            self.outcome
        )
    }
}

/// A d20 that also resolves ability checks and remembers the last result.
#[derive(Debug)]
pub struct CheckDie {
    die: NumericDie,
    last_check: Option<bool>,
}

impl CheckDie {
    /// Number of sides on a check die.
    pub const SIDES: u32 = 20;

    /// Create a check die seeded from the operating system's entropy.
    pub fn new() -> Self {
        Self::with_source(source::os_rng())
    }

    /// Create a check die with a deterministic seed.
    pub fn seeded(seed: u64) -> Self {
        Self::with_source(source::seeded(seed))
    }

    /// Create a check die drawing from the given source.
    pub fn with_source(source: Box<dyn DrawSource>) -> Self {
        Self {
            die: NumericDie::build(Self::SIDES, source),
            last_check: None,
        }
    }

    /// Set the pacing strategy applied after each roll.
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.die = self.die.with_pacing(pacing);
        self
    }

    /// Roll once and resolve a check. Returns whether it succeeded.
    pub fn check(&mut self, modifier: i32, dc: i32) -> bool {
        self.check_detailed(modifier, dc).succeeded()
    }

    /// Roll once and resolve a check, returning the full report.
    pub fn check_detailed(&mut self, modifier: i32, dc: i32) -> CheckReport {
        let natural = self.die.roll_recorded();
        let report = CheckReport::new(natural, modifier, dc);
        let success = report.succeeded();

        self.last_check = Some(success);
        tracing::debug!(natural, modifier, dc, outcome = %report.outcome, "checked");
        self.die.notify(DieEvent::Checked(success));
        report
    }

    /// The result of the most recent check, without rolling.
    pub fn last_check_result(&self) -> Option<bool> {
        self.last_check
    }
}

impl Default for CheckDie {
    fn default() -> Self {
        Self::new()
    }
}

impl Rollable for CheckDie {
    fn sides(&self) -> u32 {
        Self::SIDES
    }

    fn last_outcome(&self) -> Option<&Outcome> {
        self.die.last_outcome()
    }

    fn subscribe(&mut self, observer: Box<dyn FnMut(&Notification)>) -> SubscriptionId {
        self.die.subscribe(observer)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.die.unsubscribe(id)
    }

    fn roll(&mut self) -> DiceResult<u32> {
        self.die.roll()
    }

    fn roll_many(&mut self, quantity: u32, sum_only: bool) -> DiceResult<BatchRoll> {
        self.die.roll_many(quantity, sum_only)
    }
}

impl std::fmt::Display for CheckDie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.die, f)
    }
}

impl From<&CheckDie> for u32 {
    fn from(die: &CheckDie) -> Self {
        die.sides()
    }
}

//! Ability score generation: roll five d6, keep the best three.
//!
//! A full set is six scores sorted from highest to lowest. Under the
//! default [`ExpungePolicy`] a set whose lowest score is below 12 is thrown
//! away and rolled again from scratch.

use serde::{Deserialize, Serialize};

use crate::dice::Rollable;
use crate::error::{DiceError, DiceResult};

/// Dice rolled per ability score.
pub const ABILITY_DICE: usize = 5;
/// Highest dice kept per ability score.
pub const KEPT_DICE: usize = 3;
/// Scores in a full ability set.
pub const SET_SIZE: usize = 6;
/// Lowest acceptable score under the default expunge policy.
pub const DEFAULT_FLOOR: u32 = 12;
/// Default bound on how many sets may be thrown away.
pub const DEFAULT_MAX_REGENERATIONS: u32 = 1000;

/// One ability score and the dice behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScore {
    /// All five d6 results, ascending.
    pub rolls: [u32; ABILITY_DICE],
    /// Sum of the three highest results.
    pub total: u32,
}

impl AbilityScore {
    /// Score a set of five d6 results, in any order.
    pub fn from_rolls(mut rolls: [u32; ABILITY_DICE]) -> Self {
        rolls.sort_unstable();
        let total = rolls[ABILITY_DICE - KEPT_DICE..].iter().sum();
        Self { rolls, total }
    }

    /// The dice that were dropped.
    pub fn dropped(&self) -> &[u32] {
        &self.rolls[..ABILITY_DICE - KEPT_DICE]
    }

    /// The dice that were kept.
    pub fn kept(&self) -> &[u32] {
        &self.rolls[ABILITY_DICE - KEPT_DICE..]
    }
}

impl std::fmt::Display for AbilityScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rolls: Vec<String> = self.rolls.iter().map(|r| r.to_string()).collect();
        write!(f, "[{}] -> {}", rolls.join(", "), self.total)
    }
}

/// When to discard a weak ability set and roll again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpungePolicy {
    /// Whether weak sets are discarded at all.
    pub enabled: bool,
    /// A set whose lowest score is below this is discarded.
    pub floor: u32,
    /// Give up after discarding this many sets.
    pub max_regenerations: u32,
}

impl Default for ExpungePolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            floor: DEFAULT_FLOOR,
            max_regenerations: DEFAULT_MAX_REGENERATIONS,
        }
    }
}

impl ExpungePolicy {
    /// A policy that keeps every set.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Set the lowest acceptable score.
    pub fn with_floor(mut self, floor: u32) -> Self {
        self.floor = floor;
        self
    }

    /// Set how many sets may be discarded before giving up.
    pub fn with_max_regenerations(mut self, max: u32) -> Self {
        self.max_regenerations = max;
        self
    }

    /// Returns true if a set with this lowest score must be rolled again.
    pub fn rejects(&self, lowest: u32) -> bool {
        self.enabled && lowest < self.floor
    }
}

/// Six ability scores, highest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilitySet {
    scores: Vec<u32>,
    regenerations: u32,
}

impl AbilitySet {
    /// The scores, highest first.
    pub fn scores(&self) -> &[u32] {
        &self.scores
    }

    /// The highest score.
    pub fn highest(&self) -> u32 {
        self.scores.first().copied().unwrap_or(0)
    }

    /// The lowest score.
    pub fn lowest(&self) -> u32 {
        self.scores.last().copied().unwrap_or(0)
    }

    /// Sum of all scores.
    pub fn total(&self) -> u32 {
        self.scores.iter().sum()
    }

    /// How many weak sets were discarded before this one.
    pub fn regenerations(&self) -> u32 {
        self.regenerations
    }
}

impl std::fmt::Display for AbilitySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let scores: Vec<String> = self.scores.iter().map(|s| s.to_string()).collect();
        write!(f, "{}", scores.join(", "))
    }
}

/// The standard modifier for an ability score: `floor((score - 10) / 2)`.
pub fn ability_modifier(score: u32) -> i32 {
    (score as i32 - 10).div_euclid(2)
}

/// Roll one ability score on the given d6.
pub fn ability_roll(d6: &mut dyn Rollable) -> DiceResult<AbilityScore> {
    if d6.sides() != 6 {
        return Err(DiceError::InvalidArgument(format!(
            "ability scores are rolled on a d6, not a {d6}"
        )));
    }

    let mut rolls = [0; ABILITY_DICE];
    for roll in &mut rolls {
        *roll = d6.roll()?;
    }
    Ok(AbilityScore::from_rolls(rolls))
}

/// Roll a full ability set on the given d6, applying the expunge policy.
pub fn ability_rolls(d6: &mut dyn Rollable, policy: &ExpungePolicy) -> DiceResult<AbilitySet> {
    ability_rolls_from(|| ability_roll(&mut *d6).map(|score| score.total), policy)
}

/// Build an ability set from any source of score totals.
///
/// Draws six totals, sorts them highest first, and while the policy rejects
/// the set draws six fresh totals. Regeneration uses the same policy every
/// time and stops with [`DiceError::RegenerationLimit`] once
/// `policy.max_regenerations` sets have been discarded.
pub fn ability_rolls_from<F>(mut next_total: F, policy: &ExpungePolicy) -> DiceResult<AbilitySet>
where
    F: FnMut() -> DiceResult<u32>,
{
    let mut regenerations = 0;
    loop {
        let mut scores = (0..SET_SIZE)
            .map(|_| next_total())
            .collect::<DiceResult<Vec<u32>>>()?;
        scores.sort_unstable_by(|a, b| b.cmp(a));

        let set = AbilitySet {
            scores,
            regenerations,
        };
        if !policy.rejects(set.lowest()) {
            return Ok(set);
        }
        if regenerations >= policy.max_regenerations {
            return Err(DiceError::RegenerationLimit {
                attempts: regenerations,
            });
        }

        tracing::info!(
            lowest = set.lowest(),
            floor = policy.floor,
            "expunging low ability scores: {set}"
        );
        regenerations += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::Die;
    use crate::dice::source;
    use crate::testing::ScriptedDraws;

    /// Returns the given totals in order, counting how many were drawn.
    fn totals(values: Vec<u32>, drawn: &mut usize) -> impl FnMut() -> DiceResult<u32> + '_ {
        let mut values = values.into_iter();
        move || {
            *drawn += 1;
            Ok(values.next().expect("ran out of scripted totals"))
        }
    }

    #[test]
    fn keeps_best_three() {
        let score = AbilityScore::from_rolls([2, 3, 3, 5, 6]);
        assert_eq!(score.total, 14);
        assert_eq!(score.kept(), &[3, 5, 6]);
        assert_eq!(score.dropped(), &[2, 3]);
    }

    #[test]
    fn rolls_sorted_ascending() {
        let score = AbilityScore::from_rolls([6, 1, 4, 2, 6]);
        assert_eq!(score.rolls, [1, 2, 4, 6, 6]);
        assert_eq!(score.total, 16);
        assert_eq!(score.to_string(), "[1, 2, 4, 6, 6] -> 16");
    }

    #[test]
    fn ability_roll_uses_the_die() {
        let mut d6 = Die::with_source(6, Box::new(ScriptedDraws::new([5, 1, 6, 2, 3]))).unwrap();
        let score = ability_roll(&mut d6).unwrap();
        assert_eq!(score.rolls, [1, 2, 3, 5, 6]);
        assert_eq!(score.total, 14);
    }

    #[test]
    fn ability_roll_needs_a_d6() {
        let mut d8 = Die::seeded(8, 1).unwrap();
        assert!(matches!(
            ability_roll(&mut d8),
            Err(DiceError::InvalidArgument(_))
        ));
    }

    #[test]
    fn ability_roll_in_range() {
        let mut d6 = Die::seeded(6, 11).unwrap();
        for _ in 0..500 {
            let score = ability_roll(&mut d6).unwrap();
            assert!((3..=18).contains(&score.total));
            assert!(score.rolls.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn disabled_policy_keeps_low_set() {
        let mut drawn = 0;
        let set = ability_rolls_from(
            totals(vec![8, 10, 12, 14, 16, 18], &mut drawn),
            &ExpungePolicy::disabled(),
        )
        .unwrap();
        assert_eq!(set.scores(), &[18, 16, 14, 12, 10, 8]);
        assert_eq!(set.regenerations(), 0);
        assert_eq!(drawn, 6);
    }

    #[test]
    fn low_set_regenerated_once() {
        let mut drawn = 0;
        let set = ability_rolls_from(
            totals(
                vec![9, 15, 13, 17, 12, 14, 13, 12, 16, 15, 18, 12],
                &mut drawn,
            ),
            &ExpungePolicy::default(),
        )
        .unwrap();
        assert_eq!(set.regenerations(), 1);
        assert_eq!(drawn, 12);
        assert_eq!(set.scores(), &[18, 16, 15, 13, 12, 12]);
        assert!(set.lowest() >= DEFAULT_FLOOR);
    }

    #[test]
    fn floor_is_inclusive() {
        let mut drawn = 0;
        let set = ability_rolls_from(
            totals(vec![12, 12, 12, 12, 12, 12], &mut drawn),
            &ExpungePolicy::default(),
        )
        .unwrap();
        assert_eq!(set.regenerations(), 0);
        assert_eq!(set.total(), 72);
    }

    #[test]
    fn regeneration_is_bounded() {
        let result = ability_rolls_from(
            || Ok(3),
            &ExpungePolicy::default().with_max_regenerations(4),
        );
        assert!(matches!(
            result,
            Err(DiceError::RegenerationLimit { attempts: 4 })
        ));
    }

    #[test]
    fn custom_floor() {
        let mut drawn = 0;
        let set = ability_rolls_from(
            totals(vec![9, 10, 11, 12, 13, 14], &mut drawn),
            &ExpungePolicy::default().with_floor(9),
        )
        .unwrap();
        assert_eq!(set.lowest(), 9);
        assert_eq!(set.highest(), 14);
    }

    #[test]
    fn full_set_from_die_meets_floor() {
        let mut d6 = Die::with_source(6, source::seeded(5)).unwrap();
        let set = ability_rolls(&mut d6, &ExpungePolicy::default()).unwrap();
        assert_eq!(set.scores().len(), SET_SIZE);
        assert!(set.lowest() >= DEFAULT_FLOOR);
        assert!(set.scores().windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn modifiers() {
        assert_eq!(ability_modifier(3), -4);
        assert_eq!(ability_modifier(9), -1);
        assert_eq!(ability_modifier(10), 0);
        assert_eq!(ability_modifier(11), 0);
        assert_eq!(ability_modifier(18), 4);
    }

    #[test]
    fn set_display() {
        let mut drawn = 0;
        let set = ability_rolls_from(
            totals(vec![13, 15, 12, 18, 14, 16], &mut drawn),
            &ExpungePolicy::default(),
        )
        .unwrap();
        assert_eq!(set.to_string(), "18, 16, 15, 14, 13, 12");
    }
}

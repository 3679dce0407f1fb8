//! The standard set of dice: a coin, d4 through d12, and a check d20.

use crate::ability::{self, AbilityScore, AbilitySet};
use crate::check::{CheckDie, CheckReport};
use crate::config::DiceConfig;
use crate::dice::{Die, Rollable};
use crate::error::{DiceError, DiceResult};
use crate::notify::Notification;

/// Names of the standard dice, in registry order.
pub const STANDARD_NAMES: [&str; 7] = ["coin", "d4", "d6", "d8", "d10", "d12", "d20"];

/// One long-lived die per standard side count.
///
/// Build one per game (or per test) and lend its dice to whatever needs them.
#[derive(Debug)]
pub struct StandardDice {
    /// Two-sided coin.
    pub coin: Die,
    /// Four-sided die.
    pub d4: Die,
    /// Six-sided die.
    pub d6: Die,
    /// Eight-sided die.
    pub d8: Die,
    /// Ten-sided die.
    pub d10: Die,
    /// Twelve-sided die.
    pub d12: Die,
    /// Twenty-sided check die.
    pub d20: CheckDie,
    config: DiceConfig,
}

impl StandardDice {
    /// Build the standard dice from a configuration.
    pub fn new(config: &DiceConfig) -> DiceResult<Self> {
        let die = |index: u64, sides: u32| -> DiceResult<Die> {
            Ok(Die::with_source(sides, config.source_for(index))?.with_pacing(config.pacing))
        };

        Ok(Self {
            coin: die(0, 2)?,
            d4: die(1, 4)?,
            d6: die(2, 6)?,
            d8: die(3, 8)?,
            d10: die(4, 10)?,
            d12: die(5, 12)?,
            d20: CheckDie::with_source(config.source_for(6)).with_pacing(config.pacing),
            config: config.clone(),
        })
    }

    /// The configuration these dice were built from.
    pub fn config(&self) -> &DiceConfig {
        &self.config
    }

    /// Look up a die by name ("coin", "d4", ..., "d20"), case-insensitively.
    pub fn get(&mut self, name: &str) -> DiceResult<&mut dyn Rollable> {
        match name.trim().to_lowercase().as_str() {
            "coin" | "d2" => Ok(&mut self.coin),
            "d4" => Ok(&mut self.d4),
            "d6" => Ok(&mut self.d6),
            "d8" => Ok(&mut self.d8),
            "d10" => Ok(&mut self.d10),
            "d12" => Ok(&mut self.d12),
            "d20" => Ok(&mut self.d20),
            _ => Err(DiceError::UnknownDie(name.to_string())),
        }
    }

    /// Every standard die, in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Rollable> {
        let dice: [&dyn Rollable; 7] = [
            &self.coin, &self.d4, &self.d6, &self.d8, &self.d10, &self.d12, &self.d20,
        ];
        dice.into_iter()
    }

    /// Subscribe a copy of `observer` to every standard die.
    pub fn subscribe_all<F>(&mut self, observer: F)
    where
        F: FnMut(&Notification) + Clone + 'static,
    {
        let dice: [&mut dyn Rollable; 7] = [
            &mut self.coin,
            &mut self.d4,
            &mut self.d6,
            &mut self.d8,
            &mut self.d10,
            &mut self.d12,
            &mut self.d20,
        ];
        for die in dice {
            die.subscribe(Box::new(observer.clone()));
        }
    }

    /// Ability check on the d20; the modifier defaults to 0.
    pub fn check(&mut self, modifier: Option<i32>, dc: i32) -> CheckReport {
        self.d20.check_detailed(modifier.unwrap_or(0), dc)
    }

    /// Roll one ability score on the d6.
    pub fn ability_score(&mut self) -> DiceResult<AbilityScore> {
        ability::ability_roll(&mut self.d6)
    }

    /// Roll a full ability set on the d6 using the configured expunge policy.
    pub fn ability_set(&mut self) -> DiceResult<AbilitySet> {
        ability::ability_rolls(&mut self.d6, &self.config.expunge)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::ability::ExpungePolicy;
    use crate::dice::Outcome;

    fn dice(seed: u64) -> StandardDice {
        StandardDice::new(&DiceConfig::default().with_seed(seed)).unwrap()
    }

    #[test]
    fn registry_has_standard_dice() {
        let dice = dice(1);
        let names: Vec<String> = dice.iter().map(|d| d.to_string()).collect();
        assert_eq!(names, STANDARD_NAMES);
        assert!(dice.coin.is_coin());
        assert_eq!(u32::from(&dice.d12), 12);
        assert_eq!(u32::from(&dice.d20), 20);
    }

    #[test]
    fn lookup_by_name() {
        let mut dice = dice(1);
        for name in STANDARD_NAMES {
            assert_eq!(dice.get(name).unwrap().to_string(), name);
        }
        assert_eq!(dice.get(" D8 ").unwrap().sides(), 8);
        assert!(matches!(dice.get("d7"), Err(DiceError::UnknownDie(_))));
    }

    #[test]
    fn same_seed_same_rolls() {
        let mut a = dice(42);
        let mut b = dice(42);
        for _ in 0..10 {
            assert_eq!(a.d10.roll().unwrap(), b.d10.roll().unwrap());
            assert_eq!(a.coin.flip().unwrap(), b.coin.flip().unwrap());
        }
    }

    #[test]
    fn registries_are_isolated() {
        let mut a = dice(42);
        let b = dice(42);
        a.d6.roll().unwrap();
        assert!(a.d6.last_outcome().is_some());
        assert!(b.d6.last_outcome().is_none());
    }

    #[test]
    fn check_defaults_modifier() {
        let mut dice = dice(3);
        let report = dice.check(None, 10);
        assert_eq!(report.modifier, 0);
        assert_eq!(dice.d20.last_check_result(), Some(report.succeeded()));
        assert_eq!(dice.d20.last_outcome(), Some(&Outcome::Value(report.natural)));
    }

    #[test]
    fn subscribe_all_sees_every_die() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut dice = dice(8);
        let sink = Rc::clone(&seen);
        dice.subscribe_all(move |n: &Notification| sink.borrow_mut().push(n.die.clone()));

        dice.coin.flip().unwrap();
        dice.d4.roll().unwrap();
        dice.check(Some(2), 12);

        assert_eq!(*seen.borrow(), vec!["coin", "d4", "d20", "d20"]);
    }

    #[test]
    fn ability_set_uses_config_policy() {
        let config = DiceConfig::default()
            .with_seed(5)
            .with_expunge(ExpungePolicy::disabled());
        let mut dice = StandardDice::new(&config).unwrap();
        let set = dice.ability_set().unwrap();
        assert_eq!(set.regenerations(), 0);
        assert_eq!(set.scores().len(), 6);
        assert!(matches!(dice.d6.last_outcome(), Some(Outcome::Value(_))));
    }

    #[test]
    fn ability_score_on_d6() {
        let mut dice = dice(4);
        let score = dice.ability_score().unwrap();
        assert!((3..=18).contains(&score.total));
    }
}

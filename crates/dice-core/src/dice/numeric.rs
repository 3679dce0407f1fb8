//! Dice with more than two sides.

use crate::dice::{BatchRoll, DrawSource, Outcome, Pacing, Rollable};
use crate::error::{DiceError, DiceResult};
use crate::notify::{DieEvent, Notification, Notifier, SubscriptionId};

/// A die that rolls values in `1..=sides`, with `sides > 2`.
#[derive(Debug)]
pub struct NumericDie {
    sides: u32,
    source: Box<dyn DrawSource>,
    pacing: Pacing,
    last_outcome: Option<Outcome>,
    notifier: Notifier,
}

impl NumericDie {
    /// Create a numeric die. Two-sided dice are coins; use [`CoinDie`](super::CoinDie).
    pub fn new(sides: u32, source: Box<dyn DrawSource>) -> DiceResult<Self> {
        match sides {
            0 | 1 => Err(DiceError::InvalidSides(sides)),
            2 => Err(DiceError::InvalidArgument(
                "a two-sided die is a coin; build it with Die::new(2) or CoinDie::new".to_string(),
            )),
            _ => Ok(Self::build(sides, source)),
        }
    }

    pub(crate) fn build(sides: u32, source: Box<dyn DrawSource>) -> Self {
        Self {
            sides,
            source,
            pacing: Pacing::default(),
            last_outcome: None,
            notifier: Notifier::new(),
        }
    }

    /// Set the pacing strategy applied after each single roll.
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// The pacing strategy applied after each single roll.
    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    /// Draw once, record it, notify, then pause.
    pub(crate) fn roll_recorded(&mut self) -> u32 {
        let value = self.source.draw(self.sides);
        self.last_outcome = Some(Outcome::Value(value));
        tracing::debug!(die = %self, value, "rolled");
        self.notify(DieEvent::Rolled(Outcome::Value(value)));
        self.pacing.pause();
        value
    }

    pub(crate) fn notify(&mut self, event: DieEvent) {
        let die = self.to_string();
        self.notifier.emit(&die, event);
    }
}

impl Rollable for NumericDie {
    fn sides(&self) -> u32 {
        self.sides
    }

    fn last_outcome(&self) -> Option<&Outcome> {
        self.last_outcome.as_ref()
    }

    fn subscribe(&mut self, observer: Box<dyn FnMut(&Notification)>) -> SubscriptionId {
        self.notifier.subscribe(observer)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    fn roll(&mut self) -> DiceResult<u32> {
        Ok(self.roll_recorded())
    }

    fn roll_many(&mut self, quantity: u32, sum_only: bool) -> DiceResult<BatchRoll> {
        if quantity == 0 {
            return Err(DiceError::InvalidArgument(
                "roll_many needs a quantity of at least 1".to_string(),
            ));
        }

        let values: Vec<u32> = (0..quantity)
            .map(|_| self.source.draw(self.sides))
            .collect();
        let batch = if sum_only {
            let total = values
                .iter()
                .try_fold(0u32, |acc, &value| acc.checked_add(value))
                .ok_or_else(|| DiceError::total_overflow(quantity, &*self))?;
            BatchRoll::Total(total)
        } else {
            BatchRoll::Sequence(values)
        };

        self.last_outcome = Some(batch.clone().into());
        tracing::debug!(die = %self, quantity, total = batch.total(), "rolled batch");
        self.notify(DieEvent::RolledBatch(batch.clone()));
        Ok(batch)
    }
}

impl std::fmt::Display for NumericDie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "d{}", self.sides)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use proptest::prelude::*;

    use super::*;
    use crate::dice::source;
    use crate::testing::ScriptedDraws;

    fn seeded(sides: u32, seed: u64) -> NumericDie {
        NumericDie::new(sides, source::seeded(seed)).unwrap()
    }

    /// Pearson chi-square statistic for observed counts against a uniform expectation.
    fn chi_square(counts: &[u32], draws: u32) -> f64 {
        let expected = f64::from(draws) / counts.len() as f64;
        counts
            .iter()
            .map(|&observed| {
                let diff = f64::from(observed) - expected;
                diff * diff / expected
            })
            .sum()
    }

    #[test]
    fn rejects_coin_and_degenerate_sides() {
        assert!(matches!(
            NumericDie::new(1, source::seeded(1)),
            Err(DiceError::InvalidSides(1))
        ));
        assert!(matches!(
            NumericDie::new(2, source::seeded(1)),
            Err(DiceError::InvalidArgument(_))
        ));
    }

    #[test]
    fn rolls_are_uniform() {
        // 0.1% critical values of chi-square for sides - 1 degrees of freedom.
        for (sides, critical) in [(4, 16.27), (6, 20.52), (8, 24.32), (12, 31.26), (20, 43.82)] {
            let mut die = seeded(sides, 2024);
            let mut counts = vec![0u32; sides as usize];
            for _ in 0..10_000 {
                let value = die.roll().unwrap();
                assert!((1..=sides).contains(&value), "d{sides} rolled {value}");
                counts[(value - 1) as usize] += 1;
            }
            let stat = chi_square(&counts, 10_000);
            assert!(stat < critical, "d{sides}: chi-square {stat} >= {critical}");
        }
    }

    #[test]
    fn roll_records_outcome() {
        let mut die = NumericDie::new(8, Box::new(ScriptedDraws::new([5]))).unwrap();
        assert!(die.last_outcome().is_none());
        assert_eq!(die.roll().unwrap(), 5);
        assert_eq!(die.last_outcome(), Some(&Outcome::Value(5)));
    }

    #[test]
    fn summed_batch_matches_sequence() {
        let mut a = seeded(6, 99);
        let mut b = seeded(6, 99);
        let sequence = a.roll_many(5, false).unwrap();
        let total = b.roll_many(5, true).unwrap();

        let BatchRoll::Sequence(values) = &sequence else {
            panic!("expected a sequence, got {sequence:?}");
        };
        assert_eq!(values.len(), 5);
        assert_eq!(total, BatchRoll::Total(values.iter().sum()));
        assert_eq!(b.last_outcome(), Some(&Outcome::from(total.clone())));
    }

    #[test]
    fn batch_keeps_draw_order() {
        let mut die = NumericDie::new(10, Box::new(ScriptedDraws::new([9, 2, 7]))).unwrap();
        assert_eq!(
            die.roll_many(3, false).unwrap(),
            BatchRoll::Sequence(vec![9, 2, 7])
        );
    }

    #[test]
    fn huge_sequence_batch_is_kept() {
        let source = ScriptedDraws::new([u32::MAX, u32::MAX]);
        let mut die = NumericDie::new(u32::MAX, Box::new(source)).unwrap();
        let batch = die.roll_many(2, false).unwrap();
        assert_eq!(batch.total(), 2 * u64::from(u32::MAX));
    }

    #[test]
    fn pacing_does_not_change_values() {
        let mut instant = seeded(20, 31);
        let mut paced = seeded(20, 31).with_pacing(Pacing::Presentation);
        assert_eq!(paced.pacing(), Pacing::Presentation);
        for _ in 0..3 {
            assert_eq!(instant.roll().unwrap(), paced.roll().unwrap());
        }
        assert_eq!(instant.last_outcome(), paced.last_outcome());
    }

    #[test]
    fn zero_quantity_rejected() {
        let mut die = seeded(6, 1);
        assert!(matches!(
            die.roll_many(0, false),
            Err(DiceError::InvalidArgument(_))
        ));
        assert!(die.last_outcome().is_none());
    }

    #[test]
    fn notifies_observers() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut die = NumericDie::new(6, Box::new(ScriptedDraws::new([3, 1, 2]))).unwrap();
        let sink = Rc::clone(&seen);
        die.subscribe(Box::new(move |n: &Notification| {
            sink.borrow_mut().push((n.die.clone(), n.event.clone()));
        }));

        die.roll().unwrap();
        die.roll_many(2, true).unwrap();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], ("d6".to_string(), DieEvent::Rolled(Outcome::Value(3))));
        assert_eq!(
            seen[1],
            ("d6".to_string(), DieEvent::RolledBatch(BatchRoll::Total(3)))
        );
    }

    #[test]
    fn observer_sees_state_before_return() {
        let seen = Rc::new(RefCell::new(None));
        let mut die = NumericDie::new(12, Box::new(ScriptedDraws::new([11]))).unwrap();
        let sink = Rc::clone(&seen);
        die.subscribe(Box::new(move |n: &Notification| {
            *sink.borrow_mut() = Some(n.event.name());
        }));
        die.roll().unwrap();
        assert_eq!(*seen.borrow(), Some("rolled"));
    }

    proptest! {
        #[test]
        fn roll_in_range(sides in 3u32..200, seed in any::<u64>()) {
            let mut die = seeded(sides, seed);
            let value = die.roll().unwrap();
            prop_assert!((1..=sides).contains(&value));
        }

        #[test]
        fn batch_length_and_range(sides in 3u32..100, quantity in 1u32..50, seed in any::<u64>()) {
            let mut die = seeded(sides, seed);
            let BatchRoll::Sequence(values) = die.roll_many(quantity, false).unwrap() else {
                panic!("expected a sequence");
            };
            prop_assert_eq!(values.len(), quantity as usize);
            prop_assert!(values.iter().all(|v| (1..=sides).contains(v)));
        }
    }
}

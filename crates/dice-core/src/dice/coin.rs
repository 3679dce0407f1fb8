//! Two-sided dice, flipped like coins.

use crate::dice::{CoinFace, DrawSource, Outcome, Rollable};
use crate::error::DiceResult;
use crate::notify::{DieEvent, Notification, Notifier, SubscriptionId};

/// A coin: flips to heads or tails and never rolls.
#[derive(Debug)]
pub struct CoinDie {
    source: Box<dyn DrawSource>,
    last_outcome: Option<Outcome>,
    notifier: Notifier,
}

impl CoinDie {
    /// Create a coin drawing from the given source.
    pub fn new(source: Box<dyn DrawSource>) -> Self {
        Self {
            source,
            last_outcome: None,
            notifier: Notifier::new(),
        }
    }
}

impl Rollable for CoinDie {
    fn sides(&self) -> u32 {
        2
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

    fn flip(&mut self) -> DiceResult<CoinFace> {
        let face = if self.source.draw(2) == 1 {
            CoinFace::Heads
        } else {
            CoinFace::Tails
        };
        self.last_outcome = Some(Outcome::Face(face));
        tracing::debug!(%face, "flipped");
        self.notifier.emit("coin", DieEvent::Rolled(Outcome::Face(face)));
        Ok(face)
    }
}

impl std::fmt::Display for CoinDie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "coin")
    }
}

//! Observer registration for roll, batch, and check notifications.
//!
//! Every die owns a [`Notifier`]. Observers are plain closures invoked
//! synchronously, after the die has updated its state and before the
//! operation returns to its caller.

use serde::{Deserialize, Serialize};

use crate::dice::{BatchRoll, Outcome};

/// What happened to a die.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "value", rename_all = "kebab-case")]
pub enum DieEvent {
    /// A single roll or flip.
    Rolled(Outcome),
    /// A batch roll.
    RolledBatch(BatchRoll),
    /// An ability check, carrying whether it succeeded.
    Checked(bool),
}

impl DieEvent {
    /// The event's name: "rolled", "rolled-batch", or "checked".
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rolled(_) => "rolled",
            Self::RolledBatch(_) => "rolled-batch",
            Self::Checked(_) => "checked",
        }
    }
}

/// A notification delivered to observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Short name of the die that emitted it, e.g. "d6" or "coin".
    pub die: String,
    /// What happened.
    pub event: DieEvent,
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.event {
            DieEvent::Rolled(outcome) => write!(f, "{} rolled {outcome}", self.die),
            DieEvent::RolledBatch(BatchRoll::Sequence(values)) => {
                write!(f, "{} rolled {}", self.die, Outcome::Sequence(values.clone()))
            }
            DieEvent::RolledBatch(BatchRoll::Total(total)) => {
                write!(f, "{} rolled a total of {total}", self.die)
            }
            DieEvent::Checked(true) => write!(f, "{} check succeeded", self.die),
            DieEvent::Checked(false) => write!(f, "{} check failed", self.die),
        }
    }
}

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A boxed observer callback.
pub type Observer = Box<dyn FnMut(&Notification)>;

/// The observers registered on one die.
#[derive(Default)]
pub struct Notifier {
    next_id: u64,
    observers: Vec<(SubscriptionId, Observer)>,
}

impl Notifier {
    /// Create a notifier with no observers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer.
    pub fn subscribe(&mut self, observer: Observer) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    /// Remove an observer. Returns false if the id is not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    /// Number of registered observers.
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Returns true if nobody is listening.
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Deliver an event to every observer, in registration order.
    pub fn emit(&mut self, die: &str, event: DieEvent) {
        if self.observers.is_empty() {
            return;
        }
        let notification = Notification {
            die: die.to_string(),
            event,
        };
        for (_, observer) in &mut self.observers {
            observer(&notification);
        }
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::dice::CoinFace;

    fn recorder(log: &Rc<RefCell<Vec<String>>>, tag: &'static str) -> Observer {
        let log = Rc::clone(log);
        Box::new(move |n: &Notification| log.borrow_mut().push(format!("{tag}: {n}")))
    }

    #[test]
    fn event_names() {
        assert_eq!(DieEvent::Rolled(Outcome::Value(1)).name(), "rolled");
        assert_eq!(
            DieEvent::RolledBatch(BatchRoll::Total(4)).name(),
            "rolled-batch"
        );
        assert_eq!(DieEvent::Checked(true).name(), "checked");
    }

    #[test]
    fn delivers_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut notifier = Notifier::new();
        notifier.subscribe(recorder(&log, "first"));
        notifier.subscribe(recorder(&log, "second"));

        notifier.emit("d6", DieEvent::Rolled(Outcome::Value(4)));

        assert_eq!(
            *log.borrow(),
            vec!["first: d6 rolled 4", "second: d6 rolled 4"]
        );
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut notifier = Notifier::new();
        let id = notifier.subscribe(recorder(&log, "only"));
        assert_eq!(notifier.len(), 1);

        assert!(notifier.unsubscribe(id));
        assert!(!notifier.unsubscribe(id));
        assert!(notifier.is_empty());

        notifier.emit("coin", DieEvent::Rolled(Outcome::Face(CoinFace::Heads)));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn notification_display() {
        let n = Notification {
            die: "d8".to_string(),
            event: DieEvent::RolledBatch(BatchRoll::Sequence(vec![2, 8])),
        };
        assert_eq!(n.to_string(), "d8 rolled [2, 8]");

        let n = Notification {
            die: "d20".to_string(),
            event: DieEvent::Checked(false),
        };
        assert_eq!(n.to_string(), "d20 check failed");
    }

    #[test]
    fn event_serializes_with_name() {
        let json = serde_json::to_string(&DieEvent::Checked(true)).unwrap();
        assert_eq!(json, r#"{"event":"checked","value":true}"#);
    }
}

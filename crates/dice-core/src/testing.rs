//! Testing utilities: rigged draw sources for deterministic dice.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::dice::DrawSource;

/// A draw source that replays a fixed list of values.
///
/// Clones share a draw counter, so a test can keep one clone and hand the
/// other to a die to see how many draws were made.
///
/// # Panics
///
/// `draw` panics when the script runs out, or when a scripted value is
/// outside `1..=sides` for the die asking.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDraws {
    draws: VecDeque<u32>,
    taken: Rc<Cell<usize>>,
}

impl ScriptedDraws {
    /// Script the given values, drawn front to back.
    pub fn new(draws: impl IntoIterator<Item = u32>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            taken: Rc::new(Cell::new(0)),
        }
    }

    /// How many values have been drawn so far, across all clones.
    pub fn taken(&self) -> usize {
        self.taken.get()
    }

    /// How many scripted values this instance has left.
    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl DrawSource for ScriptedDraws {
    fn draw(&mut self, sides: u32) -> u32 {
        let value = self
            .draws
            .pop_front()
            .unwrap_or_else(|| panic!("scripted draws exhausted after {}", self.taken.get()));
        assert!(
            (1..=sides).contains(&value),
            "scripted value {value} is not a valid d{sides} face"
        );
        self.taken.set(self.taken.get() + 1);
        value
    }
}

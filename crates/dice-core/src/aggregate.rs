//! Free functions for rolling whatever the caller has at hand.
//!
//! [`roll`] and [`roll_batch`] accept a [`DieSpec`]: an existing die, a bare
//! side count, text that parses as a side count, or nothing at all (a d6).
//! A bare side count gets a private temporary die that is dropped afterwards.
//! [`roll_sequence`] only takes an existing die.

use crate::dice::{Die, Rollable};
use crate::error::{DiceError, DiceResult};

/// Side count used when no die is given.
pub const DEFAULT_SIDES: u32 = 6;

const BATCH_HINT: &str =
    "roll takes a single die; use roll_batch for several dice, e.g. `roll_batch(Some(3), &mut dice.d6)`";

/// What to roll.
#[derive(Default)]
pub enum DieSpec<'a> {
    /// No die given: roll a standard d6.
    #[default]
    Standard,
    /// An existing die.
    Die(&'a mut dyn Rollable),
    /// A bare side count; a temporary die is built for it.
    Sides(u32),
    /// Text to be read as a side count, e.g. "8".
    Text(String),
    /// Several dice or side counts. Only valid for batch operations.
    Many(Vec<DieSpec<'a>>),
}

impl std::fmt::Debug for DieSpec<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Standard => write!(f, "Standard"),
            Self::Die(die) => write!(f, "Die({die})"),
            Self::Sides(sides) => write!(f, "Sides({sides})"),
            Self::Text(text) => write!(f, "Text({text:?})"),
            Self::Many(specs) => f.debug_tuple("Many").field(specs).finish(),
        }
    }
}

impl From<u32> for DieSpec<'_> {
    fn from(sides: u32) -> Self {
        Self::Sides(sides)
    }
}

impl From<&str> for DieSpec<'_> {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for DieSpec<'_> {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl<'a, R: Rollable + 'a> From<&'a mut R> for DieSpec<'a> {
    fn from(die: &'a mut R) -> Self {
        Self::Die(die)
    }
}

impl<'a, T: Into<DieSpec<'a>>> From<Option<T>> for DieSpec<'a> {
    fn from(spec: Option<T>) -> Self {
        spec.map_or(Self::Standard, Into::into)
    }
}

impl<'a, T: Into<DieSpec<'a>>> From<Vec<T>> for DieSpec<'a> {
    fn from(specs: Vec<T>) -> Self {
        Self::Many(specs.into_iter().map(Into::into).collect())
    }
}

impl<'a, T: Into<DieSpec<'a>>, const N: usize> From<[T; N]> for DieSpec<'a> {
    fn from(specs: [T; N]) -> Self {
        Self::Many(specs.into_iter().map(Into::into).collect())
    }
}

/// A die ready to roll: either the caller's or a temporary one.
enum Target<'a> {
    Borrowed(&'a mut dyn Rollable),
    Temporary(Die),
}

impl Target<'_> {
    fn die(&mut self) -> &mut dyn Rollable {
        match self {
            Self::Borrowed(die) => &mut **die,
            Self::Temporary(die) => die,
        }
    }
}

fn coerce_sides(text: &str) -> DiceResult<u32> {
    text.trim().parse::<u32>().map_err(|_| {
        DiceError::InvalidArgument(format!(
            "cannot read '{text}' as a side count; pass a side count or a die, e.g. `roll(6)` or `roll(&mut dice.d8)`"
        ))
    })
}

fn target(spec: DieSpec<'_>) -> DiceResult<Target<'_>> {
    match spec {
        DieSpec::Standard => Ok(Target::Temporary(Die::new(DEFAULT_SIDES)?)),
        DieSpec::Die(die) => Ok(Target::Borrowed(die)),
        DieSpec::Sides(sides) => Ok(Target::Temporary(Die::new(sides)?)),
        DieSpec::Text(text) => Ok(Target::Temporary(Die::new(coerce_sides(&text)?)?)),
        DieSpec::Many(_) => Err(DiceError::InvalidArgument(BATCH_HINT.to_string())),
    }
}

/// Roll a single die once.
///
/// ```
/// use dice_core::aggregate::roll;
///
/// let value = roll(8u32).unwrap();
/// assert!((1..=8).contains(&value));
/// assert!(roll("twelve").is_err());
/// ```
pub fn roll<'a>(spec: impl Into<DieSpec<'a>>) -> DiceResult<u32> {
    target(spec.into())?.die().roll()
}

/// Roll one kind of die `count` times (default 1) and return the total.
///
/// With no die, rolls d6s. A bare side count builds one temporary die
/// that is rolled every time.
pub fn roll_batch<'a>(count: Option<u32>, spec: impl Into<DieSpec<'a>>) -> DiceResult<u32> {
    let count = count.unwrap_or(1);
    let mut target = target(spec.into())?;
    let die = target.die();

    let mut total: u32 = 0;
    for _ in 0..count {
        let value = die.roll()?;
        total = total
            .checked_add(value)
            .ok_or_else(|| DiceError::total_overflow(count, &*die))?;
    }
    tracing::debug!(die = %die, count, total, "batch rolled");
    Ok(total)
}

/// Roll an existing die `count` times and return every value in draw order.
pub fn roll_sequence(count: u32, die: &mut dyn Rollable) -> DiceResult<Vec<u32>> {
    (0..count).map(|_| die.roll()).collect()
}

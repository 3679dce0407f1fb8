pub mod ability;
pub mod check;
pub mod list;
pub mod roll;

use dice_core::{DieSpec, StandardDice};
use serde_json::Value;

/// Die used when no spec is given on the command line.
const DEFAULT_DIE: &str = "d6";

/// A die named on the command line, resolved against the standard dice.
struct Resolved<'a> {
    /// Display name, e.g. "d8".
    label: String,
    spec: DieSpec<'a>,
}

/// Resolve a die name or side count.
///
/// Names and side counts of standard dice ("d8", "8", "coin") borrow the
/// registry die, so `--seed` makes them reproducible. Any other side count
/// ("7" or "d7") becomes a temporary die; anything else is left for the
/// core to reject.
fn resolve<'a>(dice: &'a mut StandardDice, spec: Option<&str>) -> Resolved<'a> {
    let text = spec.unwrap_or(DEFAULT_DIE).trim();
    let sides = text
        .parse::<u32>()
        .ok()
        .or_else(|| text.strip_prefix(['d', 'D'])?.parse().ok());
    let name = sides.map_or_else(|| text.to_lowercase(), |sides| format!("d{sides}"));

    match dice.get(&name) {
        Ok(die) => Resolved {
            label: die.to_string(),
            spec: DieSpec::Die(die),
        },
        Err(_) => Resolved {
            label: name,
            spec: sides.map_or_else(|| DieSpec::Text(text.to_string()), DieSpec::Sides),
        },
    }
}

/// Print a JSON value to stdout.
fn print_json(value: &Value) -> Result<(), String> {
    let out = serde_json::to_string_pretty(value).map_err(|e| format!("JSON error: {e}"))?;
    println!("{out}");
    Ok(())
}

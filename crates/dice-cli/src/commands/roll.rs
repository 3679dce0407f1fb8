use colored::Colorize;
use dice_core::{Die, DieSpec, Rollable, StandardDice, roll_batch, roll_sequence};
use serde_json::json;

use super::{Resolved, print_json, resolve};

pub fn single(dice: &mut StandardDice, spec: Option<&str>, json: bool) -> Result<(), String> {
    let Resolved { label, spec } = resolve(dice, spec);
    let value = dice_core::roll(spec).map_err(|e| e.to_string())?;

    if json {
        return print_json(&json!({ "die": label, "value": value }));
    }
    println!("  {} {}", label.dimmed(), value.to_string().bold());
    Ok(())
}

pub fn batch(
    dice: &mut StandardDice,
    count: u32,
    spec: Option<&str>,
    json: bool,
) -> Result<(), String> {
    let Resolved { label, spec } = resolve(dice, spec);
    let total = roll_batch(Some(count), spec).map_err(|e| e.to_string())?;

    if json {
        return print_json(&json!({ "die": label, "count": count, "total": total }));
    }
    println!(
        "  {} {}",
        format!("{count}{label}").dimmed(),
        total.to_string().bold()
    );
    Ok(())
}

pub fn sequence(
    dice: &mut StandardDice,
    count: u32,
    spec: Option<&str>,
    json: bool,
) -> Result<(), String> {
    let Resolved { label, spec } = resolve(dice, spec);
    let values = match spec {
        DieSpec::Die(die) => roll_sequence(count, die),
        DieSpec::Sides(sides) => {
            Die::new(sides).and_then(|mut die| roll_sequence(count, &mut die))
        }
        _ => return Err(format!("unknown die '{label}'; use a die name or side count")),
    }
    .map_err(|e| e.to_string())?;

    if json {
        return print_json(&json!({ "die": label, "values": values }));
    }
    let rendered: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    println!("  {} {}", label.dimmed(), rendered.join(", ").bold());
    Ok(())
}

pub fn flip(dice: &mut StandardDice, json: bool) -> Result<(), String> {
    let face = dice.coin.flip().map_err(|e| e.to_string())?;

    if json {
        return print_json(&json!({ "die": "coin", "face": face }));
    }
    println!("  {} {}", "coin".dimmed(), face.to_string().bold());
    Ok(())
}

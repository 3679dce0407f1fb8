use colored::Colorize;
use dice_core::{CheckOutcome, StandardDice};

use super::print_json;

pub fn run(dice: &mut StandardDice, modifier: i32, dc: i32, json: bool) -> Result<(), String> {
    let report = dice.check(Some(modifier), dc);

    if json {
        let value = serde_json::to_value(report).map_err(|e| format!("JSON error: {e}"))?;
        return print_json(&value);
    }

    let outcome = report.outcome.to_string();
    let outcome = match report.outcome {
        CheckOutcome::CriticalSuccess => outcome.green().bold(),
        CheckOutcome::Success { .. } => outcome.green(),
        CheckOutcome::Failure => outcome.red(),
        CheckOutcome::CriticalFailure => outcome.red().bold(),
    };

    let sign = if report.modifier < 0 { '-' } else { '+' };
    println!(
        "  {} {} {sign} {} = {} vs DC {}",
        "d20".dimmed(),
        report.natural.to_string().bold(),
        report.modifier.unsigned_abs(),
        report.total,
        report.dc
    );
    println!("  {outcome}");
    Ok(())
}

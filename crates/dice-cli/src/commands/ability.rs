use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use dice_core::{ExpungePolicy, StandardDice, ability_modifier, ability_rolls};

use super::print_json;

fn signed(modifier: i32) -> String {
    format!("{modifier:+}")
}

pub fn score(dice: &mut StandardDice, json: bool) -> Result<(), String> {
    let score = dice.ability_score().map_err(|e| e.to_string())?;

    if json {
        let value = serde_json::to_value(score).map_err(|e| format!("JSON error: {e}"))?;
        return print_json(&value);
    }

    let kept: Vec<String> = score.kept().iter().map(|r| r.to_string()).collect();
    let dropped: Vec<String> = score.dropped().iter().map(|r| r.to_string()).collect();
    println!(
        "  {} {} {}",
        score.total.to_string().bold(),
        format!("({})", signed(ability_modifier(score.total))).dimmed(),
        format!("kept {} dropped {}", kept.join(" "), dropped.join(" ")).dimmed()
    );
    Ok(())
}

pub fn set(dice: &mut StandardDice, keep_low: bool, json: bool) -> Result<(), String> {
    let set = if keep_low {
        ability_rolls(&mut dice.d6, &ExpungePolicy::disabled())
    } else {
        dice.ability_set()
    }
    .map_err(|e| e.to_string())?;

    if json {
        let value = serde_json::to_value(&set).map_err(|e| format!("JSON error: {e}"))?;
        return print_json(&value);
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Score", "Modifier"]);
    for (i, score) in set.scores().iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            score.to_string(),
            signed(ability_modifier(*score)),
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  total {}, {} regenerations",
        set.total().to_string().bold(),
        set.regenerations()
    );
    Ok(())
}

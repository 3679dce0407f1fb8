use comfy_table::{ContentArrangement, Table};
use dice_core::StandardDice;
use serde_json::json;

use super::print_json;

pub fn run(dice: &StandardDice, json: bool) -> Result<(), String> {
    if json {
        let entries: Vec<_> = dice
            .iter()
            .map(|die| {
                json!({
                    "name": die.to_string(),
                    "sides": die.sides(),
                    "description": die.describe(),
                })
            })
            .collect();
        return print_json(&json!(entries));
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Sides", "Description"]);
    for die in dice.iter() {
        table.add_row(vec![die.to_string(), die.sides().to_string(), die.describe()]);
    }

    println!("{table}");
    println!();
    println!("  {} dice", dice.iter().count());
    Ok(())
}

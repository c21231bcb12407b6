use anyhow::{Context, Result};
use std::process;

use chomp_core::service::Tracker;

use super::helpers::{Indexed, parse_food_type, print_json};

pub(crate) fn cmd_food_add(
    tracker: &mut Tracker,
    name: &str,
    calories: i64,
    food_type: &str,
    json: bool,
) -> Result<()> {
    let food_type = parse_food_type(food_type)?;
    let food = tracker.add_food(name, calories, food_type)?.clone();
    tracker.save().context("Failed to save food catalog")?;

    if json {
        print_json(&food)?;
    } else {
        let index = tracker.catalog().len();
        println!("Added food {index}: {food}");
    }
    Ok(())
}

pub(crate) fn cmd_food_list(tracker: &Tracker, json: bool) -> Result<()> {
    if json {
        let foods: Vec<Indexed<_>> = tracker
            .catalog()
            .foods()
            .iter()
            .enumerate()
            .map(|(i, item)| Indexed { index: i + 1, item })
            .collect();
        return print_json(&foods);
    }

    let listing = tracker.list_foods();
    if listing.ends_with('\n') {
        print!("{listing}");
    } else {
        println!("{listing}");
    }
    Ok(())
}

pub(crate) fn cmd_food_find(tracker: &Tracker, keyword: &str, json: bool) -> Result<()> {
    let hits = tracker.find_foods(keyword);

    if hits.is_empty() {
        if json {
            println!("[]");
        } else {
            eprintln!("No foods found for '{keyword}'");
        }
        process::exit(2);
    }

    if json {
        let hits: Vec<Indexed<_>> = hits
            .into_iter()
            .map(|(index, item)| Indexed { index, item })
            .collect();
        return print_json(&hits);
    }

    for (index, food) in hits {
        println!(" {index}.{food}");
    }
    Ok(())
}

pub(crate) fn cmd_food_edit(
    tracker: &mut Tracker,
    index: usize,
    calories: i64,
    json: bool,
) -> Result<()> {
    let food = tracker.edit_food(index, calories)?.clone();
    tracker.save().context("Failed to save food catalog")?;

    if json {
        print_json(&Indexed {
            index,
            item: &food,
        })?;
    } else {
        println!("Updated food {index}: {food}");
    }
    Ok(())
}

pub(crate) fn cmd_food_remove(tracker: &mut Tracker, index: usize, json: bool) -> Result<()> {
    let food = tracker.remove_food(index)?;
    tracker.save().context("Failed to save food catalog")?;

    if json {
        println!("{}", serde_json::json!({ "removed": index }));
    } else {
        println!("Removed food {index}: {food}");
    }
    Ok(())
}

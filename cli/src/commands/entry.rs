use anyhow::{Context, Result};
use std::process;

use chomp_core::models::MealType;
use chomp_core::service::Tracker;

use super::helpers::{Indexed, parse_date, parse_food_type, print_json};

pub(crate) fn cmd_add(
    tracker: &mut Tracker,
    meal: &str,
    food: &str,
    calories: Option<i64>,
    food_type: &str,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let meal: MealType = meal.parse()?;
    let food_type = parse_food_type(food_type)?;
    let date = parse_date(date)?;

    let entry = tracker
        .log_food(meal, food, date, calories, food_type)?
        .clone();
    tracker.save().context("Failed to save entries")?;

    if json {
        print_json(&entry)?;
    } else {
        let name = &entry.food.name;
        let cal = entry.food.calories;
        println!("Added {meal} entry: {name} ({cal} Kcal) on {date}");
    }
    Ok(())
}

pub(crate) fn cmd_edit(
    tracker: &mut Tracker,
    index: usize,
    calories: i64,
    json: bool,
) -> Result<()> {
    let entry = tracker.edit_entry(index, calories)?.clone();
    tracker.save().context("Failed to save entries")?;

    if json {
        print_json(&Indexed {
            index,
            item: &entry,
        })?;
    } else {
        println!("Updated entry {index}: {entry}");
    }
    Ok(())
}

pub(crate) fn cmd_remove(tracker: &mut Tracker, index: usize, json: bool) -> Result<()> {
    let entry = tracker.remove_entry(index)?;
    tracker.save().context("Failed to save entries")?;

    if json {
        println!("{}", serde_json::json!({ "removed": index }));
    } else {
        println!("Removed entry {index}: {entry}");
    }
    Ok(())
}

pub(crate) fn cmd_list(
    tracker: &Tracker,
    date: Option<String>,
    all: bool,
    json: bool,
) -> Result<()> {
    if all {
        if json {
            return print_json(tracker.log().entries());
        }
        print!("{}", with_newline(tracker.list_entries()));
        return Ok(());
    }

    let date = parse_date(date)?;
    if json {
        let entries: Vec<Indexed<_>> = tracker
            .log()
            .entries()
            .iter()
            .enumerate()
            .filter(|(_, e)| e.date == date)
            .map(|(i, e)| Indexed {
                index: i + 1,
                item: e,
            })
            .collect();
        return print_json(&entries);
    }

    print!("{}", with_newline(tracker.list_entries_on(date)));
    let total = tracker.calories_on(date);
    println!("Total for {date}: {total} Kcal");
    Ok(())
}

pub(crate) fn cmd_find(tracker: &Tracker, keyword: &str, json: bool) -> Result<()> {
    let hits = tracker.find_entries(keyword);

    if hits.is_empty() {
        if json {
            println!("[]");
        } else {
            eprintln!("No entries found for '{keyword}'");
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

    for (index, entry) in hits {
        println!(" {index}.{entry}");
    }
    Ok(())
}

/// Listings end in a newline, the empty-log sentinel does not.
fn with_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

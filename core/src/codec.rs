//! Pipe-delimited line format for persisted foods and entries.
//!
//! Food rows are `name | calories | TYPE`, entry rows are
//! `Meal | name | calories | YYYY-MM-DD | TYPE`. Dates are ISO formatted so
//! the raw rows sort lexicographically in date order.

use chrono::NaiveDate;

use crate::error::{Result, TrackerError};
use crate::models::{DATE_FORMAT, Entry, FIELD_DELIMITER, Food, FoodType, MealType};

const SEPARATOR: &str = " | ";
const FOOD_FIELDS: usize = 3;
const ENTRY_FIELDS: usize = 5;

#[must_use]
pub fn encode_food(food: &Food) -> String {
    [
        food.name.as_str(),
        &food.calories.to_string(),
        food.food_type.as_str(),
    ]
    .join(SEPARATOR)
}

#[must_use]
pub fn encode_entry(entry: &Entry) -> String {
    [
        entry.meal.label(),
        entry.food.name.as_str(),
        &entry.food.calories.to_string(),
        &entry.date.format(DATE_FORMAT).to_string(),
        entry.food.food_type.as_str(),
    ]
    .join(SEPARATOR)
}

/// Decode a food row. `line_no` is 1-based and only used for error reporting.
pub fn decode_food(line: &str, line_no: usize) -> Result<Food> {
    let fields = split_fields(line, FOOD_FIELDS, line_no)?;
    food_from_fields(fields[0], fields[1], fields[2], line_no)
}

pub fn decode_entry(line: &str, line_no: usize) -> Result<Entry> {
    let fields = split_fields(line, ENTRY_FIELDS, line_no)?;
    let meal: MealType = fields[0]
        .parse()
        .map_err(|e| format_error(line_no, &e))?;
    let food = food_from_fields(fields[1], fields[2], fields[4], line_no)?;
    let date = NaiveDate::parse_from_str(fields[3], DATE_FORMAT).map_err(|_| {
        TrackerError::Format {
            line: line_no,
            reason: format!("invalid date '{}', expected YYYY-MM-DD", fields[3]),
        }
    })?;
    Ok(Entry::new(meal, food, date))
}

/// Turn the raw bytes of one record line into text, dropping a trailing
/// carriage return.
pub fn decode_text(raw: Vec<u8>, line_no: usize) -> Result<String> {
    let mut text = String::from_utf8(raw).map_err(|_| TrackerError::Format {
        line: line_no,
        reason: "line is not valid UTF-8".to_string(),
    })?;
    if text.ends_with('\r') {
        text.pop();
    }
    Ok(text)
}

fn split_fields(line: &str, expected: usize, line_no: usize) -> Result<Vec<&str>> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).map(str::trim).collect();
    if fields.len() != expected {
        return Err(TrackerError::Format {
            line: line_no,
            reason: format!("expected {expected} fields, found {}", fields.len()),
        });
    }
    Ok(fields)
}

fn food_from_fields(name: &str, calories: &str, food_type: &str, line_no: usize) -> Result<Food> {
    let calories: u32 = calories.parse().map_err(|_| TrackerError::Format {
        line: line_no,
        reason: format!("invalid calorie value '{calories}'"),
    })?;
    let food_type: FoodType = food_type
        .parse()
        .map_err(|e| format_error(line_no, &e))?;
    Food::new(name, calories, food_type).map_err(|e| format_error(line_no, &e))
}

fn format_error(line_no: usize, cause: &TrackerError) -> TrackerError {
    TrackerError::Format {
        line: line_no,
        reason: cause.to_string(),
    }
}

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackerError};

/// Field separator used by the flat record format. Names may not contain it.
pub const FIELD_DELIMITER: char = '|';

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FoodType {
    Meal,
    Snack,
    Drink,
}

impl FoodType {
    pub const ALL: [FoodType; 3] = [FoodType::Meal, FoodType::Snack, FoodType::Drink];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FoodType::Meal => "MEAL",
            FoodType::Snack => "SNACK",
            FoodType::Drink => "DRINK",
        }
    }
}

impl fmt::Display for FoodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FoodType {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self> {
        let upper = s.trim().to_uppercase();
        FoodType::ALL
            .into_iter()
            .find(|t| t.as_str() == upper)
            .ok_or_else(|| {
                TrackerError::invalid(format!(
                    "Invalid food type '{s}'. Must be one of: MEAL, SNACK, DRINK"
                ))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];

    /// Capitalized label used in listings and persisted rows.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
            MealType::Snack => "Snack",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MealType {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        if lower == "bfast" {
            return Ok(MealType::Breakfast);
        }
        MealType::ALL
            .into_iter()
            .find(|m| m.label().to_lowercase() == lower)
            .ok_or_else(|| {
                TrackerError::invalid(format!(
                    "Invalid meal type '{s}'. Must be one of: breakfast, lunch, dinner, snack"
                ))
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    pub name: String,
    pub calories: u32,
    pub food_type: FoodType,
}

impl Food {
    pub fn new(name: &str, calories: u32, food_type: FoodType) -> Result<Self> {
        let name = validate_food_name(name)?;
        Ok(Self {
            name,
            calories,
            food_type,
        })
    }
}

impl fmt::Display for Food {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} Kcal) Type: {}",
            self.name, self.calories, self.food_type
        )
    }
}

/// A logged intake event. The food is a snapshot taken when the entry was
/// created, so catalog edits never reach it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub food: Food,
    pub meal: MealType,
    pub date: NaiveDate,
}

impl Entry {
    #[must_use]
    pub fn new(meal: MealType, food: Food, date: NaiveDate) -> Self {
        Self { food, meal, date }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.date.format(DATE_FORMAT),
            self.meal,
            self.food
        )
    }
}

/// Trim a food name and reject ones the flat record format cannot hold.
pub fn validate_food_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TrackerError::invalid("Food name must not be empty"));
    }
    if trimmed.contains(FIELD_DELIMITER) || trimmed.contains(['\n', '\r']) {
        return Err(TrackerError::invalid(format!(
            "Food name '{trimmed}' must not contain '{FIELD_DELIMITER}' or line breaks"
        )));
    }
    Ok(trimmed.to_string())
}

/// Accept a signed calorie value from user input and reject negatives.
pub fn validate_calories(calories: i64) -> Result<u32> {
    if calories < 0 {
        return Err(TrackerError::invalid(format!(
            "Calories must not be negative (got {calories})"
        )));
    }
    u32::try_from(calories)
        .map_err(|_| TrackerError::invalid(format!("Calories value {calories} is too large")))
}

/// Convert a 1-based display index into a vector offset.
pub(crate) fn resolve_index(index: usize, len: usize) -> Result<usize> {
    if index == 0 || index > len {
        return Err(TrackerError::OutOfRange { index, len });
    }
    Ok(index - 1)
}

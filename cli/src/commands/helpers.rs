use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use serde::Serialize;

use chomp_core::models::FoodType;

/// A catalog food or log entry paired with its 1-based display index.
#[derive(Serialize)]
pub(crate) struct Indexed<'a, T: Serialize> {
    pub index: usize,
    #[serde(flatten)]
    pub item: &'a T,
}

pub(crate) fn parse_date(date_str: Option<String>) -> Result<NaiveDate> {
    match date_str {
        None => Ok(Local::now().date_naive()),
        Some(s) => match s.as_str() {
            "today" => Ok(Local::now().date_naive()),
            "yesterday" => Ok(Local::now().date_naive() - chrono::Duration::days(1)),
            _ => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                .with_context(|| format!("Invalid date '{s}'. Use YYYY-MM-DD or today/yesterday")),
        },
    }
}

pub(crate) fn parse_food_type(s: &str) -> Result<FoodType> {
    Ok(s.parse::<FoodType>()?)
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

use std::fmt::Write;
use std::io::BufRead;

use tracing::debug;

use crate::codec;
use crate::error::Result;
use crate::models::{Food, FoodType, resolve_index, validate_calories};

pub const EMPTY_CATALOG_MESSAGE: &str = "Sorry, there is not any food stored";

/// Reusable food definitions, addressed by 1-based display index.
#[derive(Debug, Clone, Default)]
pub struct FoodCatalog {
    foods: Vec<Food>,
}

impl FoodCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.foods.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    #[must_use]
    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    pub fn add_food(&mut self, name: &str, calories: i64, food_type: FoodType) -> Result<&Food> {
        let calories = validate_calories(calories)?;
        let food = Food::new(name, calories, food_type)?;
        debug!(name = %food.name, calories, "catalog: add food");
        self.foods.push(food);
        Ok(&self.foods[self.foods.len() - 1])
    }

    pub fn remove_food(&mut self, index: usize) -> Result<Food> {
        let offset = resolve_index(index, self.foods.len())?;
        let food = self.foods.remove(offset);
        debug!(index, name = %food.name, "catalog: remove food");
        Ok(food)
    }

    /// Only the calorie value of a catalog food is editable.
    pub fn edit_food(&mut self, index: usize, calories: i64) -> Result<&Food> {
        let offset = resolve_index(index, self.foods.len())?;
        let calories = validate_calories(calories)?;
        let food = &mut self.foods[offset];
        food.calories = calories;
        debug!(index, name = %food.name, calories, "catalog: edit food");
        Ok(food)
    }

    pub fn get(&self, index: usize) -> Result<&Food> {
        let offset = resolve_index(index, self.foods.len())?;
        Ok(&self.foods[offset])
    }

    /// First food whose name matches exactly, ignoring case.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Food> {
        let wanted = name.trim().to_lowercase();
        self.foods.iter().find(|f| f.name.to_lowercase() == wanted)
    }

    /// Foods whose name contains `keyword`, ignoring case, with their indices.
    #[must_use]
    pub fn search(&self, keyword: &str) -> Vec<(usize, &Food)> {
        let keyword = keyword.trim().to_lowercase();
        self.foods
            .iter()
            .enumerate()
            .filter(|(_, f)| f.name.to_lowercase().contains(&keyword))
            .map(|(i, f)| (i + 1, f))
            .collect()
    }

    #[must_use]
    pub fn list_foods(&self) -> String {
        if self.foods.is_empty() {
            return EMPTY_CATALOG_MESSAGE.to_string();
        }
        self.foods
            .iter()
            .enumerate()
            .fold(String::new(), |mut out, (i, food)| {
                let _ = writeln!(out, " {}.{food}", i + 1);
                out
            })
    }

    /// Load foods from `reader`, appending them to the catalog.
    ///
    /// All-or-nothing: the first malformed line aborts the load and the
    /// catalog is left as it was.
    pub fn preload(&mut self, reader: impl BufRead) -> Result<usize> {
        let mut loaded = Vec::new();
        for (i, raw) in reader.split(b'\n').enumerate() {
            let line = codec::decode_text(raw?, i + 1)?;
            if line.trim().is_empty() {
                continue;
            }
            loaded.push(codec::decode_food(&line, i + 1)?);
        }
        let count = loaded.len();
        self.foods.extend(loaded);
        debug!(count, "catalog: preload complete");
        Ok(count)
    }

    #[must_use]
    pub fn to_records(&self) -> String {
        self.foods.iter().fold(String::new(), |mut out, food| {
            out.push_str(&codec::encode_food(food));
            out.push('\n');
            out
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrackerError;

    fn sample() -> FoodCatalog {
        let mut catalog = FoodCatalog::new();
        catalog.add_food("ramen", 600, FoodType::Meal).unwrap();
        catalog.add_food("rice", 800, FoodType::Meal).unwrap();
        catalog.add_food("Iced Milo", 150, FoodType::Drink).unwrap();
        catalog
    }

    #[test]
    fn test_add_food_rejects_negative_calories() {
        let mut catalog = FoodCatalog::new();
        let err = catalog.add_food("ramen", -1, FoodType::Meal).unwrap_err();
        assert!(matches!(err, TrackerError::InvalidInput(_)));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_list_foods() {
        let mut catalog = FoodCatalog::new();
        catalog.add_food("ramen", 600, FoodType::Meal).unwrap();
        catalog.add_food("rice", 800, FoodType::Meal).unwrap();
        assert_eq!(
            catalog.list_foods(),
            " 1.ramen (600 Kcal) Type: MEAL\n 2.rice (800 Kcal) Type: MEAL\n"
        );
    }

    #[test]
    fn test_list_foods_empty() {
        assert_eq!(FoodCatalog::new().list_foods(), EMPTY_CATALOG_MESSAGE);
    }

    #[test]
    fn test_remove_food() {
        let mut catalog = sample();
        let removed = catalog.remove_food(2).unwrap();
        assert_eq!(removed.name, "rice");
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(2).unwrap().name, "Iced Milo");
    }

    #[test]
    fn test_remove_food_out_of_range() {
        let mut catalog = sample();
        assert!(matches!(
            catalog.remove_food(0),
            Err(TrackerError::OutOfRange { index: 0, len: 3 })
        ));
        assert!(matches!(
            catalog.remove_food(4),
            Err(TrackerError::OutOfRange { index: 4, len: 3 })
        ));
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_edit_food_changes_calories_only() {
        let mut catalog = sample();
        let food = catalog.edit_food(1, 550).unwrap();
        assert_eq!(food.name, "ramen");
        assert_eq!(food.calories, 550);
        assert_eq!(food.food_type, FoodType::Meal);
        assert!(catalog.edit_food(1, -3).is_err());
        assert!(catalog.edit_food(9, 100).is_err());
        assert_eq!(catalog.get(1).unwrap().calories, 550);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let catalog = sample();
        let hits = catalog.search("RI");
        let names: Vec<(usize, &str)> = hits.iter().map(|(i, f)| (*i, f.name.as_str())).collect();
        assert_eq!(names, vec![(2, "rice")]);

        let hits = catalog.search("milo");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0, 3);
        assert!(catalog.search("pizza").is_empty());
    }

    #[test]
    fn test_find_by_name() {
        let catalog = sample();
        assert_eq!(catalog.find_by_name("iced milo").unwrap().calories, 150);
        assert!(catalog.find_by_name("milo").is_none());
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let mut catalog = FoodCatalog::new();
        catalog.add_food("ramen", 400, FoodType::Meal).unwrap();
        catalog.add_food("rice", 900, FoodType::Snack).unwrap();
        let records = catalog.to_records();
        assert_eq!(records, "ramen | 400 | MEAL\nrice | 900 | SNACK\n");

        let mut reloaded = FoodCatalog::new();
        assert_eq!(reloaded.preload(records.as_bytes()).unwrap(), 2);
        assert_eq!(reloaded.foods(), catalog.foods());
    }

    #[test]
    fn test_preload_strict_aborts_on_malformed_line() {
        let data = "ramen | 600 | MEAL\nrice | eight hundred | MEAL\nmilo | 150 | DRINK\n";
        let mut catalog = FoodCatalog::new();
        let err = catalog.preload(data.as_bytes()).unwrap_err();
        assert!(matches!(err, TrackerError::Format { line: 2, .. }));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_preload_failure_keeps_existing_foods() {
        let mut catalog = sample();
        assert!(catalog.preload("bad line\n".as_bytes()).is_err());
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_preload_rejects_invalid_utf8_as_format_error() {
        let data: &[u8] = b"ramen | 600 | MEAL\nr\xffce | 800 | MEAL\nmilo | 150 | DRINK\n";
        let mut catalog = sample();
        let err = catalog.preload(data).unwrap_err();
        assert!(matches!(err, TrackerError::Format { line: 2, .. }));
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_preload_skips_blank_lines() {
        let data = "ramen | 600 | MEAL\n\n   \nrice | 800 | MEAL\n";
        let mut catalog = FoodCatalog::new();
        assert_eq!(catalog.preload(data.as_bytes()).unwrap(), 2);
    }
}

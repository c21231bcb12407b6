use std::path::Path;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::catalog::FoodCatalog;
use crate::error::{Result, TrackerError};
use crate::log_store::EntryLog;
use crate::models::{Entry, Food, FoodType, MealType};
use crate::storage::Storage;
use crate::summary::{ReportKind, Summary};

/// Owns the catalog and the entry log, and persists them when opened on a
/// data directory.
pub struct Tracker {
    catalog: FoodCatalog,
    log: EntryLog,
    storage: Option<Storage>,
    /// Set when the catalog file failed to load; cleared by the first
    /// catalog change. While set, `save` leaves the catalog file alone.
    catalog_stale: bool,
}

impl Tracker {
    /// Load both data files from `data_dir`.
    ///
    /// A malformed catalog file is treated as "no preset foods" and is not
    /// written back until the catalog changes. The log loads whatever lines
    /// it can and is kept in date order.
    pub fn open(data_dir: &Path) -> Result<Self> {
        let storage = Storage::new(data_dir);
        let (catalog, catalog_stale) = match storage.load_catalog() {
            Ok(catalog) => (catalog, false),
            Err(e @ TrackerError::Format { .. }) => {
                warn!("Ignoring food catalog at {}: {e}", storage.food_path().display());
                (FoodCatalog::new(), true)
            }
            Err(e) => return Err(e),
        };
        let (mut log, preload) = storage.load_entries()?;
        log.sort_by_date();
        if preload.skipped > 0 {
            warn!(
                skipped = preload.skipped,
                "Skipped malformed lines in {}",
                storage.entry_path().display()
            );
        }
        debug!(
            foods = catalog.len(),
            entries = log.len(),
            "tracker: opened"
        );
        Ok(Self {
            catalog,
            log,
            storage: Some(storage),
            catalog_stale,
        })
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            catalog: FoodCatalog::new(),
            log: EntryLog::new(),
            storage: None,
            catalog_stale: false,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &FoodCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn log(&self) -> &EntryLog {
        &self.log
    }

    pub fn save(&self) -> Result<()> {
        if let Some(storage) = &self.storage {
            if self.catalog_stale {
                debug!("tracker: catalog unchanged since failed load, not saving it");
            } else {
                storage.save_catalog(&self.catalog)?;
            }
            storage.save_entries(&self.log)?;
        }
        Ok(())
    }

    // --- Entries ---

    /// Log a food by name. Unknown foods are added to the catalog first when
    /// `calories` is given. The log stays sorted by date.
    pub fn log_food(
        &mut self,
        meal: MealType,
        name: &str,
        date: NaiveDate,
        calories: Option<i64>,
        food_type: FoodType,
    ) -> Result<&Entry> {
        let food = match (self.catalog.find_by_name(name), calories) {
            (Some(food), _) => food.clone(),
            (None, Some(calories)) => {
                let food = self.catalog.add_food(name, calories, food_type)?.clone();
                self.catalog_stale = false;
                food
            }
            (None, None) => {
                return Err(TrackerError::invalid(format!(
                    "'{}' is not in the food catalog; provide its calories to add it",
                    name.trim()
                )));
            }
        };
        Ok(self.record(date, meal, food))
    }

    pub fn log_catalog_food(
        &mut self,
        meal: MealType,
        index: usize,
        date: NaiveDate,
    ) -> Result<&Entry> {
        let food: Food = self.catalog.get(index)?.clone();
        Ok(self.record(date, meal, food))
    }

    /// Append an entry and re-sort. Stable sorting leaves the new entry last
    /// among those on its date.
    fn record(&mut self, date: NaiveDate, meal: MealType, food: Food) -> &Entry {
        self.log.add_on(date, meal, food);
        self.log.sort_by_date();
        let entries = self.log.entries();
        let offset = entries.partition_point(|e| e.date <= date) - 1;
        &entries[offset]
    }

    pub fn remove_entry(&mut self, index: usize) -> Result<Entry> {
        self.log.remove(index)
    }

    pub fn edit_entry(&mut self, index: usize, calories: i64) -> Result<&Entry> {
        self.log.edit_calories(index, calories)
    }

    #[must_use]
    pub fn list_entries(&self) -> String {
        self.log.list_entries()
    }

    #[must_use]
    pub fn list_entries_on(&self, date: NaiveDate) -> String {
        self.log.list_entries_on(date)
    }

    #[must_use]
    pub fn find_entries(&self, keyword: &str) -> Vec<(usize, &Entry)> {
        self.log.search(keyword)
    }

    #[must_use]
    pub fn calories_on(&self, date: NaiveDate) -> u64 {
        self.log.calories_on(date)
    }

    // --- Foods ---

    pub fn add_food(&mut self, name: &str, calories: i64, food_type: FoodType) -> Result<&Food> {
        let food = self.catalog.add_food(name, calories, food_type)?;
        self.catalog_stale = false;
        Ok(food)
    }

    pub fn remove_food(&mut self, index: usize) -> Result<Food> {
        let food = self.catalog.remove_food(index)?;
        self.catalog_stale = false;
        Ok(food)
    }

    pub fn edit_food(&mut self, index: usize, calories: i64) -> Result<&Food> {
        let food = self.catalog.edit_food(index, calories)?;
        self.catalog_stale = false;
        Ok(food)
    }

    #[must_use]
    pub fn list_foods(&self) -> String {
        self.catalog.list_foods()
    }

    #[must_use]
    pub fn find_foods(&self, keyword: &str) -> Vec<(usize, &Food)> {
        self.catalog.search(keyword)
    }

    // --- Reports ---

    #[must_use]
    pub fn summary(&self, kind: ReportKind, today: NaiveDate) -> String {
        let days = kind.requested_days(today);
        Summary::new(self.log.entries(), days, today).generate(kind)
    }
}

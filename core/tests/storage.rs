use std::fs;

use chomp_core::TrackerError;
use chomp_core::catalog::FoodCatalog;
use chomp_core::log_store::{EMPTY_LOG_MESSAGE, EntryLog};
use chomp_core::models::{Food, FoodType, MealType};
use chomp_core::service::Tracker;
use chomp_core::storage::Storage;
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn load_from_empty_directory_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::new(dir.path());
    assert!(storage.load_catalog().unwrap().is_empty());
    let (log, summary) = storage.load_entries().unwrap();
    assert!(log.is_empty());
    assert_eq!(summary.skipped, 0);
}

#[test]
fn catalog_round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::new(dir.path());

    let mut catalog = FoodCatalog::new();
    catalog.add_food("ramen", 400, FoodType::Meal).unwrap();
    catalog.add_food("rice", 900, FoodType::Snack).unwrap();
    storage.save_catalog(&catalog).unwrap();

    let on_disk = fs::read_to_string(storage.food_path()).unwrap();
    assert_eq!(on_disk, "ramen | 400 | MEAL\nrice | 900 | SNACK\n");

    let reloaded = storage.load_catalog().unwrap();
    assert_eq!(reloaded.foods(), catalog.foods());
}

#[test]
fn entry_log_round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::new(dir.path());

    let mut log = EntryLog::new();
    log.add_on(
        date(2021, 10, 25),
        MealType::Dinner,
        Food::new("Prata", 100, FoodType::Meal).unwrap(),
    );
    log.add_on(
        date(2021, 10, 25),
        MealType::Dinner,
        Food::new("Chicken Rice", 325, FoodType::Snack).unwrap(),
    );
    storage.save_entries(&log).unwrap();

    let on_disk = fs::read_to_string(storage.entry_path()).unwrap();
    assert_eq!(
        on_disk,
        "Dinner | Prata | 100 | 2021-10-25 | MEAL\n\
         Dinner | Chicken Rice | 325 | 2021-10-25 | SNACK\n"
    );

    let (reloaded, _) = storage.load_entries().unwrap();
    assert_eq!(reloaded.entries(), log.entries());
}

#[test]
fn valid_entry_file_lists_entries() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::new(dir.path());
    fs::write(
        storage.entry_path(),
        "Lunch | ramen | 600 | 2021-10-25 | MEAL\nLunch | rice | 800 | 2021-10-25 | MEAL\n",
    )
    .unwrap();

    let (log, _) = storage.load_entries().unwrap();
    assert_eq!(
        log.list_entries(),
        " 1.[2021-10-25] Lunch: ramen (600 Kcal) Type: MEAL\n \
         2.[2021-10-25] Lunch: rice (800 Kcal) Type: MEAL\n"
    );
}

#[test]
fn entry_file_with_one_bad_line_loads_the_rest() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::new(dir.path());
    fs::write(
        storage.entry_path(),
        "Lunch | ramen | 600 | 2021-10-25 | MEAL\n\
         Lunch | rice | 800 | 2021-10-25\n\
         Dinner | rice | 800 | 2021-10-25 | MEAL\n",
    )
    .unwrap();

    let (log, summary) = storage.load_entries().unwrap();
    assert_eq!(log.len(), 2);
    assert_eq!(summary.loaded, 2);
    assert_eq!(summary.skipped, 1);
}

#[test]
fn entry_file_with_invalid_utf8_line_loads_the_rest() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::new(dir.path());
    fs::write(
        storage.entry_path(),
        b"Lunch | ramen | 600 | 2021-10-25 | MEAL\n\
          Lunch | r\xffce | 800 | 2021-10-25 | MEAL\n\
          Dinner | rice | 800 | 2021-10-25 | MEAL\n",
    )
    .unwrap();

    let (log, summary) = storage.load_entries().unwrap();
    assert_eq!(log.len(), 2);
    assert_eq!(summary.loaded, 2);
    assert_eq!(summary.skipped, 1);

    let tracker = Tracker::open(dir.path()).unwrap();
    assert_eq!(tracker.log().len(), 2);
}

#[test]
fn tracker_ignores_catalog_with_invalid_utf8() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::new(dir.path());
    fs::write(storage.food_path(), b"ramen | 600 | MEAL\nr\xffce | 800 | MEAL\n").unwrap();

    let err = storage.load_catalog().unwrap_err();
    assert!(matches!(err, TrackerError::Format { line: 2, .. }));

    let tracker = Tracker::open(dir.path()).unwrap();
    assert!(tracker.catalog().is_empty());
}

#[test]
fn tracker_sorts_entries_loaded_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::new(dir.path());
    fs::write(
        storage.entry_path(),
        "Dinner | rice | 800 | 2024-03-14 | MEAL\n\
         Lunch | ramen | 600 | 2024-03-10 | MEAL\n",
    )
    .unwrap();

    let mut tracker = Tracker::open(dir.path()).unwrap();
    assert_eq!(tracker.log().entries()[0].food.name, "ramen");

    tracker
        .log_food(
            MealType::Breakfast,
            "toast",
            date(2024, 3, 12),
            Some(200),
            FoodType::Meal,
        )
        .unwrap();
    tracker.save().unwrap();

    assert_eq!(
        fs::read_to_string(storage.entry_path()).unwrap(),
        "Lunch | ramen | 600 | 2024-03-10 | MEAL\n\
         Breakfast | toast | 200 | 2024-03-12 | MEAL\n\
         Dinner | rice | 800 | 2024-03-14 | MEAL\n"
    );
}

#[test]
fn fully_invalid_entry_file_lists_sentinel() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::new(dir.path());
    fs::write(storage.entry_path(), "this is not a record\n").unwrap();

    let (log, _) = storage.load_entries().unwrap();
    assert_eq!(log.list_entries(), EMPTY_LOG_MESSAGE);
}

#[test]
fn catalog_file_with_one_bad_line_loads_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::new(dir.path());
    fs::write(
        storage.food_path(),
        "ramen | 600 | MEAL\nrice | 800\nmilo | 150 | DRINK\n",
    )
    .unwrap();

    let err = storage.load_catalog().unwrap_err();
    assert!(matches!(err, TrackerError::Format { line: 2, .. }));
}

#[test]
fn tracker_falls_back_to_empty_catalog_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("foods.txt"), "broken\n").unwrap();

    let mut tracker = Tracker::open(dir.path()).unwrap();
    assert!(tracker.catalog().is_empty());

    tracker
        .log_food(
            MealType::Lunch,
            "ramen",
            date(2024, 3, 1),
            Some(600),
            FoodType::Meal,
        )
        .unwrap();
    tracker.save().unwrap();

    let reopened = Tracker::open(dir.path()).unwrap();
    assert_eq!(reopened.catalog().len(), 1);
    assert_eq!(reopened.log().len(), 1);
    assert_eq!(reopened.log().entries()[0].date, date(2024, 3, 1));
}

#[test]
fn unrelated_change_keeps_malformed_catalog_file() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::new(dir.path());
    let presets = "ramen | 600 | MEAL\nrice | eight hundred | MEAL\n";
    fs::write(storage.food_path(), presets).unwrap();
    fs::write(
        storage.entry_path(),
        "Lunch | ramen | 600 | 2024-03-01 | MEAL\n",
    )
    .unwrap();

    let mut tracker = Tracker::open(dir.path()).unwrap();
    tracker.remove_entry(1).unwrap();
    tracker.save().unwrap();

    assert_eq!(fs::read_to_string(storage.food_path()).unwrap(), presets);
    assert_eq!(fs::read_to_string(storage.entry_path()).unwrap(), "");
}

#[test]
fn catalog_change_replaces_malformed_catalog_file() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::new(dir.path());
    fs::write(storage.food_path(), "broken\n").unwrap();

    let mut tracker = Tracker::open(dir.path()).unwrap();
    tracker.add_food("milo", 150, FoodType::Drink).unwrap();
    tracker.save().unwrap();

    assert_eq!(
        fs::read_to_string(storage.food_path()).unwrap(),
        "milo | 150 | DRINK\n"
    );
}

#[test]
fn save_creates_missing_data_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("nested").join("data");
    let storage = Storage::new(&nested);
    storage.save_catalog(&FoodCatalog::new()).unwrap();
    assert!(nested.join("foods.txt").exists());
}

use std::fmt::Write;
use std::io::BufRead;

use chrono::{Local, NaiveDate};
use tracing::{debug, warn};

use crate::codec;
use crate::error::Result;
use crate::models::{Entry, Food, MealType, resolve_index, validate_calories};

pub const EMPTY_LOG_MESSAGE: &str = "Sorry, there is not any record stored";

/// Outcome of a lenient log load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PreloadSummary {
    pub loaded: usize,
    pub skipped: usize,
}

/// Logged intake events, addressed by 1-based display index.
///
/// Insertion order carries no meaning; call [`EntryLog::sort_by_date`] to
/// get a chronological view.
#[derive(Debug, Clone, Default)]
pub struct EntryLog {
    entries: Vec<Entry>,
}

impl EntryLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Log `food` for `meal`, dated today.
    pub fn add(&mut self, meal: MealType, food: Food) -> &Entry {
        self.add_on(Local::now().date_naive(), meal, food)
    }

    pub fn add_on(&mut self, date: NaiveDate, meal: MealType, food: Food) -> &Entry {
        debug!(%date, %meal, name = %food.name, "log: add entry");
        self.entries.push(Entry::new(meal, food, date));
        &self.entries[self.entries.len() - 1]
    }

    pub fn remove(&mut self, index: usize) -> Result<Entry> {
        let offset = resolve_index(index, self.entries.len())?;
        let entry = self.entries.remove(offset);
        debug!(index, name = %entry.food.name, "log: remove entry");
        Ok(entry)
    }

    /// Change the calorie value of the food snapshot held by an entry.
    pub fn edit_calories(&mut self, index: usize, calories: i64) -> Result<&Entry> {
        let offset = resolve_index(index, self.entries.len())?;
        let calories = validate_calories(calories)?;
        let entry = &mut self.entries[offset];
        entry.food.calories = calories;
        debug!(index, calories, "log: edit entry");
        Ok(entry)
    }

    /// Stable chronological sort; same-day entries keep their relative order.
    pub fn sort_by_date(&mut self) {
        self.entries.sort_by_key(|e| e.date);
    }

    #[must_use]
    pub fn list_entries(&self) -> String {
        self.render(|_| true)
    }

    /// Entries for a single day. Indices still refer to the whole log.
    #[must_use]
    pub fn list_entries_on(&self, date: NaiveDate) -> String {
        self.render(|e| e.date == date)
    }

    #[must_use]
    pub fn calories_on(&self, date: NaiveDate) -> u64 {
        self.entries
            .iter()
            .filter(|e| e.date == date)
            .map(|e| u64::from(e.food.calories))
            .sum()
    }

    /// Entries whose food name contains `keyword`, ignoring case.
    #[must_use]
    pub fn search(&self, keyword: &str) -> Vec<(usize, &Entry)> {
        let keyword = keyword.trim().to_lowercase();
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.food.name.to_lowercase().contains(&keyword))
            .map(|(i, e)| (i + 1, e))
            .collect()
    }

    /// Load entries from `reader`, skipping lines that fail to decode.
    pub fn preload(&mut self, reader: impl BufRead) -> Result<PreloadSummary> {
        let mut summary = PreloadSummary::default();
        for (i, raw) in reader.split(b'\n').enumerate() {
            let line_no = i + 1;
            let decoded = codec::decode_text(raw?, line_no).and_then(|line| {
                if line.trim().is_empty() {
                    Ok(None)
                } else {
                    codec::decode_entry(&line, line_no).map(Some)
                }
            });
            match decoded {
                Ok(None) => {}
                Ok(Some(entry)) => {
                    self.entries.push(entry);
                    summary.loaded += 1;
                }
                Err(e) => {
                    warn!("log: skipping record: {e}");
                    summary.skipped += 1;
                }
            }
        }
        debug!(
            loaded = summary.loaded,
            skipped = summary.skipped,
            "log: preload complete"
        );
        Ok(summary)
    }

    #[must_use]
    pub fn to_records(&self) -> String {
        self.entries.iter().fold(String::new(), |mut out, entry| {
            out.push_str(&codec::encode_entry(entry));
            out.push('\n');
            out
        })
    }

    fn render(&self, keep: impl Fn(&Entry) -> bool) -> String {
        let out = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| keep(*e))
            .fold(String::new(), |mut out, (i, entry)| {
                let _ = writeln!(out, " {}.{entry}", i + 1);
                out
            });
        if out.is_empty() {
            EMPTY_LOG_MESSAGE.to_string()
        } else {
            out
        }
    }
}

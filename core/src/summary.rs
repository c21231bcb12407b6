//! Weekly and monthly calorie reports over the entry log.
//!
//! A [`Summary`] works on a date-sorted copy of the entries, so building a
//! report never reorders or mutates the caller's log.
//!
//! The average intake figure divides the calories of the *whole* log by the
//! effective window length. It is a blended figure, not a per-day mean over
//! the window.

use std::collections::HashMap;
use std::fmt::Write;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{DATE_FORMAT, Entry};

pub const NO_ENTRIES_MESSAGE: &str = "No entries found!";
pub const UNIT_PER_SQUARE: u64 = 100;
pub const SQUARE: char = '#';

const WEEK_DAYS: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Week,
    Month,
}

impl ReportKind {
    /// Window requested before clipping to tracking history: a full week, or
    /// the days elapsed so far in the current month (today included).
    #[must_use]
    pub fn requested_days(self, today: NaiveDate) -> u32 {
        match self {
            ReportKind::Week => WEEK_DAYS,
            ReportKind::Month => today.day(),
        }
    }
}

/// Most and least frequently logged food names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoodFrequency {
    pub most: Vec<String>,
    pub most_count: usize,
    pub least: Vec<String>,
    pub least_count: usize,
}

pub struct Summary<'a> {
    entries: Vec<&'a Entry>,
    days: u32,
    today: NaiveDate,
}

impl<'a> Summary<'a> {
    /// Resolve the effective window for a report ending on `today`.
    ///
    /// The window is the requested `days` clipped to the number of days since
    /// the earliest entry (inclusive). An empty log gets a window of 1.
    #[must_use]
    pub fn new(entries: &'a [Entry], days: u32, today: NaiveDate) -> Self {
        let mut sorted: Vec<&Entry> = entries.iter().collect();
        sorted.sort_by_key(|e| e.date);

        let days = match sorted.first() {
            None => 1,
            Some(first) => {
                let period = (today - first.date).num_days() + 1;
                let period = u32::try_from(period.max(1)).unwrap_or(u32::MAX);
                days.max(1).min(period)
            }
        };

        Self {
            entries: sorted,
            days,
            today,
        }
    }

    #[must_use]
    pub fn window(&self) -> u32 {
        self.days
    }

    #[must_use]
    pub fn generate(&self, kind: ReportKind) -> String {
        match kind {
            ReportKind::Week => self.week_report(),
            ReportKind::Month => self.month_report(),
        }
    }

    /// Trend chart for the last week, blended average with its bar, and the
    /// most/least eaten foods.
    #[must_use]
    pub fn week_report(&self) -> String {
        let Some(frequency) = self.food_frequency() else {
            return NO_ENTRIES_MESSAGE.to_string();
        };
        let average = self.average_calories();
        let mut out = self.week_trend_chart();
        let _ = writeln!(
            out,
            "{}",
            bar_line("Average Daily Calorie Intake:", average)
        );
        out.push_str(&render_frequency(&frequency));
        out
    }

    #[must_use]
    pub fn month_report(&self) -> String {
        let Some(frequency) = self.food_frequency() else {
            return NO_ENTRIES_MESSAGE.to_string();
        };
        format!(
            "Average Daily Calorie Intake: {}\n{}",
            self.average_calories(),
            render_frequency(&frequency)
        )
    }

    /// Total calories of the whole log divided by the window, truncated.
    #[must_use]
    pub fn average_calories(&self) -> u64 {
        let total: u64 = self
            .entries
            .iter()
            .map(|e| u64::from(e.food.calories))
            .sum();
        total / u64::from(self.days)
    }

    /// Per-day totals from `today - (min(window, 7) - 1)` through `today`.
    #[must_use]
    pub fn daily_totals(&self) -> Vec<(NaiveDate, u64)> {
        let span = self.days.min(WEEK_DAYS);
        let Some(start) = self
            .today
            .checked_sub_days(Days::new(u64::from(span - 1)))
        else {
            return Vec::new();
        };

        let mut cursor = self.entries.partition_point(|e| e.date < start);
        let mut totals = Vec::with_capacity(span as usize);
        for day in start.iter_days().take(span as usize) {
            let mut calories = 0;
            while let Some(entry) = self.entries.get(cursor).filter(|e| e.date == day) {
                calories += u64::from(entry.food.calories);
                cursor += 1;
            }
            totals.push((day, calories));
        }
        totals
    }

    fn week_trend_chart(&self) -> String {
        self.daily_totals()
            .into_iter()
            .fold(String::new(), |mut out, (day, calories)| {
                let label = format!("{}:", day.format(DATE_FORMAT));
                let _ = writeln!(out, "{}", bar_line(&label, calories));
                out
            })
    }

    /// `None` when the log is empty.
    #[must_use]
    pub fn food_frequency(&self) -> Option<FoodFrequency> {
        let mut occurrences: HashMap<&str, usize> = HashMap::new();
        for entry in &self.entries {
            *occurrences.entry(entry.food.name.as_str()).or_insert(0) += 1;
        }

        let most_count = *occurrences.values().max()?;
        let least_count = *occurrences.values().min()?;

        // HashMap iteration order is unspecified; sort each tie group.
        let tie_group = |count: usize| {
            let mut names: Vec<String> = occurrences
                .iter()
                .filter(|(_, c)| **c == count)
                .map(|(name, _)| (*name).to_string())
                .collect();
            names.sort();
            names
        };

        Some(FoodFrequency {
            most: tie_group(most_count),
            most_count,
            least: tie_group(least_count),
            least_count,
        })
    }
}

/// One square per full [`UNIT_PER_SQUARE`] calories.
#[must_use]
pub fn draw_squares(calories: u64) -> String {
    let count = usize::try_from(calories / UNIT_PER_SQUARE).unwrap_or(usize::MAX);
    std::iter::repeat_n(SQUARE, count).collect()
}

fn bar_line(label: &str, calories: u64) -> String {
    let bar = draw_squares(calories);
    if bar.is_empty() {
        format!("{label} {calories}")
    } else {
        format!("{label} {bar} {calories}")
    }
}

fn render_frequency(frequency: &FoodFrequency) -> String {
    format!(
        "Food eaten most: [{}] [{} time(s)]\nFood eaten least: [{}] [{} time(s)]",
        frequency.most.join(", "),
        frequency.most_count,
        frequency.least.join(", "),
        frequency.least_count
    )
}

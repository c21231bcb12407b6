use anyhow::Result;
use chrono::Local;
use clap::ValueEnum;

use chomp_core::service::Tracker;
use chomp_core::summary::ReportKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Period {
    Week,
    Month,
}

impl From<Period> for ReportKind {
    fn from(period: Period) -> Self {
        match period {
            Period::Week => ReportKind::Week,
            Period::Month => ReportKind::Month,
        }
    }
}

pub(crate) fn cmd_summary(tracker: &Tracker, period: Period) -> Result<()> {
    let today = Local::now().date_naive();
    println!("{}", tracker.summary(period.into(), today));
    Ok(())
}

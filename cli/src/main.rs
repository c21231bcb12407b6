mod commands;
mod config;
mod logging;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use crate::commands::{
    Period, cmd_add, cmd_edit, cmd_find, cmd_food_add, cmd_food_edit, cmd_food_find,
    cmd_food_list, cmd_food_remove, cmd_list, cmd_remove, cmd_summary,
};
use crate::config::Config;
use chomp_core::service::Tracker;

#[derive(Parser)]
#[command(
    name = "chomp",
    version,
    about = "A simple calorie tracker CLI",
    long_about = "Log what you eat, keep a catalog of foods, and get weekly or monthly calorie reports."
)]
struct Cli {
    /// Directory holding foods.txt and entries.txt
    #[arg(long, global = true, env = "CHOMP_DATA_DIR", value_name = "PATH")]
    data_dir: Option<PathBuf>,
    /// Enable debug logging on stderr (otherwise controlled by CHOMP_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a food for a meal
    Add {
        /// Meal type: breakfast (bfast), lunch, dinner, snack
        meal: String,
        /// Food name; looked up in the catalog
        food: String,
        /// Calories, required when the food is not in the catalog yet
        #[arg(short, long, allow_negative_numbers = true)]
        calories: Option<i64>,
        /// Food type for new catalog foods: meal, snack, drink
        #[arg(short = 't', long = "type", default_value = "meal")]
        food_type: String,
        /// Date to log for (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change the calories of a logged entry
    Edit {
        /// Entry index as shown by `list`
        index: usize,
        /// New calorie value
        #[arg(allow_negative_numbers = true)]
        calories: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove a logged entry
    Remove {
        /// Entry index as shown by `list`
        index: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List logged entries (defaults to today)
    List {
        /// Date to list (YYYY-MM-DD or today/yesterday)
        #[arg(long, conflicts_with = "all")]
        date: Option<String>,
        /// List every entry
        #[arg(long)]
        all: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search logged entries by food name
    Find {
        keyword: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a weekly or monthly calorie report
    Summary {
        #[arg(value_enum)]
        period: Period,
    },
    /// Manage the food catalog
    Food {
        #[command(subcommand)]
        command: FoodCommands,
    },
}

#[derive(Subcommand)]
enum FoodCommands {
    /// Add a food to the catalog
    Add {
        /// Food name
        name: String,
        /// Calories per serving
        #[arg(allow_negative_numbers = true)]
        calories: i64,
        /// Food type: meal, snack, drink
        #[arg(short = 't', long = "type", default_value = "meal")]
        food_type: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the catalog
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search the catalog by name
    Find {
        keyword: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change the calories of a catalog food
    Edit {
        /// Food index as shown by `food list`
        index: usize,
        /// New calorie value
        #[arg(allow_negative_numbers = true)]
        calories: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove a food from the catalog
    Remove {
        /// Food index as shown by `food list`
        index: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.data_dir)?;
    let mut tracker = Tracker::open(&config.data_dir)?;

    match cli.command {
        Commands::Add {
            meal,
            food,
            calories,
            food_type,
            date,
            json,
        } => cmd_add(&mut tracker, &meal, &food, calories, &food_type, date, json),
        Commands::Edit {
            index,
            calories,
            json,
        } => cmd_edit(&mut tracker, index, calories, json),
        Commands::Remove { index, json } => cmd_remove(&mut tracker, index, json),
        Commands::List { date, all, json } => cmd_list(&tracker, date, all, json),
        Commands::Find { keyword, json } => cmd_find(&tracker, &keyword, json),
        Commands::Summary { period } => cmd_summary(&tracker, period),
        Commands::Food { command } => match command {
            FoodCommands::Add {
                name,
                calories,
                food_type,
                json,
            } => cmd_food_add(&mut tracker, &name, calories, &food_type, json),
            FoodCommands::List { json } => cmd_food_list(&tracker, json),
            FoodCommands::Find { keyword, json } => cmd_food_find(&tracker, &keyword, json),
            FoodCommands::Edit {
                index,
                calories,
                json,
            } => cmd_food_edit(&mut tracker, index, calories, json),
            FoodCommands::Remove { index, json } => cmd_food_remove(&mut tracker, index, json),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add_with_negative_calories() {
        let cli =
            Cli::try_parse_from(["chomp", "add", "lunch", "ramen", "--calories", "-5"]).unwrap();
        match cli.command {
            Commands::Add { calories, .. } => assert_eq!(calories, Some(-5)),
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_parse_summary_period() {
        let cli = Cli::try_parse_from(["chomp", "summary", "month"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Summary {
                period: Period::Month
            }
        ));
        assert!(Cli::try_parse_from(["chomp", "summary", "year"]).is_err());
    }

    #[test]
    fn test_list_date_conflicts_with_all() {
        assert!(Cli::try_parse_from(["chomp", "list", "--all", "--date", "today"]).is_err());
    }
}

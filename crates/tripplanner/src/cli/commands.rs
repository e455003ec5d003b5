//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::registry::CardKind;

/// Trip detail commands.
#[derive(Debug, Subcommand)]
pub enum TripCommand {
    /// Show the trip details form
    Show,

    /// Edit trip details (each change is saved immediately)
    Set(TripSetArgs),
}

/// Trip fields to change. Omitted fields are left as they are.
#[derive(Debug, Args)]
pub struct TripSetArgs {
    /// Destination
    #[arg(short, long)]
    pub destination: Option<String>,

    /// Start date (YYYY-MM-DD)
    #[arg(short, long, value_name = "DATE")]
    pub start: Option<String>,

    /// End date (YYYY-MM-DD)
    #[arg(short, long, value_name = "DATE")]
    pub end: Option<String>,

    /// Number of travelers
    #[arg(short, long)]
    pub travelers: Option<String>,
}

/// Budget commands.
#[derive(Debug, Subcommand)]
pub enum BudgetCommand {
    /// Show budget items and the total
    Show,

    /// Set the amount of one budget item
    Set {
        /// Item label, with or without the trailing colon
        label: String,

        /// Amount (leading number is used, anything else counts as 0)
        amount: String,
    },
}

/// Card collection commands.
#[derive(Debug, Subcommand)]
pub enum CardCommand {
    /// Append a blank card, optionally filling some fields
    Add {
        /// Card kind
        #[arg(value_enum)]
        kind: CardKindArg,

        /// Field assignment, e.g. `--set airline=Delta`
        #[arg(short = 's', long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        fields: Vec<(String, String)>,
    },

    /// Remove a card
    Remove {
        /// Card kind
        #[arg(value_enum)]
        kind: CardKindArg,

        /// 1-based position in the list
        position: usize,
    },

    /// Change one field of a card
    Edit {
        /// Card kind
        #[arg(value_enum)]
        kind: CardKindArg,

        /// 1-based position in the list
        position: usize,

        /// Field name, e.g. `flight_number`
        field: String,

        /// New value
        value: String,
    },

    /// List cards of one kind
    List {
        /// Card kind
        #[arg(value_enum)]
        kind: CardKindArg,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

/// Summary command arguments.
#[derive(Debug, Args)]
pub struct SummaryCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Itinerary command arguments.
#[derive(Debug, Args)]
pub struct ItineraryCommand {
    /// Days to append after the generated ones
    #[arg(long, default_value = "0", value_name = "N")]
    pub extra_days: u32,

    /// Activity for a day, e.g. `--activity 2=Museum`
    #[arg(short, long, value_name = "DAY=TEXT", value_parser = parse_day_activity)]
    pub activity: Vec<(u32, String)>,
}

/// Checklist command arguments.
///
/// The packing list lives for one invocation only, so item numbers refer to
/// the items added by the same command, starting at 1.
#[derive(Debug, Args)]
pub struct ChecklistCommand {
    /// Item to add, e.g. `--item Passport`
    #[arg(short, long, value_name = "NAME")]
    pub item: Vec<String>,

    /// Number of an item to tick
    #[arg(short = 'x', long, value_name = "N")]
    pub check: Vec<u64>,

    /// Number of an item to remove
    #[arg(short, long, value_name = "N")]
    pub remove: Vec<u64>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Reset command arguments.
#[derive(Debug, Args)]
pub struct ResetCommand {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Card kind argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CardKindArg {
    /// Flight cards
    #[value(alias = "flights")]
    Flight,
    /// Hotel cards
    #[value(alias = "hotels")]
    Hotel,
    /// Booking cards
    #[value(alias = "bookings")]
    Booking,
}

impl From<CardKindArg> for CardKind {
    fn from(arg: CardKindArg) -> Self {
        match arg {
            CardKindArg::Flight => CardKind::Flight,
            CardKindArg::Hotel => CardKind::Hotel,
            CardKindArg::Booking => CardKind::Booking,
        }
    }
}

/// Split `NAME=VALUE`. The value may be empty; the name may not.
fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing name in '{s}'"));
    }
    Ok((name.to_string(), value.to_string()))
}

/// Split `DAY=TEXT` where `DAY` is a 1-based day number.
fn parse_day_activity(s: &str) -> Result<(u32, String), String> {
    let (day, text) = parse_assignment(s)?;
    let day = day
        .parse()
        .map_err(|_| format!("'{day}' is not a day number"))?;
    Ok((day, text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("airline=Delta").unwrap(),
            ("airline".to_string(), "Delta".to_string())
        );
        assert_eq!(
            parse_assignment("notes=a=b").unwrap(),
            ("notes".to_string(), "a=b".to_string())
        );
        assert_eq!(
            parse_assignment("seat=").unwrap(),
            ("seat".to_string(), String::new())
        );
    }

    #[test]
    fn test_parse_assignment_rejects_bad_input() {
        assert!(parse_assignment("airline").is_err());
        assert!(parse_assignment("=Delta").is_err());
    }

    #[test]
    fn test_parse_day_activity() {
        assert_eq!(parse_day_activity("2=Museum").unwrap(), (2, "Museum".to_string()));
        assert!(parse_day_activity("two=Museum").is_err());
    }

    #[test]
    fn test_card_kind_conversion() {
        assert_eq!(CardKind::from(CardKindArg::Flight), CardKind::Flight);
        assert_eq!(CardKind::from(CardKindArg::Hotel), CardKind::Hotel);
        assert_eq!(CardKind::from(CardKindArg::Booking), CardKind::Booking);
    }
}

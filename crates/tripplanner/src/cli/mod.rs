//! Command-line interface for tripplanner.
//!
//! This module provides the CLI structure for the `tripplan` binary. Each
//! invocation behaves like one page load: the planner is bootstrapped from
//! storage, the command is applied, and the affected section is printed.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    BudgetCommand, CardCommand, CardKindArg, ChecklistCommand, ConfigCommand, ItineraryCommand,
    ResetCommand, StatusCommand, SummaryCommand, TripCommand, TripSetArgs,
};

/// tripplan - Plan a trip from the terminal
///
/// Keeps trip details, a budget, and lists of flights, hotels and bookings
/// in a local key-value store, and shows an overview of the whole plan.
#[derive(Debug, Parser)]
#[command(name = "tripplan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use a throwaway in-memory store instead of the database
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// View or edit trip details
    #[command(subcommand)]
    Trip(TripCommand),

    /// View or edit the budget
    #[command(subcommand)]
    Budget(BudgetCommand),

    /// Manage flight, hotel and booking cards
    #[command(subcommand)]
    Card(CardCommand),

    /// Show the trip overview
    Summary(SummaryCommand),

    /// Validate the dates and print a day-by-day itinerary
    Itinerary(ItineraryCommand),

    /// Build a packing checklist
    Checklist(ChecklistCommand),

    /// Show storage status
    Status(StatusCommand),

    /// View configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Delete every stored record
    Reset(ResetCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn create_test_cli(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            verbose,
            quiet,
            ephemeral: false,
            command: Command::Status(StatusCommand { json: false }),
        }
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "tripplan");
    }

    #[test]
    fn test_verbosity_levels() {
        use crate::logging::Verbosity;

        assert_eq!(create_test_cli(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(create_test_cli(3, true).verbosity(), Verbosity::Quiet);
        assert_eq!(create_test_cli(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(create_test_cli(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(create_test_cli(2, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_trip_set() {
        let args = ["tripplan", "trip", "set", "-d", "Lisbon", "--start", "2025-06-01"];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::Trip(TripCommand::Set(set)) = cli.command else {
            panic!("expected trip set");
        };
        assert_eq!(set.destination.as_deref(), Some("Lisbon"));
        assert_eq!(set.start.as_deref(), Some("2025-06-01"));
        assert!(set.end.is_none());
    }

    #[test]
    fn test_parse_budget_set() {
        let args = ["tripplan", "budget", "set", "Food & Dining", "42.5"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(
            cli.command,
            Command::Budget(BudgetCommand::Set { ref label, ref amount })
                if label == "Food & Dining" && amount == "42.5"
        ));
    }

    #[test]
    fn test_parse_card_add_with_fields() {
        let args = [
            "tripplan", "card", "add", "flight", "--set", "airline=Delta", "-s", "seat=12A",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::Card(CardCommand::Add { kind, fields }) = cli.command else {
            panic!("expected card add");
        };
        assert_eq!(kind, CardKindArg::Flight);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1], ("seat".to_string(), "12A".to_string()));
    }

    #[test]
    fn test_parse_card_kind_alias() {
        let args = ["tripplan", "card", "list", "hotels"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(
            cli.command,
            Command::Card(CardCommand::List {
                kind: CardKindArg::Hotel,
                json: false
            })
        ));
    }

    #[test]
    fn test_parse_card_edit() {
        let args = ["tripplan", "card", "edit", "booking", "2", "cost", "80"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(
            cli.command,
            Command::Card(CardCommand::Edit { position: 2, .. })
        ));
    }

    #[test]
    fn test_parse_rejects_unknown_kind() {
        let args = ["tripplan", "card", "add", "train"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_parse_itinerary() {
        let args = ["tripplan", "itinerary", "--extra-days", "2", "-a", "1=Beach"];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::Itinerary(cmd) = cli.command else {
            panic!("expected itinerary");
        };
        assert_eq!(cmd.extra_days, 2);
        assert_eq!(cmd.activity, vec![(1, "Beach".to_string())]);
    }

    #[test]
    fn test_parse_checklist() {
        let args = [
            "tripplan", "checklist", "-i", "Passport", "--item", "Charger", "-x", "1", "-r", "2",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::Checklist(cmd) = cli.command else {
            panic!("expected checklist");
        };
        assert_eq!(cmd.item, ["Passport".to_string(), "Charger".to_string()]);
        assert_eq!(cmd.check, [1]);
        assert_eq!(cmd.remove, [2]);
        assert!(!cmd.json);
    }

    #[test]
    fn test_parse_checklist_rejects_bad_number() {
        let args = ["tripplan", "checklist", "--check", "first"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_parse_global_flags() {
        let args = ["tripplan", "summary", "--json", "-c", "/custom/config.toml", "--ephemeral", "-vv"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
        assert!(cli.ephemeral);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::Summary(SummaryCommand { json: true })));
    }

    #[test]
    fn test_parse_reset() {
        let cli = Cli::try_parse_from(["tripplan", "reset", "--yes"]).unwrap();
        assert!(matches!(cli.command, Command::Reset(ResetCommand { yes: true })));
    }
}

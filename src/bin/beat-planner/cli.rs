//! CLI argument parsing for the beat-planner binary.

use std::path::PathBuf;

use beat_planner::model::Weekday;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "beat-planner", about = "Outlet visit scheduling and day tour sequencing")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate an officer's four-week plan and sequence one day of it
    Generate {
        /// Outlet CSV export
        #[arg(long)]
        input: PathBuf,
        /// Officer name as it appears in the `User` column
        #[arg(long)]
        officer: String,
        /// Officer ERP id as it appears in the `User Erp Id` column
        #[arg(long)]
        erp_id: String,
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=4))]
        week: u8,
        /// MON..SAT
        #[arg(long)]
        day: Weekday,
        /// Where to write the plan (default: generated_route_<officer>.csv)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Re-sequence one day of a previously generated plan
    Summary {
        #[arg(long)]
        plan: PathBuf,
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=4))]
        week: u8,
        #[arg(long)]
        day: Weekday,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_command_parses() {
        let cli = Cli::parse_from([
            "beat-planner",
            "generate",
            "--input",
            "outlets.csv",
            "--officer",
            "John Doe",
            "--erp-id",
            "E1",
            "--week",
            "2",
            "--day",
            "tue",
        ]);
        match cli.command {
            Command::Generate { week, day, output, .. } => {
                assert_eq!(week, 2);
                assert_eq!(day, Weekday::Tue);
                assert!(output.is_none());
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_week_outside_cycle_is_rejected() {
        let result = Cli::try_parse_from([
            "beat-planner", "summary", "--plan", "plan.csv", "--week", "5", "--day", "MON",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_day_is_rejected() {
        let result = Cli::try_parse_from([
            "beat-planner", "summary", "--plan", "plan.csv", "--week", "1", "--day", "SUN",
        ]);
        assert!(result.is_err());
    }
}

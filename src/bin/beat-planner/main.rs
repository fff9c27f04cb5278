//! beat-planner - generate outlet visit plans and day tours from CSV exports
//!
//! Results are printed to stdout as JSON; logs go to stderr.

mod cli;

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::{Value, json};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use beat_planner::config::PlannerConfig;
use beat_planner::error::PlanError;
use beat_planner::io::{load_outlets, read_plan, write_plan};
use beat_planner::model::{Officer, Weekday};
use beat_planner::pipeline::{day_summary, process_route};

use crate::cli::{Cli, Command};

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(body) => {
            println!("{}", body);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{:#}", err);
            let kind = err
                .downcast_ref::<PlanError>()
                .map(PlanError::kind)
                .unwrap_or("error");
            println!(
                "{}",
                json!({ "status": "error", "kind": kind, "message": format!("{:#}", err) })
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<Value> {
    let config = PlannerConfig::from_env()?;
    let oracle = config.oracle.build().context("building distance oracle")?;
    info!(oracle = oracle.name(), capacity = config.schedule.per_day_capacity, "configuration loaded");

    match cli.command {
        Command::Generate {
            input,
            officer,
            erp_id,
            week,
            day,
            output,
        } => {
            let officer = Officer::new(officer, erp_id);
            let file = File::open(&input).with_context(|| format!("opening {}", input.display()))?;
            let outlets = load_outlets(BufReader::new(file), &officer)?;

            let outcome = process_route(&officer, &outlets, week, day, &oracle, &config.schedule)?;

            let output = output.unwrap_or_else(|| default_plan_path(&officer));
            let file = File::create(&output).with_context(|| format!("creating {}", output.display()))?;
            write_plan(BufWriter::new(file), &outcome.plan)?;
            info!(path = %output.display(), "plan written");

            Ok(json!({
                "status": "success",
                "message": format!("Route generated successfully for {}", officer.name),
                "plan_file": output.display().to_string(),
                "rows": outcome.plan.len(),
                "week": week,
                "day": day,
                "distance_km": round_km(outcome.day.distance_km),
                "outcome": outcome.day.outcome,
                "waypoints": outcome.day.waypoints,
                "overflows": outcome.overflows,
            }))
        }
        Command::Summary { plan, week, day } => summarize(&plan, week, day, &oracle),
    }
}

fn summarize<O: beat_planner::traits::DistanceOracle>(
    path: &Path,
    week: u8,
    day: Weekday,
    oracle: &O,
) -> Result<Value> {
    let file = File::open(path)
        .with_context(|| format!("opening {} (generate a route first)", path.display()))?;
    let plan = read_plan(BufReader::new(file))?;
    let summary = day_summary(&plan, week, day, oracle)?;
    let officer = plan
        .rows()
        .first()
        .map(|row| row.officer_name.clone())
        .unwrap_or_default();

    Ok(json!({
        "status": "success",
        "message": format!("Summary for {} - Week {} {}", officer, week, day),
        "total_distance_km": round_km(summary.total_distance_km),
        "total_outlets": summary.total_outlets,
        "visit_list": summary.visits,
        "waypoints": summary.waypoints,
        "outcome": summary.outcome,
    }))
}

fn default_plan_path(officer: &Officer) -> PathBuf {
    PathBuf::from(format!("generated_route_{}.csv", officer.name.trim().replace(' ', "_")))
}

fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}

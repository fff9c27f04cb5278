//! End-to-end entry points: schedule, slice, sequence, assemble.
//!
//! Each call owns its scheduler state; nothing is shared between runs except
//! the read-only distance oracle.

use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::assembler::{RoutePlan, assemble};
use crate::error::PlanError;
use crate::model::{Officer, Outlet, Weekday};
use crate::polyline::Polyline;
use crate::scheduler::{Overflow, ScheduleOptions, schedule};
use crate::sequencer::{SequencedDay, TourOutcome, sequence_day};
use crate::traits::DistanceOracle;

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedPlan {
    pub plan: RoutePlan,
    pub overflows: Vec<Overflow>,
}

/// Schedules all of an officer's outlets and assembles the multi-week plan.
pub fn generate_plan(
    officer: &Officer,
    outlets: &[Outlet],
    options: &ScheduleOptions,
) -> Result<GeneratedPlan, PlanError> {
    let schedule = schedule(officer, outlets, options)?;
    Ok(GeneratedPlan {
        plan: assemble(schedule.assignments),
        overflows: schedule.overflows,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteOutcome {
    /// Full plan with the requested day replaced by its sequenced order.
    pub plan: RoutePlan,
    /// The requested day.
    pub day: SequencedDay,
    pub overflows: Vec<Overflow>,
}

/// Generates an officer's plan and sequences one (week, day) of it.
pub fn process_route<O: DistanceOracle>(
    officer: &Officer,
    outlets: &[Outlet],
    week: u8,
    day: Weekday,
    oracle: &O,
    options: &ScheduleOptions,
) -> Result<RouteOutcome, PlanError> {
    let GeneratedPlan { mut plan, overflows } = generate_plan(officer, outlets, options)?;
    let slice = plan.slice(week, day)?;
    let sequenced = sequence_day(&slice, oracle);
    plan.replace_slice(week, day, sequenced.rows.clone());

    info!(
        officer = %officer.name,
        week,
        day = %day,
        rows = plan.len(),
        distance_km = sequenced.distance_km,
        "route generated"
    );

    Ok(RouteOutcome {
        plan,
        day: sequenced,
        overflows,
    })
}

/// One stop of a day summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisitStop {
    pub visit_order: u32,
    pub outlet_id: String,
    pub outlet_name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    pub week: u8,
    pub day: Weekday,
    pub total_distance_km: f64,
    pub total_outlets: usize,
    pub visits: Vec<VisitStop>,
    pub waypoints: Polyline,
    pub outcome: TourOutcome,
}

/// Re-sequences one (week, day) of an existing plan, e.g. one reloaded from
/// disk, without rescheduling.
pub fn day_summary<O: DistanceOracle>(
    plan: &RoutePlan,
    week: u8,
    day: Weekday,
    oracle: &O,
) -> Result<DaySummary, PlanError> {
    let slice = plan.slice(week, day)?;
    let sequenced = sequence_day(&slice, oracle);

    let mut visits: Vec<VisitStop> = sequenced
        .rows
        .iter()
        .map(|row| VisitStop {
            visit_order: row.visit_order,
            outlet_id: row.outlet_id.clone(),
            outlet_name: row.outlet_name.clone(),
            latitude: row.latitude,
            longitude: row.longitude,
        })
        .collect();
    visits.sort_by_key(|visit| visit.visit_order);

    Ok(DaySummary {
        week,
        day,
        total_distance_km: sequenced.distance_km,
        total_outlets: visits.len(),
        visits,
        waypoints: sequenced.waypoints,
        outcome: sequenced.outcome,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct DayTour {
    pub week: u8,
    pub day: Weekday,
    pub sequenced: SequencedDay,
}

#[derive(Debug, Clone, Serialize)]
pub struct SequencedPlan {
    pub plan: RoutePlan,
    /// One entry per bucket, in canonical (week, day) order.
    pub days: Vec<DayTour>,
    pub total_distance_km: f64,
}

/// Sequences every bucket of a plan. Buckets are independent, so they are
/// processed in parallel against the shared oracle.
pub fn sequence_plan<O>(plan: &RoutePlan, oracle: &O) -> SequencedPlan
where
    O: DistanceOracle + Sync,
{
    let days: Vec<DayTour> = plan
        .buckets()
        .into_par_iter()
        .filter_map(|(week, day)| {
            let slice = plan.slice(week, day).ok()?;
            Some(DayTour {
                week,
                day,
                sequenced: sequence_day(&slice, oracle),
            })
        })
        .collect();

    let total_distance_km: f64 = days.iter().map(|tour| tour.sequenced.distance_km).sum();
    let plan = assemble(days.iter().flat_map(|tour| tour.sequenced.rows.iter().cloned()));

    info!(buckets = days.len(), total_distance_km, "plan sequenced");

    SequencedPlan {
        plan,
        days,
        total_distance_km,
    }
}

//! Test fixtures for beat-planner.
//!
//! Provides:
//! - Real Las Vegas / Henderson outlet locations (from OpenStreetMap)
//! - Outlet builders and a scripted line oracle for deterministic tours

#![allow(dead_code)]

pub mod vegas_outlets;

pub use vegas_outlets::*;

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use beat_planner::error::OracleError;
use beat_planner::model::{Officer, Outlet, ScheduleAssignment, Weekday};
use beat_planner::traits::DistanceOracle;

pub fn john_doe() -> Officer {
    Officer::new("JOHN DOE", "E1")
}

/// `count` outlets `O1..` on one beat with the same frequency and no location.
pub fn outlets(count: usize, frequency: &str) -> Vec<Outlet> {
    (1..=count)
        .map(|i| Outlet::new(format!("O{}", i), format!("Outlet {}", i), "North Zone").with_frequency(frequency))
        .collect()
}

/// Oracle over points on a north-south line.
///
/// The node is the latitude rounded to an integer and every unit is one
/// kilometer. Pairs listed as unreachable fail in both directions.
#[derive(Default)]
pub struct LineOracle {
    unreachable: HashSet<(i64, i64)>,
    unresolvable: HashSet<i64>,
    queries: AtomicUsize,
}

impl LineOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unreachable(mut self, a: i64, b: i64) -> Self {
        self.unreachable.insert((a, b));
        self.unreachable.insert((b, a));
        self
    }

    pub fn with_unresolvable(mut self, node: i64) -> Self {
        self.unresolvable.insert(node);
        self
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl DistanceOracle for LineOracle {
    type Node = i64;

    fn nearest_reference(&self, lat: f64, lon: f64) -> Result<i64, OracleError> {
        let node = lat.round() as i64;
        if self.unresolvable.contains(&node) {
            return Err(OracleError::UnresolvedLocation {
                lat,
                lon,
                reason: "off the line".to_string(),
            });
        }
        Ok(node)
    }

    fn path_distance(&self, from: &i64, to: &i64) -> Result<f64, OracleError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.unreachable.contains(&(*from, *to)) {
            return Err(OracleError::UnreachablePath {
                reason: format!("{} -> {} closed", from, to),
            });
        }
        Ok((from - to).abs() as f64 * 1000.0)
    }

    fn locate(&self, node: &i64) -> (f64, f64) {
        (*node as f64, 0.0)
    }
}

/// A week 1 / MON row for an outlet placed on the line at `lat`.
pub fn line_row(outlet_id: &str, lat: Option<f64>) -> ScheduleAssignment {
    ScheduleAssignment {
        officer_name: "JOHN DOE".to_string(),
        officer_erp_id: "E1".to_string(),
        beat: "North Zone".to_string(),
        route_name: "1JOHD_NORTHZONE_W1_MON".to_string(),
        route_id: "1JOHD_NORTHZONE_W1_MON".to_string(),
        outlet_id: outlet_id.to_string(),
        outlet_name: format!("Outlet {}", outlet_id),
        latitude: lat,
        longitude: lat.map(|_| 0.0),
        week: 1,
        day: Weekday::Mon,
        visit_order: 0,
    }
}

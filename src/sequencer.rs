//! Tour sequencer: orders one day's outlets with a nearest-neighbour walk.
//!
//! The walk is greedy and O(k²) in oracle queries, which is fine for the few
//! dozen outlets of a day. Oracle failures never abort a tour: an unresolved
//! outlet skips sequencing, an unreachable leg counts as zero distance.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::model::ScheduleAssignment;
use crate::polyline::Polyline;
use crate::traits::DistanceOracle;

/// Why a day was left in its input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    TooFewOutlets,
    MissingCoordinates,
    UnresolvedLocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TourOutcome {
    /// A tour was computed. Legs the oracle could not route added no distance.
    Sequenced { unreachable_legs: usize },
    /// Input order kept, distance reported as zero.
    Skipped { reason: SkipReason },
}

impl TourOutcome {
    pub fn is_sequenced(&self) -> bool {
        matches!(self, TourOutcome::Sequenced { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequencedDay {
    /// Rows in visiting order with `visit_order` renumbered from 1.
    pub rows: Vec<ScheduleAssignment>,
    pub waypoints: Polyline,
    pub distance_km: f64,
    pub outcome: TourOutcome,
}

/// Orders the rows of one (week, day) bucket into a tour.
///
/// The rows may come from the scheduler or from a reloaded plan; their
/// week/day are never changed, only order and `visit_order`.
pub fn sequence_day<O: DistanceOracle>(rows: &[ScheduleAssignment], oracle: &O) -> SequencedDay {
    if rows.len() < 2 {
        return skipped(rows, SkipReason::TooFewOutlets);
    }

    let Some(coords) = rows
        .iter()
        .map(ScheduleAssignment::coordinates)
        .collect::<Option<Vec<_>>>()
    else {
        return skipped(rows, SkipReason::MissingCoordinates);
    };

    let nodes = match coords
        .iter()
        .map(|&(lat, lon)| oracle.nearest_reference(lat, lon))
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(nodes) => nodes,
        Err(err) => {
            debug!(%err, "outlet could not be resolved, keeping input order");
            return skipped(rows, SkipReason::UnresolvedLocation);
        }
    };

    let tour = nearest_neighbor_tour(&nodes, oracle);

    let rows: Vec<ScheduleAssignment> = tour
        .order
        .iter()
        .enumerate()
        .map(|(position, &index)| ScheduleAssignment {
            visit_order: position as u32 + 1,
            ..rows[index].clone()
        })
        .collect();
    let waypoints = Polyline::new(tour.order.iter().map(|&index| oracle.locate(&nodes[index])).collect());
    let distance_km = tour.meters / 1000.0;

    debug!(
        outlets = rows.len(),
        distance_km,
        unreachable_legs = tour.unreachable_legs,
        "day sequenced"
    );

    SequencedDay {
        rows,
        waypoints,
        distance_km,
        outcome: TourOutcome::Sequenced {
            unreachable_legs: tour.unreachable_legs,
        },
    }
}

fn skipped(rows: &[ScheduleAssignment], reason: SkipReason) -> SequencedDay {
    debug!(outlets = rows.len(), ?reason, "sequencing skipped");

    let rows: Vec<ScheduleAssignment> = rows
        .iter()
        .enumerate()
        .map(|(position, row)| ScheduleAssignment {
            visit_order: position as u32 + 1,
            ..row.clone()
        })
        .collect();
    let waypoints = Polyline::new(rows.iter().filter_map(ScheduleAssignment::coordinates).collect());

    SequencedDay {
        rows,
        waypoints,
        distance_km: 0.0,
        outcome: TourOutcome::Skipped { reason },
    }
}

struct Tour {
    /// Positions into the input, in visiting order.
    order: Vec<usize>,
    meters: f64,
    unreachable_legs: usize,
}

/// Greedy walk from position 0 to the nearest unvisited position.
///
/// Works on positions, not nodes, so outlets sharing a node stay distinct.
/// Failed queries rank behind every successful one; ties go to the lower
/// position.
fn nearest_neighbor_tour<O: DistanceOracle>(nodes: &[O::Node], oracle: &O) -> Tour {
    let n = nodes.len();
    let mut cache = DistanceCache::new(oracle);
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    let mut meters = 0.0;
    let mut unreachable_legs = 0;

    if n == 0 {
        return Tour {
            order,
            meters,
            unreachable_legs,
        };
    }

    visited[0] = true;
    order.push(0);
    let mut current = 0;

    while order.len() < n {
        let mut best: Option<(usize, Option<f64>)> = None;

        for candidate in (0..n).filter(|&i| !visited[i]) {
            let distance = cache.distance(&nodes[current], &nodes[candidate]);
            let closer = match (best, distance) {
                (None, _) => true,
                (Some((_, None)), Some(_)) => true,
                (Some((_, Some(best_distance))), Some(distance)) => distance < best_distance,
                _ => false,
            };
            if closer {
                best = Some((candidate, distance));
            }
        }

        let Some((next, leg)) = best else {
            break;
        };

        match leg {
            Some(leg) => meters += leg,
            None => unreachable_legs += 1,
        }
        visited[next] = true;
        order.push(next);
        current = next;
    }

    Tour {
        order,
        meters,
        unreachable_legs,
    }
}

/// Memoizes oracle queries for the lifetime of one sequencing call.
struct DistanceCache<'a, O: DistanceOracle> {
    oracle: &'a O,
    known: HashMap<(O::Node, O::Node), Option<f64>>,
}

impl<'a, O: DistanceOracle> DistanceCache<'a, O> {
    fn new(oracle: &'a O) -> Self {
        Self {
            oracle,
            known: HashMap::new(),
        }
    }

    fn distance(&mut self, from: &O::Node, to: &O::Node) -> Option<f64> {
        let key = (from.clone(), to.clone());
        if let Some(known) = self.known.get(&key) {
            return *known;
        }

        let distance = match self.oracle.path_distance(from, to) {
            Ok(meters) => Some(meters),
            Err(err) => {
                debug!(%err, "leg unreachable");
                None
            }
        };
        self.known.insert(key, distance);
        distance
    }
}

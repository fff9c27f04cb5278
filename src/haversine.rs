//! Haversine distance oracle (fallback when OSRM is unavailable).
//!
//! Uses great-circle distance scaled by a road coefficient. Less accurate
//! than a road network but always available, so sequencing still produces a
//! sensible order offline.

use serde::{Deserialize, Serialize};

use crate::error::OracleError;
use crate::traits::{DistanceOracle, GridPoint, is_valid_coordinate};

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Typical ratio of road distance to straight-line distance.
const DEFAULT_ROAD_COEFFICIENT: f64 = 1.3;

/// Great-circle distance between two (lat, lon) points in kilometers.
pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lng1) = from;
    let (lat2, lng2) = to;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Straight-line oracle; every valid coordinate is its own reference node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HaversineOracle {
    /// Multiplier applied to great-circle distance to approximate roads.
    pub road_coefficient: f64,
}

impl Default for HaversineOracle {
    fn default() -> Self {
        Self {
            road_coefficient: DEFAULT_ROAD_COEFFICIENT,
        }
    }
}

impl HaversineOracle {
    pub fn new(road_coefficient: f64) -> Self {
        Self { road_coefficient }
    }
}

impl DistanceOracle for HaversineOracle {
    type Node = GridPoint;

    fn nearest_reference(&self, lat: f64, lon: f64) -> Result<Self::Node, OracleError> {
        if !is_valid_coordinate(lat, lon) {
            return Err(OracleError::UnresolvedLocation {
                lat,
                lon,
                reason: "coordinate out of range".to_string(),
            });
        }
        Ok(GridPoint::from_coords(lat, lon))
    }

    fn path_distance(&self, from: &Self::Node, to: &Self::Node) -> Result<f64, OracleError> {
        let km = haversine_km(from.coords(), to.coords());
        Ok(km * 1000.0 * self.road_coefficient)
    }

    fn locate(&self, node: &Self::Node) -> (f64, f64) {
        node.coords()
    }
}

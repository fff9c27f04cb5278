//! Distance oracle seam.
//!
//! The sequencer only needs two capabilities from a road network: snapping a
//! point to a reference node and measuring the path between two nodes.
//! Concrete backends (OSRM, haversine) implement [`DistanceOracle`].

use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::error::OracleError;

/// Identifier for a node in an oracle's reference network.
pub trait NodeId: Clone + Eq + Hash + Debug {}

impl<T> NodeId for T where T: Clone + Eq + Hash + Debug {}

/// Read-only distance source used to sequence a day's outlets.
///
/// All methods take `&self`; an oracle is never mutated by the core.
pub trait DistanceOracle {
    type Node: NodeId;

    /// Resolves a point to the nearest reference node.
    fn nearest_reference(&self, lat: f64, lon: f64) -> Result<Self::Node, OracleError>;

    /// Path distance in meters between two resolved nodes.
    fn path_distance(&self, from: &Self::Node, to: &Self::Node) -> Result<f64, OracleError>;

    /// Location (lat, lon) of a resolved node, used for tour geometry.
    fn locate(&self, node: &Self::Node) -> (f64, f64);
}

impl<O: DistanceOracle + ?Sized> DistanceOracle for &O {
    type Node = O::Node;

    fn nearest_reference(&self, lat: f64, lon: f64) -> Result<Self::Node, OracleError> {
        (**self).nearest_reference(lat, lon)
    }

    fn path_distance(&self, from: &Self::Node, to: &Self::Node) -> Result<f64, OracleError> {
        (**self).path_distance(from, to)
    }

    fn locate(&self, node: &Self::Node) -> (f64, f64) {
        (**self).locate(node)
    }
}

/// Scale of the coordinate grid: 1e-6 degrees (~11 cm at the equator).
const GRID_SCALE: f64 = 1_000_000.0;

/// A coordinate snapped to a fixed 1e-6 degree grid.
///
/// Gives float coordinates a stable `Eq + Hash` identity so both the OSRM and
/// the haversine oracles can use snapped locations as node ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPoint {
    lat_e6: i64,
    lon_e6: i64,
}

impl GridPoint {
    pub fn from_coords(lat: f64, lon: f64) -> Self {
        Self {
            lat_e6: (lat * GRID_SCALE).round() as i64,
            lon_e6: (lon * GRID_SCALE).round() as i64,
        }
    }

    pub fn coords(&self) -> (f64, f64) {
        (
            self.lat_e6 as f64 / GRID_SCALE,
            self.lon_e6 as f64 / GRID_SCALE,
        )
    }
}

/// Returns true when the point is a finite, in-range WGS84 coordinate.
pub fn is_valid_coordinate(lat: f64, lon: f64) -> bool {
    lat.is_finite() && lon.is_finite() && (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_point_round_trips_to_six_decimals() {
        let point = GridPoint::from_coords(36.1147001, -115.1728004);
        let (lat, lon) = point.coords();
        assert!((lat - 36.1147).abs() < 1e-9);
        assert!((lon - -115.1728).abs() < 1e-9);
    }

    #[test]
    fn nearby_points_share_a_grid_cell() {
        assert_eq!(
            GridPoint::from_coords(12.3456781, 77.0000001),
            GridPoint::from_coords(12.3456779, 76.9999999)
        );
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert!(is_valid_coordinate(0.0, 0.0));
        assert!(!is_valid_coordinate(91.0, 0.0));
        assert!(!is_valid_coordinate(0.0, -181.0));
        assert!(!is_valid_coordinate(f64::NAN, 0.0));
    }
}

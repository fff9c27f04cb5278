//! Tour geometry handed to visualization collaborators.
//!
//! A polyline here is the ordered list of resolved waypoints for one day, not
//! the full road geometry. Rendering happens outside this crate.

use serde::{Deserialize, Serialize};

use crate::haversine::haversine_km;

/// Ordered (latitude, longitude) waypoints of a day's tour.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Mean of all waypoints; maps center on this.
    pub fn centroid(&self) -> Option<(f64, f64)> {
        if self.points.is_empty() {
            return None;
        }
        let n = self.points.len() as f64;
        let (lat, lon) = self
            .points
            .iter()
            .fold((0.0, 0.0), |(lat, lon), (p_lat, p_lon)| (lat + p_lat, lon + p_lon));
        Some((lat / n, lon / n))
    }

    /// Great-circle length of the straight segments between waypoints.
    pub fn straight_line_km(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| haversine_km(pair[0], pair[1]))
            .sum()
    }
}

//! OSRM HTTP adapter for the distance oracle.
//!
//! Reference nodes are OSRM-snapped road locations (`/nearest`); distances
//! come from `/route` between two snapped locations.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::OracleError;
use crate::traits::{DistanceOracle, GridPoint};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
    /// Points snapping farther than this from the road network are unresolved.
    pub max_snap_meters: f64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            profile: "car".to_string(),
            timeout_secs: 10,
            max_snap_meters: 7000.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmOracle {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmOracle {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &OsrmConfig {
        &self.config
    }

    fn nearest_url(&self, lat: f64, lon: f64) -> String {
        format!(
            "{}/nearest/v1/{}/{:.6},{:.6}?number=1",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            lon,
            lat
        )
    }

    fn route_url(&self, from: (f64, f64), to: (f64, f64)) -> String {
        format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}?overview=false",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            from.1,
            from.0,
            to.1,
            to.0
        )
    }
}

impl DistanceOracle for OsrmOracle {
    type Node = GridPoint;

    fn nearest_reference(&self, lat: f64, lon: f64) -> Result<Self::Node, OracleError> {
        let unresolved = |reason: String| OracleError::UnresolvedLocation { lat, lon, reason };

        let body = self
            .client
            .get(self.nearest_url(lat, lon))
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<OsrmNearestResponse>())
            .map_err(|err| unresolved(err.to_string()))?;

        snapped_node(body, self.config.max_snap_meters).map_err(unresolved)
    }

    fn path_distance(&self, from: &Self::Node, to: &Self::Node) -> Result<f64, OracleError> {
        if from == to {
            return Ok(0.0);
        }

        let unreachable = |reason: String| OracleError::UnreachablePath { reason };

        let body = self
            .client
            .get(self.route_url(from.coords(), to.coords()))
            .send()
            .and_then(|resp| resp.json::<OsrmRouteResponse>())
            .map_err(|err| unreachable(err.to_string()))?;

        let meters = route_distance(body).map_err(unreachable)?;
        debug!(?from, ?to, meters, "osrm route");
        Ok(meters)
    }

    fn locate(&self, node: &Self::Node) -> (f64, f64) {
        node.coords()
    }
}

#[derive(Debug, Deserialize)]
struct OsrmNearestResponse {
    code: String,
    #[serde(default)]
    waypoints: Vec<OsrmWaypoint>,
}

#[derive(Debug, Deserialize)]
struct OsrmWaypoint {
    /// `[longitude, latitude]`
    location: [f64; 2],
    #[serde(default)]
    distance: f64,
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
}

fn snapped_node(body: OsrmNearestResponse, max_snap_meters: f64) -> Result<GridPoint, String> {
    if body.code != "Ok" {
        return Err(format!("osrm returned {}", body.code));
    }
    let waypoint = body
        .waypoints
        .into_iter()
        .next()
        .ok_or_else(|| "no waypoint returned".to_string())?;
    if waypoint.distance > max_snap_meters {
        return Err(format!(
            "nearest road is {:.0} m away (limit {:.0} m)",
            waypoint.distance, max_snap_meters
        ));
    }
    let [lon, lat] = waypoint.location;
    Ok(GridPoint::from_coords(lat, lon))
}

fn route_distance(body: OsrmRouteResponse) -> Result<f64, String> {
    if body.code != "Ok" {
        return Err(format!("osrm returned {}", body.code));
    }
    body.routes
        .first()
        .map(|route| route.distance)
        .ok_or_else(|| "no route returned".to_string())
}

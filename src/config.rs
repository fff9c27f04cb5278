//! Planner configuration and distance oracle selection.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, OracleError};
use crate::haversine::HaversineOracle;
use crate::osrm::{OsrmConfig, OsrmOracle};
use crate::scheduler::ScheduleOptions;
use crate::traits::{DistanceOracle, GridPoint};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OracleConfig {
    Haversine(HaversineOracle),
    Osrm(OsrmConfig),
}

impl Default for OracleConfig {
    fn default() -> Self {
        OracleConfig::Haversine(HaversineOracle::default())
    }
}

impl OracleConfig {
    pub fn build(&self) -> Result<ConfiguredOracle, reqwest::Error> {
        match self {
            OracleConfig::Haversine(oracle) => Ok(ConfiguredOracle::Haversine(oracle.clone())),
            OracleConfig::Osrm(config) => Ok(ConfiguredOracle::Osrm(OsrmOracle::new(config.clone())?)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    pub schedule: ScheduleOptions,
    pub oracle: OracleConfig,
}

impl PlannerConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// OSRM is selected when `OSRM_URL` is set; otherwise the haversine
    /// oracle is used.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`PlannerConfig::from_env`] with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut schedule = ScheduleOptions::default();
        if let Some(capacity) = parse_var(&lookup, "BEAT_PLANNER_DAY_CAPACITY")? {
            schedule.per_day_capacity = capacity;
        }

        let oracle = match lookup("OSRM_URL").filter(|url| !url.trim().is_empty()) {
            Some(base_url) => {
                let mut osrm = OsrmConfig {
                    base_url: base_url.trim().to_string(),
                    ..OsrmConfig::default()
                };
                if let Some(profile) = lookup("OSRM_PROFILE").filter(|p| !p.trim().is_empty()) {
                    osrm.profile = profile.trim().to_string();
                }
                if let Some(timeout) = parse_var(&lookup, "OSRM_TIMEOUT_SECS")? {
                    osrm.timeout_secs = timeout;
                }
                if let Some(max_snap) = parse_var(&lookup, "OSRM_MAX_SNAP_METERS")? {
                    osrm.max_snap_meters = max_snap;
                }
                OracleConfig::Osrm(osrm)
            }
            None => {
                let mut haversine = HaversineOracle::default();
                if let Some(coefficient) = parse_var::<f64>(&lookup, "HAVERSINE_ROAD_COEFFICIENT")? {
                    if !(coefficient.is_finite() && coefficient > 0.0) {
                        return Err(ConfigError::InvalidValue {
                            key: "HAVERSINE_ROAD_COEFFICIENT".to_string(),
                            value: coefficient.to_string(),
                            message: "must be a positive number".to_string(),
                        });
                    }
                    haversine.road_coefficient = coefficient;
                }
                OracleConfig::Haversine(haversine)
            }
        };

        Ok(Self { schedule, oracle })
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Ok(None),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|err| ConfigError::InvalidValue {
                key: key.to_string(),
                value,
                message: err.to_string(),
            }),
    }
}

/// Oracle chosen at runtime from [`OracleConfig`].
#[derive(Debug, Clone)]
pub enum ConfiguredOracle {
    Haversine(HaversineOracle),
    Osrm(OsrmOracle),
}

impl ConfiguredOracle {
    pub fn name(&self) -> &'static str {
        match self {
            ConfiguredOracle::Haversine(_) => "haversine",
            ConfiguredOracle::Osrm(_) => "osrm",
        }
    }
}

impl DistanceOracle for ConfiguredOracle {
    type Node = GridPoint;

    fn nearest_reference(&self, lat: f64, lon: f64) -> Result<GridPoint, OracleError> {
        match self {
            ConfiguredOracle::Haversine(oracle) => oracle.nearest_reference(lat, lon),
            ConfiguredOracle::Osrm(oracle) => oracle.nearest_reference(lat, lon),
        }
    }

    fn path_distance(&self, from: &GridPoint, to: &GridPoint) -> Result<f64, OracleError> {
        match self {
            ConfiguredOracle::Haversine(oracle) => oracle.path_distance(from, to),
            ConfiguredOracle::Osrm(oracle) => oracle.path_distance(from, to),
        }
    }

    fn locate(&self, node: &GridPoint) -> (f64, f64) {
        node.coords()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_to_haversine_and_capacity_45() {
        let config = PlannerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, PlannerConfig::default());
        assert_eq!(config.schedule.per_day_capacity, 45);
        assert_eq!(config.oracle.build().unwrap().name(), "haversine");
    }

    #[test]
    fn osrm_selected_by_url() {
        let config = PlannerConfig::from_lookup(lookup(&[
            ("OSRM_URL", "http://osrm:5000"),
            ("OSRM_PROFILE", "bike"),
            ("OSRM_TIMEOUT_SECS", "3"),
            ("BEAT_PLANNER_DAY_CAPACITY", "30"),
        ]))
        .unwrap();

        assert_eq!(config.schedule.per_day_capacity, 30);
        match config.oracle {
            OracleConfig::Osrm(osrm) => {
                assert_eq!(osrm.base_url, "http://osrm:5000");
                assert_eq!(osrm.profile, "bike");
                assert_eq!(osrm.timeout_secs, 3);
                assert_eq!(osrm.max_snap_meters, 7000.0);
            }
            other => panic!("expected osrm, got {:?}", other),
        }
    }

    #[test]
    fn rejects_bad_numbers() {
        let err = PlannerConfig::from_lookup(lookup(&[("BEAT_PLANNER_DAY_CAPACITY", "lots")])).unwrap_err();
        assert!(err.to_string().contains("BEAT_PLANNER_DAY_CAPACITY"));

        let err = PlannerConfig::from_lookup(lookup(&[("HAVERSINE_ROAD_COEFFICIENT", "-1")])).unwrap_err();
        assert!(err.to_string().contains("positive"));
    }
}

//! CSV boundary: outlet loading and route plan persistence.
//!
//! Outlet files use the column headers of the field-force export
//! (`User`, `User Erp Id`, `Visit Count`, ...). Plans are written with the
//! headers of [`ScheduleAssignment`] and can be read back for re-slicing.

use std::io::{Read, Write};

use serde::Deserialize;
use tracing::{debug, info};

use crate::assembler::{RoutePlan, assemble};
use crate::error::LoadError;
use crate::model::{Officer, Outlet, ScheduleAssignment};

#[derive(Debug, Deserialize)]
struct OutletRow {
    #[serde(rename = "User", default)]
    officer_name: Option<String>,
    #[serde(rename = "User Erp Id", default)]
    officer_erp_id: Option<String>,
    #[serde(rename = "Visit Count", default)]
    visit_count: Option<String>,
    #[serde(rename = "Beats Name", default)]
    beat: Option<String>,
    #[serde(rename = "Outlet Erp Id", default)]
    outlet_id: Option<String>,
    #[serde(rename = "Outlets Name", default)]
    outlet_name: Option<String>,
    #[serde(rename = "Latitude", default)]
    latitude: Option<String>,
    #[serde(rename = "Longitude", default)]
    longitude: Option<String>,
    #[serde(rename = "DAY", default)]
    day: Option<String>,
}

/// Reads outlet rows and keeps those belonging to `officer`.
///
/// Rows for other officers are skipped without validation. A matching row
/// without an outlet id is rejected.
pub fn load_outlets<R: Read>(reader: R, officer: &Officer) -> Result<Vec<Outlet>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut outlets = Vec::new();
    let mut total = 0;
    for (index, result) in reader.deserialize::<OutletRow>().enumerate() {
        let row = result?;
        total += 1;

        let name = row.officer_name.as_deref().unwrap_or_default();
        let erp_id = row.officer_erp_id.as_deref().unwrap_or_default();
        if !officer.matches(name, erp_id) {
            continue;
        }

        // Header is line 1.
        let line = index + 2;
        let outlet_id = non_blank(row.outlet_id).ok_or_else(|| LoadError::InvalidRow {
            row: line,
            message: "missing Outlet Erp Id".to_string(),
        })?;

        outlets.push(Outlet {
            outlet_id,
            name: non_blank(row.outlet_name).unwrap_or_default(),
            beat: non_blank(row.beat).unwrap_or_default(),
            latitude: parse_coordinate(row.latitude.as_deref()),
            longitude: parse_coordinate(row.longitude.as_deref()),
            visit_frequency: non_blank(row.visit_count),
            preferred_day: non_blank(row.day),
        });
    }

    info!(officer = %officer.name, total, matched = outlets.len(), "outlets loaded");
    Ok(outlets)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_coordinate(value: Option<&str>) -> Option<f64> {
    let text = value?.trim();
    if text.is_empty() {
        return None;
    }
    match text.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => Some(parsed),
        _ => {
            debug!(value = text, "unparsable coordinate treated as missing");
            None
        }
    }
}

/// Writes a plan with one header row followed by one line per assignment.
pub fn write_plan<W: Write>(writer: W, plan: &RoutePlan) -> Result<(), LoadError> {
    let mut writer = csv::Writer::from_writer(writer);
    for row in plan.rows() {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads a plan written by [`write_plan`] (or by an external tool using the
/// same headers) and restores canonical order.
pub fn read_plan<R: Read>(reader: R) -> Result<RoutePlan, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let rows = reader
        .deserialize::<ScheduleAssignment>()
        .collect::<Result<Vec<_>, _>>()?;
    Ok(assemble(rows))
}

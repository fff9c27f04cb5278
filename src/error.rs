//! Error types for planning, distance lookups, and the tabular boundary.

use crate::model::Weekday;

/// Terminal failures of a planning run caused by missing input data.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    #[error("No records found for {officer} ({erp_id})")]
    NoRecordsFound { officer: String, erp_id: String },

    #[error("No data for Week {week}, {day}")]
    NoDataForSlice { week: u8, day: Weekday },
}

impl PlanError {
    /// Stable tag for callers that report failures as `kind + message`.
    pub fn kind(&self) -> &'static str {
        match self {
            PlanError::NoRecordsFound { .. } => "no_records_found",
            PlanError::NoDataForSlice { .. } => "no_data_for_slice",
        }
    }
}

/// Distance oracle failures. The sequencer absorbs these locally.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OracleError {
    #[error("no reference node near ({lat:.6}, {lon:.6}): {reason}")]
    UnresolvedLocation { lat: f64, lon: f64, reason: String },

    #[error("no path between nodes: {reason}")]
    UnreachablePath { reason: String },
}

/// Failures reading or writing tabular data.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("row {row}: {message}")]
    InvalidRow { row: usize, message: String },
}

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} has an invalid value '{value}': {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_errors_carry_kind_and_message() {
        let err = PlanError::NoRecordsFound {
            officer: "JOHN DOE".to_string(),
            erp_id: "E1".to_string(),
        };
        assert_eq!(err.kind(), "no_records_found");
        assert_eq!(err.to_string(), "No records found for JOHN DOE (E1)");

        let err = PlanError::NoDataForSlice {
            week: 2,
            day: Weekday::Wed,
        };
        assert_eq!(err.kind(), "no_data_for_slice");
        assert_eq!(err.to_string(), "No data for Week 2, WED");
    }
}

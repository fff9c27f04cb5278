//! Domain model: officers, outlets, visit requirements and schedule rows.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Weeks of the visit cycle.
pub const WEEKS: [u8; 4] = [1, 2, 3, 4];

/// Working days of a week, in scheduling order.
pub const WEEKDAYS: [Weekday; 6] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
}

impl Weekday {
    pub fn code(&self) -> &'static str {
        match self {
            Weekday::Mon => "MON",
            Weekday::Tue => "TUE",
            Weekday::Wed => "WED",
            Weekday::Thu => "THU",
            Weekday::Fri => "FRI",
            Weekday::Sat => "SAT",
        }
    }

    /// Parses an exact three-letter code (`MON`..`SAT`).
    pub fn from_code(code: &str) -> Option<Self> {
        WEEKDAYS.into_iter().find(|day| day.code() == code)
    }

    /// Fallback day for a week when a preferred day is not a known code.
    pub fn fallback_for_week(week: u8) -> Self {
        let offset = usize::from(week.saturating_sub(1)) % WEEKDAYS.len();
        WEEKDAYS[offset]
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weekday::from_code(&s.trim().to_uppercase()).ok_or_else(|| format!("unknown weekday '{}'", s))
    }
}

/// The sales officer a plan is generated for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Officer {
    pub name: String,
    pub erp_id: String,
}

impl Officer {
    pub fn new(name: impl Into<String>, erp_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            erp_id: erp_id.into(),
        }
    }

    /// Upper-cased first and last name tokens.
    ///
    /// A blank name yields `("UNK", "")`; a single token has no last name.
    pub fn initials(&self) -> (String, String) {
        let parts: Vec<&str> = self.name.split_whitespace().collect();
        let first = parts.first().copied().unwrap_or("UNK").to_uppercase();
        let last = if parts.len() > 1 {
            parts[parts.len() - 1].to_uppercase()
        } else {
            String::new()
        };
        (first, last)
    }

    /// True when a raw (name, erp id) pair from an input row belongs to this officer.
    pub fn matches(&self, name: &str, erp_id: &str) -> bool {
        name.trim().to_lowercase() == self.name.trim().to_lowercase() && erp_id.trim() == self.erp_id.trim()
    }
}

/// An outlet as it arrives from the input boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outlet {
    pub outlet_id: String,
    pub name: String,
    pub beat: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Free text such as `"2"`, `"2W"` or `"Weekly x4"`.
    pub visit_frequency: Option<String>,
    pub preferred_day: Option<String>,
}

impl Outlet {
    pub fn new(outlet_id: impl Into<String>, name: impl Into<String>, beat: impl Into<String>) -> Self {
        Self {
            outlet_id: outlet_id.into(),
            name: name.into(),
            beat: beat.into(),
            latitude: None,
            longitude: None,
            visit_frequency: None,
            preferred_day: None,
        }
    }

    pub fn with_location(mut self, lat: f64, lon: f64) -> Self {
        self.latitude = Some(lat);
        self.longitude = Some(lon);
        self
    }

    pub fn with_frequency(mut self, frequency: impl Into<String>) -> Self {
        self.visit_frequency = Some(frequency.into());
        self
    }

    pub fn with_preferred_day(mut self, day: impl Into<String>) -> Self {
        self.preferred_day = Some(day.into());
        self
    }
}

/// Scheduling view of an outlet, derived once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitRequirement {
    pub outlet_id: String,
    pub frequency_count: u32,
    /// Normalized (trimmed, first three characters, upper-cased) day code.
    /// May still be an unknown code; the scheduler falls back per week.
    pub preferred_day: Option<String>,
}

/// One visit of one outlet in one (week, day) bucket.
///
/// Field names on the wire follow the export layout consumed by downstream
/// spreadsheet tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleAssignment {
    #[serde(rename = "SO NAME")]
    pub officer_name: String,
    #[serde(rename = "SO_ERP_ID")]
    pub officer_erp_id: String,
    #[serde(rename = "BEAT NAME")]
    pub beat: String,
    #[serde(rename = "ROUTE NAME")]
    pub route_name: String,
    #[serde(rename = "ROUTE ERP ID")]
    pub route_id: String,
    #[serde(rename = "Outlet_Erp_Id")]
    pub outlet_id: String,
    #[serde(rename = "Outlet_Name")]
    pub outlet_name: String,
    #[serde(rename = "Latitude")]
    pub latitude: Option<f64>,
    #[serde(rename = "Longitude")]
    pub longitude: Option<f64>,
    #[serde(rename = "WEEK")]
    pub week: u8,
    #[serde(rename = "DAY")]
    pub day: Weekday,
    #[serde(rename = "VISIT_ORDER")]
    pub visit_order: u32,
}

impl ScheduleAssignment {
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }

    pub fn bucket(&self) -> (u8, Weekday) {
        (self.week, self.day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_codes_parse_and_order() {
        assert_eq!(Weekday::from_code("WED"), Some(Weekday::Wed));
        assert_eq!(Weekday::from_code("wed"), None);
        assert_eq!("  fri ".parse::<Weekday>(), Ok(Weekday::Fri));
        assert!("SUN".parse::<Weekday>().is_err());
        assert!(Weekday::Mon < Weekday::Sat);
    }

    #[test]
    fn fallback_day_rotates_with_week() {
        assert_eq!(Weekday::fallback_for_week(1), Weekday::Mon);
        assert_eq!(Weekday::fallback_for_week(2), Weekday::Tue);
        assert_eq!(Weekday::fallback_for_week(4), Weekday::Thu);
    }

    #[test]
    fn officer_initials() {
        assert_eq!(
            Officer::new("  john  q doe ", "E1").initials(),
            ("JOHN".to_string(), "DOE".to_string())
        );
        assert_eq!(Officer::new("Cher", "E2").initials(), ("CHER".to_string(), String::new()));
        assert_eq!(Officer::new("   ", "E3").initials(), ("UNK".to_string(), String::new()));
    }

    #[test]
    fn officer_matching_ignores_case_and_padding() {
        let officer = Officer::new("John Doe", "E1");
        assert!(officer.matches(" JOHN DOE ", "E1 "));
        assert!(!officer.matches("John Doe", "E10"));
        assert!(!officer.matches("Jane Doe", "E1"));
    }
}

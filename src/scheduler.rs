//! Visit scheduler: turns visit frequencies into week/day/order assignments.
//!
//! Placement is online and greedy. Frequency-1 outlets go to the week with the
//! lowest running load; days are either preferred or least-loaded, subject to
//! a per-day capacity. Outcomes depend on input order.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::PlanError;
use crate::model::{Officer, Outlet, ScheduleAssignment, VisitRequirement, WEEKDAYS, WEEKS, Weekday};

/// Default number of visits one officer can make in a day.
pub const DEFAULT_PER_DAY_CAPACITY: u32 = 45;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleOptions {
    /// Visits per (week, day) bucket before new visits are redirected.
    pub per_day_capacity: u32,
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self {
            per_day_capacity: DEFAULT_PER_DAY_CAPACITY,
        }
    }
}

/// Running counters for one scheduling run.
///
/// Owned by exactly one run; pass a fresh value (or a deliberately pre-loaded
/// one) into [`schedule_with_state`] and take it back from the [`Schedule`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchedulerState {
    week_load: [u32; WEEKS.len()],
    day_counts: [[u32; WEEKDAYS.len()]; WEEKS.len()],
}

impl SchedulerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total visits assigned to a week so far. Weeks outside the cycle read 0.
    pub fn week_load(&self, week: u8) -> u32 {
        week_index(week).map_or(0, |w| self.week_load[w])
    }

    /// Visits assigned to a (week, day) bucket so far.
    pub fn day_count(&self, week: u8, day: Weekday) -> u32 {
        week_index(week).map_or(0, |w| self.day_counts[w][day as usize])
    }

    /// Week with the lowest load; ties go to the lowest week number.
    pub fn least_loaded_week(&self) -> u8 {
        WEEKS
            .into_iter()
            .min_by_key(|&week| self.week_load(week))
            .unwrap_or(WEEKS[0])
    }

    /// Day of a week with the fewest visits; ties go to the earlier weekday.
    pub fn least_loaded_day(&self, week: u8) -> Weekday {
        WEEKDAYS
            .into_iter()
            .min_by_key(|&day| self.day_count(week, day))
            .unwrap_or(WEEKDAYS[0])
    }

    fn first_day_below(&self, week: u8, capacity: u32) -> Option<Weekday> {
        WEEKDAYS
            .into_iter()
            .find(|&day| self.day_count(week, day) < capacity)
    }

    /// Counts one visit and returns its position within the bucket.
    /// `week` must belong to [`WEEKS`].
    fn record(&mut self, week: u8, day: Weekday) -> u32 {
        let w = usize::from(week - 1);
        self.week_load[w] += 1;
        self.day_counts[w][day as usize] += 1;
        self.day_counts[w][day as usize]
    }
}

fn week_index(week: u8) -> Option<usize> {
    WEEKS.iter().position(|&w| w == week)
}

/// A visit placed on a day that was already full because the whole week was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Overflow {
    pub outlet_id: String,
    pub week: u8,
    pub day: Weekday,
    /// Bucket size after the overflowing visit was added.
    pub load: u32,
}

#[derive(Debug, Clone)]
pub struct Schedule {
    pub assignments: Vec<ScheduleAssignment>,
    pub state: SchedulerState,
    pub overflows: Vec<Overflow>,
}

/// Schedules an officer's outlets starting from empty counters.
pub fn schedule(
    officer: &Officer,
    outlets: &[Outlet],
    options: &ScheduleOptions,
) -> Result<Schedule, PlanError> {
    schedule_with_state(officer, outlets, options, SchedulerState::new())
}

/// Schedules an officer's outlets on top of existing counters.
pub fn schedule_with_state(
    officer: &Officer,
    outlets: &[Outlet],
    options: &ScheduleOptions,
    mut state: SchedulerState,
) -> Result<Schedule, PlanError> {
    if outlets.is_empty() {
        return Err(PlanError::NoRecordsFound {
            officer: officer.name.clone(),
            erp_id: officer.erp_id.clone(),
        });
    }

    let mut assignments = Vec::new();
    let mut overflows = Vec::new();

    for outlet in outlets {
        let requirement = requirement_for(outlet);
        let weeks = match weeks_for_frequency(requirement.frequency_count) {
            Some(fixed) => fixed.to_vec(),
            None => vec![state.least_loaded_week()],
        };

        for week in weeks {
            let preferred = choose_day(requirement.preferred_day.as_deref(), week, &state);
            let day = if state.day_count(week, preferred) >= options.per_day_capacity {
                match state.first_day_below(week, options.per_day_capacity) {
                    Some(open) => {
                        debug!(
                            outlet = %outlet.outlet_id,
                            week,
                            from = %preferred,
                            to = %open,
                            "day at capacity, redirecting"
                        );
                        open
                    }
                    None => preferred,
                }
            } else {
                preferred
            };

            let visit_order = state.record(week, day);
            if visit_order > options.per_day_capacity {
                warn!(
                    outlet = %outlet.outlet_id,
                    week,
                    day = %day,
                    load = visit_order,
                    capacity = options.per_day_capacity,
                    "every day of the week is at capacity, overflowing"
                );
                overflows.push(Overflow {
                    outlet_id: outlet.outlet_id.clone(),
                    week,
                    day,
                    load: visit_order,
                });
            }

            let route = route_id(officer, &outlet.beat, week, day);
            assignments.push(ScheduleAssignment {
                officer_name: officer.name.clone(),
                officer_erp_id: officer.erp_id.clone(),
                beat: outlet.beat.clone(),
                route_name: route.clone(),
                route_id: route,
                outlet_id: outlet.outlet_id.clone(),
                outlet_name: outlet.name.clone(),
                latitude: outlet.latitude,
                longitude: outlet.longitude,
                week,
                day,
                visit_order,
            });
        }
    }

    info!(
        officer = %officer.name,
        outlets = outlets.len(),
        rows = assignments.len(),
        overflows = overflows.len(),
        "route plan scheduled"
    );

    Ok(Schedule {
        assignments,
        state,
        overflows,
    })
}

/// Derives the scheduling view of an outlet.
pub fn requirement_for(outlet: &Outlet) -> VisitRequirement {
    VisitRequirement {
        outlet_id: outlet.outlet_id.clone(),
        frequency_count: parse_frequency(outlet.visit_frequency.as_deref()),
        preferred_day: normalize_day(outlet.preferred_day.as_deref()),
    }
}

/// Parses a free-text visit frequency such as `"2"`, `"2W"` or `"x3 / month"`.
///
/// Takes the first run of ASCII digits. Missing, digit-free and zero values
/// resolve to 1; digit runs too large for `u32` saturate.
pub fn parse_frequency(raw: Option<&str>) -> u32 {
    let Some(text) = raw else {
        return 1;
    };

    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();

    if digits.is_empty() {
        debug!(raw = text, "no digits in visit frequency, defaulting to 1");
        return 1;
    }

    match digits.parse::<u32>() {
        Ok(0) => 1,
        Ok(count) => count,
        Err(_) => u32::MAX,
    }
}

/// Trims a raw day value and keeps its first three characters, upper-cased.
pub fn normalize_day(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(3).collect::<String>().to_uppercase())
}

static BIWEEKLY: [u8; 2] = [1, 3];
static THREE_WEEKS: [u8; 3] = [1, 2, 4];
static EVERY_WEEK: [u8; 4] = WEEKS;

/// Fixed weeks for a frequency, or `None` when the week is load-balanced.
pub fn weeks_for_frequency(frequency: u32) -> Option<&'static [u8]> {
    match frequency {
        0 | 1 => None,
        2 => Some(&BIWEEKLY[..]),
        3 => Some(&THREE_WEEKS[..]),
        _ => Some(&EVERY_WEEK[..]),
    }
}

fn choose_day(preferred: Option<&str>, week: u8, state: &SchedulerState) -> Weekday {
    match preferred {
        Some(code) => Weekday::from_code(code).unwrap_or_else(|| {
            let fallback = Weekday::fallback_for_week(week);
            debug!(code, week, fallback = %fallback, "unknown preferred day");
            fallback
        }),
        None => state.least_loaded_day(week),
    }
}

/// Route key for an (officer, beat, week, day) route, e.g. `1JOHD_NORTHZONE_W1_MON`.
pub fn route_id(officer: &Officer, beat: &str, week: u8, day: Weekday) -> String {
    let (first, last) = officer.initials();
    let first: String = first.chars().take(3).collect();
    let last: String = last.chars().take(1).collect();
    let beat: String = beat
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();

    format!("{}{}{}_{}_W{}_{}", week, first, last, beat, week, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_frequency_text() {
        assert_eq!(parse_frequency(Some("2")), 2);
        assert_eq!(parse_frequency(Some("2W")), 2);
        assert_eq!(parse_frequency(Some("Weekly x4")), 4);
        assert_eq!(parse_frequency(Some("3.0")), 3);
        assert_eq!(parse_frequency(Some("monthly")), 1);
        assert_eq!(parse_frequency(Some("")), 1);
        assert_eq!(parse_frequency(Some("0")), 1);
        assert_eq!(parse_frequency(None), 1);
        assert_eq!(parse_frequency(Some("99999999999")), u32::MAX);
    }

    #[test]
    fn normalizes_preferred_day() {
        assert_eq!(normalize_day(Some(" monday ")), Some("MON".to_string()));
        assert_eq!(normalize_day(Some("Sa")), Some("SA".to_string()));
        assert_eq!(normalize_day(Some("   ")), None);
        assert_eq!(normalize_day(None), None);
    }

    #[test]
    fn maps_frequency_to_weeks() {
        assert_eq!(weeks_for_frequency(1), None);
        assert_eq!(weeks_for_frequency(2), Some(&[1u8, 3][..]));
        assert_eq!(weeks_for_frequency(3), Some(&[1u8, 2, 4][..]));
        assert_eq!(weeks_for_frequency(4), Some(&[1u8, 2, 3, 4][..]));
        assert_eq!(weeks_for_frequency(12), Some(&[1u8, 2, 3, 4][..]));
    }

    #[test]
    fn builds_route_ids() {
        let officer = Officer::new("John Doe", "E1");
        assert_eq!(
            route_id(&officer, "North Zone 7", 3, Weekday::Thu),
            "3JOHD_NORTHZONE7_W3_THU"
        );

        let single = Officer::new("Al", "E2");
        assert_eq!(route_id(&single, "b\tx", 1, Weekday::Mon), "1AL_BX_W1_MON");
    }

    #[test]
    fn unknown_preferred_day_falls_back_per_week() {
        let state = SchedulerState::new();
        assert_eq!(choose_day(Some("XYZ"), 1, &state), Weekday::Mon);
        assert_eq!(choose_day(Some("XYZ"), 3, &state), Weekday::Wed);
        assert_eq!(choose_day(Some("FRI"), 3, &state), Weekday::Fri);
    }

    #[test]
    fn state_picks_least_loaded_with_ordered_ties() {
        let mut state = SchedulerState::new();
        assert_eq!(state.least_loaded_week(), 1);
        state.record(1, Weekday::Mon);
        assert_eq!(state.least_loaded_week(), 2);
        assert_eq!(state.least_loaded_day(1), Weekday::Tue);
        assert_eq!(state.least_loaded_day(2), Weekday::Mon);
    }

    #[test]
    fn empty_input_is_no_records_found() {
        let officer = Officer::new("John Doe", "E1");
        let err = schedule(&officer, &[], &ScheduleOptions::default()).unwrap_err();
        assert_eq!(err.kind(), "no_records_found");
    }
}

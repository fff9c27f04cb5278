//! Route plan assembly: canonical ordering and (week, day) slicing.

use serde::Serialize;

use crate::error::PlanError;
use crate::model::{ScheduleAssignment, Weekday};

/// Rows of one officer's plan, sorted by (week, day, visit_order).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RoutePlan {
    rows: Vec<ScheduleAssignment>,
}

/// Builds the canonical plan. The sort is stable, so rows sharing a key keep
/// their input order.
pub fn assemble(rows: impl IntoIterator<Item = ScheduleAssignment>) -> RoutePlan {
    let mut rows: Vec<ScheduleAssignment> = rows.into_iter().collect();
    sort_canonical(&mut rows);
    RoutePlan { rows }
}

fn sort_canonical(rows: &mut [ScheduleAssignment]) {
    rows.sort_by_key(|row| (row.week, row.day, row.visit_order));
}

impl RoutePlan {
    pub fn rows(&self) -> &[ScheduleAssignment] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<ScheduleAssignment> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct (week, day) buckets in canonical order.
    pub fn buckets(&self) -> Vec<(u8, Weekday)> {
        let mut buckets: Vec<(u8, Weekday)> = self.rows.iter().map(ScheduleAssignment::bucket).collect();
        buckets.dedup();
        buckets
    }

    /// Rows of one bucket in plan order.
    pub fn slice(&self, week: u8, day: Weekday) -> Result<Vec<ScheduleAssignment>, PlanError> {
        let rows: Vec<ScheduleAssignment> = self
            .rows
            .iter()
            .filter(|row| row.bucket() == (week, day))
            .cloned()
            .collect();

        if rows.is_empty() {
            return Err(PlanError::NoDataForSlice { week, day });
        }
        Ok(rows)
    }

    /// Swaps a bucket's rows for a re-sequenced version.
    ///
    /// Rows in `replacement` keep their own week/day; a caller that passes
    /// rows of another bucket moves them there.
    pub fn replace_slice(&mut self, week: u8, day: Weekday, replacement: Vec<ScheduleAssignment>) {
        self.rows.retain(|row| row.bucket() != (week, day));
        self.rows.extend(replacement);
        sort_canonical(&mut self.rows);
    }
}

//! Domain model for one totals computation request.
use serde::{Deserialize, Serialize};
use shared::{LedgerEntry, OverviewDay, ProjectionPoint};

/// Everything `TotalsService::compute_totals` needs, owned by the caller.
///
/// Date fields are `YYYY-MM-DD` keys. Malformed keys are tolerated and
/// degrade to zero-valued results instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalsInput {
    pub today_key: String,
    pub month_start_key: String,
    pub month_end_key: String,
    pub monthly_allowance: f64,
    pub daily_slice: f64,
    /// Ascending by date; may be empty
    pub projection_points: Vec<ProjectionPoint>,
    pub ledger_entries: Vec<LedgerEntry>,
    /// Alternate accrual source used only when there are no projection points
    pub overview_days: Vec<OverviewDay>,
    pub is_current_month: bool,
}

impl TotalsInput {
    /// Input for a month with no ledger, projection or overview data yet
    pub fn new(
        today_key: &str,
        month_start_key: &str,
        month_end_key: &str,
        monthly_allowance: f64,
        daily_slice: f64,
        is_current_month: bool,
    ) -> Self {
        Self {
            today_key: today_key.to_string(),
            month_start_key: month_start_key.to_string(),
            month_end_key: month_end_key.to_string(),
            monthly_allowance,
            daily_slice,
            projection_points: Vec::new(),
            ledger_entries: Vec::new(),
            overview_days: Vec::new(),
            is_current_month,
        }
    }

    pub fn with_ledger_entries(mut self, entries: Vec<LedgerEntry>) -> Self {
        self.ledger_entries = entries;
        self
    }

    pub fn with_projection_points(mut self, points: Vec<ProjectionPoint>) -> Self {
        self.projection_points = points;
        self
    }

    pub fn with_overview_days(mut self, days: Vec<OverviewDay>) -> Self {
        self.overview_days = days;
        self
    }

    /// The date through which ledger-backed totals are trusted
    pub fn cutoff_key(&self) -> &str {
        if self.is_current_month {
            &self.today_key
        } else {
            &self.month_end_key
        }
    }
}

/// Treat NaN and infinities as zero
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

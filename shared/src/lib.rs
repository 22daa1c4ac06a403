//! Wire types shared between the pocket-money projector and its callers.
//!
//! Every struct here mirrors a JSON shape returned by the household API
//! (`/kids/...` endpoints). Field names are PascalCase on the wire; dates are
//! `YYYY-MM-DD` strings and amounts are plain JSON numbers.

use serde::{Deserialize, Serialize};

/// One posted cash movement on a kid's pocket-money account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LedgerEntry {
    /// Calendar date of the movement (YYYY-MM-DD)
    pub entry_date: String,
    /// Signed amount (positive for deposits, negative for withdrawals)
    pub amount: f64,
}

/// Server-computed accrued allowance value at a specific date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProjectionPoint {
    pub date: String,
    pub amount: f64,
}

/// Per-day chore completion summary from the parent month overview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OverviewDay {
    pub date: String,
    pub daily_done: i64,
    pub daily_total: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus_approved_total: Option<f64>,
}

impl OverviewDay {
    /// A day earns its daily slice when it has no chores or all of them are done
    pub fn is_fully_accrued(&self) -> bool {
        self.daily_total == 0 || self.daily_done >= self.daily_total
    }
}

/// Computed totals for the pocket-money widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KidsTotalsResult {
    pub current_total: f64,
    pub projected_total: f64,
    pub series: Vec<KidsTotalsSeriesPoint>,
}

/// One point of the actual-vs-projected chart series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KidsTotalsSeriesPoint {
    pub date_key: String,
    /// Only present for points on or before the cutoff date
    pub actual_amount: Option<f64>,
    /// Only present for points on or after the cutoff date
    pub projected_amount: Option<f64>,
}

/// Response of `GET /kids/me/overview?selected_date=<key>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KidsOverviewResponse {
    pub today: String,
    pub selected_date: String,
    pub month_start: String,
    pub month_end: String,
    pub monthly_allowance: f64,
    pub daily_slice: f64,
    /// Chore rows are passed through untouched; the projector never reads them
    #[serde(default)]
    pub chores: Vec<serde_json::Value>,
    #[serde(default)]
    pub entries: Vec<LedgerEntry>,
    #[serde(default)]
    pub projection: Vec<ProjectionPoint>,
}

/// Response of `GET /kids/me/ledger` and `GET /kids/parents/children/{id}/ledger`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KidsLedgerResponse {
    pub balance: f64,
    #[serde(default)]
    pub entries: Vec<LedgerEntry>,
}

/// Response of `GET /kids/parents/children/{id}/month-summary?month=<YYYY-MM>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MonthSummaryResponse {
    pub month_start: String,
    pub month_end: String,
    pub monthly_allowance: f64,
    pub daily_slice: f64,
    #[serde(default)]
    pub missed_days: i64,
    #[serde(default)]
    pub missed_deduction: f64,
    #[serde(default)]
    pub approved_bonus_total: f64,
    #[serde(default)]
    pub pending_bonus_total: f64,
    #[serde(default)]
    pub projected_payout: f64,
}

/// Response of `GET /kids/parents/children/{id}/month-overview?month=<YYYY-MM>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MonthOverviewResponse {
    pub month_start: String,
    pub month_end: String,
    #[serde(default)]
    pub days: Vec<OverviewDay>,
}

/// Totals formatted for display in the pocket-money widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedTotals {
    pub formatted_current_total: String,
    pub formatted_projected_total: String,
    pub current_amount_type: AmountType,
    pub projected_amount_type: AmountType,
    pub raw_current_total: f64,
    pub raw_projected_total: f64,
}

/// One chart series point formatted for a table or tooltip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedSeriesPoint {
    pub date_key: String,
    pub formatted_date: String,
    /// Empty when the point has no actual amount
    pub formatted_actual: String,
    /// Empty when the point has no projected amount
    pub formatted_projected: String,
}

/// Sign of an amount for styling and display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmountType {
    Positive,
    Negative,
    Zero,
}

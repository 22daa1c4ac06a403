//! Mappers from household API responses to totals inputs.

use log::debug;
use shared::{
    KidsLedgerResponse, KidsOverviewResponse, MonthOverviewResponse, MonthSummaryResponse,
};

use crate::domain::calendar::{is_current_month, month_key, DateKey};
use crate::domain::models::TotalsInput;
use crate::errors::ProjectorResult;

pub struct TotalsMapper;

impl TotalsMapper {
    /// Kid-side view: ledger entries and projection points from `/kids/me/overview`
    pub fn from_overview(overview: &KidsOverviewResponse) -> TotalsInput {
        let current = is_current_month(&overview.today, &overview.month_start, &overview.month_end);
        debug!(
            "Mapping overview for {}..={} (today {}, current month: {})",
            overview.month_start, overview.month_end, overview.today, current
        );

        TotalsInput::new(
            &overview.today,
            &overview.month_start,
            &overview.month_end,
            overview.monthly_allowance,
            overview.daily_slice,
            current,
        )
        .with_ledger_entries(overview.entries.clone())
        .with_projection_points(overview.projection.clone())
    }

    /// Parent-side view: month summary rates, month overview days as the
    /// accrual source, and the child's ledger
    pub fn from_month_summary(
        summary: &MonthSummaryResponse,
        today_key: &str,
        month_overview: &MonthOverviewResponse,
        ledger: &KidsLedgerResponse,
    ) -> TotalsInput {
        let current = is_current_month(today_key, &summary.month_start, &summary.month_end);
        debug!(
            "Mapping month summary for {}..={} with {} overview days and {} ledger entries",
            summary.month_start,
            summary.month_end,
            month_overview.days.len(),
            ledger.entries.len()
        );

        TotalsInput::new(
            today_key,
            &summary.month_start,
            &summary.month_end,
            summary.monthly_allowance,
            summary.daily_slice,
            current,
        )
        .with_ledger_entries(ledger.entries.clone())
        .with_overview_days(month_overview.days.clone())
    }

    /// `YYYY-MM` value for the `month=` query of the parent endpoints
    pub fn month_query_key(date_key: &str) -> ProjectorResult<String> {
        Ok(month_key(DateKey::parse(date_key)?.date()))
    }

    pub fn parse_overview_json(json: &str) -> ProjectorResult<KidsOverviewResponse> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn parse_ledger_json(json: &str) -> ProjectorResult<KidsLedgerResponse> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn parse_month_summary_json(json: &str) -> ProjectorResult<MonthSummaryResponse> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn parse_month_overview_json(json: &str) -> ProjectorResult<MonthOverviewResponse> {
        Ok(serde_json::from_str(json)?)
    }
}

//! Pocket-money totals: current balance, month-end projection and chart series.
//!
//! ## Algorithm
//!
//! 1. The cutoff is today for the current month, otherwise the month end.
//! 2. Current total = ledger balance as of the cutoff + accrual already
//!    earned at the cutoff (see `ProjectionService`).
//! 3. Remaining days are counted from the cutoff to month end (zero when not
//!    viewing the current month).
//! 4. The allowance remainder is whatever part of the monthly allowance the
//!    daily slices do not cover. It is added only while days remain.
//! 5. Projected total = current total + daily slice for each remaining day
//!    + remainder, floored at zero.
//! 6. When projection points exist, each becomes a series point carrying an
//!    actual amount (on/before the cutoff) and/or a projected amount
//!    (on/after the cutoff).
//!
//! Computation is pure and infallible: malformed dates and non-finite
//! numbers degrade to zero-valued results so the widget always renders.

use log::{debug, info, warn};
use shared::{KidsOverviewResponse, KidsTotalsResult, KidsTotalsSeriesPoint};

use crate::config::ProjectorConfig;
use crate::domain::balance_service::BalanceService;
use crate::domain::calendar::{day_diff, parse_date_key};
use crate::domain::models::{finite_or_zero, TotalsInput};
use crate::domain::projection_service::ProjectionService;
use crate::io::mappers::TotalsMapper;

/// Service that computes pocket-money totals
#[derive(Debug, Clone, Default)]
pub struct TotalsService {
    config: ProjectorConfig,
}

impl TotalsService {
    /// Create a new TotalsService with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new TotalsService with custom configuration
    pub fn with_config(config: ProjectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectorConfig {
        &self.config
    }

    /// Compute current total, projected total and chart series
    pub fn compute_totals(&self, input: &TotalsInput) -> KidsTotalsResult {
        let cutoff_key = input.cutoff_key();
        let monthly_allowance = finite_or_zero(input.monthly_allowance);
        let daily_slice = finite_or_zero(input.daily_slice);

        let balances = BalanceService::new(&input.ledger_entries);
        let projections =
            ProjectionService::new(&input.projection_points, &input.overview_days, daily_slice);

        let balance_at_cutoff = balances.balance_as_of(cutoff_key);
        let projection_at_cutoff = projections.projection_at(cutoff_key);

        let mut current_total = balance_at_cutoff + projection_at_cutoff;
        if self.config.clamp_current_total && current_total < 0.0 {
            debug!("Clamping negative current total {:.2} to zero", current_total);
            current_total = 0.0;
        }

        let days_in_month = day_diff(&input.month_start_key, &input.month_end_key) + 1;
        let remaining_days = if input.is_current_month {
            day_diff(cutoff_key, &input.month_end_key).max(0)
        } else {
            0
        };
        let allowance_remainder = (monthly_allowance - daily_slice * days_in_month as f64).max(0.0);

        let remainder_if_remaining = if remaining_days > 0 { allowance_remainder } else { 0.0 };
        let projected_total =
            (current_total + daily_slice * remaining_days as f64 + remainder_if_remaining).max(0.0);

        debug!(
            "Totals at cutoff {}: balance {:.2} + accrual {:.2} ({:?}); {} of {} days remaining, remainder {:.2}",
            cutoff_key,
            balance_at_cutoff,
            projection_at_cutoff,
            projections.source(),
            remaining_days,
            days_in_month,
            allowance_remainder
        );

        let series = if input.projection_points.is_empty() {
            Vec::new()
        } else {
            self.build_series(
                input,
                &balances,
                &projections,
                current_total,
                daily_slice,
                allowance_remainder,
            )
        };

        info!(
            "Computed pocket-money totals: current {:.2}, projected {:.2}, {} series points",
            current_total,
            projected_total,
            series.len()
        );

        KidsTotalsResult {
            current_total,
            projected_total,
            series,
        }
    }

    fn build_series(
        &self,
        input: &TotalsInput,
        balances: &BalanceService,
        projections: &ProjectionService<'_>,
        current_total: f64,
        daily_slice: f64,
        allowance_remainder: f64,
    ) -> Vec<KidsTotalsSeriesPoint> {
        let cutoff_key = input.cutoff_key();
        let cutoff = parse_date_key(cutoff_key);

        let final_projection_date = projections
            .final_projection_date()
            .filter(|date| !date.trim().is_empty())
            .unwrap_or(input.month_end_key.as_str());
        let total_days_ahead = day_diff(cutoff_key, final_projection_date).max(0);
        let remainder_per_day = if total_days_ahead > 0 {
            allowance_remainder / total_days_ahead as f64
        } else {
            0.0
        };

        input
            .projection_points
            .iter()
            .map(|point| {
                let days_ahead = day_diff(cutoff_key, &point.date) as f64;
                let point_date = parse_date_key(&point.date);

                let (on_or_before_cutoff, on_or_after_cutoff) = match (point_date, cutoff) {
                    (Some(date), Some(cutoff)) => (date <= cutoff, date >= cutoff),
                    _ => (true, false),
                };

                let actual_amount = on_or_before_cutoff.then(|| {
                    let accrued = projections
                        .amount_for_date(&point.date)
                        .unwrap_or_else(|| finite_or_zero(point.amount));
                    balances.balance_as_of(&point.date) + accrued
                });
                let projected_amount = on_or_after_cutoff.then(|| {
                    current_total + daily_slice * days_ahead + remainder_per_day * days_ahead
                });

                KidsTotalsSeriesPoint {
                    date_key: point.date.clone(),
                    actual_amount,
                    projected_amount,
                }
            })
            .collect()
    }

    /// List every malformed date key and non-finite number in the input.
    ///
    /// Diagnostic only: `compute_totals` tolerates all of these.
    pub fn validate_input(&self, input: &TotalsInput) -> Vec<String> {
        let mut problems = Vec::new();

        for (field, key) in [
            ("today", &input.today_key),
            ("month start", &input.month_start_key),
            ("month end", &input.month_end_key),
        ] {
            if parse_date_key(key).is_none() {
                problems.push(format!("Invalid {} date key: {:?}", field, key));
            }
        }

        if let (Some(start), Some(end)) = (
            parse_date_key(&input.month_start_key),
            parse_date_key(&input.month_end_key),
        ) {
            if end < start {
                problems.push(format!(
                    "Month end {} is before month start {}",
                    input.month_end_key, input.month_start_key
                ));
            }
        }

        if !input.monthly_allowance.is_finite() {
            problems.push(format!("Monthly allowance is not finite: {}", input.monthly_allowance));
        }
        if !input.daily_slice.is_finite() {
            problems.push(format!("Daily slice is not finite: {}", input.daily_slice));
        }

        for entry in &input.ledger_entries {
            if parse_date_key(&entry.entry_date).is_none() {
                problems.push(format!("Invalid ledger entry date: {:?}", entry.entry_date));
            }
            if !entry.amount.is_finite() {
                problems.push(format!(
                    "Ledger entry on {} has non-finite amount",
                    entry.entry_date
                ));
            }
        }

        let mut previous_point = None;
        for point in &input.projection_points {
            match parse_date_key(&point.date) {
                Some(date) => {
                    if previous_point.is_some_and(|previous| date < previous) {
                        problems.push(format!("Projection point {} is out of order", point.date));
                    }
                    previous_point = Some(date);
                }
                None => problems.push(format!("Invalid projection point date: {:?}", point.date)),
            }
            if !point.amount.is_finite() {
                problems.push(format!("Projection point on {} has non-finite amount", point.date));
            }
        }

        for day in &input.overview_days {
            if parse_date_key(&day.date).is_none() {
                problems.push(format!("Invalid overview day date: {:?}", day.date));
            }
            if day.bonus_approved_total.is_some_and(|bonus| !bonus.is_finite()) {
                problems.push(format!("Overview day {} has non-finite bonus", day.date));
            }
        }

        for problem in &problems {
            warn!("Totals input problem: {}", problem);
        }

        problems
    }

    /// Compute totals for an overview response
    pub fn compute_from_overview(&self, overview: &KidsOverviewResponse) -> KidsTotalsResult {
        let input = TotalsMapper::from_overview(overview);
        self.compute_totals(&input)
    }

    /// Decode a `/kids/me/overview` payload and compute its totals
    pub fn compute_from_overview_json(&self, json: &str) -> anyhow::Result<KidsTotalsResult> {
        let overview = TotalsMapper::parse_overview_json(json)?;
        Ok(self.compute_from_overview(&overview))
    }
}

/// Compute totals with the default configuration
pub fn compute_totals(input: &TotalsInput) -> KidsTotalsResult {
    TotalsService::new().compute_totals(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::init_test_logging;
    use shared::{LedgerEntry, OverviewDay, ProjectionPoint};

    fn entry(date: &str, amount: f64) -> LedgerEntry {
        LedgerEntry {
            entry_date: date.to_string(),
            amount,
        }
    }

    fn point(date: &str, amount: f64) -> ProjectionPoint {
        ProjectionPoint {
            date: date.to_string(),
            amount,
        }
    }

    fn march_input(is_current_month: bool) -> TotalsInput {
        TotalsInput::new("2024-03-10", "2024-03-01", "2024-03-31", 60.0, 2.0, is_current_month)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_current_month_scenario() {
        let input = march_input(true).with_ledger_entries(vec![entry("2024-03-05", 10.0)]);
        let result = compute_totals(&input);

        assert_eq!(result.current_total, 10.0);
        // 60 - 2 * 31 is negative, so no remainder: 10 + 2 * 21
        assert_eq!(result.projected_total, 52.0);
        assert!(result.series.is_empty());
    }

    #[test]
    fn test_past_month_uses_month_end_cutoff() {
        let input = march_input(false).with_ledger_entries(vec![
            entry("2024-03-05", 10.0),
            entry("2024-03-20", 4.0),
            entry("2024-04-02", 100.0),
        ]);
        let result = compute_totals(&input);

        assert_eq!(result.current_total, 14.0);
        assert_eq!(result.projected_total, 14.0);
    }

    #[test]
    fn test_remainder_added_while_days_remain() {
        let mut input = march_input(true);
        input.monthly_allowance = 70.0;
        let result = compute_totals(&input);

        // remainder = 70 - 62 = 8
        assert_eq!(result.current_total, 0.0);
        assert_eq!(result.projected_total, 2.0 * 21.0 + 8.0);
    }

    #[test]
    fn test_no_remainder_on_last_day() {
        let mut input = march_input(true);
        input.today_key = "2024-03-31".to_string();
        input.monthly_allowance = 70.0;
        let result = compute_totals(&input);
        assert_eq!(result.projected_total, 0.0);
    }

    #[test]
    fn test_projected_total_is_floored() {
        let input = march_input(true).with_ledger_entries(vec![entry("2024-03-02", -100.0)]);
        let result = compute_totals(&input);

        assert_eq!(result.current_total, -100.0);
        assert_eq!(result.projected_total, 0.0);
    }

    #[test]
    fn test_clamp_current_total_when_configured() {
        let config = ProjectorConfig {
            clamp_current_total: true,
            ..ProjectorConfig::default()
        };
        let service = TotalsService::with_config(config);
        let input = march_input(true).with_ledger_entries(vec![entry("2024-03-02", -100.0)]);
        let result = service.compute_totals(&input);

        assert_eq!(result.current_total, 0.0);
        assert_eq!(result.projected_total, 42.0);
    }

    #[test]
    fn test_projection_point_at_cutoff_adds_accrual() {
        let input = march_input(true)
            .with_ledger_entries(vec![entry("2024-03-05", 10.0)])
            .with_projection_points(vec![
                point("2024-03-09", 18.0),
                point("2024-03-10", 20.0),
                point("2024-03-31", 62.0),
            ]);
        let result = compute_totals(&input);

        assert_eq!(result.current_total, 30.0);
        assert_eq!(result.projected_total, 72.0);
    }

    #[test]
    fn test_series_splits_at_cutoff() {
        let mut input = march_input(true)
            .with_ledger_entries(vec![entry("2024-03-05", 10.0)])
            .with_projection_points(vec![
                point("2024-03-04", 8.0),
                point("2024-03-10", 20.0),
                point("2024-03-20", 40.0),
                point("2024-03-31", 62.0),
            ]);
        input.monthly_allowance = 73.0; // remainder 11 over 21 days ahead
        let result = compute_totals(&input);

        assert_eq!(result.current_total, 30.0);
        assert_eq!(result.series.len(), 4);

        let before = &result.series[0];
        assert_eq!(before.date_key, "2024-03-04");
        assert_eq!(before.actual_amount, Some(8.0)); // no ledger entries yet
        assert_eq!(before.projected_amount, None);

        let at_cutoff = &result.series[1];
        assert_eq!(at_cutoff.actual_amount, Some(30.0));
        assert_eq!(at_cutoff.projected_amount, Some(30.0));

        let after = &result.series[2];
        assert_eq!(after.actual_amount, None);
        assert_close(after.projected_amount.unwrap(), 30.0 + 2.0 * 10.0 + 11.0 / 21.0 * 10.0);

        let last = &result.series[3];
        assert_close(last.projected_amount.unwrap(), 30.0 + 2.0 * 21.0 + 11.0);
    }

    #[test]
    fn test_series_unparseable_point_counts_as_actual() {
        init_test_logging();
        let input = march_input(true).with_projection_points(vec![
            point("2024-03-10", 20.0),
            point("soon", 5.0),
        ]);
        let result = compute_totals(&input);

        let odd = &result.series[1];
        assert_eq!(odd.date_key, "soon");
        assert_eq!(odd.actual_amount, Some(5.0));
        assert_eq!(odd.projected_amount, None);
    }

    #[test]
    fn test_overview_days_drive_accrual_without_points() {
        let input = march_input(true).with_overview_days(vec![
            OverviewDay {
                date: "2024-03-01".to_string(),
                daily_done: 2,
                daily_total: 2,
                bonus_approved_total: Some(1.0),
            },
            OverviewDay {
                date: "2024-03-02".to_string(),
                daily_done: 0,
                daily_total: 2,
                bonus_approved_total: None,
            },
            OverviewDay {
                date: "2024-03-11".to_string(),
                daily_done: 2,
                daily_total: 2,
                bonus_approved_total: None,
            },
        ]);
        let result = compute_totals(&input);

        assert_eq!(result.current_total, 3.0);
        assert_eq!(result.projected_total, 45.0);
        assert!(result.series.is_empty());
    }

    #[test]
    fn test_malformed_dates_degrade_to_zero() {
        init_test_logging();
        let input = TotalsInput::new("nope", "bad", "worse", 60.0, 2.0, true)
            .with_ledger_entries(vec![entry("2024-03-05", 10.0)]);
        let result = compute_totals(&input);

        // days_in_month collapses to 1, remainder = 58 but no days remain
        assert_eq!(result.current_total, 0.0);
        assert_eq!(result.projected_total, 0.0);
    }

    #[test]
    fn test_non_finite_rates_are_zero() {
        let mut input = march_input(true).with_ledger_entries(vec![entry("2024-03-05", 10.0)]);
        input.daily_slice = f64::NAN;
        input.monthly_allowance = f64::INFINITY;
        let result = compute_totals(&input);

        assert_eq!(result.current_total, 10.0);
        assert_eq!(result.projected_total, 10.0);
    }

    #[test]
    fn test_validate_input() {
        init_test_logging();
        let service = TotalsService::new();
        assert!(service.validate_input(&march_input(true)).is_empty());

        let mut input = march_input(true)
            .with_ledger_entries(vec![entry("03/05/2024", 1.0)])
            .with_projection_points(vec![point("2024-03-20", 1.0), point("2024-03-10", f64::NAN)]);
        input.month_end_key = "2024-02-28".to_string();
        input.daily_slice = f64::INFINITY;

        let problems = service.validate_input(&input);
        assert_eq!(problems.len(), 5);
        assert!(problems.iter().any(|p| p.contains("before month start")));
        assert!(problems.iter().any(|p| p.contains("Daily slice")));
        assert!(problems.iter().any(|p| p.contains("ledger entry date")));
        assert!(problems.iter().any(|p| p.contains("out of order")));
        assert!(problems.iter().any(|p| p.contains("non-finite amount")));
    }

    #[test]
    fn test_compute_from_overview_json() {
        let json = r#"{
            "Today": "2024-03-10",
            "SelectedDate": "2024-03-10",
            "MonthStart": "2024-03-01",
            "MonthEnd": "2024-03-31",
            "MonthlyAllowance": 60,
            "DailySlice": 2,
            "Chores": [{"Name": "Feed the cat"}],
            "Entries": [{"EntryDate": "2024-03-05", "Amount": 10}],
            "Projection": []
        }"#;
        let result = TotalsService::new().compute_from_overview_json(json).unwrap();
        assert_eq!(result.current_total, 10.0);
        assert_eq!(result.projected_total, 52.0);
    }

    #[test]
    fn test_compute_from_overview_json_rejects_garbage() {
        assert!(TotalsService::new().compute_from_overview_json("{").is_err());
    }

    #[test]
    fn test_idempotent() {
        let input = march_input(true)
            .with_ledger_entries(vec![entry("2024-03-05", 10.0)])
            .with_projection_points(vec![point("2024-03-10", 20.0), point("2024-03-31", 62.0)]);
        let service = TotalsService::new();
        assert_eq!(service.compute_totals(&input), service.compute_totals(&input));
    }
}

//! Already-earned allowance accrual at a cutoff date.
//!
//! The server supplies accrual in one of two shapes:
//!
//! - **Projection points**: explicit `(Date, Amount)` forecasts, ascending by
//!   date. Preferred whenever present.
//! - **Overview days**: per-day chore completion from the parent month
//!   overview. Each fully completed day earns one daily slice, plus any
//!   approved bonus recorded on it.
//!
//! With neither available the accrual is zero.

use std::collections::HashMap;

use log::{debug, warn};
use shared::{OverviewDay, ProjectionPoint};

use crate::domain::calendar::parse_date_key;
use crate::domain::models::finite_or_zero;

/// Which accrual source a projection service is backed by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccrualSource {
    ProjectionPoints,
    OverviewDays,
    None,
}

/// Accrual lookups over a projection snapshot
#[derive(Debug, Clone)]
pub struct ProjectionService<'a> {
    points: &'a [ProjectionPoint],
    overview_days: &'a [OverviewDay],
    daily_slice: f64,
    /// Exact date key to amount; later duplicates win
    amount_by_date: HashMap<&'a str, f64>,
}

impl<'a> ProjectionService<'a> {
    pub fn new(
        points: &'a [ProjectionPoint],
        overview_days: &'a [OverviewDay],
        daily_slice: f64,
    ) -> Self {
        let mut amount_by_date = HashMap::with_capacity(points.len());
        for point in points {
            amount_by_date.insert(point.date.as_str(), finite_or_zero(point.amount));
        }

        Self {
            points,
            overview_days,
            daily_slice: finite_or_zero(daily_slice),
            amount_by_date,
        }
    }

    pub fn source(&self) -> AccrualSource {
        if !self.points.is_empty() {
            AccrualSource::ProjectionPoints
        } else if !self.overview_days.is_empty() {
            AccrualSource::OverviewDays
        } else {
            AccrualSource::None
        }
    }

    /// Projected amount recorded for exactly `date_key`, if any
    pub fn amount_for_date(&self, date_key: &str) -> Option<f64> {
        self.amount_by_date.get(date_key).copied()
    }

    /// Date of the last projection point
    pub fn final_projection_date(&self) -> Option<&'a str> {
        self.points.last().map(|point| point.date.as_str())
    }

    /// Accrual already earned as of the cutoff date
    pub fn projection_at(&self, cutoff_key: &str) -> f64 {
        match self.source() {
            AccrualSource::ProjectionPoints => self.projection_from_points(cutoff_key),
            AccrualSource::OverviewDays => self.projection_from_overview(cutoff_key),
            AccrualSource::None => 0.0,
        }
    }

    fn projection_from_points(&self, cutoff_key: &str) -> f64 {
        if let Some(amount) = self.amount_for_date(cutoff_key) {
            return amount;
        }

        // Points are ascending, so the last one stands in for any later date
        let fallback = self
            .points
            .last()
            .map(|point| finite_or_zero(point.amount))
            .unwrap_or(0.0);
        debug!(
            "No projection point for {}, falling back to last point amount {:.2}",
            cutoff_key, fallback
        );
        fallback
    }

    fn projection_from_overview(&self, cutoff_key: &str) -> f64 {
        let cutoff = match parse_date_key(cutoff_key) {
            Some(cutoff) => cutoff,
            None => {
                warn!("Cannot accrue overview days up to unparseable cutoff {:?}", cutoff_key);
                return 0.0;
            }
        };

        let mut accrued = 0.0;
        let mut earning_days = 0;

        for day in self.overview_days {
            let day_date = match parse_date_key(&day.date) {
                Some(date) if date <= cutoff => date,
                Some(_) => continue,
                None => {
                    warn!("Skipping overview day with unparseable date {:?}", day.date);
                    continue;
                }
            };

            if day.is_fully_accrued() {
                accrued += self.daily_slice;
                earning_days += 1;
            }
            if let Some(bonus) = day.bonus_approved_total {
                accrued += finite_or_zero(bonus);
            }
            debug!("Overview day {} accrued running total {:.2}", day_date, accrued);
        }

        debug!(
            "Overview accrual through {}: {} earning days, {:.2} total",
            cutoff_key, earning_days, accrued
        );
        accrued
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::init_test_logging;

    fn point(date: &str, amount: f64) -> ProjectionPoint {
        ProjectionPoint {
            date: date.to_string(),
            amount,
        }
    }

    fn day(date: &str, done: i64, total: i64, bonus: Option<f64>) -> OverviewDay {
        OverviewDay {
            date: date.to_string(),
            daily_done: done,
            daily_total: total,
            bonus_approved_total: bonus,
        }
    }

    #[test]
    fn test_no_source_is_zero() {
        let service = ProjectionService::new(&[], &[], 2.0);
        assert_eq!(service.source(), AccrualSource::None);
        assert_eq!(service.projection_at("2024-03-10"), 0.0);
        assert_eq!(service.final_projection_date(), None);
    }

    #[test]
    fn test_exact_point_match() {
        let points = vec![
            point("2024-03-09", 18.0),
            point("2024-03-10", 20.0),
            point("2024-03-31", 62.0),
        ];
        let service = ProjectionService::new(&points, &[], 2.0);

        assert_eq!(service.source(), AccrualSource::ProjectionPoints);
        assert_eq!(service.projection_at("2024-03-10"), 20.0);
        assert_eq!(service.final_projection_date(), Some("2024-03-31"));
    }

    #[test]
    fn test_missing_point_falls_back_to_last() {
        let points = vec![point("2024-03-01", 2.0), point("2024-03-05", 10.0)];
        let service = ProjectionService::new(&points, &[], 2.0);
        assert_eq!(service.projection_at("2024-03-10"), 10.0);
        // Fallback applies to earlier dates too
        assert_eq!(service.projection_at("2024-02-01"), 10.0);
    }

    #[test]
    fn test_duplicate_dates_keep_last_amount() {
        let points = vec![
            point("2024-03-10", 4.0),
            point("2024-03-10", 6.0),
            point("2024-03-31", 9.0),
        ];
        let service = ProjectionService::new(&points, &[], 2.0);
        assert_eq!(service.amount_for_date("2024-03-10"), Some(6.0));
        assert_eq!(service.projection_at("2024-03-10"), 6.0);
    }

    #[test]
    fn test_points_take_priority_over_overview() {
        let points = vec![point("2024-03-10", 5.0)];
        let days = vec![day("2024-03-01", 1, 1, Some(100.0))];
        let service = ProjectionService::new(&points, &days, 2.0);
        assert_eq!(service.source(), AccrualSource::ProjectionPoints);
        assert_eq!(service.projection_at("2024-03-10"), 5.0);
    }

    #[test]
    fn test_overview_accrual() {
        let days = vec![
            day("2024-03-01", 2, 2, None),       // complete
            day("2024-03-02", 0, 0, None),       // nothing scheduled
            day("2024-03-03", 1, 3, Some(1.5)),  // incomplete, bonus still counts
            day("2024-03-04", 3, 2, Some(0.5)),  // over-complete
            day("2024-03-05", 2, 2, Some(10.0)), // after cutoff
        ];
        let service = ProjectionService::new(&[], &days, 2.0);

        assert_eq!(service.source(), AccrualSource::OverviewDays);
        assert_eq!(service.projection_at("2024-03-04"), 2.0 * 3.0 + 1.5 + 0.5);
    }

    #[test]
    fn test_overview_skips_unparseable_dates() {
        init_test_logging();
        let days = vec![day("2024-03-01", 1, 1, None), day("bad", 1, 1, Some(3.0))];
        let service = ProjectionService::new(&[], &days, 2.0);
        assert_eq!(service.projection_at("2024-03-31"), 2.0);
    }

    #[test]
    fn test_overview_unparseable_cutoff_is_zero() {
        init_test_logging();
        let days = vec![day("2024-03-01", 1, 1, None)];
        let service = ProjectionService::new(&[], &days, 2.0);
        assert_eq!(service.projection_at(""), 0.0);
    }
}

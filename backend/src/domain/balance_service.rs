//! Ledger balance calculations for the pocket-money projector.
//!
//! The ledger is a read-only snapshot of signed cash movements fetched from
//! the server. Balances are always derived by summing entries up to a date;
//! no running balance is stored on the entries themselves.

use chrono::{Duration, NaiveDate};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use shared::LedgerEntry;

use crate::domain::calendar::{format_date_key, parse_date_key};
use crate::domain::models::finite_or_zero;

/// Tolerance used when comparing a server-reported balance with the ledger sum
const BALANCE_EPSILON: f64 = 0.001;

/// End-of-day balance for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBalance {
    pub date_key: String,
    pub balance: f64,
}

/// Balance lookups over a ledger snapshot
#[derive(Debug, Clone, Default)]
pub struct BalanceService {
    /// Parseable entries, sorted by date
    entries: Vec<(NaiveDate, f64)>,
}

impl BalanceService {
    /// Index a ledger snapshot. Entries with unparseable dates are dropped.
    pub fn new(ledger_entries: &[LedgerEntry]) -> Self {
        let mut entries: Vec<(NaiveDate, f64)> = Vec::with_capacity(ledger_entries.len());

        for entry in ledger_entries {
            match parse_date_key(&entry.entry_date) {
                Some(date) => entries.push((date, finite_or_zero(entry.amount))),
                None => warn!(
                    "Skipping ledger entry with unparseable date {:?} (amount {:.2})",
                    entry.entry_date, entry.amount
                ),
            }
        }

        entries.sort_by_key(|(date, _)| *date);
        debug!("Indexed {} of {} ledger entries", entries.len(), ledger_entries.len());

        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of every entry dated on or before `date_key`.
    ///
    /// Returns 0 for an empty ledger or an unparseable key.
    pub fn balance_as_of(&self, date_key: &str) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }

        match parse_date_key(date_key) {
            Some(date) => self.balance_on(date),
            None => {
                warn!("Cannot compute balance as of unparseable date {:?}", date_key);
                0.0
            }
        }
    }

    fn balance_on(&self, date: NaiveDate) -> f64 {
        self.entries
            .iter()
            .take_while(|(entry_date, _)| *entry_date <= date)
            .map(|(_, amount)| amount)
            .sum()
    }

    /// Sum of every indexed entry
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, amount)| amount).sum()
    }

    /// End-of-day balances for every day in the inclusive range.
    ///
    /// Returns an empty list when either bound fails to parse or the range is reversed.
    pub fn daily_balances(&self, start_key: &str, end_key: &str) -> Vec<DailyBalance> {
        let (start, end) = match (parse_date_key(start_key), parse_date_key(end_key)) {
            (Some(start), Some(end)) if start <= end => (start, end),
            _ => {
                warn!("Invalid daily balance range {:?}..={:?}", start_key, end_key);
                return Vec::new();
            }
        };

        let mut balances = Vec::new();
        let mut running_balance: f64 = self
            .entries
            .iter()
            .take_while(|(date, _)| *date < start)
            .map(|(_, amount)| amount)
            .sum();
        let mut pending = self.entries.iter().skip_while(|(date, _)| *date < start).peekable();

        let mut current = start;
        while current <= end {
            while let Some((_, amount)) = pending.next_if(|(date, _)| *date == current) {
                running_balance += amount;
            }
            balances.push(DailyBalance {
                date_key: format_date_key(current),
                balance: running_balance,
            });
            current += Duration::days(1);
        }

        balances
    }

    /// Compare a server-reported balance with the ledger sum.
    ///
    /// Returns the difference (`reported - ledger`) when it exceeds a small
    /// tolerance. Only meaningful for an unpaginated ledger fetch.
    pub fn reconcile(&self, reported_balance: f64) -> Option<f64> {
        let difference = reported_balance - self.total();
        if difference.abs() > BALANCE_EPSILON {
            warn!(
                "Ledger balance mismatch: reported {:.2}, ledger sum {:.2}",
                reported_balance,
                self.total()
            );
            Some(difference)
        } else {
            None
        }
    }
}

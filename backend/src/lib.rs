//! # Pocket-Money Backend
//!
//! Balance and allowance projection for the household app's kids module.
//!
//! Given a kid's ledger, the server's projection points (or the parent's
//! month overview), the monthly allowance and the daily slice, this crate
//! computes the current total, the projected month-end total and an
//! actual-vs-projected series for charting.
//!
//! ## Architecture
//!
//! ```text
//! Caller (web or mobile client, after fetching /kids/... endpoints)
//!     ↓
//! IO Layer (JSON decoding, response → TotalsInput mappers)
//!     ↓
//! Domain Layer (calendar, balances, accrual, totals, formatting)
//! ```
//!
//! ```
//! use pocket_money_backend::{compute_totals, TotalsInput};
//! use shared::LedgerEntry;
//!
//! let input = TotalsInput::new("2024-03-10", "2024-03-01", "2024-03-31", 60.0, 2.0, true)
//!     .with_ledger_entries(vec![LedgerEntry { entry_date: "2024-03-05".into(), amount: 10.0 }]);
//! let totals = compute_totals(&input);
//! assert_eq!(totals.current_total, 10.0);
//! assert_eq!(totals.projected_total, 52.0);
//! ```

pub mod config;
pub mod domain;
pub mod errors;
pub mod io;

#[cfg(test)]
mod test_utils;

pub use config::ProjectorConfig;
pub use domain::calendar;
pub use domain::models::TotalsInput;
pub use domain::{
    compute_totals, BalanceService, ProjectionService, TotalsService, TotalsTableService,
};
pub use errors::{ProjectorError, ProjectorResult};
pub use io::TotalsMapper;

//! # Domain Module
//!
//! Business logic for the pocket-money projector.
//!
//! ## Module Organization
//!
//! - **calendar**: Date-key parsing, day differences and month arithmetic
//! - **balance_service**: Ledger balance as of a date, daily balances, reconciliation
//! - **projection_service**: Accrual already earned at the cutoff date
//! - **totals_service**: Current total, projected total and chart series
//! - **totals_table**: Display formatting for totals and series points
//! - **models**: Input bundle for a totals computation
//!
//! ## Core Concepts
//!
//! - **Ledger entry**: One signed cash movement on a kid's account
//! - **Projection point**: Server-computed accrued allowance at a date
//! - **Cutoff date**: Today for the current month, month end otherwise
//! - **Daily slice**: Per-day accrual rate derived from the monthly allowance
//! - **Allowance remainder**: Monthly allowance not covered by daily slices
//!
//! Everything here is synchronous and side-effect free apart from logging.

pub mod calendar;
pub mod balance_service;
pub mod projection_service;
pub mod totals_service;
pub mod totals_table;
pub mod models;

pub use balance_service::*;
pub use projection_service::*;
pub use totals_service::*;
pub use totals_table::*;

//! Display formatting for pocket-money totals.
//!
//! Turns a computed `KidsTotalsResult` into strings ready for a widget,
//! table or chart tooltip. Formatting is driven by `TotalsDisplayConfig`,
//! which is normally loaded as part of `ProjectorConfig`.

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use shared::{
    AmountType, FormattedSeriesPoint, FormattedTotals, KidsTotalsResult, KidsTotalsSeriesPoint,
};

use crate::domain::calendar::parse_date_key;

/// Configuration for totals display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TotalsDisplayConfig {
    pub show_currency_symbol: bool,
    pub currency_symbol: String,
    pub decimal_places: u8,
    pub date_format: DateFormat,
    pub amount_format: AmountFormat,
}

/// Date formatting options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum DateFormat {
    MonthDayYear, // "March 10, 2024"
    ShortDate,    // "03/10/2024"
    ISO,          // "2024-03-10"
}

/// Amount formatting options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum AmountFormat {
    PlusMinusSign,  // "+$10.00" / "-$5.00"
    ParenthesesNeg, // "$10.00" / "($5.00)"
    Plain,          // "$10.00" / "-$5.00"
}

impl Default for TotalsDisplayConfig {
    fn default() -> Self {
        Self {
            show_currency_symbol: true,
            currency_symbol: "$".to_string(),
            decimal_places: 2,
            date_format: DateFormat::MonthDayYear,
            amount_format: AmountFormat::Plain,
        }
    }
}

/// Formats totals and series points for display
#[derive(Debug, Clone, Default)]
pub struct TotalsTableService {
    config: TotalsDisplayConfig,
}

impl TotalsTableService {
    /// Create a new TotalsTableService with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new TotalsTableService with custom configuration
    pub fn with_config(config: TotalsDisplayConfig) -> Self {
        Self { config }
    }

    pub fn format_totals(&self, result: &KidsTotalsResult) -> FormattedTotals {
        FormattedTotals {
            formatted_current_total: self.format_amount(result.current_total),
            formatted_projected_total: self.format_amount(result.projected_total),
            current_amount_type: classify_amount(result.current_total),
            projected_amount_type: classify_amount(result.projected_total),
            raw_current_total: result.current_total,
            raw_projected_total: result.projected_total,
        }
    }

    pub fn format_series(&self, result: &KidsTotalsResult) -> Vec<FormattedSeriesPoint> {
        result
            .series
            .iter()
            .map(|point| self.format_series_point(point))
            .collect()
    }

    pub fn format_series_point(&self, point: &KidsTotalsSeriesPoint) -> FormattedSeriesPoint {
        FormattedSeriesPoint {
            date_key: point.date_key.clone(),
            formatted_date: self.format_date(&point.date_key),
            formatted_actual: point
                .actual_amount
                .map(|amount| self.format_amount(amount))
                .unwrap_or_default(),
            formatted_projected: point
                .projected_amount
                .map(|amount| self.format_amount(amount))
                .unwrap_or_default(),
        }
    }

    /// Format a date key based on configuration, falling back to the raw key
    pub fn format_date(&self, date_key: &str) -> String {
        let Some(date) = parse_date_key(date_key) else {
            return date_key.to_string();
        };

        match self.config.date_format {
            DateFormat::MonthDayYear => date.format("%B %-d, %Y").to_string(),
            DateFormat::ShortDate => {
                format!("{:02}/{:02}/{}", date.month(), date.day(), date.year())
            }
            DateFormat::ISO => {
                format!("{}-{:02}-{:02}", date.year(), date.month(), date.day())
            }
        }
    }

    /// Format an amount based on configuration
    pub fn format_amount(&self, amount: f64) -> String {
        let currency = if self.config.show_currency_symbol {
            self.config.currency_symbol.as_str()
        } else {
            ""
        };
        let rounded = format!("{:.*}", self.config.decimal_places as usize, amount.abs());
        // Avoid "-$0.00" when rounding swallows a tiny negative
        let is_negative = amount < 0.0 && rounded.chars().any(|c| c != '0' && c != '.');
        let formatted_value = format!("{}{}", currency, rounded);

        match self.config.amount_format {
            AmountFormat::PlusMinusSign => {
                if is_negative {
                    format!("-{}", formatted_value)
                } else {
                    format!("+{}", formatted_value)
                }
            }
            AmountFormat::ParenthesesNeg => {
                if is_negative {
                    format!("({})", formatted_value)
                } else {
                    formatted_value
                }
            }
            AmountFormat::Plain => {
                if is_negative {
                    format!("-{}", formatted_value)
                } else {
                    formatted_value
                }
            }
        }
    }

    /// CSS class name for amount styling
    pub fn amount_css_class(&self, amount: f64) -> &'static str {
        match classify_amount(amount) {
            AmountType::Positive => "amount positive",
            AmountType::Negative => "amount negative",
            AmountType::Zero => "amount zero",
        }
    }
}

/// Classify amount type for styling purposes
pub fn classify_amount(amount: f64) -> AmountType {
    if amount > 0.0 {
        AmountType::Positive
    } else if amount < 0.0 {
        AmountType::Negative
    } else {
        AmountType::Zero
    }
}

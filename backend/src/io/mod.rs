//! # IO Module
//!
//! Adapter layer between the household API's JSON responses and the
//! projector's domain model. Fetching is the caller's job; this module only
//! decodes payloads and maps them into `TotalsInput`.

pub mod mappers;

pub use mappers::*;

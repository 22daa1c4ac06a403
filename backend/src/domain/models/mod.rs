pub mod totals_input;

pub use totals_input::*;

//! Service Kit
//!
//! Pure calculation and rendering steps of the stats pipeline.

mod returns_calculator;
mod report_formatter;

pub use returns_calculator::compute;
pub use report_formatter::{format_report, NOT_AVAILABLE};

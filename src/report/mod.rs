//! Paginated text export of a prediction run.

pub mod builder;
pub mod chart;
pub mod layout;

pub use builder::ReportBuilder;

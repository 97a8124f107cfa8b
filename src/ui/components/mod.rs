pub mod chart;
pub mod gauge;
pub mod input;

pub use chart::SeriesChart;
pub use gauge::{humidity_gauge, rainfall_gauge, score_gauge, temperature_gauge};
pub use input::{InputWidget, SelectWidget, ToggleListWidget};

pub mod conditions;
pub mod forecast;
pub mod insights;
pub mod recommendation;

pub use conditions::*;
pub use forecast::*;
pub use insights::ChartSeries;
pub use recommendation::*;

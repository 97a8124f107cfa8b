pub mod dashboard;
pub mod forecast;
pub mod results;

pub use dashboard::{DashboardScreen, FormField};
pub use forecast::ForecastScreen;
pub use results::ResultsScreen;

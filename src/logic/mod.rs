pub mod calculations;
pub mod crop_scoring;
pub mod planting_window;
pub mod predictor;
pub mod rules;
pub mod weather_sync;

pub use crop_scoring::CropRecommender;
pub use planting_window::PlantingWindowAnalyzer;
pub use predictor::Predictor;
pub use rules::TraitRecommender;
pub use weather_sync::{LocationRequest, WeatherService};

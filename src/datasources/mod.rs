pub mod nominatim;
pub mod openmeteo;

pub use nominatim::{NominatimClient, UNKNOWN_LOCATION};
pub use openmeteo::{OpenMeteoClient, WeatherReading};

//! Business logic services for the Farm Advisor backend

pub mod advice;
pub mod disease;
pub mod price;
pub mod weather;

pub use advice::AdviceService;
pub use disease::DiseaseClassifier;
pub use price::{PriceLookup, PriceTable, PriceTableError};
pub use weather::{WeatherOutcome, WeatherService};

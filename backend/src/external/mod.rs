//! External integrations

pub mod disease_model;
pub mod weather;

pub use disease_model::{ClassifierError, InferenceBackend, ModelInput, OnnxModel};
pub use weather::{WeatherClient, WeatherError};

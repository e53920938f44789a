//! Best-effort weather lookups for advice generation

use shared::WeatherSnapshot;

use crate::config::WeatherConfig;
use crate::external::weather::{CurrentWeather, WeatherClient, WeatherError};

/// What a weather lookup produced
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherOutcome {
    /// Provider answered with conditions for the location
    Observed(WeatherSnapshot),
    /// Provider is reachable but does not know the location
    LocationUnknown,
    /// Provider could not be used (network, HTTP, parse or missing key)
    Unavailable(String),
}

impl WeatherOutcome {
    /// Snapshot to feed the advice rules; empty unless observed
    pub fn into_snapshot(self) -> WeatherSnapshot {
        match self {
            WeatherOutcome::Observed(snapshot) => snapshot,
            WeatherOutcome::LocationUnknown | WeatherOutcome::Unavailable(_) => {
                WeatherSnapshot::unavailable()
            }
        }
    }
}

impl From<CurrentWeather> for WeatherSnapshot {
    fn from(w: CurrentWeather) -> Self {
        WeatherSnapshot {
            temperature_celsius: w.temperature_celsius,
            humidity_percent: w.humidity_percent,
            condition: w.weather_description,
        }
    }
}

/// Weather service for advice requests
#[derive(Clone)]
pub struct WeatherService {
    weather_client: Option<WeatherClient>,
    country_code: String,
}

impl WeatherService {
    /// Create a service from configuration; no API key disables lookups
    pub fn new(config: &WeatherConfig) -> Self {
        let weather_client = if config.api_key.trim().is_empty() {
            None
        } else {
            Some(WeatherClient::with_base_url(
                config.api_key.clone(),
                config.api_endpoint.clone(),
            ))
        };

        Self {
            weather_client,
            country_code: config.country_code.clone(),
        }
    }

    /// Create a service around an existing client
    pub fn with_client(weather_client: WeatherClient, country_code: impl Into<String>) -> Self {
        Self {
            weather_client: Some(weather_client),
            country_code: country_code.into(),
        }
    }

    /// Create a service that never calls the provider
    pub fn disabled() -> Self {
        Self {
            weather_client: None,
            country_code: "IN".to_string(),
        }
    }

    /// Fetch current conditions for a district. Never fails.
    pub async fn current_conditions(&self, district: &str, state: &str) -> WeatherOutcome {
        let Some(client) = &self.weather_client else {
            tracing::debug!("Weather API key not configured, skipping lookup");
            return WeatherOutcome::Unavailable("Weather API key not configured".to_string());
        };

        let location = WeatherClient::location_query(district, state, &self.country_code);
        match client.get_current_weather(&location).await {
            Ok(weather) => {
                tracing::debug!(
                    location = %location,
                    temperature = ?weather.temperature_celsius,
                    humidity = ?weather.humidity_percent,
                    "Weather observed"
                );
                WeatherOutcome::Observed(weather.into())
            }
            Err(WeatherError::LocationNotFound(_)) => {
                tracing::warn!(location = %location, "Weather API has no data for location");
                WeatherOutcome::LocationUnknown
            }
            Err(e) => {
                tracing::warn!(location = %location, "Weather API error: {}", e);
                WeatherOutcome::Unavailable(e.to_string())
            }
        }
    }
}

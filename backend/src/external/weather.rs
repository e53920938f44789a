//! Weather API client for fetching current conditions
//!
//! Integrates with the OpenWeatherMap current weather endpoint, queried by
//! place name (`district,state,country`).

use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// Errors from the weather provider
#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Weather API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Weather API has no data for {0}")]
    LocationNotFound(String),

    #[error("Weather API error: {status} - {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to parse weather response: {0}")]
    Parse(String),
}

/// Current weather conditions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub location_name: String,
    pub observed_at: DateTime<Utc>,
    pub temperature_celsius: Option<f64>,
    pub humidity_percent: Option<f64>,
    pub weather_condition: Option<String>,
    pub weather_description: Option<String>,
}

/// OpenWeatherMap API response for current weather
#[derive(Debug, Deserialize)]
struct OWMCurrentResponse {
    #[serde(default)]
    weather: Vec<OWMWeather>,
    main: Option<OWMMain>,
    dt: Option<i64>,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct OWMWeather {
    main: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OWMMain {
    temp: Option<f64>,
    humidity: Option<f64>,
}

impl WeatherClient {
    /// Create a new WeatherClient
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, "https://api.openweathermap.org/data/2.5".to_string())
    }

    /// Create a new WeatherClient with custom base URL (for testing)
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build the `q` parameter OpenWeatherMap expects for a place name
    pub fn location_query(district: &str, state: &str, country_code: &str) -> String {
        format!("{},{},{}", district.trim(), state.trim(), country_code)
    }

    /// Fetch current weather conditions by place name
    pub async fn get_current_weather(
        &self,
        location: &str,
    ) -> Result<CurrentWeather, WeatherError> {
        let url = format!("{}/weather", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", location),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(WeatherError::LocationNotFound(location.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WeatherError::Status { status, body });
        }

        let body = response.text().await?;
        parse_current_response(&body)
    }
}

/// Convert an OpenWeatherMap current response body to our format
pub fn parse_current_response(body: &str) -> Result<CurrentWeather, WeatherError> {
    let data: OWMCurrentResponse =
        serde_json::from_str(body).map_err(|e| WeatherError::Parse(e.to_string()))?;

    let weather = data.weather.into_iter().next();
    let (temperature, humidity) = data
        .main
        .map(|m| (m.temp, m.humidity))
        .unwrap_or((None, None));

    Ok(CurrentWeather {
        location_name: data.name,
        observed_at: data
            .dt
            .and_then(|dt| DateTime::from_timestamp(dt, 0))
            .unwrap_or_else(Utc::now),
        temperature_celsius: temperature,
        humidity_percent: humidity,
        weather_condition: weather.as_ref().and_then(|w| w.main.clone()),
        weather_description: weather.and_then(|w| w.description),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_query() {
        assert_eq!(
            WeatherClient::location_query(" Guntur ", "Andhra Pradesh", "IN"),
            "Guntur,Andhra Pradesh,IN"
        );
    }

    #[test]
    fn test_parse_full_response() {
        let body = r#"{
            "coord": {"lon": 80.45, "lat": 16.3},
            "weather": [{"id": 721, "main": "Haze", "description": "haze", "icon": "50d"}],
            "main": {"temp": 27.5, "feels_like": 29.1, "pressure": 1009, "humidity": 61},
            "dt": 1700000000,
            "name": "Guntur"
        }"#;
        let weather = parse_current_response(body).unwrap();
        assert_eq!(weather.location_name, "Guntur");
        assert_eq!(weather.temperature_celsius, Some(27.5));
        assert_eq!(weather.humidity_percent, Some(61.0));
        assert_eq!(weather.weather_condition.as_deref(), Some("Haze"));
        assert_eq!(weather.weather_description.as_deref(), Some("haze"));
        assert_eq!(weather.observed_at.timestamp(), 1700000000);
    }

    #[test]
    fn test_parse_partial_response() {
        let weather = parse_current_response(r#"{"name": "Nowhere"}"#).unwrap();
        assert!(weather.temperature_celsius.is_none());
        assert!(weather.humidity_percent.is_none());
        assert!(weather.weather_description.is_none());
    }

    #[test]
    fn test_parse_garbage_fails() {
        assert!(matches!(
            parse_current_response("<html>502</html>"),
            Err(WeatherError::Parse(_))
        ));
    }
}

//! Weather data models

use serde::{Deserialize, Serialize};

use crate::types::{format_reading, NOT_AVAILABLE};

/// Current conditions for a location, any of which may be missing
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WeatherSnapshot {
    pub temperature_celsius: Option<f64>,
    pub humidity_percent: Option<f64>,
    pub condition: Option<String>,
}

impl WeatherSnapshot {
    /// Snapshot used when no weather could be obtained
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.temperature_celsius.is_none()
            && self.humidity_percent.is_none()
            && self.condition.is_none()
    }

    pub fn temperature_display(&self) -> String {
        format_reading(self.temperature_celsius, "°C")
    }

    pub fn humidity_display(&self) -> String {
        format_reading(self.humidity_percent, "%")
    }

    pub fn condition_display(&self) -> String {
        match self.condition.as_deref() {
            Some(c) if !c.is_empty() => c.to_string(),
            _ => NOT_AVAILABLE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_renders_placeholders() {
        let snapshot = WeatherSnapshot::unavailable();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.temperature_display(), NOT_AVAILABLE);
        assert_eq!(snapshot.humidity_display(), NOT_AVAILABLE);
        assert_eq!(snapshot.condition_display(), NOT_AVAILABLE);
    }

    #[test]
    fn test_observed_snapshot_display() {
        let snapshot = WeatherSnapshot {
            temperature_celsius: Some(24.3),
            humidity_percent: Some(58.0),
            condition: Some("scattered clouds".to_string()),
        };
        assert!(!snapshot.is_empty());
        assert_eq!(snapshot.temperature_display(), "24.3°C");
        assert_eq!(snapshot.humidity_display(), "58%");
        assert_eq!(snapshot.condition_display(), "scattered clouds");
    }

    #[test]
    fn test_blank_condition_is_not_available() {
        let snapshot = WeatherSnapshot {
            condition: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(snapshot.condition_display(), NOT_AVAILABLE);
    }
}

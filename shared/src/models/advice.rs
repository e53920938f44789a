//! Sell/hold advice models and rules

use std::ops::RangeInclusive;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{PriceRecord, WeatherSnapshot};
use crate::types::{format_rupees, format_rupees_as_read};
use crate::validation::is_healthy_status;

/// Temperature band (°C) in which holding the crop in storage is advised
pub const STORAGE_TEMPERATURE_C: RangeInclusive<f64> = 20.0..=30.0;

/// Relative humidity band (%) in which holding the crop in storage is advised
pub const STORAGE_HUMIDITY_PCT: RangeInclusive<f64> = 40.0..=70.0;

/// Per-kg price above which selling immediately is advised (₹2500/quintal)
pub const HIGH_PRICE_PER_KG: Decimal = Decimal::from_parts(25, 0, 0, false, 0);

/// Message returned when any advice field is absent or empty
pub const MISSING_ADVICE_FIELDS: &str =
    "Missing data. Required fields are: crop_name, district, state, crop_status";

/// Advice request as sent by the client
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AdviceRequest {
    #[validate(required, length(min = 1, message = "crop_name is required"))]
    pub crop_name: Option<String>,

    #[validate(required, length(min = 1, message = "district is required"))]
    pub district: Option<String>,

    #[validate(required, length(min = 1, message = "state is required"))]
    pub state: Option<String>,

    #[validate(required, length(min = 1, message = "crop_status is required"))]
    pub crop_status: Option<String>,
}

/// A validated advice query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdviceQuery {
    pub crop_name: String,
    pub district: String,
    pub state: String,
    pub crop_status: String,
}

impl AdviceQuery {
    pub fn is_healthy(&self) -> bool {
        is_healthy_status(&self.crop_status)
    }
}

impl AdviceRequest {
    /// Validate the request, returning `None` when any field is missing or empty
    pub fn into_query(self) -> Option<AdviceQuery> {
        self.validate().ok()?;
        Some(AdviceQuery {
            crop_name: self.crop_name?,
            district: self.district?,
            state: self.state?,
            crop_status: self.crop_status?,
        })
    }
}

/// Outcome of the advice rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    /// Crop is diseased: sell now to avoid further losses
    SellDiseased,
    /// Storage weather is favourable: consider holding
    HoldForStorage,
    /// Price is above the high-price mark: sell now
    SellHighPrice,
    /// No rule fired: seller's choice
    SellOrHold,
}

impl Recommendation {
    /// Render the advice text for a per-kg price
    pub fn message(&self, price_per_kg: Decimal) -> String {
        let price = format_rupees(price_per_kg);
        match self {
            Recommendation::SellDiseased => format!(
                "Crop is diseased. It is highly recommended to sell now at the current price of {}/kg to avoid further losses.",
                price
            ),
            Recommendation::HoldForStorage => format!(
                "Weather is good for storage. Current Mandi Price is {}/kg. Consider waiting if prices are low.",
                price
            ),
            Recommendation::SellHighPrice => format!(
                "Price is high at {}/kg! This is a good time to sell.",
                price
            ),
            Recommendation::SellOrHold => format!(
                "Crop is healthy. Current price is {}/kg. You can choose to sell now or store and wait for better prices.",
                price
            ),
        }
    }
}

/// Whether the weather sits inside the storage window.
/// Missing readings never satisfy the window.
pub fn is_storage_weather(temperature_c: Option<f64>, humidity_pct: Option<f64>) -> bool {
    match (temperature_c, humidity_pct) {
        (Some(t), Some(h)) => {
            STORAGE_TEMPERATURE_C.contains(&t) && STORAGE_HUMIDITY_PCT.contains(&h)
        }
        _ => false,
    }
}

/// Apply the advice rules in order: disease, storage weather, high price, fallback
pub fn recommend(
    is_healthy: bool,
    price_per_kg: Decimal,
    temperature_c: Option<f64>,
    humidity_pct: Option<f64>,
) -> Recommendation {
    if !is_healthy {
        Recommendation::SellDiseased
    } else if is_storage_weather(temperature_c, humidity_pct) {
        Recommendation::HoldForStorage
    } else if price_per_kg > HIGH_PRICE_PER_KG {
        Recommendation::SellHighPrice
    } else {
        Recommendation::SellOrHold
    }
}

/// Full advice returned to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdviceResult {
    pub advice: String,
    /// Per-kg price, e.g. `₹30.00`
    pub mandi_price: String,
    /// Per-quintal price as read from the table, e.g. `₹3000`
    pub mandi_price_quintal: String,
    pub temperature: String,
    pub humidity: String,
    pub weather_condition: String,
}

impl AdviceResult {
    /// Run the rules for a price row and weather snapshot and render the result
    pub fn build(is_healthy: bool, price: &PriceRecord, weather: &WeatherSnapshot) -> Self {
        let per_kg = price.modal_price_per_kg();
        let recommendation = recommend(
            is_healthy,
            per_kg,
            weather.temperature_celsius,
            weather.humidity_percent,
        );

        Self {
            advice: recommendation.message(per_kg),
            mandi_price: format_rupees(per_kg),
            mandi_price_quintal: format_rupees_as_read(price.modal_price_per_quintal),
            temperature: weather.temperature_display(),
            humidity: weather.humidity_display(),
            weather_condition: weather.condition_display(),
        }
    }
}

/// Body of a successful advice call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum AdviceResponse {
    Advice(AdviceResult),
    /// No price row for the crop/district pair
    NoPriceData { advice: String },
    /// The price table could not be read at startup
    PriceTableMissing { error: String },
}

impl AdviceResponse {
    pub fn no_price_data(crop_name: &str, district: &str) -> Self {
        AdviceResponse::NoPriceData {
            advice: format!("No mandi price data found for {} in {}.", crop_name, district),
        }
    }

    pub fn price_table_missing(file_name: &str) -> Self {
        AdviceResponse::PriceTableMissing {
            error: format!("The '{}' file was not found.", file_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn cotton(price: &str) -> PriceRecord {
        PriceRecord {
            commodity: "Cotton".to_string(),
            district: "Guntur".to_string(),
            state: None,
            market: None,
            arrival_date: None,
            modal_price_per_quintal: dec(price),
        }
    }

    #[test]
    fn test_diseased_overrides_everything() {
        assert_eq!(
            recommend(false, dec("80"), Some(25.0), Some(55.0)),
            Recommendation::SellDiseased
        );
        assert_eq!(recommend(false, dec("5"), None, None), Recommendation::SellDiseased);
    }

    #[test]
    fn test_storage_window_boundaries_inclusive() {
        assert!(is_storage_weather(Some(20.0), Some(40.0)));
        assert!(is_storage_weather(Some(30.0), Some(70.0)));
        assert!(!is_storage_weather(Some(19.99), Some(50.0)));
        assert!(!is_storage_weather(Some(25.0), Some(70.01)));
        assert!(!is_storage_weather(Some(25.0), None));
        assert!(!is_storage_weather(None, Some(50.0)));
    }

    #[test]
    fn test_high_price_is_strictly_above_25() {
        assert_eq!(recommend(true, dec("25"), None, None), Recommendation::SellOrHold);
        assert_eq!(
            recommend(true, dec("25.01"), None, None),
            Recommendation::SellHighPrice
        );
    }

    #[test]
    fn test_healthy_3000_per_quintal_without_weather() {
        let result = AdviceResult::build(true, &cotton("3000"), &WeatherSnapshot::unavailable());
        assert_eq!(
            result.advice,
            "Price is high at ₹30.00/kg! This is a good time to sell."
        );
        assert_eq!(result.mandi_price, "₹30.00");
        assert_eq!(result.mandi_price_quintal, "₹3000");
        assert_eq!(result.temperature, "Not available");
        assert_eq!(result.humidity, "Not available");
        assert_eq!(result.weather_condition, "Not available");
    }

    #[test]
    fn test_storage_advice_rendering() {
        let weather = WeatherSnapshot {
            temperature_celsius: Some(26.5),
            humidity_percent: Some(62.0),
            condition: Some("haze".to_string()),
        };
        let result = AdviceResult::build(true, &cotton("1850"), &weather);
        assert_eq!(
            result.advice,
            "Weather is good for storage. Current Mandi Price is ₹18.50/kg. Consider waiting if prices are low."
        );
        assert_eq!(result.temperature, "26.5°C");
        assert_eq!(result.humidity, "62%");
        assert_eq!(result.weather_condition, "haze");
    }

    #[test]
    fn test_fallback_message() {
        let msg = Recommendation::SellOrHold.message(dec("12.4"));
        assert_eq!(
            msg,
            "Crop is healthy. Current price is ₹12.40/kg. You can choose to sell now or store and wait for better prices."
        );
    }

    #[test]
    fn test_request_into_query_requires_every_field() {
        let full = AdviceRequest {
            crop_name: Some("cotton".into()),
            district: Some("Guntur".into()),
            state: Some("Andhra Pradesh".into()),
            crop_status: Some("healthy".into()),
        };
        assert!(full.clone().into_query().is_some());

        let missing = AdviceRequest {
            state: None,
            ..full.clone()
        };
        assert!(missing.into_query().is_none());

        let empty = AdviceRequest {
            crop_status: Some(String::new()),
            ..full
        };
        assert!(empty.into_query().is_none());
    }

    #[test]
    fn test_response_shapes() {
        let body = serde_json::to_value(AdviceResponse::no_price_data("wheat", "Pune")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"advice": "No mandi price data found for wheat in Pune."})
        );

        let body =
            serde_json::to_value(AdviceResponse::price_table_missing("latest_stock_data.csv"))
                .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"error": "The 'latest_stock_data.csv' file was not found."})
        );
    }

    fn price_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_storage_window_wins_for_healthy_crops(
            price in price_strategy(),
            temp in 20.0f64..=30.0,
            humidity in 40.0f64..=70.0,
        ) {
            let advice = recommend(true, price, Some(temp), Some(humidity)).message(price);
            prop_assert!(advice.contains("storage"));
        }

        #[test]
        fn prop_diseased_always_sells(
            price in price_strategy(),
            temp in proptest::option::of(-10.0f64..50.0),
            humidity in proptest::option::of(0.0f64..100.0),
        ) {
            prop_assert_eq!(
                recommend(false, price, temp, humidity),
                Recommendation::SellDiseased
            );
        }

        #[test]
        fn prop_high_price_outside_window_sells_now(
            cents in 2501i64..1_000_000i64,
            temp in 31.0f64..50.0,
            humidity in 0.0f64..100.0,
        ) {
            let price = Decimal::new(cents, 2);
            prop_assert_eq!(
                recommend(true, price, Some(temp), Some(humidity)),
                Recommendation::SellHighPrice
            );
        }

        #[test]
        fn prop_per_kg_is_exact_hundredth(quintal in price_strategy()) {
            let record = PriceRecord {
                modal_price_per_quintal: quintal,
                ..cotton("0")
            };
            prop_assert_eq!(record.modal_price_per_kg() * Decimal::from(100), quintal);
        }
    }
}

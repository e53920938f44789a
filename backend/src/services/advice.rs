//! Sell/hold advice generation
//!
//! Price lookup, then a best-effort weather lookup, then the advice rules.

use std::sync::Arc;

use shared::{AdviceQuery, AdviceResponse, AdviceResult};

use crate::services::price::{lookup_price, PriceLookup, PriceTable};
use crate::services::weather::WeatherService;

/// Advice service combining the price table and the weather provider
#[derive(Clone)]
pub struct AdviceService {
    prices: Option<Arc<PriceTable>>,
    price_file_name: String,
    weather: WeatherService,
}

impl AdviceService {
    /// `prices` is `None` when the table failed to load at startup
    pub fn new(
        prices: Option<Arc<PriceTable>>,
        price_file_name: impl Into<String>,
        weather: WeatherService,
    ) -> Self {
        Self {
            prices,
            price_file_name: price_file_name.into(),
            weather,
        }
    }

    /// Produce advice for a validated query. Never fails: missing price data
    /// yields an advisory body and missing weather falls through the rules.
    pub async fn advise(&self, query: &AdviceQuery) -> AdviceResponse {
        let record = match lookup_price(self.prices.as_deref(), &query.crop_name, &query.district) {
            PriceLookup::Found(record) => record,
            PriceLookup::NotFound => {
                tracing::info!(
                    crop = %query.crop_name,
                    district = %query.district,
                    "No mandi price data"
                );
                return AdviceResponse::no_price_data(&query.crop_name, &query.district);
            }
            PriceLookup::TableMissing => {
                tracing::warn!(file = %self.price_file_name, "Price table unavailable");
                return AdviceResponse::price_table_missing(&self.price_file_name);
            }
        };

        let weather = self
            .weather
            .current_conditions(&query.district, &query.state)
            .await
            .into_snapshot();

        let is_healthy = query.is_healthy();
        let result = AdviceResult::build(is_healthy, record, &weather);

        tracing::info!(
            crop = %record.commodity,
            district = %record.district,
            market = ?record.market,
            arrival_date = ?record.arrival_date,
            healthy = is_healthy,
            weather_available = !weather.is_empty(),
            "Advice generated"
        );

        AdviceResponse::Advice(result)
    }
}

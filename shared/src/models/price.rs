//! Mandi price models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kilograms in one quintal, the unit mandi prices are quoted in
pub const KG_PER_QUINTAL: u32 = 100;

/// One row of the commodity price table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceRecord {
    /// Commodity name, title-cased
    pub commodity: String,
    /// District name, title-cased
    pub district: String,
    pub state: Option<String>,
    pub market: Option<String>,
    pub arrival_date: Option<NaiveDate>,
    /// Modal (most commonly traded) price per quintal
    pub modal_price_per_quintal: Decimal,
}

impl PriceRecord {
    /// Modal price per kilogram, always derived from the quintal price
    pub fn modal_price_per_kg(&self) -> Decimal {
        quintal_to_kg(self.modal_price_per_quintal)
    }
}

/// Convert a per-quintal price to a per-kilogram price
pub fn quintal_to_kg(price_per_quintal: Decimal) -> Decimal {
    price_per_quintal / Decimal::from(KG_PER_QUINTAL)
}

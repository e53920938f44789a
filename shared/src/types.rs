//! Common types used across the platform

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Placeholder rendered for any weather field the provider did not supply
pub const NOT_AVAILABLE: &str = "Not available";

/// Indian rupee sign used in every rendered price
pub const RUPEE_SIGN: char = '₹';

/// Render an amount with the rupee sign and two decimal places
pub fn format_rupees(amount: Decimal) -> String {
    format!("{}{:.2}", RUPEE_SIGN, amount)
}

/// Render an amount with the rupee sign, keeping the scale it was read with
pub fn format_rupees_as_read(amount: Decimal) -> String {
    format!("{}{}", RUPEE_SIGN, amount)
}

/// Render an optional reading with a unit suffix, or [`NOT_AVAILABLE`]
pub fn format_reading(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{}{}", v, unit),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// JSON error body returned by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

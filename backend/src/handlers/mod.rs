//! HTTP handlers

pub mod advice;
pub mod disease;
pub mod health;

pub use advice::{get_advice, get_price_advice};
pub use disease::predict_disease;
pub use health::{health_check, root};

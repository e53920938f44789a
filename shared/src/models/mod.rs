//! Domain models for the Farm Advisor platform

mod advice;
mod disease;
mod price;
mod weather;

pub use advice::*;
pub use disease::*;
pub use price::*;
pub use weather::*;

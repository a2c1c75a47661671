//! HTTP/JSON transport for the pricing service.

pub mod body;
pub mod client;

pub use client::{GET_DATA_PATH, HttpPricingService};

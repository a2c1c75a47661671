pub mod config;
pub mod pricing;

pub use config::ServiceConfig;
pub use pricing::{GENERIC_FAILURE_MESSAGE, PricingService, ServiceError};

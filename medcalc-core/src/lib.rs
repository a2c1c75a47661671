pub mod calculations;
pub mod display;
pub mod fetcher;
pub mod models;
pub mod service;
pub mod store;

pub use display::{ErrorKind, View};
pub use fetcher::{FetchTicket, ProjectionFetcher, RequestToken, Resolution};
pub use models::*;
pub use service::{PricingService, ServiceError};
pub use store::{ChangeScope, ParamEdit, ParameterStore};

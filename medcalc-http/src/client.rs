use async_trait::async_trait;
use medcalc_core::{
    PricingService, ProjectionRequest, RawYearRow, ServiceError, service::ServiceConfig,
};
use reqwest::Client;
use tracing::{debug, info};

use crate::body::{decode_rows, detail_from_body};

/// Path of the projection endpoint, relative to the service root.
pub const GET_DATA_PATH: &str = "/getData";

/// [`PricingService`] over HTTP/JSON.
#[derive(Clone)]
pub struct HttpPricingService {
    client: Client,
    endpoint: String,
}

impl HttpPricingService {
    /// Create a client for the service described by `config`.
    ///
    /// No request is made here; an unreachable service shows up on the
    /// first fetch. The timeout bounds each request end to end; without one
    /// requests stay pending until the service answers or the connection drops.
    ///
    /// # Errors
    /// [`ServiceError::Configuration`] for an unusable URL or timeout.
    pub fn new(config: &ServiceConfig) -> Result<Self, ServiceError> {
        let endpoint = config.endpoint(GET_DATA_PATH)?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout()? {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ServiceError::Configuration(format!("failed to create HTTP client: {e}")))?;

        info!(%endpoint, timeout = ?config.timeout, "pricing service configured");
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PricingService for HttpPricingService {
    async fn get_data(
        &self,
        request: &ProjectionRequest,
    ) -> Result<Vec<RawYearRow>, ServiceError> {
        debug!(endpoint = %self.endpoint, ?request, "posting projection request");

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| ServiceError::Connection(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ServiceError::Connection(e.to_string()))?;

        if !status.is_success() {
            return Err(ServiceError::Rejected {
                status: status.as_u16(),
                detail: detail_from_body(&body),
            });
        }

        decode_rows(&body)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use std::time::Duration;

    use super::*;

    fn config(base_url: &str) -> ServiceConfig {
        ServiceConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn endpoint_appends_get_data() {
        let svc = HttpPricingService::new(&ServiceConfig::default()).unwrap();
        assert_eq!(svc.endpoint(), "http://localhost:8000/getData");
    }

    #[test]
    fn endpoint_ignores_trailing_slash() {
        let svc = HttpPricingService::new(&config("https://pricing.example/api/")).unwrap();
        assert_eq!(svc.endpoint(), "https://pricing.example/api/getData");
    }

    #[test]
    fn accepts_timeout() {
        let cfg = ServiceConfig {
            timeout: Some(Duration::from_secs(5)),
            ..Default::default()
        };

        assert!(HttpPricingService::new(&cfg).is_ok());
    }

    #[test]
    fn rejects_unusable_configuration() {
        let zero_timeout = ServiceConfig {
            timeout: Some(Duration::ZERO),
            ..Default::default()
        };

        assert!(matches!(
            HttpPricingService::new(&config("ftp://pricing.example")),
            Err(ServiceError::Configuration(_))
        ));
        assert!(matches!(
            HttpPricingService::new(&zero_timeout),
            Err(ServiceError::Configuration(_))
        ));
    }
}

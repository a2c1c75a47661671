use async_trait::async_trait;
use thiserror::Error;

use crate::models::{ProjectionRequest, RawYearRow};

/// Message shown when the service gives no usable detail of its own.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to fetch data";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The service answered with a non-success status.
    #[error("Request rejected with status {status}")]
    Rejected { status: u16, detail: Option<String> },

    #[error("Connection error: {0}")]
    Connection(String),

    /// The service answered successfully but the body could not be read.
    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ServiceError {
    /// The text shown in the error banner.
    ///
    /// A non-empty `detail` supplied by the service wins; everything else
    /// collapses to [`GENERIC_FAILURE_MESSAGE`].
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Rejected {
                detail: Some(detail),
                ..
            } if !detail.is_empty() => detail.clone(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// The remote pricing service.
///
/// One operation: submit projection inputs and receive one raw row per
/// horizon year.
#[async_trait]
pub trait PricingService: Send + Sync {
    async fn get_data(
        &self,
        request: &ProjectionRequest,
    ) -> Result<Vec<RawYearRow>, ServiceError>;
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn user_message_prefers_service_detail() {
        let err = ServiceError::Rejected {
            status: 422,
            detail: Some("Invalid deductible".to_string()),
        };

        assert_eq!(err.user_message(), "Invalid deductible");
    }

    #[test]
    fn user_message_falls_back_without_detail() {
        let err = ServiceError::Rejected {
            status: 500,
            detail: None,
        };

        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn user_message_falls_back_for_empty_detail() {
        let err = ServiceError::Rejected {
            status: 400,
            detail: Some(String::new()),
        };

        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn transport_errors_use_generic_message() {
        assert_eq!(
            ServiceError::Connection("refused".to_string()).user_message(),
            GENERIC_FAILURE_MESSAGE
        );
        assert_eq!(
            ServiceError::Decode("expected array".to_string()).user_message(),
            GENERIC_FAILURE_MESSAGE
        );
    }
}

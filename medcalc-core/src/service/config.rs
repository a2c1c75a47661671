use std::time::Duration;

use super::pricing::ServiceError;

/// Where the pricing service lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Root URL of the pricing service, e.g. `http://localhost:8000`.
    pub base_url: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout: None,
        }
    }
}

impl ServiceConfig {
    /// Full URL for `path` under the service root.
    ///
    /// # Errors
    /// [`ServiceError::Configuration`] when the root is not an `http://` or
    /// `https://` URL with a host.
    pub fn endpoint(
        &self,
        path: &str,
    ) -> Result<String, ServiceError> {
        let root = self.base_url.trim().trim_end_matches('/');
        let host = root
            .strip_prefix("http://")
            .or_else(|| root.strip_prefix("https://"))
            .ok_or_else(|| {
                ServiceError::Configuration(format!(
                    "service url '{root}' must start with http:// or https://"
                ))
            })?;
        if host.is_empty() {
            return Err(ServiceError::Configuration(format!(
                "service url '{root}' has no host"
            )));
        }
        Ok(format!("{root}/{}", path.trim_start_matches('/')))
    }

    /// The timeout to apply, rejecting a zero duration that would fail every request.
    pub fn request_timeout(&self) -> Result<Option<Duration>, ServiceError> {
        match self.timeout {
            Some(timeout) if timeout.is_zero() => Err(ServiceError::Configuration(
                "request timeout must be greater than zero".to_string(),
            )),
            other => Ok(other),
        }
    }
}

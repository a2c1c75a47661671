//! Fetch lifecycle for projections.
//!
//! [`ProjectionFetcher`] is a runtime-agnostic state machine. It decides when
//! a request must be issued and hands back a [`FetchTicket`]; the caller
//! performs the call however it likes and reports the outcome through
//! [`ProjectionFetcher::resolve`]. Every ticket carries a monotonically
//! increasing [`RequestToken`], and only the most recently issued token may
//! change the state. Older responses are dropped, never cancelled.
//!
//! ```
//! use medcalc_core::fetcher::{ProjectionFetcher, Resolution};
//! use medcalc_core::{FetchState, ProjectionInputs, RawYearRow};
//! use rust_decimal::Decimal;
//!
//! let mut fetcher = ProjectionFetcher::new();
//! let mut inputs = ProjectionInputs::default();
//!
//! let first = fetcher.observe(&inputs).unwrap();
//! inputs.age = 41;
//! let second = fetcher.observe(&inputs).unwrap();
//!
//! let rows = vec![RawYearRow::from_value(Decimal::ONE); 15];
//! assert_eq!(fetcher.resolve(first.token, Ok(rows.clone())), Resolution::Stale);
//! assert_eq!(fetcher.state(), &FetchState::Pending);
//! assert_eq!(fetcher.resolve(second.token, Ok(rows)), Resolution::Applied);
//! assert!(fetcher.state().rows().is_some());
//! ```

use std::fmt;

use tracing::{debug, info, warn};

use crate::models::{FetchState, ProjectionInputs, ProjectionRequest, RawYearRow};
use crate::service::ServiceError;

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl fmt::Display for RequestToken {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A request the caller must send, tagged with the token to resolve it with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub token: RequestToken,
    pub request: ProjectionRequest,
}

/// What [`ProjectionFetcher::resolve`] did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The response belonged to the outstanding request and updated the state.
    Applied,
    /// The response belonged to a superseded request and was discarded.
    Stale,
}

#[derive(Debug, Default)]
pub struct ProjectionFetcher {
    state: FetchState,
    /// Inputs of the most recently issued request.
    last_key: Option<ProjectionInputs>,
    /// Token of the request still allowed to update the state.
    in_flight: Option<RequestToken>,
    issued: u64,
}

impl ProjectionFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    /// Token of the most recently issued request, if any.
    pub fn latest_token(&self) -> Option<RequestToken> {
        (self.issued > 0).then_some(RequestToken(self.issued))
    }

    /// Notify the fetcher that the projection inputs were set.
    ///
    /// Issues a request when the inputs differ from the last issued key (or
    /// nothing was issued yet). After a failure, setting the same values
    /// again also issues one new attempt.
    pub fn observe(
        &mut self,
        inputs: &ProjectionInputs,
    ) -> Option<FetchTicket> {
        let changed = self.last_key.as_ref() != Some(inputs);
        let failed = matches!(self.state, FetchState::Failed(_));

        if changed || failed {
            Some(self.issue(inputs))
        } else {
            debug!("projection inputs unchanged; no request issued");
            None
        }
    }

    /// Issue a new attempt for `inputs` regardless of what was issued before.
    pub fn retry(
        &mut self,
        inputs: &ProjectionInputs,
    ) -> FetchTicket {
        self.issue(inputs)
    }

    fn issue(
        &mut self,
        inputs: &ProjectionInputs,
    ) -> FetchTicket {
        self.issued += 1;
        let token = RequestToken(self.issued);

        if let Some(previous) = self.in_flight.replace(token) {
            debug!(%previous, %token, "superseding outstanding request");
        }
        self.last_key = Some(inputs.clone());
        self.state = FetchState::Pending;

        debug!(%token, age = inputs.age, years = inputs.number_of_years, "issuing projection request");
        FetchTicket {
            token,
            request: inputs.to_request(),
        }
    }

    /// Apply the outcome of the request identified by `token`.
    ///
    /// Responses for anything but the outstanding request are discarded.
    pub fn resolve(
        &mut self,
        token: RequestToken,
        result: Result<Vec<RawYearRow>, ServiceError>,
    ) -> Resolution {
        if self.in_flight != Some(token) {
            debug!(%token, "discarding stale response");
            return Resolution::Stale;
        }
        self.in_flight = None;

        self.state = match result {
            Ok(rows) => {
                info!(%token, rows = rows.len(), "projection received");
                FetchState::Success(rows)
            }
            Err(error) => {
                warn!(%token, %error, "projection request failed");
                FetchState::Failed(error.user_message())
            }
        };
        Resolution::Applied
    }
}

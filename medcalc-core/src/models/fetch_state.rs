use super::RawYearRow;

/// Outcome of the most recent fetch cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchState {
    /// No request has been issued yet.
    #[default]
    Idle,
    /// A request is outstanding for the current inputs.
    Pending,
    Success(Vec<RawYearRow>),
    /// The request failed; holds the message to show the user.
    Failed(String),
}

impl FetchState {
    pub fn is_pending(&self) -> bool {
        matches!(self, FetchState::Pending)
    }

    pub fn rows(&self) -> Option<&[RawYearRow]> {
        match self {
            FetchState::Success(rows) => Some(rows),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            FetchState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

//! Chooses what the results area shows for the current fetch state.

use crate::calculations::YearRowAdjuster;
use crate::models::{AdjustedYearRow, AdjustmentFactors, FetchState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The pricing service could not be reached or rejected the request.
    Request,
    /// The service answered with rows that cannot be displayed: the wrong
    /// number of years, or amounts that overflow once adjusted.
    DataConsistency,
}

/// Exactly one of these is visible at any time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Nothing has been requested yet.
    Idle,
    Loading,
    Error { kind: ErrorKind, message: String },
    Table(Vec<AdjustedYearRow>),
}

impl View {
    /// Derive the view from the fetch state and the current display factors.
    ///
    /// Recomputed on every call; nothing is cached between renders.
    pub fn from_state(
        state: &FetchState,
        factors: &AdjustmentFactors,
        number_of_years: u32,
        index_columns: &[String],
    ) -> Self {
        match state {
            FetchState::Idle => View::Idle,
            FetchState::Pending => View::Loading,
            FetchState::Failed(message) => View::Error {
                kind: ErrorKind::Request,
                message: message.clone(),
            },
            FetchState::Success(raw) => {
                match YearRowAdjuster::new(factors)
                    .with_index_columns(index_columns)
                    .adjust(raw, number_of_years)
                {
                    Ok(rows) => View::Table(rows),
                    Err(error) => {
                        tracing::error!(%error, "projection cannot be displayed");
                        View::Error {
                            kind: ErrorKind::DataConsistency,
                            message: error.to_string(),
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{RawYearRow, VALUE_COLUMN};

    fn index() -> Vec<String> {
        vec!["year".to_string(), "age".to_string()]
    }

    #[test]
    fn pending_shows_only_loading() {
        let view = View::from_state(&FetchState::Pending, &AdjustmentFactors::default(), 15, &index());

        assert_eq!(view, View::Loading);
    }

    #[test]
    fn idle_before_first_fetch() {
        let view = View::from_state(&FetchState::Idle, &AdjustmentFactors::default(), 15, &index());

        assert_eq!(view, View::Idle);
    }

    #[test]
    fn failure_shows_banner_without_table() {
        let state = FetchState::Failed("Invalid deductible".to_string());

        let view = View::from_state(&state, &AdjustmentFactors::default(), 15, &index());

        assert_eq!(
            view,
            View::Error {
                kind: ErrorKind::Request,
                message: "Invalid deductible".to_string()
            }
        );
    }

    #[test]
    fn success_renders_adjusted_rows() {
        let state = FetchState::Success(vec![RawYearRow::from_value(dec!(1000)); 15]);
        let factors = AdjustmentFactors {
            inflation_enabled: false,
            ..Default::default()
        };

        let View::Table(rows) = View::from_state(&state, &factors, 15, &index()) else {
            panic!("expected a table");
        };

        assert_eq!(rows.len(), 15);
        assert!(rows.iter().all(|r| r.amount(VALUE_COLUMN) == Some(dec!(7850))));
    }

    #[test]
    fn row_count_mismatch_is_a_distinct_error() {
        let state = FetchState::Success(vec![RawYearRow::from_value(dec!(1000)); 10]);

        let view = View::from_state(&state, &AdjustmentFactors::default(), 15, &index());

        match view {
            View::Error { kind, message } => {
                assert_eq!(kind, ErrorKind::DataConsistency);
                assert!(message.contains("15"));
                assert!(message.contains("10"));
            }
            other => panic!("expected data consistency error, got {other:#?}"),
        }
    }

    #[test]
    fn overflow_is_a_data_error_not_a_table() {
        let state = FetchState::Success(vec![RawYearRow::from_value(dec!(1000)); 100]);
        let factors = AdjustmentFactors {
            inflation_rate: dec!(100),
            ..Default::default()
        };

        let view = View::from_state(&state, &factors, 100, &index());

        match view {
            View::Error { kind, message } => {
                assert_eq!(kind, ErrorKind::DataConsistency);
                assert!(message.contains("too large"));
            }
            other => panic!("expected data error, got {other:#?}"),
        }
    }

    #[test]
    fn changing_factors_re_renders_same_state() {
        let state = FetchState::Success(vec![RawYearRow::from_value(dec!(100)); 2]);
        let mut factors = AdjustmentFactors {
            inflation_enabled: false,
            currency_rate: dec!(1),
            ..Default::default()
        };

        let before = View::from_state(&state, &factors, 2, &index());
        factors.currency_rate = dec!(2);
        let after = View::from_state(&state, &factors, 2, &index());

        assert_ne!(before, after);
        assert_eq!(after, View::from_state(&state, &factors, 2, &index()));
    }
}

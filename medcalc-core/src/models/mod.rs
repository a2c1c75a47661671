mod adjustment_factors;
mod fetch_state;
mod projection_inputs;
mod year_row;

pub use adjustment_factors::AdjustmentFactors;
pub use fetch_state::FetchState;
pub use projection_inputs::{ProjectionInputs, ProjectionRequest};
pub use year_row::{AdjustedYearRow, Cell, RawYearRow, VALUE_COLUMN};

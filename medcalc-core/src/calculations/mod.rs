//! Display-side calculations applied to projections returned by the pricing
//! service.

pub mod adjust;
pub mod common;

pub use adjust::{DEFAULT_INDEX_COLUMNS, RenderError, YearRowAdjuster};

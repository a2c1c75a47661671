use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Column used when the service returns a bare number instead of an object.
pub const VALUE_COLUMN: &str = "value";

/// A single cell of a year row.
///
/// The shape of a row belongs to the pricing service, so cells are kept
/// loosely typed. Numeric JSON values (and strings that parse as decimals)
/// become [`Cell::Amount`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Amount(Decimal),
    Flag(bool),
    Text(String),
    Empty,
}

impl Cell {
    pub fn as_amount(&self) -> Option<Decimal> {
        match self {
            Cell::Amount(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Cell::Amount(value) => write!(f, "{value}"),
            Cell::Flag(flag) => write!(f, "{flag}"),
            Cell::Text(text) => f.write_str(text),
            Cell::Empty => f.write_str("—"),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRowRepr {
    Fields(BTreeMap<String, Cell>),
    Value(Decimal),
}

impl From<RawRowRepr> for RawYearRow {
    fn from(repr: RawRowRepr) -> Self {
        match repr {
            RawRowRepr::Fields(cells) => Self { cells },
            RawRowRepr::Value(value) => Self::from_value(value),
        }
    }
}

/// One horizon year exactly as the pricing service returned it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawRowRepr")]
pub struct RawYearRow {
    pub cells: BTreeMap<String, Cell>,
}

impl RawYearRow {
    /// A row with a single [`VALUE_COLUMN`] amount.
    pub fn from_value(value: Decimal) -> Self {
        let mut cells = BTreeMap::new();
        cells.insert(VALUE_COLUMN.to_string(), Cell::Amount(value));
        Self { cells }
    }

    pub fn amount(
        &self,
        column: &str,
    ) -> Option<Decimal> {
        self.cells.get(column).and_then(Cell::as_amount)
    }
}

/// A raw row after inflation compounding and currency conversion.
///
/// Amounts keep full precision; rounding happens only when formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdjustedYearRow {
    /// Zero-based position within the horizon.
    pub year_index: u32,
    /// Inflation multiplier applied to this row (one when disabled).
    pub inflation_factor: Decimal,
    pub cells: BTreeMap<String, Cell>,
}

impl AdjustedYearRow {
    pub fn amount(
        &self,
        column: &str,
    ) -> Option<Decimal> {
        self.cells.get(column).and_then(Cell::as_amount)
    }
}

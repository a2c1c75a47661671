//! Turns raw service rows into display rows.
//!
//! For the row at zero-based index `i`, every amount cell becomes
//!
//! ```text
//! adjusted = raw × (1 + inflation_rate / 100)^i × currency_rate
//! ```
//!
//! with the inflation term fixed at one when inflation is disabled. Index
//! columns (calendar year, age) are carried through unchanged, as are
//! non-numeric cells. The computation is exact; rounding is left to the
//! formatter.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use medcalc_core::calculations::YearRowAdjuster;
//! use medcalc_core::{AdjustmentFactors, RawYearRow, VALUE_COLUMN};
//!
//! let factors = AdjustmentFactors {
//!     inflation_rate: dec!(6),
//!     currency_rate: dec!(7.85),
//!     inflation_enabled: true,
//! };
//! let raw = vec![RawYearRow::from_value(dec!(1000)); 3];
//!
//! let rows = YearRowAdjuster::new(&factors).adjust(&raw, 3).unwrap();
//!
//! assert_eq!(rows[0].amount(VALUE_COLUMN), Some(dec!(7850.00)));
//! assert_eq!(rows[1].amount(VALUE_COLUMN), Some(dec!(8321.00)));
//! assert_eq!(rows[2].amount(VALUE_COLUMN), Some(dec!(8820.26)));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{AdjustedYearRow, AdjustmentFactors, Cell, RawYearRow};

/// Columns that describe the year rather than cost it, by default.
pub const DEFAULT_INDEX_COLUMNS: &[&str] = &["year", "age"];

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenderError {
    /// The service returned a different number of rows than years requested.
    #[error("expected {expected} yearly rows but the service returned {actual}")]
    RowCountMismatch { expected: usize, actual: usize },

    /// An adjusted amount does not fit in a decimal.
    #[error("adjusted amounts for year {} are too large to display", year_index + 1)]
    Overflow { year_index: u32 },
}

/// Applies [`AdjustmentFactors`] to a horizon of raw rows.
#[derive(Debug, Clone)]
pub struct YearRowAdjuster<'a> {
    factors: &'a AdjustmentFactors,
    index_columns: Vec<&'a str>,
}

impl<'a> YearRowAdjuster<'a> {
    /// An adjuster that leaves the [`DEFAULT_INDEX_COLUMNS`] untouched.
    pub fn new(factors: &'a AdjustmentFactors) -> Self {
        Self {
            factors,
            index_columns: DEFAULT_INDEX_COLUMNS.to_vec(),
        }
    }

    /// Replace the set of columns that are never adjusted.
    pub fn with_index_columns(
        mut self,
        columns: &'a [String],
    ) -> Self {
        self.index_columns = columns.iter().map(String::as_str).collect();
        self
    }

    /// Produce exactly `number_of_years` adjusted rows.
    ///
    /// # Errors
    ///
    /// * [`RenderError::RowCountMismatch`] when `raw` does not hold exactly
    ///   `number_of_years` rows. Nothing is truncated or padded.
    /// * [`RenderError::Overflow`] when compounding or conversion exceeds the
    ///   decimal range.
    pub fn adjust(
        &self,
        raw: &[RawYearRow],
        number_of_years: u32,
    ) -> Result<Vec<AdjustedYearRow>, RenderError> {
        let expected = number_of_years as usize;
        if raw.len() != expected {
            return Err(RenderError::RowCountMismatch {
                expected,
                actual: raw.len(),
            });
        }

        let growth = self.factors.annual_growth();
        // None once the running factor has left the decimal range.
        let mut inflation_factor = Some(Decimal::ONE);
        let mut rows = Vec::with_capacity(expected);

        for (year_index, row) in (0u32..).zip(raw) {
            let factor = inflation_factor.ok_or(RenderError::Overflow { year_index })?;
            rows.push(self.adjust_row(year_index, row, factor)?);
            inflation_factor = factor.checked_mul(growth);
        }

        Ok(rows)
    }

    fn adjust_row(
        &self,
        year_index: u32,
        row: &RawYearRow,
        inflation_factor: Decimal,
    ) -> Result<AdjustedYearRow, RenderError> {
        let overflow = RenderError::Overflow { year_index };
        let multiplier = inflation_factor
            .checked_mul(self.factors.currency_rate)
            .ok_or(overflow.clone())?;
        let cells = row
            .cells
            .iter()
            .map(|(column, cell)| {
                let adjusted = match cell {
                    Cell::Amount(value) if !self.is_index_column(column) => Cell::Amount(
                        value
                            .checked_mul(multiplier)
                            .ok_or(overflow.clone())?,
                    ),
                    other => other.clone(),
                };
                Ok::<_, RenderError>((column.clone(), adjusted))
            })
            .collect::<Result<_, RenderError>>()?;

        Ok(AdjustedYearRow {
            year_index,
            inflation_factor,
            cells,
        })
    }

    fn is_index_column(
        &self,
        column: &str,
    ) -> bool {
        self.index_columns.iter().any(|index| *index == column)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::common::round_half_up;
    use crate::models::VALUE_COLUMN;

    fn factors(
        inflation_rate: Decimal,
        currency_rate: Decimal,
        inflation_enabled: bool,
    ) -> AdjustmentFactors {
        AdjustmentFactors {
            inflation_rate,
            currency_rate,
            inflation_enabled,
        }
    }

    fn flat_rows(
        value: Decimal,
        n: usize,
    ) -> Vec<RawYearRow> {
        vec![RawYearRow::from_value(value); n]
    }

    fn values(rows: &[AdjustedYearRow]) -> Vec<Decimal> {
        rows.iter().map(|r| r.amount(VALUE_COLUMN).unwrap()).collect()
    }

    #[test]
    fn currency_only_when_inflation_disabled() {
        let f = factors(dec!(6), dec!(7.85), false);
        let raw = flat_rows(dec!(1000), 15);

        let rows = YearRowAdjuster::new(&f).adjust(&raw, 15).unwrap();

        assert_eq!(rows.len(), 15);
        assert!(values(&rows).iter().all(|v| *v == dec!(7850)));
    }

    #[test]
    fn inflation_compounds_from_year_zero() {
        let f = factors(dec!(6), dec!(7.85), true);
        let raw = flat_rows(dec!(1000), 15);

        let rows = YearRowAdjuster::new(&f).adjust(&raw, 15).unwrap();

        assert_eq!(rows[0].amount(VALUE_COLUMN), Some(dec!(7850.00)));
        assert_eq!(rows[1].amount(VALUE_COLUMN), Some(dec!(8321.00)));
        assert_eq!(
            round_half_up(rows[2].amount(VALUE_COLUMN).unwrap()),
            dec!(8820.26)
        );
        assert_eq!(rows[0].inflation_factor, Decimal::ONE);
        assert_eq!(rows[2].inflation_factor, dec!(1.1236));
    }

    #[test]
    fn matches_closed_form_for_every_row() {
        let f = factors(dec!(3.5), dec!(1.27), true);
        let raw: Vec<_> = (1..=10)
            .map(|v| RawYearRow::from_value(Decimal::from(v * 250)))
            .collect();

        let rows = YearRowAdjuster::new(&f).adjust(&raw, 10).unwrap();

        let mut growth = Decimal::ONE;
        for (i, row) in rows.iter().enumerate() {
            let expected = raw[i].amount(VALUE_COLUMN).unwrap() * growth * dec!(1.27);
            assert_eq!(row.amount(VALUE_COLUMN), Some(expected), "row {i}");
            assert_eq!(row.year_index as usize, i);
            growth *= dec!(1.035);
        }
    }

    #[test]
    fn zero_rate_leaves_only_currency() {
        let f = factors(dec!(0), dec!(2), true);
        let raw = flat_rows(dec!(10), 4);

        let rows = YearRowAdjuster::new(&f).adjust(&raw, 4).unwrap();

        assert_eq!(values(&rows), vec![dec!(20); 4]);
    }

    #[test]
    fn index_and_text_columns_pass_through() {
        let f = factors(dec!(10), dec!(2), true);
        let raw: Vec<RawYearRow> = serde_json::from_str(
            r#"[{"year": 2025, "age": 40, "plan": "Smart", "premium": 100},
                {"year": 2026, "age": 41, "plan": "Smart", "premium": 100}]"#,
        )
        .unwrap();

        let rows = YearRowAdjuster::new(&f).adjust(&raw, 2).unwrap();

        assert_eq!(rows[1].amount("year"), Some(dec!(2026)));
        assert_eq!(rows[1].amount("age"), Some(dec!(41)));
        assert_eq!(rows[1].cells["plan"], Cell::Text("Smart".to_string()));
        assert_eq!(rows[1].amount("premium"), Some(dec!(220.0)));
    }

    #[test]
    fn custom_index_columns_replace_defaults() {
        let f = factors(dec!(0), dec!(3), false);
        let index = vec!["policy_year".to_string()];
        let raw: Vec<RawYearRow> =
            serde_json::from_str(r#"[{"policy_year": 1, "age": 40}]"#).unwrap();

        let rows = YearRowAdjuster::new(&f)
            .with_index_columns(&index)
            .adjust(&raw, 1)
            .unwrap();

        assert_eq!(rows[0].amount("policy_year"), Some(dec!(1)));
        assert_eq!(rows[0].amount("age"), Some(dec!(120)));
    }

    #[test]
    fn row_count_mismatch_is_reported_not_guessed() {
        let f = AdjustmentFactors::default();

        let short = YearRowAdjuster::new(&f).adjust(&flat_rows(dec!(1), 14), 15);
        let long = YearRowAdjuster::new(&f).adjust(&flat_rows(dec!(1), 16), 15);

        assert_eq!(
            short,
            Err(RenderError::RowCountMismatch {
                expected: 15,
                actual: 14
            })
        );
        assert_eq!(
            long,
            Err(RenderError::RowCountMismatch {
                expected: 15,
                actual: 16
            })
        );
    }

    #[test]
    fn long_horizon_at_high_rate_reports_overflow() {
        let f = factors(dec!(100), dec!(7.85), true);

        let result = YearRowAdjuster::new(&f).adjust(&flat_rows(dec!(1000), 100), 100);

        let Err(RenderError::Overflow { year_index }) = result else {
            panic!("expected overflow, got {result:?}");
        };
        assert!(year_index > 0 && year_index < 100);
    }

    #[test]
    fn extreme_rate_reports_overflow() {
        let f = factors(dec!(100000), dec!(7.85), true);

        let result = YearRowAdjuster::new(&f).adjust(&flat_rows(dec!(1000), 15), 15);

        assert!(matches!(result, Err(RenderError::Overflow { .. })));
    }

    #[test]
    fn overflowing_amount_is_reported_for_its_year() {
        let f = factors(dec!(0), Decimal::MAX, false);

        let result = YearRowAdjuster::new(&f).adjust(&flat_rows(dec!(2), 1), 1);

        assert_eq!(result, Err(RenderError::Overflow { year_index: 0 }));
    }

    #[test]
    fn empty_horizon_yields_no_rows() {
        let f = AdjustmentFactors::default();

        assert_eq!(YearRowAdjuster::new(&f).adjust(&[], 0), Ok(vec![]));
    }

    #[test]
    fn adjusting_twice_is_identical() {
        let f = factors(dec!(6), dec!(7.85), true);
        let raw = flat_rows(dec!(1000), 15);
        let adjuster = YearRowAdjuster::new(&f);

        assert_eq!(adjuster.adjust(&raw, 15), adjuster.adjust(&raw, 15));
    }
}

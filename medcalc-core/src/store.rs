//! The parameter store: single source of truth for user-editable values.
//!
//! Every edit replaces exactly one field by cloning the previous value,
//! changing the field and swapping the result in. Nothing here validates
//! ranges; out-of-range values are forwarded to the pricing service as-is.

use rust_decimal::Decimal;
use tracing::trace;

use crate::models::{AdjustmentFactors, ProjectionInputs};

/// A single-field edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamEdit {
    Year(String),
    Plan(String),
    Age(u32),
    Deductible(Decimal),
    NumberOfYears(u32),
    InflationRate(Decimal),
    CurrencyRate(Decimal),
    InflationEnabled(bool),
}

/// Which part of the store an edit touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeScope {
    /// One of the five fields that key the projection request.
    Projection,
    /// A display-only adjustment factor.
    Display,
}

impl ParamEdit {
    pub fn scope(&self) -> ChangeScope {
        match self {
            ParamEdit::Year(_)
            | ParamEdit::Plan(_)
            | ParamEdit::Age(_)
            | ParamEdit::Deductible(_)
            | ParamEdit::NumberOfYears(_) => ChangeScope::Projection,
            ParamEdit::InflationRate(_)
            | ParamEdit::CurrencyRate(_)
            | ParamEdit::InflationEnabled(_) => ChangeScope::Display,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterStore {
    inputs: ProjectionInputs,
    factors: AdjustmentFactors,
}

impl ParameterStore {
    /// A store holding the application defaults.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values(
        inputs: ProjectionInputs,
        factors: AdjustmentFactors,
    ) -> Self {
        Self { inputs, factors }
    }

    pub fn inputs(&self) -> &ProjectionInputs {
        &self.inputs
    }

    pub fn factors(&self) -> &AdjustmentFactors {
        &self.factors
    }

    /// Apply one edit and report which part of the store it belongs to.
    ///
    /// The scope is reported even when the new value equals the old one;
    /// deciding whether that matters is up to the dependents.
    pub fn apply(
        &mut self,
        edit: ParamEdit,
    ) -> ChangeScope {
        let scope = edit.scope();
        trace!(?edit, "applying parameter edit");

        match edit {
            ParamEdit::Year(year) => {
                self.inputs = ProjectionInputs {
                    year,
                    ..self.inputs.clone()
                }
            }
            ParamEdit::Plan(plan) => {
                self.inputs = ProjectionInputs {
                    plan,
                    ..self.inputs.clone()
                }
            }
            ParamEdit::Age(age) => {
                self.inputs = ProjectionInputs {
                    age,
                    ..self.inputs.clone()
                }
            }
            ParamEdit::Deductible(deductible) => {
                self.inputs = ProjectionInputs {
                    deductible,
                    ..self.inputs.clone()
                }
            }
            ParamEdit::NumberOfYears(number_of_years) => {
                self.inputs = ProjectionInputs {
                    number_of_years,
                    ..self.inputs.clone()
                }
            }
            ParamEdit::InflationRate(inflation_rate) => {
                self.factors = AdjustmentFactors {
                    inflation_rate,
                    ..self.factors.clone()
                }
            }
            ParamEdit::CurrencyRate(currency_rate) => {
                self.factors = AdjustmentFactors {
                    currency_rate,
                    ..self.factors.clone()
                }
            }
            ParamEdit::InflationEnabled(inflation_enabled) => {
                self.factors = AdjustmentFactors {
                    inflation_enabled,
                    ..self.factors.clone()
                }
            }
        }

        scope
    }

    pub fn set_year(
        &mut self,
        year: impl Into<String>,
    ) -> ChangeScope {
        self.apply(ParamEdit::Year(year.into()))
    }

    pub fn set_plan(
        &mut self,
        plan: impl Into<String>,
    ) -> ChangeScope {
        self.apply(ParamEdit::Plan(plan.into()))
    }

    pub fn set_age(
        &mut self,
        age: u32,
    ) -> ChangeScope {
        self.apply(ParamEdit::Age(age))
    }

    pub fn set_deductible(
        &mut self,
        deductible: Decimal,
    ) -> ChangeScope {
        self.apply(ParamEdit::Deductible(deductible))
    }

    pub fn set_number_of_years(
        &mut self,
        number_of_years: u32,
    ) -> ChangeScope {
        self.apply(ParamEdit::NumberOfYears(number_of_years))
    }

    pub fn set_inflation_rate(
        &mut self,
        rate: Decimal,
    ) -> ChangeScope {
        self.apply(ParamEdit::InflationRate(rate))
    }

    pub fn set_currency_rate(
        &mut self,
        rate: Decimal,
    ) -> ChangeScope {
        self.apply(ParamEdit::CurrencyRate(rate))
    }

    pub fn set_inflation_enabled(
        &mut self,
        enabled: bool,
    ) -> ChangeScope {
        self.apply(ParamEdit::InflationEnabled(enabled))
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The parameters that determine which projection the pricing service returns.
///
/// Two values that compare equal describe the same projection; any difference
/// in any of the five fields requires a new fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionInputs {
    pub year: String,
    pub plan: String,
    pub age: u32,
    pub deductible: Decimal,
    pub number_of_years: u32,
}

impl Default for ProjectionInputs {
    fn default() -> Self {
        Self {
            year: "2025".to_string(),
            plan: "Smart".to_string(),
            age: 40,
            deductible: Decimal::from(22800),
            number_of_years: 15,
        }
    }
}

impl ProjectionInputs {
    /// Builds the wire payload for these inputs.
    pub fn to_request(&self) -> ProjectionRequest {
        ProjectionRequest {
            year: self.year.clone(),
            plan: self.plan.clone(),
            age: self.age,
            deductible: self.deductible,
            number_of_years: self.number_of_years,
        }
    }
}

/// Body of a `getData` request.
///
/// Adjustment factors never appear here; they only affect display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionRequest {
    pub year: String,
    pub plan: String,
    pub age: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub deductible: Decimal,
    pub number_of_years: u32,
}

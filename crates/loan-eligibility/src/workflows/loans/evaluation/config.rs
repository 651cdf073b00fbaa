use serde::{Deserialize, Serialize};

/// Decision thresholds and lending caps applied after risk aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Highest overall risk score (inclusive) that is still eligible.
    pub eligibility_threshold: f64,
    pub max_loan_amount: f64,
    /// Share of annual income that may be lent.
    pub income_lending_fraction: f64,
    /// Share of collateral value that may be advanced.
    pub collateral_advance_rate: f64,
    /// Longest repayment term (inclusive) accepted for a request.
    pub max_repayment_months: u32,
}

impl EvaluationConfig {
    pub fn is_eligible(&self, overall_risk: f64) -> bool {
        overall_risk <= self.eligibility_threshold
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            eligibility_threshold: 65.0,
            max_loan_amount: 1_000_000.0,
            income_lending_fraction: 0.4,
            collateral_advance_rate: 0.8,
            max_repayment_months: 360,
        }
    }
}

use serde::{Deserialize, Serialize};

use super::super::domain::LoanRequest;
use super::config::EvaluationConfig;
use super::rules::FinancialRatios;

const APPROVAL_REASON: &str = "Loan approved based on comprehensive analysis of financial stability, spending patterns, and risk factors.";

/// Adjudication outcome for a loan request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LoanDecision {
    Approved,
    Denied(DenialReason),
}

impl LoanDecision {
    pub fn summary(&self) -> String {
        match self {
            LoanDecision::Approved => APPROVAL_REASON.to_string(),
            LoanDecision::Denied(reason) => reason.summary(),
        }
    }
}

/// Risk band that caused a denial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DenialReason {
    /// Overall risk above 80.
    HighRisk,
    /// Overall risk above 70.
    ModerateRisk,
    BelowEligibilityCriteria,
}

impl DenialReason {
    fn for_risk(risk: f64) -> Self {
        if risk > 80.0 {
            Self::HighRisk
        } else if risk > 70.0 {
            Self::ModerateRisk
        } else {
            Self::BelowEligibilityCriteria
        }
    }

    pub fn summary(&self) -> String {
        match self {
            DenialReason::HighRisk => "High risk profile - application denied due to poor financial discipline and spending patterns.".to_string(),
            DenialReason::ModerateRisk => "Moderate risk profile - application denied. Consider improving savings and reducing discretionary spending.".to_string(),
            DenialReason::BelowEligibilityCriteria => "Application denied - does not meet eligibility criteria. Focus on building financial stability.".to_string(),
        }
    }
}

/// Terms settled by the decider before amortization.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DecidedTerms {
    pub(crate) decision: LoanDecision,
    pub(crate) granted_amount: f64,
    pub(crate) interest_rate: Option<f64>,
}

/// Annual interest rate (percent) for an eligible risk score.
pub fn interest_rate_for(risk: f64) -> f64 {
    if risk <= 30.0 {
        10.0
    } else if risk <= 45.0 {
        12.0
    } else if risk <= 60.0 {
        15.0
    } else {
        18.0
    }
}

/// Largest amount that may be granted against a request at the given risk.
pub fn lending_cap(
    risk: f64,
    request: &LoanRequest,
    ratios: &FinancialRatios,
    config: &EvaluationConfig,
) -> f64 {
    let by_income = ratios.total_monthly_income * 12.0 * config.income_lending_fraction;
    let by_risk = request.requested_amount * (1.0 - risk / 100.0);

    let mut cap = by_income.min(config.max_loan_amount);
    if request.collateral_value > 0.0 {
        cap = cap.max(request.collateral_value * config.collateral_advance_rate);
    }
    cap.min(by_risk)
}

pub(crate) fn decide_terms(
    risk: f64,
    request: &LoanRequest,
    ratios: &FinancialRatios,
    config: &EvaluationConfig,
) -> DecidedTerms {
    if !config.is_eligible(risk) {
        return DecidedTerms {
            decision: LoanDecision::Denied(DenialReason::for_risk(risk)),
            granted_amount: 0.0,
            interest_rate: None,
        };
    }

    let cap = lending_cap(risk, request, ratios, config);
    let granted_amount = request.requested_amount.min(cap).max(0.0);

    DecidedTerms {
        decision: LoanDecision::Approved,
        granted_amount,
        interest_rate: Some(interest_rate_for(risk)),
    }
}

mod aggregate;
mod amortization;
mod config;
mod policy;
mod rules;

pub use aggregate::{adjust_for_purpose, base_risk, overall_risk, ComponentScores};
pub use amortization::{monthly_installment, repayment_schedule};
pub use config::EvaluationConfig;
pub use policy::{interest_rate_for, lending_cap, DenialReason, LoanDecision};
pub use rules::{
    behavioral_risk, employment_stability, financial_stability, lifestyle_risk, spending_habits,
    FinancialRatios, RiskCategory, ScoreComponent,
};

use super::domain::{ApplicantProfile, LoanRequest, ProfileScoreUpdate};
use policy::decide_terms;
use serde::{Deserialize, Serialize};

/// Stateless evaluator that applies the scoring rubric to a profile and loan request.
#[derive(Debug, Clone, Default)]
pub struct EligibilityEngine {
    config: EvaluationConfig,
}

impl EligibilityEngine {
    pub fn new(config: EvaluationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    pub fn evaluate(
        &self,
        profile: &ApplicantProfile,
        request: &LoanRequest,
    ) -> Result<AssessmentResult, EvaluationError> {
        validate_request(request, &self.config)?;

        let ratios = FinancialRatios::derive(profile, request);
        let components = rules::score_profile(profile, &ratios);
        let scores = ComponentScores::from_components(&components);
        let overall_risk_score = overall_risk(&scores, request.purpose());

        let terms = decide_terms(overall_risk_score, request, &ratios, &self.config);
        let emi = match terms.interest_rate {
            Some(rate) if terms.granted_amount > 0.0 => {
                monthly_installment(terms.granted_amount, rate, request.repayment_period)
            }
            _ => 0.0,
        };

        Ok(AssessmentResult {
            eligible: matches!(terms.decision, LoanDecision::Approved),
            reason: terms.decision.summary(),
            decision: terms.decision,
            granted_amount: terms.granted_amount,
            repayment_months: request.repayment_period,
            emi,
            interest_rate: terms.interest_rate,
            overall_risk_score,
            scores,
            ratios,
            analysis: CategoryAnalysis::from_scores(&scores),
            components,
        })
    }
}

/// Evaluate with the default rubric configuration.
pub fn evaluate(
    profile: &ApplicantProfile,
    request: &LoanRequest,
) -> Result<AssessmentResult, EvaluationError> {
    EligibilityEngine::default().evaluate(profile, request)
}

fn validate_request(
    request: &LoanRequest,
    config: &EvaluationConfig,
) -> Result<(), EvaluationError> {
    if !request.requested_amount.is_finite() {
        return Err(EvaluationError::InvalidInput {
            field: "requested_amount",
            reason: "must be a finite number".to_string(),
        });
    }
    if request.requested_amount < 0.0 {
        return Err(EvaluationError::InvalidInput {
            field: "requested_amount",
            reason: format!("must not be negative (got {})", request.requested_amount),
        });
    }
    if request.repayment_period == 0 {
        return Err(EvaluationError::InvalidInput {
            field: "repayment_period",
            reason: "must be at least one month".to_string(),
        });
    }
    if request.repayment_period > config.max_repayment_months {
        return Err(EvaluationError::InvalidInput {
            field: "repayment_period",
            reason: format!(
                "must not exceed {} months (got {})",
                config.max_repayment_months, request.repayment_period
            ),
        });
    }
    Ok(())
}

/// Error raised when a loan request cannot be evaluated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluationError {
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },
}

/// Qualitative label for a category score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    Poor,
    VeryPoor,
}

impl ScoreBand {
    pub fn for_score(score: u32) -> Self {
        match score {
            80.. => Self::Excellent,
            60..=79 => Self::Good,
            40..=59 => Self::Fair,
            20..=39 => Self::Poor,
            _ => Self::VeryPoor,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent",
            ScoreBand::Good => "Good",
            ScoreBand::Fair => "Fair",
            ScoreBand::Poor => "Poor",
            ScoreBand::VeryPoor => "Very Poor",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAnalysis {
    pub financial_stability: ScoreBand,
    pub spending_habits: ScoreBand,
    pub lifestyle_risk: ScoreBand,
    pub employment_stability: ScoreBand,
    pub behavioral_risk: ScoreBand,
}

impl CategoryAnalysis {
    fn from_scores(scores: &ComponentScores) -> Self {
        Self {
            financial_stability: ScoreBand::for_score(scores.financial_stability),
            spending_habits: ScoreBand::for_score(scores.spending_habits),
            lifestyle_risk: ScoreBand::for_score(scores.lifestyle_risk),
            employment_stability: ScoreBand::for_score(scores.employment_stability),
            behavioral_risk: ScoreBand::for_score(scores.behavioral_risk),
        }
    }
}

/// Immutable outcome of one evaluation.
///
/// Amounts and ratios are kept at full precision; [`AssessmentResult::summary`] produces the
/// rounded figures shown to applicants and stored with the loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub eligible: bool,
    pub decision: LoanDecision,
    pub granted_amount: f64,
    pub repayment_months: u32,
    pub emi: f64,
    /// Annual percentage rate; only set for eligible requests.
    pub interest_rate: Option<f64>,
    pub overall_risk_score: f64,
    pub scores: ComponentScores,
    pub ratios: FinancialRatios,
    pub reason: String,
    pub analysis: CategoryAnalysis,
    pub components: Vec<ScoreComponent>,
}

impl AssessmentResult {
    /// Scores to persist on the applicant profile.
    pub fn profile_update(&self, profile_completion_percentage: u8) -> ProfileScoreUpdate {
        ProfileScoreUpdate {
            financial_stability_score: self.scores.financial_stability,
            spending_habits_score: self.scores.spending_habits,
            lifestyle_risk_score: self.scores.lifestyle_risk,
            overall_risk_score: self.overall_risk_score.round() as u32,
            profile_completion_percentage,
        }
    }

    pub fn summary(&self) -> AssessmentSummary {
        AssessmentSummary {
            eligible: self.eligible,
            granted_amount: self.granted_amount.round(),
            repayment_months: self.repayment_months,
            emi: self.emi.round(),
            interest_rate: self.interest_rate.map(round_cents),
            risk_score: self.overall_risk_score.round() as u32,
            reason: self.reason.clone(),
            total_monthly_income: self.ratios.total_monthly_income.round(),
            debt_to_income_ratio: round_cents(self.ratios.debt_to_income_ratio),
            financial_stability_score: self.scores.financial_stability,
            spending_habits_score: self.scores.spending_habits,
            lifestyle_risk_score: self.scores.lifestyle_risk,
            employment_stability_score: self.scores.employment_stability,
            behavioral_risk_score: self.scores.behavioral_risk,
            mall_spending_ratio: round_cents(self.ratios.mall_spending_ratio),
            restaurant_spending_ratio: round_cents(self.ratios.restaurant_spending_ratio),
            savings_ratio: round_cents(self.ratios.savings_ratio),
            spending_to_income_ratio: round_cents(self.ratios.spending_to_income_ratio),
            analysis: AnalysisLabels {
                financial_stability: self.analysis.financial_stability.label(),
                spending_habits: self.analysis.spending_habits.label(),
                lifestyle_risk: self.analysis.lifestyle_risk.label(),
                employment_stability: self.analysis.employment_stability.label(),
                behavioral_risk: self.analysis.behavioral_risk.label(),
            },
        }
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Applicant-facing view of an assessment with display rounding applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentSummary {
    pub eligible: bool,
    pub granted_amount: f64,
    pub repayment_months: u32,
    pub emi: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<f64>,
    pub risk_score: u32,
    pub reason: String,
    pub total_monthly_income: f64,
    pub debt_to_income_ratio: f64,
    pub financial_stability_score: u32,
    pub spending_habits_score: u32,
    pub lifestyle_risk_score: u32,
    pub employment_stability_score: u32,
    pub behavioral_risk_score: u32,
    pub mall_spending_ratio: f64,
    pub restaurant_spending_ratio: f64,
    pub savings_ratio: f64,
    pub spending_to_income_ratio: f64,
    pub analysis: AnalysisLabels,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisLabels {
    pub financial_stability: &'static str,
    pub spending_habits: &'static str,
    pub lifestyle_risk: &'static str,
    pub employment_stability: &'static str,
    pub behavioral_risk: &'static str,
}

use serde::{Deserialize, Serialize};

use super::super::domain::LoanPurpose;
use super::rules::{RiskCategory, ScoreComponent};

/// Per-category scores of a single assessment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentScores {
    pub financial_stability: u32,
    pub spending_habits: u32,
    pub lifestyle_risk: u32,
    pub employment_stability: u32,
    pub behavioral_risk: u32,
}

impl ComponentScores {
    pub fn from_components(components: &[ScoreComponent]) -> Self {
        components
            .iter()
            .fold(Self::default(), |mut scores, component| {
                *scores.slot(component.category) = component.score;
                scores
            })
    }

    pub fn get(&self, category: RiskCategory) -> u32 {
        match category {
            RiskCategory::FinancialStability => self.financial_stability,
            RiskCategory::SpendingHabits => self.spending_habits,
            RiskCategory::LifestyleRisk => self.lifestyle_risk,
            RiskCategory::EmploymentStability => self.employment_stability,
            RiskCategory::BehavioralRisk => self.behavioral_risk,
        }
    }

    fn slot(&mut self, category: RiskCategory) -> &mut u32 {
        match category {
            RiskCategory::FinancialStability => &mut self.financial_stability,
            RiskCategory::SpendingHabits => &mut self.spending_habits,
            RiskCategory::LifestyleRisk => &mut self.lifestyle_risk,
            RiskCategory::EmploymentStability => &mut self.employment_stability,
            RiskCategory::BehavioralRisk => &mut self.behavioral_risk,
        }
    }

    /// Weighted sum of the category scores (30/25/20/15/10).
    ///
    /// Summed in integer percent points and divided once so that scores landing on a whole
    /// number (such as an overall risk of exactly 65) are represented exactly.
    pub fn weighted_score(&self) -> f64 {
        let points: u64 = RiskCategory::ALL
            .iter()
            .map(|category| u64::from(self.get(*category)) * u64::from(category.weight_percent()))
            .sum();
        points as f64 / 100.0
    }
}

/// Overall risk before the purpose adjustment. Floors at 0, but is not capped at 100.
pub fn base_risk(scores: &ComponentScores) -> f64 {
    (100.0 - scores.weighted_score()).max(0.0)
}

/// Scale risk by the loan purpose multiplier and cap the result at 100.
pub fn adjust_for_purpose(risk: f64, purpose: LoanPurpose) -> f64 {
    (risk * purpose.risk_multiplier()).min(100.0)
}

pub fn overall_risk(scores: &ComponentScores, purpose: LoanPurpose) -> f64 {
    adjust_for_purpose(base_risk(scores), purpose)
}

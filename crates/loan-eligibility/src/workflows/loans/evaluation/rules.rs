use serde::{Deserialize, Serialize};

use super::super::domain::{
    amount, flag, ApplicantProfile, CreditCardUsage, LoanRequest, ShoppingFrequency,
    SocialMediaUsage,
};

const STABLE_INDUSTRIES: [&str; 6] = [
    "IT",
    "Healthcare",
    "Education",
    "Government",
    "Banking",
    "Insurance",
];

/// Scoring categories and their share (in percent) of the weighted total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    FinancialStability,
    SpendingHabits,
    LifestyleRisk,
    EmploymentStability,
    BehavioralRisk,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 5] = [
        RiskCategory::FinancialStability,
        RiskCategory::SpendingHabits,
        RiskCategory::LifestyleRisk,
        RiskCategory::EmploymentStability,
        RiskCategory::BehavioralRisk,
    ];

    pub const fn weight_percent(self) -> u32 {
        match self {
            RiskCategory::FinancialStability => 30,
            RiskCategory::SpendingHabits => 25,
            RiskCategory::LifestyleRisk => 20,
            RiskCategory::EmploymentStability => 15,
            RiskCategory::BehavioralRisk => 10,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RiskCategory::FinancialStability => "financial stability",
            RiskCategory::SpendingHabits => "spending habits",
            RiskCategory::LifestyleRisk => "lifestyle risk",
            RiskCategory::EmploymentStability => "employment stability",
            RiskCategory::BehavioralRisk => "behavioral risk",
        }
    }
}

/// Income-relative figures shared by the calculators and reported with the assessment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancialRatios {
    pub total_monthly_income: f64,
    pub debt_to_income_ratio: f64,
    pub savings_ratio: f64,
    pub mall_spending_ratio: f64,
    pub restaurant_spending_ratio: f64,
    pub spending_to_income_ratio: f64,
}

impl FinancialRatios {
    /// Without income the debt and spending ratios read as fully committed (1) while the
    /// savings and discretionary ratios read as 0.
    pub fn derive(profile: &ApplicantProfile, request: &LoanRequest) -> Self {
        let income =
            profile.current_salary() + request.additional_income + request.co_applicant_income();
        let has_income = income > 0.0;
        let share = |value: f64, without_income: f64| {
            if has_income {
                value / income
            } else {
                without_income
            }
        };

        let debt = amount(profile.current_emis) + amount(profile.avg_credit_card_bill);

        Self {
            total_monthly_income: income,
            debt_to_income_ratio: share(debt, 1.0),
            savings_ratio: share(amount(profile.avg_monthly_savings), 0.0),
            mall_spending_ratio: share(profile.mall_spending(), 0.0),
            restaurant_spending_ratio: share(profile.restaurant_spending(), 0.0),
            spending_to_income_ratio: share(profile.monthly_expenses(), 1.0),
        }
    }
}

/// Discrete contribution to an assessment, keeping the awarded buckets for audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub category: RiskCategory,
    pub score: u32,
    pub notes: Vec<String>,
}

struct Tally {
    category: RiskCategory,
    score: u32,
    notes: Vec<String>,
}

impl Tally {
    fn new(category: RiskCategory) -> Self {
        Self {
            category,
            score: 0,
            notes: Vec::new(),
        }
    }

    fn award(&mut self, points: u32, note: String) {
        self.score += points;
        self.notes.push(format!("+{points} {note}"));
    }

    fn finish(self) -> ScoreComponent {
        ScoreComponent {
            category: self.category,
            score: self.score,
            notes: self.notes,
        }
    }
}

/// First tier whose threshold the value reaches.
fn at_least(value: f64, tiers: &[(f64, u32)], otherwise: u32) -> u32 {
    tiers
        .iter()
        .find(|(threshold, _)| value >= *threshold)
        .map_or(otherwise, |(_, points)| *points)
}

/// First tier whose ceiling the value stays within.
fn at_most(value: f64, tiers: &[(f64, u32)], otherwise: u32) -> u32 {
    tiers
        .iter()
        .find(|(ceiling, _)| value <= *ceiling)
        .map_or(otherwise, |(_, points)| *points)
}

pub(crate) fn score_profile(
    profile: &ApplicantProfile,
    ratios: &FinancialRatios,
) -> Vec<ScoreComponent> {
    vec![
        financial_stability(profile, ratios),
        spending_habits(ratios),
        lifestyle_risk(profile),
        employment_stability(profile),
        behavioral_risk(profile),
    ]
}

pub fn financial_stability(profile: &ApplicantProfile, ratios: &FinancialRatios) -> ScoreComponent {
    let mut tally = Tally::new(RiskCategory::FinancialStability);

    let income = ratios.total_monthly_income;
    tally.award(
        at_least(
            income,
            &[(50_000.0, 25), (30_000.0, 20), (20_000.0, 15), (15_000.0, 10)],
            5,
        ),
        format!("monthly income {income:.0}"),
    );

    let dti = ratios.debt_to_income_ratio;
    tally.award(
        at_most(dti, &[(0.2, 25), (0.3, 20), (0.4, 15), (0.5, 10)], 5),
        format!("debt-to-income ratio {dti:.2}"),
    );

    let savings = ratios.savings_ratio;
    tally.award(
        at_least(savings, &[(0.3, 25), (0.2, 20), (0.1, 15), (0.05, 10)], 5),
        format!("savings ratio {savings:.2}"),
    );

    if flag(profile.has_emergency_fund) {
        tally.award(15, "emergency fund".to_string());
    }
    if flag(profile.health_insurance) {
        tally.award(10, "health insurance".to_string());
    }

    tally.finish()
}

pub fn spending_habits(ratios: &FinancialRatios) -> ScoreComponent {
    let mut tally = Tally::new(RiskCategory::SpendingHabits);

    let mall = ratios.mall_spending_ratio;
    tally.award(
        at_most(
            mall,
            &[(0.05, 30), (0.1, 25), (0.15, 20), (0.2, 15), (0.25, 10)],
            5,
        ),
        format!("mall spending ratio {mall:.2}"),
    );

    let restaurant = ratios.restaurant_spending_ratio;
    tally.award(
        at_most(restaurant, &[(0.05, 20), (0.1, 15), (0.15, 10)], 5),
        format!("restaurant spending ratio {restaurant:.2}"),
    );

    let spending = ratios.spending_to_income_ratio;
    tally.award(
        at_most(spending, &[(0.6, 30), (0.7, 25), (0.8, 20), (0.9, 15)], 10),
        format!("spending-to-income ratio {spending:.2}"),
    );

    tally.finish()
}

pub fn lifestyle_risk(profile: &ApplicantProfile) -> ScoreComponent {
    let mut tally = Tally::new(RiskCategory::LifestyleRisk);

    if !flag(profile.alcohol_smoker) {
        tally.award(20, "no alcohol or smoking".to_string());
    }
    if !flag(profile.gambling_habits) {
        tally.award(20, "no gambling".to_string());
    }
    if flag(profile.has_emergency_fund) {
        tally.award(15, "emergency fund".to_string());
    }
    if flag(profile.health_insurance) {
        tally.award(15, "health insurance".to_string());
    }

    let dependents = profile.dependents.unwrap_or(0);
    tally.award(
        at_most(f64::from(dependents), &[(2.0, 15), (4.0, 10)], 5),
        format!("{dependents} dependent(s)"),
    );

    if flag(profile.owns_house) {
        tally.award(15, "owns house".to_string());
    }

    tally.finish()
}

pub fn employment_stability(profile: &ApplicantProfile) -> ScoreComponent {
    let mut tally = Tally::new(RiskCategory::EmploymentStability);

    let months = profile.employment_duration_months.unwrap_or(0);
    tally.award(
        at_least(
            f64::from(months),
            &[(60.0, 30), (36.0, 25), (24.0, 20), (12.0, 15), (6.0, 10)],
            5,
        ),
        format!("{months} month(s) employed"),
    );

    let growth = salary_growth_percent(profile);
    tally.award(
        at_least(growth, &[(20.0, 25), (10.0, 20), (5.0, 15), (0.0, 10)], 5),
        format!("salary growth {growth:.1}%"),
    );

    match profile.industry.as_deref() {
        Some(industry) if STABLE_INDUSTRIES.contains(&industry) => {
            tally.award(25, format!("stable industry {industry}"));
        }
        _ => tally.award(15, "industry outside the stable set".to_string()),
    }

    tally.finish()
}

fn salary_growth_percent(profile: &ApplicantProfile) -> f64 {
    let previous = amount(profile.previous_salary);
    if previous > 0.0 {
        (profile.current_salary() - previous) / previous * 100.0
    } else {
        0.0
    }
}

pub fn behavioral_risk(profile: &ApplicantProfile) -> ScoreComponent {
    let mut tally = Tally::new(RiskCategory::BehavioralRisk);

    let social = match profile.social_media_usage {
        Some(SocialMediaUsage::Low) => 25,
        Some(SocialMediaUsage::Medium) => 20,
        _ => 15,
    };
    tally.award(
        social,
        format!("social media usage {:?}", profile.social_media_usage),
    );

    let shopping = match profile.online_shopping_frequency {
        Some(ShoppingFrequency::Rarely) => 25,
        Some(ShoppingFrequency::Sometimes) => 20,
        Some(ShoppingFrequency::Often) => 15,
        _ => 10,
    };
    tally.award(
        shopping,
        format!(
            "online shopping frequency {:?}",
            profile.online_shopping_frequency
        ),
    );

    let cards = match profile.credit_card_usage {
        Some(CreditCardUsage::Never) => 25,
        Some(CreditCardUsage::Rarely) => 20,
        Some(CreditCardUsage::Sometimes) => 15,
        _ => 10,
    };
    tally.award(
        cards,
        format!("credit card usage {:?}", profile.credit_card_usage),
    );

    if amount(profile.investment_portfolio) > 0.0 {
        tally.award(25, "investment portfolio".to_string());
    } else {
        tally.award(10, "no investment portfolio".to_string());
    }

    tally.finish()
}

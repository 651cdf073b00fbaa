use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for registered applicants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicantId(pub String);

/// Identifier wrapper for persisted loan applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LoanId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
    Widowed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SocialMediaUsage {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShoppingFrequency {
    Rarely,
    Sometimes,
    Often,
    #[serde(rename = "Very Often")]
    VeryOften,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreditCardUsage {
    Never,
    Rarely,
    Sometimes,
    Often,
    #[serde(rename = "Very Often")]
    VeryOften,
}

/// Flat applicant record supplied by the profile store.
///
/// Every attribute is optional: the evaluation engine reads absent numbers as `0` and absent
/// flags as `false`, so a sparse profile still produces an assessment. The trailing score fields
/// are derived and only written back after an evaluation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicantProfile {
    pub applicant_id: ApplicantId,

    pub full_name: Option<String>,
    pub address: Option<String>,
    pub pan_number: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub marital_status: Option<MaritalStatus>,

    pub company: Option<String>,
    pub current_salary: Option<f64>,
    pub previous_salary: Option<f64>,
    pub employment_duration_months: Option<u32>,
    pub industry: Option<String>,
    pub job_title: Option<String>,
    pub date_prev_hike: Option<NaiveDate>,
    pub estimated_next_hike: Option<NaiveDate>,

    pub bank_name: Option<String>,
    pub avg_monthly_savings: Option<f64>,
    pub current_emis: Option<f64>,
    pub avg_credit_card_bill: Option<f64>,
    pub total_credit_limit: Option<f64>,
    pub credit_score: Option<u16>,

    pub owns_house: Option<bool>,
    pub rent_amount: Option<f64>,
    pub utility_bills: Option<f64>,
    pub property_value: Option<f64>,

    pub grocery_expense: Option<f64>,
    pub mall_visits_per_month: Option<u32>,
    pub avg_mall_spending: Option<f64>,
    pub restaurant_visits_per_month: Option<u32>,
    pub avg_restaurant_spending: Option<f64>,
    pub entertainment_expense: Option<f64>,
    pub travel_expense: Option<f64>,
    pub shopping_expense: Option<f64>,
    pub health_expense: Option<f64>,
    pub education_expense: Option<f64>,

    pub dependents: Option<u32>,
    pub health_insurance: Option<bool>,
    pub has_emergency_fund: Option<bool>,
    pub alcohol_smoker: Option<bool>,
    pub gambling_habits: Option<bool>,
    pub investment_portfolio: Option<f64>,

    pub social_media_usage: Option<SocialMediaUsage>,
    pub online_shopping_frequency: Option<ShoppingFrequency>,
    pub credit_card_usage: Option<CreditCardUsage>,

    pub financial_stability_score: Option<u32>,
    pub spending_habits_score: Option<u32>,
    pub lifestyle_risk_score: Option<u32>,
    pub overall_risk_score: Option<u32>,
    pub profile_completion_percentage: u8,
    pub last_profile_update: Option<DateTime<Utc>>,
}

impl ApplicantProfile {
    pub fn new(applicant_id: ApplicantId) -> Self {
        Self {
            applicant_id,
            ..Self::default()
        }
    }

    pub(crate) fn current_salary(&self) -> f64 {
        amount(self.current_salary)
    }

    /// Sum of the eight recurring household expense lines.
    pub(crate) fn monthly_expenses(&self) -> f64 {
        [
            self.grocery_expense,
            self.rent_amount,
            self.utility_bills,
            self.entertainment_expense,
            self.shopping_expense,
            self.travel_expense,
            self.health_expense,
            self.education_expense,
        ]
        .into_iter()
        .map(amount)
        .sum()
    }

    pub(crate) fn mall_spending(&self) -> f64 {
        f64::from(self.mall_visits_per_month.unwrap_or(0)) * amount(self.avg_mall_spending)
    }

    pub(crate) fn restaurant_spending(&self) -> f64 {
        f64::from(self.restaurant_visits_per_month.unwrap_or(0))
            * amount(self.avg_restaurant_spending)
    }

    /// Replace the evaluation-derived scores with the stored ones (or clear them for a new
    /// applicant).
    pub(crate) fn keep_derived_scores(&mut self, stored: Option<&ApplicantProfile>) {
        self.financial_stability_score = stored.and_then(|p| p.financial_stability_score);
        self.spending_habits_score = stored.and_then(|p| p.spending_habits_score);
        self.lifestyle_risk_score = stored.and_then(|p| p.lifestyle_risk_score);
        self.overall_risk_score = stored.and_then(|p| p.overall_risk_score);
    }

    /// Apply the scores computed by an evaluation to this profile.
    pub fn apply_scores(&mut self, update: &ProfileScoreUpdate, at: DateTime<Utc>) {
        self.financial_stability_score = Some(update.financial_stability_score);
        self.spending_habits_score = Some(update.spending_habits_score);
        self.lifestyle_risk_score = Some(update.lifestyle_risk_score);
        self.overall_risk_score = Some(update.overall_risk_score);
        self.profile_completion_percentage = update.profile_completion_percentage;
        self.last_profile_update = Some(at);
    }
}

pub(crate) fn amount(value: Option<f64>) -> f64 {
    value.unwrap_or(0.0)
}

pub(crate) fn flag(value: Option<bool>) -> bool {
    value.unwrap_or(false)
}

/// Derived values the caller writes back onto the profile after an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileScoreUpdate {
    pub financial_stability_score: u32,
    pub spending_habits_score: u32,
    pub lifestyle_risk_score: u32,
    pub overall_risk_score: u32,
    pub profile_completion_percentage: u8,
}

fn default_repayment_period() -> u32 {
    12
}

/// A single loan request evaluated against an applicant profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    pub requested_amount: f64,
    pub loan_purpose: String,
    #[serde(default = "default_repayment_period")]
    pub repayment_period: u32,
    #[serde(default)]
    pub collateral_type: Option<String>,
    #[serde(default)]
    pub collateral_value: f64,
    #[serde(default)]
    pub additional_income: f64,
    #[serde(default)]
    pub co_applicant: bool,
    #[serde(default)]
    pub co_applicant_income: f64,
}

impl LoanRequest {
    pub fn new(requested_amount: f64, loan_purpose: impl Into<String>) -> Self {
        Self {
            requested_amount,
            loan_purpose: loan_purpose.into(),
            repayment_period: default_repayment_period(),
            collateral_type: None,
            collateral_value: 0.0,
            additional_income: 0.0,
            co_applicant: false,
            co_applicant_income: 0.0,
        }
    }

    pub fn purpose(&self) -> LoanPurpose {
        LoanPurpose::from_label(&self.loan_purpose)
    }

    pub(crate) fn co_applicant_income(&self) -> f64 {
        if self.co_applicant {
            self.co_applicant_income
        } else {
            0.0
        }
    }
}

/// Loan purposes that carry a dedicated risk multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanPurpose {
    HomeRenovation,
    Education,
    MedicalEmergency,
    BusinessInvestment,
    VehiclePurchase,
    Wedding,
    Vacation,
    DebtConsolidation,
    Other,
}

impl LoanPurpose {
    /// Resolve free-text purposes, ignoring case and whitespace. Unknown labels map to `Other`.
    pub fn from_label(label: &str) -> Self {
        let normalized: String = label
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "homerenovation" => Self::HomeRenovation,
            "education" => Self::Education,
            "medicalemergency" => Self::MedicalEmergency,
            "businessinvestment" => Self::BusinessInvestment,
            "vehiclepurchase" => Self::VehiclePurchase,
            "wedding" => Self::Wedding,
            "vacation" => Self::Vacation,
            "debtconsolidation" => Self::DebtConsolidation,
            _ => Self::Other,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            LoanPurpose::HomeRenovation => "Home Renovation",
            LoanPurpose::Education => "Education",
            LoanPurpose::MedicalEmergency => "Medical Emergency",
            LoanPurpose::BusinessInvestment => "Business Investment",
            LoanPurpose::VehiclePurchase => "Vehicle Purchase",
            LoanPurpose::Wedding => "Wedding",
            LoanPurpose::Vacation => "Vacation",
            LoanPurpose::DebtConsolidation => "Debt Consolidation",
            LoanPurpose::Other => "Other",
        }
    }

    pub const fn risk_multiplier(self) -> f64 {
        match self {
            LoanPurpose::HomeRenovation => 0.9,
            LoanPurpose::Education => 0.85,
            LoanPurpose::MedicalEmergency => 0.8,
            LoanPurpose::BusinessInvestment => 1.2,
            LoanPurpose::VehiclePurchase => 1.1,
            LoanPurpose::Wedding => 1.3,
            LoanPurpose::Vacation => 1.4,
            LoanPurpose::DebtConsolidation => 1.0,
            LoanPurpose::Other => 1.1,
        }
    }
}

/// Lifecycle status of a persisted loan application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    Pending,
    Approved,
    Rejected,
    UnderReview,
}

impl LoanStatus {
    pub const fn label(self) -> &'static str {
        match self {
            LoanStatus::Pending => "pending",
            LoanStatus::Approved => "approved",
            LoanStatus::Rejected => "rejected",
            LoanStatus::UnderReview => "under_review",
        }
    }
}

/// One monthly installment of an approved loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepaymentScheduleEntry {
    pub due_date: NaiveDate,
    pub amount: f64,
    #[serde(default)]
    pub paid: bool,
    #[serde(default)]
    pub paid_on: Option<DateTime<Utc>>,
}

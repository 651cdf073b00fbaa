use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::workflows::loans::domain::{
    ApplicantId, ApplicantProfile, CreditCardUsage, Gender, LoanId, LoanRequest, MaritalStatus,
    ShoppingFrequency, SocialMediaUsage,
};
use crate::workflows::loans::repository::{
    ApplicantRepository, LoanRecord, LoanRepository, RepositoryError,
};
use crate::workflows::loans::{loan_router, EvaluationConfig, LoanApplicationService};

pub(super) fn evaluation_config() -> EvaluationConfig {
    EvaluationConfig::default()
}

pub(super) fn evaluated_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 31, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn request(amount: f64, purpose: &str) -> LoanRequest {
    LoanRequest::new(amount, purpose)
}

/// Salaried applicant with no debt, a 35% savings rate, an emergency fund and health cover.
pub(super) fn strong_profile(id: &str) -> ApplicantProfile {
    ApplicantProfile {
        current_salary: Some(60_000.0),
        avg_monthly_savings: Some(21_000.0),
        current_emis: Some(0.0),
        avg_credit_card_bill: Some(0.0),
        has_emergency_fund: Some(true),
        health_insurance: Some(true),
        ..ApplicantProfile::new(ApplicantId(id.to_string()))
    }
}

/// Profile carrying nothing but an identifier.
pub(super) fn empty_profile(id: &str) -> ApplicantProfile {
    ApplicantProfile::new(ApplicantId(id.to_string()))
}

/// No income, a smoker with three dependents and medium social media usage. Scores
/// 15/60/30/30/50, which weighs to exactly 35 and an overall risk of exactly 65.
pub(super) fn boundary_profile(id: &str) -> ApplicantProfile {
    ApplicantProfile {
        alcohol_smoker: Some(true),
        dependents: Some(3),
        social_media_usage: Some(SocialMediaUsage::Medium),
        ..empty_profile(id)
    }
}

/// No income, smoking, gambling, and five dependents.
pub(super) fn high_risk_profile(id: &str) -> ApplicantProfile {
    ApplicantProfile {
        alcohol_smoker: Some(true),
        gambling_habits: Some(true),
        dependents: Some(5),
        ..empty_profile(id)
    }
}

/// Every required completeness field filled, every optional field left blank.
pub(super) fn required_only_profile(id: &str) -> ApplicantProfile {
    ApplicantProfile {
        full_name: Some("Asha Rao".to_string()),
        address: Some("12 Lake View Road, Pune".to_string()),
        pan_number: Some("ABCDE1234F".to_string()),
        company: Some("Northwind Systems".to_string()),
        current_salary: Some(85_000.0),
        employment_duration_months: Some(40),
        bank_name: Some("State Bank".to_string()),
        grocery_expense: Some(6_000.0),
        current_emis: Some(0.0),
        owns_house: Some(false),
        dependents: Some(1),
        health_insurance: Some(true),
        has_emergency_fund: Some(true),
        ..empty_profile(id)
    }
}

pub(super) fn fully_completed_profile(id: &str) -> ApplicantProfile {
    let date = |y, m, d| chrono::NaiveDate::from_ymd_opt(y, m, d).expect("valid date");
    ApplicantProfile {
        date_of_birth: Some(date(1990, 4, 12)),
        gender: Some(Gender::Female),
        marital_status: Some(MaritalStatus::Married),
        previous_salary: Some(70_000.0),
        industry: Some("IT".to_string()),
        job_title: Some("Engineer".to_string()),
        date_prev_hike: Some(date(2024, 4, 1)),
        estimated_next_hike: Some(date(2025, 4, 1)),
        avg_monthly_savings: Some(20_000.0),
        avg_credit_card_bill: Some(4_000.0),
        total_credit_limit: Some(200_000.0),
        credit_score: Some(780),
        rent_amount: Some(18_000.0),
        utility_bills: Some(3_000.0),
        property_value: Some(0.0),
        mall_visits_per_month: Some(2),
        avg_mall_spending: Some(1_500.0),
        restaurant_visits_per_month: Some(4),
        avg_restaurant_spending: Some(800.0),
        entertainment_expense: Some(2_000.0),
        travel_expense: Some(3_000.0),
        shopping_expense: Some(2_500.0),
        health_expense: Some(1_000.0),
        education_expense: Some(0.0),
        alcohol_smoker: Some(false),
        gambling_habits: Some(false),
        investment_portfolio: Some(150_000.0),
        social_media_usage: Some(SocialMediaUsage::Low),
        online_shopping_frequency: Some(ShoppingFrequency::Sometimes),
        credit_card_usage: Some(CreditCardUsage::Rarely),
        ..required_only_profile(id)
    }
}

pub(super) fn build_service() -> (
    LoanApplicationService<MemoryApplicants, MemoryLoans>,
    Arc<MemoryApplicants>,
    Arc<MemoryLoans>,
) {
    let applicants = Arc::new(MemoryApplicants::default());
    let loans = Arc::new(MemoryLoans::default());
    let service =
        LoanApplicationService::new(applicants.clone(), loans.clone(), evaluation_config());
    (service, applicants, loans)
}

pub(super) fn seeded_service(
    profiles: Vec<ApplicantProfile>,
) -> (
    LoanApplicationService<MemoryApplicants, MemoryLoans>,
    Arc<MemoryApplicants>,
    Arc<MemoryLoans>,
) {
    let (service, applicants, loans) = build_service();
    for profile in profiles {
        applicants.upsert(profile).expect("seed profile");
    }
    (service, applicants, loans)
}

#[derive(Default, Clone)]
pub(super) struct MemoryApplicants {
    pub(super) profiles: Arc<Mutex<HashMap<ApplicantId, ApplicantProfile>>>,
}

impl ApplicantRepository for MemoryApplicants {
    fn upsert(&self, profile: ApplicantProfile) -> Result<ApplicantProfile, RepositoryError> {
        let mut guard = self.profiles.lock().expect("applicant mutex poisoned");
        guard.insert(profile.applicant_id.clone(), profile.clone());
        Ok(profile)
    }

    fn fetch(&self, id: &ApplicantId) -> Result<Option<ApplicantProfile>, RepositoryError> {
        let guard = self.profiles.lock().expect("applicant mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryLoans {
    pub(super) records: Arc<Mutex<HashMap<LoanId, LoanRecord>>>,
}

impl MemoryLoans {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("loan mutex poisoned").len()
    }
}

impl LoanRepository for MemoryLoans {
    fn insert(&self, record: LoanRecord) -> Result<LoanRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("loan mutex poisoned");
        if guard.contains_key(&record.loan_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.loan_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: LoanRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("loan mutex poisoned");
        guard.insert(record.loan_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &LoanId) -> Result<Option<LoanRecord>, RepositoryError> {
        let guard = self.records.lock().expect("loan mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn for_applicant(&self, applicant_id: &ApplicantId) -> Result<Vec<LoanRecord>, RepositoryError> {
        let guard = self.records.lock().expect("loan mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| &record.applicant_id == applicant_id)
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailableLoans;

impl LoanRepository for UnavailableLoans {
    fn insert(&self, _record: LoanRecord) -> Result<LoanRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: LoanRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &LoanId) -> Result<Option<LoanRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn for_applicant(
        &self,
        _applicant_id: &ApplicantId,
    ) -> Result<Vec<LoanRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn router_with_service(
    service: LoanApplicationService<MemoryApplicants, MemoryLoans>,
) -> axum::Router {
    loan_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

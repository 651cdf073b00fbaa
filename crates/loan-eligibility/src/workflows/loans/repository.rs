use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{
    ApplicantId, ApplicantProfile, LoanId, LoanRequest, LoanStatus, RepaymentScheduleEntry,
};
use super::evaluation::{AssessmentResult, AssessmentSummary};

/// Persisted loan application: the request, its decision record, and repayment tracking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRecord {
    pub loan_id: LoanId,
    pub applicant_id: ApplicantId,
    pub request: LoanRequest,
    pub status: LoanStatus,
    pub assessment: AssessmentResult,
    pub repayment_schedule: Vec<RepaymentScheduleEntry>,
    pub active: bool,
    pub applied_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

impl LoanRecord {
    pub fn installments_paid(&self) -> usize {
        self.repayment_schedule
            .iter()
            .filter(|entry| entry.paid)
            .count()
    }

    pub fn outstanding_amount(&self) -> f64 {
        self.repayment_schedule
            .iter()
            .filter(|entry| !entry.paid)
            .map(|entry| entry.amount)
            .sum()
    }

    pub fn view(&self) -> LoanRecordView {
        LoanRecordView {
            loan_id: self.loan_id.clone(),
            status: self.status.label(),
            loan_purpose: self.request.loan_purpose.clone(),
            requested_amount: self.request.requested_amount,
            active: self.active,
            applied_at: self.applied_at,
            closed_at: self.closed_at,
            installments_paid: self.installments_paid(),
            installments_total: self.repayment_schedule.len(),
            outstanding_amount: self.outstanding_amount(),
            result: self.assessment.summary(),
            repayment_schedule: self.repayment_schedule.clone(),
        }
    }
}

/// Storage abstraction for applicant profiles.
pub trait ApplicantRepository: Send + Sync {
    fn upsert(&self, profile: ApplicantProfile) -> Result<ApplicantProfile, RepositoryError>;
    fn fetch(&self, id: &ApplicantId) -> Result<Option<ApplicantProfile>, RepositoryError>;
}

/// Storage abstraction for loan applications.
pub trait LoanRepository: Send + Sync {
    fn insert(&self, record: LoanRecord) -> Result<LoanRecord, RepositoryError>;
    fn update(&self, record: LoanRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &LoanId) -> Result<Option<LoanRecord>, RepositoryError>;
    fn for_applicant(&self, applicant_id: &ApplicantId) -> Result<Vec<LoanRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Sanitized representation of a loan exposed over the API.
#[derive(Debug, Clone, Serialize)]
pub struct LoanRecordView {
    pub loan_id: LoanId,
    pub status: &'static str,
    pub loan_purpose: String,
    pub requested_amount: f64,
    pub active: bool,
    pub applied_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,
    pub installments_paid: usize,
    pub installments_total: usize,
    pub outstanding_amount: f64,
    pub result: AssessmentSummary,
    pub repayment_schedule: Vec<RepaymentScheduleEntry>,
}

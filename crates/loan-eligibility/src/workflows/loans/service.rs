use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::completeness::profile_completion;
use super::domain::{ApplicantId, ApplicantProfile, LoanId, LoanRequest, LoanStatus};
use super::evaluation::{
    repayment_schedule, AssessmentResult, EligibilityEngine, EvaluationConfig, EvaluationError,
};
use super::repository::{ApplicantRepository, LoanRecord, LoanRepository, RepositoryError};

/// Service composing the profile store, loan store, and eligibility engine.
pub struct LoanApplicationService<P, L> {
    applicants: Arc<P>,
    loans: Arc<L>,
    engine: Arc<EligibilityEngine>,
}

static LOAN_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_loan_id() -> LoanId {
    let id = LOAN_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    LoanId(format!("loan-{id:06}"))
}

/// Sequence ids share a prefix and are never shorter than their predecessors, so length first
/// keeps `loan-1000000` after `loan-999999`.
fn creation_order(id: &LoanId) -> (usize, &str) {
    (id.0.len(), id.0.as_str())
}

impl<P, L> LoanApplicationService<P, L>
where
    P: ApplicantRepository + 'static,
    L: LoanRepository + 'static,
{
    pub fn new(applicants: Arc<P>, loans: Arc<L>, config: EvaluationConfig) -> Self {
        Self {
            applicants,
            loans,
            engine: Arc::new(EligibilityEngine::new(config)),
        }
    }

    /// Evaluate a profile without touching either store.
    pub fn assess(
        &self,
        profile: &ApplicantProfile,
        request: &LoanRequest,
    ) -> Result<AssessmentResult, LoanServiceError> {
        Ok(self.engine.evaluate(profile, request)?)
    }

    pub fn save_profile(
        &self,
        profile: ApplicantProfile,
    ) -> Result<ApplicantProfile, LoanServiceError> {
        self.save_profile_at(profile, Utc::now())
    }

    /// Store a profile, refreshing its completion percentage and update stamp. Score fields in
    /// the submitted profile are ignored; only evaluations write them.
    pub fn save_profile_at(
        &self,
        mut profile: ApplicantProfile,
        now: DateTime<Utc>,
    ) -> Result<ApplicantProfile, LoanServiceError> {
        let stored = self.applicants.fetch(&profile.applicant_id)?;
        profile.keep_derived_scores(stored.as_ref());

        let completion = profile_completion(&profile);
        profile.profile_completion_percentage = completion.percentage;
        profile.last_profile_update = Some(now);

        debug!(
            applicant = %profile.applicant_id.0,
            completion = completion.percentage,
            missing = ?completion.missing_required,
            "saving applicant profile"
        );

        Ok(self.applicants.upsert(profile)?)
    }

    pub fn profile(&self, id: &ApplicantId) -> Result<ApplicantProfile, LoanServiceError> {
        self.applicants
            .fetch(id)?
            .ok_or_else(|| LoanServiceError::ApplicantNotFound(id.0.clone()))
    }

    pub fn apply(
        &self,
        applicant_id: &ApplicantId,
        request: LoanRequest,
    ) -> Result<LoanRecord, LoanServiceError> {
        self.apply_at(applicant_id, request, Utc::now())
    }

    /// Evaluate a loan request, write the derived scores back onto the profile, and persist
    /// the decision with its repayment schedule.
    pub fn apply_at(
        &self,
        applicant_id: &ApplicantId,
        request: LoanRequest,
        now: DateTime<Utc>,
    ) -> Result<LoanRecord, LoanServiceError> {
        let mut profile = self.profile(applicant_id)?;
        let assessment = self.engine.evaluate(&profile, &request)?;

        let repayment_schedule = if assessment.eligible {
            repayment_schedule(
                now.date_naive(),
                assessment.repayment_months,
                assessment.summary().emi,
            )
            .ok_or_else(|| EvaluationError::InvalidInput {
                field: "repayment_period",
                reason: "due dates fall outside the supported calendar".to_string(),
            })?
        } else {
            Vec::new()
        };

        let completion = profile_completion(&profile).percentage;
        profile.apply_scores(&assessment.profile_update(completion), now);
        self.applicants.upsert(profile)?;

        let record = LoanRecord {
            loan_id: next_loan_id(),
            applicant_id: applicant_id.clone(),
            status: if assessment.eligible {
                LoanStatus::Approved
            } else {
                LoanStatus::Rejected
            },
            active: assessment.eligible,
            request,
            assessment,
            repayment_schedule,
            applied_at: now,
            closed_at: None,
        };

        let stored = self.loans.insert(record)?;

        info!(
            applicant = %applicant_id.0,
            loan = %stored.loan_id.0,
            status = stored.status.label(),
            risk = stored.assessment.overall_risk_score,
            granted = stored.assessment.granted_amount,
            "loan application evaluated"
        );

        Ok(stored)
    }

    /// All loans of an applicant, newest first.
    pub fn history(&self, applicant_id: &ApplicantId) -> Result<Vec<LoanRecord>, LoanServiceError> {
        let mut loans = self.loans.for_applicant(applicant_id)?;
        loans.sort_by(|a, b| {
            b.applied_at
                .cmp(&a.applied_at)
                .then_with(|| creation_order(&b.loan_id).cmp(&creation_order(&a.loan_id)))
        });
        Ok(loans)
    }

    /// Approved loans that still have unpaid installments.
    pub fn active_loans(
        &self,
        applicant_id: &ApplicantId,
    ) -> Result<Vec<LoanRecord>, LoanServiceError> {
        Ok(self
            .history(applicant_id)?
            .into_iter()
            .filter(|loan| loan.active && loan.status == LoanStatus::Approved)
            .collect())
    }

    pub fn record_repayment(
        &self,
        applicant_id: &ApplicantId,
        loan_id: &LoanId,
        index: usize,
    ) -> Result<LoanRecord, LoanServiceError> {
        self.record_repayment_at(applicant_id, loan_id, index, Utc::now())
    }

    /// Mark one installment as paid. The loan closes once every installment is paid.
    ///
    /// Paying an installment twice keeps the first payment date.
    pub fn record_repayment_at(
        &self,
        applicant_id: &ApplicantId,
        loan_id: &LoanId,
        index: usize,
        now: DateTime<Utc>,
    ) -> Result<LoanRecord, LoanServiceError> {
        let mut record = self
            .loans
            .fetch(loan_id)?
            .filter(|record| &record.applicant_id == applicant_id)
            .ok_or_else(|| LoanServiceError::LoanNotFound(loan_id.0.clone()))?;

        let total = record.repayment_schedule.len();
        let entry = record
            .repayment_schedule
            .get_mut(index)
            .ok_or(LoanServiceError::InvalidInstallment { index, total })?;

        if !entry.paid {
            entry.paid = true;
            entry.paid_on = Some(now);
        }

        if record.active && record.repayment_schedule.iter().all(|entry| entry.paid) {
            record.active = false;
            record.closed_at = Some(now);
            info!(loan = %loan_id.0, "loan fully repaid and closed");
        }

        self.loans.update(record.clone())?;
        Ok(record)
    }
}

/// Error raised by the loan application service.
#[derive(Debug, thiserror::Error)]
pub enum LoanServiceError {
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("applicant {0} not found")]
    ApplicantNotFound(String),
    #[error("loan {0} not found")]
    LoanNotFound(String),
    #[error("installment {index} is out of range for a {total}-installment schedule")]
    InvalidInstallment { index: usize, total: usize },
}

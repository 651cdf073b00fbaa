//! Loan eligibility scoring, decisioning, and repayment tracking.
//!
//! The evaluation engine is a pure function of an applicant profile and a loan request. The
//! service layer around it fetches profiles, writes derived scores back, and keeps loan records
//! through the repository traits.

pub mod completeness;
pub mod domain;
pub mod evaluation;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use completeness::{profile_completion, ProfileCompletion};
pub use domain::{
    ApplicantId, ApplicantProfile, CreditCardUsage, Gender, LoanId, LoanPurpose, LoanRequest,
    LoanStatus, MaritalStatus, ProfileScoreUpdate, RepaymentScheduleEntry, ShoppingFrequency,
    SocialMediaUsage,
};
pub use evaluation::{
    evaluate, AssessmentResult, AssessmentSummary, ComponentScores, DenialReason,
    EligibilityEngine, EvaluationConfig, EvaluationError, LoanDecision, RiskCategory, ScoreBand,
};
pub use repository::{
    ApplicantRepository, LoanRecord, LoanRecordView, LoanRepository, RepositoryError,
};
pub use router::{loan_router, AssessmentRequest};
pub use service::{LoanApplicationService, LoanServiceError};

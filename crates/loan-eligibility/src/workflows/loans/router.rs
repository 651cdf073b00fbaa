use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::completeness::profile_completion;
use super::domain::{ApplicantId, ApplicantProfile, LoanId, LoanRequest};
use super::repository::{ApplicantRepository, LoanRepository, RepositoryError};
use super::service::{LoanApplicationService, LoanServiceError};

/// Stateless assessment payload: a profile evaluated without being stored.
#[derive(Debug, Deserialize)]
pub struct AssessmentRequest {
    #[serde(default)]
    pub profile: ApplicantProfile,
    pub request: LoanRequest,
}

/// Router builder exposing HTTP endpoints for profiles, loan applications, and repayments.
pub fn loan_router<P, L>(service: Arc<LoanApplicationService<P, L>>) -> Router
where
    P: ApplicantRepository + 'static,
    L: LoanRepository + 'static,
{
    Router::new()
        .route("/api/v1/assessments", post(assess_handler::<P, L>))
        .route(
            "/api/v1/applicants/:applicant_id/profile",
            put(save_profile_handler::<P, L>).get(profile_handler::<P, L>),
        )
        .route(
            "/api/v1/applicants/:applicant_id/loans",
            post(apply_handler::<P, L>).get(history_handler::<P, L>),
        )
        .route(
            "/api/v1/applicants/:applicant_id/loans/active",
            get(active_handler::<P, L>),
        )
        .route(
            "/api/v1/applicants/:applicant_id/loans/:loan_id/repayments/:index",
            post(repayment_handler::<P, L>),
        )
        .with_state(service)
}

pub(crate) async fn assess_handler<P, L>(
    State(service): State<Arc<LoanApplicationService<P, L>>>,
    axum::Json(payload): axum::Json<AssessmentRequest>,
) -> Response
where
    P: ApplicantRepository + 'static,
    L: LoanRepository + 'static,
{
    match service.assess(&payload.profile, &payload.request) {
        Ok(assessment) => (StatusCode::OK, axum::Json(assessment.summary())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn save_profile_handler<P, L>(
    State(service): State<Arc<LoanApplicationService<P, L>>>,
    Path(applicant_id): Path<String>,
    axum::Json(mut profile): axum::Json<ApplicantProfile>,
) -> Response
where
    P: ApplicantRepository + 'static,
    L: LoanRepository + 'static,
{
    profile.applicant_id = ApplicantId(applicant_id);
    match service.save_profile(profile) {
        Ok(stored) => profile_response(stored),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn profile_handler<P, L>(
    State(service): State<Arc<LoanApplicationService<P, L>>>,
    Path(applicant_id): Path<String>,
) -> Response
where
    P: ApplicantRepository + 'static,
    L: LoanRepository + 'static,
{
    match service.profile(&ApplicantId(applicant_id)) {
        Ok(profile) => profile_response(profile),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn apply_handler<P, L>(
    State(service): State<Arc<LoanApplicationService<P, L>>>,
    Path(applicant_id): Path<String>,
    axum::Json(request): axum::Json<LoanRequest>,
) -> Response
where
    P: ApplicantRepository + 'static,
    L: LoanRepository + 'static,
{
    match service.apply(&ApplicantId(applicant_id), request) {
        Ok(record) => {
            let payload = json!({
                "loan_id": record.loan_id,
                "status": record.status.label(),
                "result": record.assessment.summary(),
            });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn history_handler<P, L>(
    State(service): State<Arc<LoanApplicationService<P, L>>>,
    Path(applicant_id): Path<String>,
) -> Response
where
    P: ApplicantRepository + 'static,
    L: LoanRepository + 'static,
{
    match service.history(&ApplicantId(applicant_id)) {
        Ok(loans) => {
            let views: Vec<_> = loans.iter().map(|loan| loan.view()).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn active_handler<P, L>(
    State(service): State<Arc<LoanApplicationService<P, L>>>,
    Path(applicant_id): Path<String>,
) -> Response
where
    P: ApplicantRepository + 'static,
    L: LoanRepository + 'static,
{
    match service.active_loans(&ApplicantId(applicant_id)) {
        Ok(loans) => {
            let views: Vec<_> = loans.iter().map(|loan| loan.view()).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn repayment_handler<P, L>(
    State(service): State<Arc<LoanApplicationService<P, L>>>,
    Path((applicant_id, loan_id, index)): Path<(String, String, usize)>,
) -> Response
where
    P: ApplicantRepository + 'static,
    L: LoanRepository + 'static,
{
    match service.record_repayment(&ApplicantId(applicant_id), &LoanId(loan_id), index) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(error) => error_response(error),
    }
}

fn profile_response(profile: ApplicantProfile) -> Response {
    let completion = profile_completion(&profile);
    let payload = json!({
        "profile": profile,
        "completion": completion,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) fn error_status(error: &LoanServiceError) -> StatusCode {
    match error {
        LoanServiceError::Evaluation(_) | LoanServiceError::InvalidInstallment { .. } => {
            StatusCode::BAD_REQUEST
        }
        LoanServiceError::ApplicantNotFound(_)
        | LoanServiceError::LoanNotFound(_)
        | LoanServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        LoanServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        LoanServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn error_response(error: LoanServiceError) -> Response {
    let status = error_status(&error);
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}

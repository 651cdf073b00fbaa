//! Integration specifications for the loan application workflow.
//!
//! Scenarios drive the public service facade and HTTP router end to end: profile capture,
//! evaluation with score write-back, history, and repayment through to loan closure.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use loan_eligibility::workflows::loans::{
        ApplicantId, ApplicantProfile, ApplicantRepository, EvaluationConfig,
        LoanApplicationService, LoanId, LoanRecord, LoanRepository, RepositoryError,
    };

    pub(super) fn applicant() -> ApplicantProfile {
        ApplicantProfile {
            full_name: Some("Kavya Menon".to_string()),
            company: Some("Lakeside Bank".to_string()),
            industry: Some("Banking".to_string()),
            current_salary: Some(75_000.0),
            previous_salary: Some(60_000.0),
            employment_duration_months: Some(38),
            avg_monthly_savings: Some(18_000.0),
            current_emis: Some(5_000.0),
            grocery_expense: Some(7_000.0),
            rent_amount: Some(15_000.0),
            dependents: Some(1),
            health_insurance: Some(true),
            has_emergency_fund: Some(true),
            ..ApplicantProfile::new(ApplicantId("kavya".to_string()))
        }
    }

    #[derive(Default)]
    pub(super) struct Applicants {
        profiles: Mutex<HashMap<ApplicantId, ApplicantProfile>>,
    }

    impl ApplicantRepository for Applicants {
        fn upsert(&self, profile: ApplicantProfile) -> Result<ApplicantProfile, RepositoryError> {
            self.profiles
                .lock()
                .expect("applicant mutex poisoned")
                .insert(profile.applicant_id.clone(), profile.clone());
            Ok(profile)
        }

        fn fetch(&self, id: &ApplicantId) -> Result<Option<ApplicantProfile>, RepositoryError> {
            Ok(self
                .profiles
                .lock()
                .expect("applicant mutex poisoned")
                .get(id)
                .cloned())
        }
    }

    #[derive(Default)]
    pub(super) struct Loans {
        records: Mutex<HashMap<LoanId, LoanRecord>>,
    }

    impl LoanRepository for Loans {
        fn insert(&self, record: LoanRecord) -> Result<LoanRecord, RepositoryError> {
            let mut guard = self.records.lock().expect("loan mutex poisoned");
            if guard.contains_key(&record.loan_id) {
                return Err(RepositoryError::Conflict);
            }
            guard.insert(record.loan_id.clone(), record.clone());
            Ok(record)
        }

        fn update(&self, record: LoanRecord) -> Result<(), RepositoryError> {
            self.records
                .lock()
                .expect("loan mutex poisoned")
                .insert(record.loan_id.clone(), record);
            Ok(())
        }

        fn fetch(&self, id: &LoanId) -> Result<Option<LoanRecord>, RepositoryError> {
            Ok(self
                .records
                .lock()
                .expect("loan mutex poisoned")
                .get(id)
                .cloned())
        }

        fn for_applicant(
            &self,
            applicant_id: &ApplicantId,
        ) -> Result<Vec<LoanRecord>, RepositoryError> {
            Ok(self
                .records
                .lock()
                .expect("loan mutex poisoned")
                .values()
                .filter(|record| &record.applicant_id == applicant_id)
                .cloned()
                .collect())
        }
    }

    pub(super) fn service() -> LoanApplicationService<Applicants, Loans> {
        LoanApplicationService::new(
            Arc::new(Applicants::default()),
            Arc::new(Loans::default()),
            EvaluationConfig::default(),
        )
    }
}

use std::sync::Arc;

use axum::http::StatusCode;
use loan_eligibility::workflows::loans::{
    loan_router, ApplicantId, LoanRequest, LoanServiceError, LoanStatus,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{applicant, service};

async fn send(
    router: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = axum::http::Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(axum::http::header::CONTENT_TYPE, "application/json")
            .body(axum::body::Body::from(
                serde_json::to_vec(&body).expect("serialize body"),
            )),
        None => builder.body(axum::body::Body::empty()),
    }
    .expect("request builds");

    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("route executes");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("read body");
    (status, serde_json::from_slice(&bytes).expect("json payload"))
}

#[test]
fn application_lifecycle_through_the_service() {
    let service = service();
    let id = ApplicantId("kavya".to_string());

    let saved = service.save_profile(applicant()).expect("profile saved");
    assert!(saved.profile_completion_percentage > 0);
    assert!(saved.last_profile_update.is_some());

    let mut request = LoanRequest::new(200_000.0, "Vehicle Purchase");
    request.repayment_period = 3;
    let record = service.apply(&id, request).expect("application stored");
    assert_eq!(record.status, LoanStatus::Approved);
    assert_eq!(record.repayment_schedule.len(), 3);
    assert!(record.assessment.granted_amount <= 200_000.0);

    let profile = service.profile(&id).expect("profile stored");
    assert_eq!(
        profile.overall_risk_score,
        Some(record.assessment.overall_risk_score.round() as u32)
    );

    let mut latest = record.clone();
    for index in 0..3 {
        latest = service
            .record_repayment(&id, &record.loan_id, index)
            .expect("repayment recorded");
    }
    assert!(!latest.active);
    assert!(latest.closed_at.is_some());
    assert!(service.active_loans(&id).expect("active loans").is_empty());
    assert_eq!(service.history(&id).expect("history").len(), 1);

    match service.record_repayment(&id, &record.loan_id, 3) {
        Err(LoanServiceError::InvalidInstallment { index: 3, total: 3 }) => {}
        other => panic!("expected invalid installment, got {other:?}"),
    }
}

#[tokio::test]
async fn application_lifecycle_over_http() {
    let router = loan_router(Arc::new(service()));

    let (status, payload) = send(
        &router,
        "PUT",
        "/api/v1/applicants/kavya/profile",
        Some(serde_json::to_value(applicant()).expect("profile json")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(payload["completion"]["percentage"].as_u64().expect("percentage") > 0);

    let (status, payload) = send(
        &router,
        "POST",
        "/api/v1/applicants/kavya/loans",
        Some(json!({
            "requested_amount": 150000.0,
            "loan_purpose": "Education",
            "repayment_period": 2
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(payload["status"], json!("approved"));
    let loan_id = payload["loan_id"].as_str().expect("loan id").to_string();

    let (status, payload) =
        send(&router, "GET", "/api/v1/applicants/kavya/loans/active", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload.as_array().expect("loan list").len(), 1);
    assert_eq!(payload[0]["installments_total"], json!(2));

    for index in 0..2 {
        let uri = format!("/api/v1/applicants/kavya/loans/{loan_id}/repayments/{index}");
        let (status, _) = send(&router, "POST", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, payload) = send(&router, "GET", "/api/v1/applicants/kavya/loans/active", None).await;
    assert_eq!(payload, json!([]));

    let (status, payload) = send(&router, "GET", "/api/v1/applicants/kavya/loans", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload[0]["active"], json!(false));
    assert_eq!(payload[0]["outstanding_amount"], json!(0.0));

    let (status, _) = send(&router, "GET", "/api/v1/applicants/nobody/profile", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

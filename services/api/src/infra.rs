use loan_eligibility::workflows::loans::{
    ApplicantId, ApplicantProfile, ApplicantRepository, LoanId, LoanRecord, LoanRepository,
    RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicantRepository {
    profiles: Arc<Mutex<HashMap<ApplicantId, ApplicantProfile>>>,
}

impl ApplicantRepository for InMemoryApplicantRepository {
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
pub(crate) struct InMemoryLoanRepository {
    records: Arc<Mutex<HashMap<LoanId, LoanRecord>>>,
}

impl LoanRepository for InMemoryLoanRepository {
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
        if guard.contains_key(&record.loan_id) {
            guard.insert(record.loan_id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
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

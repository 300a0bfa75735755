use std::collections::HashMap;
use std::sync::Mutex;

use serde::Serialize;

use super::domain::{AssessmentRecord, RiskCategory, SessionId};

/// Storage abstraction for assessment snapshots so the service can run
/// against any key-value backend (the production system used a
/// spreadsheet; tests and the bundled server use memory).
pub trait AssessmentRepository: Send + Sync {
    fn insert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError>;
    fn update(&self, record: AssessmentRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<AssessmentRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Process-local store backing the bundled server.
#[derive(Default)]
pub struct MemoryAssessmentRepository {
    records: Mutex<HashMap<SessionId, AssessmentRecord>>,
}

impl MemoryAssessmentRepository {
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<SessionId, AssessmentRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("assessment store poisoned".to_string()))
    }
}

impl AssessmentRepository for MemoryAssessmentRepository {
    fn insert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&record.session_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.session_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: AssessmentRecord) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        guard.insert(record.session_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.get(id).cloned())
    }
}

/// Sanitized status exposed for a session over the API.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentStatusView {
    pub session_id: SessionId,
    pub state: &'static str,
    pub answered_categories: usize,
    pub total_categories: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

impl AssessmentStatusView {
    pub fn from_record(record: &AssessmentRecord) -> Self {
        Self {
            session_id: record.session_id.clone(),
            state: record.state.label(),
            answered_categories: record.answered_categories(),
            total_categories: RiskCategory::ALL.len(),
            company_name: record.company.name.clone(),
        }
    }
}

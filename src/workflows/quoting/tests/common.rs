use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::quoting::domain::{
    AssessmentRecord, CompanyProfile, EmployeeBracket, Industry, RevenueBracket, RiskCategory,
    ScoreValue, SessionId,
};
use crate::workflows::quoting::repository::{
    AssessmentRepository, MemoryAssessmentRepository, RepositoryError,
};
use crate::workflows::quoting::tables::RatingTables;
use crate::workflows::quoting::{assessment_router, AssessmentService, QuoteEngine};

pub(super) fn session(suffix: &str) -> SessionId {
    SessionId(format!("thread-{suffix}"))
}

pub(super) fn score(raw: u8) -> ScoreValue {
    ScoreValue::new(raw).expect("score in range")
}

pub(super) fn tables() -> RatingTables {
    RatingTables::default()
}

pub(super) fn engine() -> QuoteEngine {
    QuoteEngine::default()
}

/// Scores for every category at the same level.
pub(super) fn uniform_scores(level: u8) -> BTreeMap<RiskCategory, ScoreValue> {
    RiskCategory::ALL
        .into_iter()
        .map(|category| (category, score(level)))
        .collect()
}

pub(super) fn healthcare_profile() -> CompanyProfile {
    CompanyProfile {
        name: Some("Mercy Clinic Group".to_string()),
        industry: Some(Industry::Healthcare),
        employees: Some(EmployeeBracket::From51To250),
        revenue: Some(RevenueBracket::TenToHundredMillion),
    }
}

pub(super) fn healthcare_record(suffix: &str) -> AssessmentRecord {
    let mut record = AssessmentRecord::empty(session(suffix));
    record.apply_company(healthcare_profile());
    for category in RiskCategory::ALL {
        record.record_score(category, score(3));
    }
    record
}

pub(super) fn build_service() -> (
    Arc<AssessmentService<MemoryAssessmentRepository>>,
    Arc<MemoryAssessmentRepository>,
) {
    let repository = Arc::new(MemoryAssessmentRepository::default());
    let service = Arc::new(AssessmentService::new(repository.clone(), engine()));
    (service, repository)
}

pub(super) fn router_with_service(
    service: Arc<AssessmentService<MemoryAssessmentRepository>>,
) -> axum::Router {
    assessment_router(service)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

/// Store that refuses every call, for exercising the 500 paths.
pub(super) struct UnavailableRepository;

impl AssessmentRepository for UnavailableRepository {
    fn insert(&self, _record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn update(&self, _record: AssessmentRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _id: &SessionId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

/// Store whose first-write insert always loses to a concurrent creator,
/// while recording the updates that land afterwards.
#[derive(Default)]
pub(super) struct ContestedInsertRepository {
    updates: Mutex<Vec<AssessmentRecord>>,
}

impl ContestedInsertRepository {
    pub(super) fn updates(&self) -> Vec<AssessmentRecord> {
        self.updates.lock().expect("update log poisoned").clone()
    }
}

impl AssessmentRepository for ContestedInsertRepository {
    fn insert(&self, _record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, record: AssessmentRecord) -> Result<(), RepositoryError> {
        self.updates
            .lock()
            .expect("update log poisoned")
            .push(record);
        Ok(())
    }

    fn fetch(&self, _id: &SessionId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        Ok(None)
    }
}

/// Working store that additionally journals which operations ran.
#[derive(Default)]
pub(super) struct JournalingRepository {
    records: Mutex<HashMap<SessionId, AssessmentRecord>>,
    ops: Mutex<Vec<&'static str>>,
}

impl JournalingRepository {
    pub(super) fn ops(&self) -> Vec<&'static str> {
        self.ops.lock().expect("op log poisoned").clone()
    }

    fn log(&self, op: &'static str) {
        self.ops.lock().expect("op log poisoned").push(op);
    }
}

impl AssessmentRepository for JournalingRepository {
    fn insert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        self.log("insert");
        let mut guard = self.records.lock().expect("record map poisoned");
        if guard.contains_key(&record.session_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.session_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: AssessmentRecord) -> Result<(), RepositoryError> {
        self.log("update");
        let mut guard = self.records.lock().expect("record map poisoned");
        guard.insert(record.session_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        self.log("fetch");
        let guard = self.records.lock().expect("record map poisoned");
        Ok(guard.get(id).cloned())
    }
}

/// Test-only extraction of the numeric fields from a rendered quote so the
/// round-trip property can be asserted (rendering must not distort any
/// amount).
pub(super) fn parse_rendered_amount(rendered: &str, field: &str) -> u64 {
    let marker = format!("**{field}**: $");
    let start = rendered
        .find(&marker)
        .unwrap_or_else(|| panic!("field {field} present in rendering"))
        + marker.len();
    rendered[start..]
        .chars()
        .take_while(|ch| ch.is_ascii_digit() || *ch == ',')
        .filter(|ch| ch.is_ascii_digit())
        .collect::<String>()
        .parse()
        .expect("amount parses")
}

pub(super) fn parse_rendered_score(rendered: &str) -> f64 {
    let marker = "(Score: ";
    let start = rendered.find(marker).expect("score present") + marker.len();
    let end = rendered[start..].find("/4.0").expect("score terminator") + start;
    rendered[start..end].parse().expect("score parses")
}

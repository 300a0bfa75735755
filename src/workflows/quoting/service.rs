use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::domain::{
    AssessmentRecord, CompanyProfile, InvalidScore, Quote, RiskCategory, ScoreValue, SessionId,
};
use super::repository::{AssessmentRepository, AssessmentStatusView, RepositoryError};
use super::QuoteEngine;

/// Service coordinating the assessment store and the quote engine. The
/// engine itself is pure; this layer owns snapshot reads, upserts, and the
/// session state transitions.
pub struct AssessmentService<R> {
    repository: Arc<R>,
    engine: QuoteEngine,
}

/// Quote plus its chat-ready rendering.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteOutcome {
    pub quote: Quote,
    pub rendered: String,
}

impl<R> AssessmentService<R>
where
    R: AssessmentRepository + 'static,
{
    pub fn new(repository: Arc<R>, engine: QuoteEngine) -> Self {
        Self { repository, engine }
    }

    /// Record one category answer. Creates the session record on first
    /// write; later writes for the same category overwrite (last write
    /// wins).
    pub fn record_score(
        &self,
        session_id: &SessionId,
        category: RiskCategory,
        raw_score: u8,
    ) -> Result<AssessmentStatusView, QuoteServiceError> {
        let score = ScoreValue::new(raw_score)?;
        let (mut record, existed) = self.snapshot(session_id)?;
        record.record_score(category, score);
        let view = AssessmentStatusView::from_record(&record);
        self.persist(record, existed)?;

        info!(session = %session_id, category = category.label(), score = raw_score, "score recorded");
        Ok(view)
    }

    /// Merge company attributes into the session record.
    pub fn update_company(
        &self,
        session_id: &SessionId,
        patch: CompanyProfile,
    ) -> Result<AssessmentStatusView, QuoteServiceError> {
        let (mut record, existed) = self.snapshot(session_id)?;
        record.apply_company(patch);
        let view = AssessmentStatusView::from_record(&record);
        self.persist(record, existed)?;
        Ok(view)
    }

    /// Compute a quote from the current snapshot. Always permitted:
    /// unanswered categories price as Poor, so a bare session yields an
    /// all-default quote rather than an error. Re-quoting recomputes from
    /// current state.
    pub fn quote(&self, session_id: &SessionId) -> Result<QuoteOutcome, QuoteServiceError> {
        let (mut record, existed) = self.snapshot(session_id)?;
        record.state = record.state.on_quote_requested();

        let quote = self.engine.quote(&record);
        let rendered = self.engine.render(&quote);

        record.state = record.state.on_quoted();
        self.persist(record, existed)?;

        info!(
            session = %session_id,
            quote_id = %quote.quote_id,
            risk_score = quote.risk_score,
            tier = quote.risk_tier.label(),
            "quote assembled"
        );
        Ok(QuoteOutcome { quote, rendered })
    }

    /// Current status for a session. Missing sessions read as empty
    /// records, mirroring the store contract.
    pub fn get(&self, session_id: &SessionId) -> Result<AssessmentStatusView, QuoteServiceError> {
        let (record, _) = self.snapshot(session_id)?;
        Ok(AssessmentStatusView::from_record(&record))
    }

    fn snapshot(
        &self,
        session_id: &SessionId,
    ) -> Result<(AssessmentRecord, bool), QuoteServiceError> {
        match self.repository.fetch(session_id)? {
            Some(record) => Ok((record, true)),
            None => Ok((AssessmentRecord::empty(session_id.clone()), false)),
        }
    }

    fn persist(&self, record: AssessmentRecord, existed: bool) -> Result<(), QuoteServiceError> {
        if existed {
            self.repository.update(record)?;
            return Ok(());
        }

        match self.repository.insert(record.clone()) {
            Ok(_) => Ok(()),
            // Lost the creation race to a concurrent first write; writes
            // within a session are last-write-wins, so overwrite.
            Err(RepositoryError::Conflict) => {
                self.repository.update(record)?;
                Ok(())
            }
            Err(other) => Err(other.into()),
        }
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum QuoteServiceError {
    #[error(transparent)]
    Score(#[from] InvalidScore),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

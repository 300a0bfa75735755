//! Cyber insurance quoting: incremental assessment intake and the
//! deterministic quote-calculation engine.
//!
//! Category answers arrive one at a time over a conversation, so the
//! engine is built to price a partial record at any moment: every
//! unanswered category defaults to Poor and every lookup table carries a
//! documented fallback. The engine holds no shared mutable state and is
//! safe to invoke concurrently across sessions.

mod assembler;
pub mod domain;
mod pricing;
pub mod repository;
pub mod router;
mod scoring;
pub mod service;
pub mod tables;

#[cfg(test)]
mod tests;

pub use domain::{
    AssessmentRecord, AssessmentState, CompanyProfile, EmployeeBracket, Industry, InvalidScore,
    Quote, RevenueBracket, RiskCategory, RiskTier, ScoreValue, SessionId,
};
pub use repository::{
    AssessmentRepository, AssessmentStatusView, MemoryAssessmentRepository, RepositoryError,
};
pub use router::assessment_router;
pub use service::{AssessmentService, QuoteOutcome, QuoteServiceError};
pub use tables::{RatingTables, TierMultipliers};

/// Pure quote computation over an assessment snapshot.
pub struct QuoteEngine {
    tables: RatingTables,
}

impl QuoteEngine {
    pub fn new(tables: RatingTables) -> Self {
        Self { tables }
    }

    /// Derive a quote from the record as it stands: weighted aggregate,
    /// tier, coverage, deductible, premium, then assembly.
    pub fn quote(&self, record: &AssessmentRecord) -> Quote {
        let aggregate = scoring::aggregate(&record.scores, &self.tables);
        let risk_score = scoring::round_to_tenth(aggregate);
        let tier = scoring::classify(risk_score);

        let coverage = pricing::recommend_coverage(&record.company, &self.tables);
        let deductible = pricing::recommend_deductible(coverage);
        let premium = pricing::calculate_premium(
            record.company.industry,
            coverage,
            tier,
            record.company.employees,
            &self.tables,
        );

        assembler::assemble(record, risk_score, tier, coverage, premium, deductible)
    }

    /// Chat-card text form of a quote; presentation only.
    pub fn render(&self, quote: &Quote) -> String {
        assembler::render(quote)
    }
}

impl Default for QuoteEngine {
    fn default() -> Self {
        Self::new(RatingTables::default())
    }
}

use super::common::*;
use crate::workflows::quoting::domain::{
    CompanyProfile, Industry, RevenueBracket, RiskCategory, RiskTier,
};
use crate::workflows::quoting::QuoteServiceError;

#[test]
fn quoting_an_unknown_session_uses_conservative_defaults() {
    // Scenario: nothing recorded at all.
    let (service, _) = build_service();
    let outcome = service.quote(&session("absent")).expect("quote builds");

    let quote = outcome.quote;
    assert_eq!(quote.risk_score, 1.0);
    assert_eq!(quote.risk_tier, RiskTier::High);
    assert_eq!(quote.coverage_limit, 1_000_000);
    assert_eq!(quote.deductible, 10_000);
    // Other industry rate 750 at the High multiplier 1.25.
    assert_eq!(quote.base_premium, 750);
    assert_eq!(quote.annual_premium, 938);
}

#[test]
fn all_excellent_sessions_land_in_the_low_tier() {
    let (service, _) = build_service();
    let id = session("excellent");
    for category in RiskCategory::ALL {
        service
            .record_score(&id, category, 4)
            .expect("score records");
    }

    let outcome = service.quote(&id).expect("quote builds");
    assert_eq!(outcome.quote.risk_score, 4.0);
    assert_eq!(outcome.quote.risk_tier, RiskTier::Low);
}

#[test]
fn healthcare_revenue_bracket_drives_coverage_and_rate() {
    let (service, _) = build_service();
    let id = session("healthcare");
    service
        .update_company(
            &id,
            CompanyProfile {
                industry: Some(Industry::Healthcare),
                revenue: Some(RevenueBracket::TenToHundredMillion),
                ..CompanyProfile::default()
            },
        )
        .expect("company recorded");

    let outcome = service.quote(&id).expect("quote builds");
    assert_eq!(outcome.quote.coverage_limit, 25_000_000);
    assert_eq!(outcome.quote.deductible, 50_000);
    // 25 coverage units at the Healthcare rate of 1200.
    assert_eq!(outcome.quote.base_premium, 30_000);
}

#[test]
fn requoting_uses_the_latest_score_for_a_category() {
    let (service, _) = build_service();
    let id = session("rewrite");
    service
        .record_score(&id, RiskCategory::Backup, 4)
        .expect("first write");
    service
        .record_score(&id, RiskCategory::Backup, 2)
        .expect("second write");

    let outcome = service.quote(&id).expect("quote builds");
    // 0.12 * 2 plus the Poor default over the remaining 0.88 weight = 1.12.
    assert_eq!(outcome.quote.risk_score, 1.1);
}

#[test]
fn state_advances_through_answers_to_quoted() {
    let (service, _) = build_service();
    let id = session("lifecycle");

    let view = service.get(&id).expect("status reads");
    assert_eq!(view.state, "empty");
    assert_eq!(view.answered_categories, 0);
    assert_eq!(view.total_categories, 18);

    let view = service
        .record_score(&id, RiskCategory::Backup, 3)
        .expect("score records");
    assert_eq!(view.state, "partially_answered");
    assert_eq!(view.answered_categories, 1);

    service.quote(&id).expect("quote builds");
    let view = service.get(&id).expect("status reads");
    assert_eq!(view.state, "quoted");
}

#[test]
fn quoted_sessions_accept_updates_and_requote_fresh() {
    let (service, _) = build_service();
    let id = session("requote");
    for category in RiskCategory::ALL {
        service
            .record_score(&id, category, 2)
            .expect("score records");
    }

    let first = service.quote(&id).expect("first quote");
    assert_eq!(first.quote.risk_score, 2.0);

    for category in RiskCategory::ALL {
        service
            .record_score(&id, category, 4)
            .expect("update records");
    }
    let second = service.quote(&id).expect("second quote");
    assert_eq!(second.quote.risk_score, 4.0);
    assert_eq!(second.quote.risk_tier, RiskTier::Low);
}

#[test]
fn out_of_range_scores_are_rejected() {
    let (service, _) = build_service();
    let result = service.record_score(&session("invalid"), RiskCategory::Mfa, 5);
    assert!(matches!(result, Err(QuoteServiceError::Score(_))));

    let result = service.record_score(&session("invalid"), RiskCategory::Mfa, 0);
    assert!(matches!(result, Err(QuoteServiceError::Score(_))));
}

#[test]
fn first_write_inserts_and_later_writes_update() {
    let repository = std::sync::Arc::new(JournalingRepository::default());
    let service =
        crate::workflows::quoting::AssessmentService::new(repository.clone(), engine());
    let id = session("journal");

    service
        .record_score(&id, RiskCategory::Mfa, 3)
        .expect("first write");
    service
        .record_score(&id, RiskCategory::Backup, 2)
        .expect("second write");

    assert_eq!(repository.ops(), vec!["fetch", "insert", "fetch", "update"]);
}

#[test]
fn losing_the_creation_race_falls_back_to_last_write_wins() {
    let repository = std::sync::Arc::new(ContestedInsertRepository::default());
    let service =
        crate::workflows::quoting::AssessmentService::new(repository.clone(), engine());

    let view = service
        .record_score(&session("contested"), RiskCategory::Mfa, 4)
        .expect("write resolves despite the insert conflict");
    assert_eq!(view.answered_categories, 1);

    let updates = repository.updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(
        updates[0].scores.get(&RiskCategory::Mfa).map(|s| s.get()),
        Some(4)
    );
}

#[test]
fn repository_failures_surface_as_service_errors() {
    let service = crate::workflows::quoting::AssessmentService::new(
        std::sync::Arc::new(UnavailableRepository),
        engine(),
    );
    let result = service.quote(&session("offline"));
    assert!(matches!(result, Err(QuoteServiceError::Repository(_))));
}

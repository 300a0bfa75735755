use chrono::{Duration, Utc};

use super::domain::{AssessmentRecord, Industry, Quote, RiskTier};
use super::pricing::PremiumBreakdown;

pub const QUOTE_ID_PREFIX: &str = "CYB-";
pub const QUOTE_VALIDITY_DAYS: i64 = 30;

/// Package the computed figures into an immutable quote.
///
/// The identifier is the prefix plus a millisecond timestamp. That is a
/// weak uniqueness guarantee (two quotes inside the same millisecond
/// collide) kept to preserve the observable id format.
pub fn assemble(
    record: &AssessmentRecord,
    risk_score: f64,
    tier: RiskTier,
    coverage: u64,
    premium: PremiumBreakdown,
    deductible: u64,
) -> Quote {
    let generated_at = Utc::now();

    Quote {
        quote_id: format!("{QUOTE_ID_PREFIX}{}", generated_at.timestamp_millis()),
        session_id: record.session_id.clone(),
        company_name: record.company.display_name().to_string(),
        industry: record.company.industry.unwrap_or(Industry::Other),
        employees: record.company.employees,
        risk_score,
        risk_tier: tier,
        coverage_limit: coverage,
        annual_premium: premium.annual,
        monthly_premium: premium.monthly,
        base_premium: premium.base,
        deductible,
        generated_at,
        valid_until: generated_at + Duration::days(QUOTE_VALIDITY_DAYS),
    }
}

/// Deterministic chat-card rendering of a quote. Presentation only; every
/// numeric field appears exactly as stored, with thousands separators.
pub fn render(quote: &Quote) -> String {
    let employees = quote
        .employees
        .map(|bracket| bracket.label())
        .unwrap_or("Unknown");

    let profile_note = match quote.risk_tier {
        RiskTier::Low => {
            "🟢 **Excellent Security** - Your strong cybersecurity controls qualify you for preferred pricing!"
        }
        RiskTier::Medium => {
            "🟡 **Good Foundation** - Solid security with room for improvement to reduce premiums."
        }
        RiskTier::High => {
            "🔴 **Needs Attention** - Significant security gaps identified. Improvements could reduce your premium significantly."
        }
    };

    format!(
        "🔒 **CYBERSECURITY INSURANCE QUOTE**\n\
         \n\
         **Company**: {company}\n\
         **Industry**: {industry} | **Employees**: {employees}\n\
         **Risk Assessment**: {tier} Risk (Score: {score:.1}/4.0)\n\
         \n\
         💰 **RECOMMENDED COVERAGE**\n\
         • **Coverage Limit**: ${coverage}\n\
         • **Annual Premium**: ${annual}\n\
         • **Monthly Premium**: ${monthly}\n\
         • **Deductible**: ${deductible}\n\
         \n\
         📋 **COVERAGE INCLUDES**\n\
         ✅ Data breach response & notification costs\n\
         ✅ Cyber extortion & ransomware coverage\n\
         ✅ Business interruption from cyber events\n\
         ✅ Network security & privacy liability\n\
         ✅ Regulatory fines & penalties\n\
         ✅ Crisis management & PR services\n\
         ✅ Forensic investigation costs\n\
         ✅ Legal defense & settlements\n\
         \n\
         💡 **YOUR RISK PROFILE**\n\
         {profile_note}\n\
         \n\
         ⏰ **Quote Details**\n\
         • Quote ID: {quote_id}\n\
         • Valid until: {valid_until}\n\
         • Generated: {generated}\n\
         \n\
         **Next Steps**: Contact us to finalize your policy or ask about ways to improve your security posture for better rates!",
        company = quote.company_name,
        industry = quote.industry.label(),
        employees = employees,
        tier = quote.risk_tier.label(),
        score = quote.risk_score,
        coverage = format_currency(quote.coverage_limit),
        annual = format_currency(quote.annual_premium),
        monthly = format_currency(quote.monthly_premium),
        deductible = format_currency(quote.deductible),
        profile_note = profile_note,
        quote_id = quote.quote_id,
        valid_until = quote.valid_until.format("%Y-%m-%d"),
        generated = quote.generated_at.format("%Y-%m-%d"),
    )
}

fn format_currency(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (offset, digit) in digits.chars().enumerate() {
        if offset > 0 && (digits.len() - offset) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

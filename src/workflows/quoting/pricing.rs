use serde::{Deserialize, Serialize};

use super::domain::{CompanyProfile, EmployeeBracket, Industry, RiskTier};
use super::tables::RatingTables;

/// Coverage amounts below and at these limits map to stepped deductibles.
const LOW_DEDUCTIBLE_CEILING: u64 = 5_000_000;
const MID_DEDUCTIBLE_CEILING: u64 = 15_000_000;

/// Annual, monthly, and pre-modifier premium amounts in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumBreakdown {
    pub annual: u64,
    pub monthly: u64,
    pub base: u64,
}

/// Recommend a coverage limit from company attributes. The revenue bracket
/// is the canonical axis; headcount is the fallback when revenue is unknown,
/// and $1M is the floor when neither is present.
pub fn recommend_coverage(company: &CompanyProfile, tables: &RatingTables) -> u64 {
    if let Some(revenue) = company.revenue {
        return tables.coverage_for_revenue(revenue);
    }
    if let Some(employees) = company.employees {
        return tables.coverage_for_employees(employees);
    }
    1_000_000
}

/// Deductible steps up with the coverage limit.
pub fn recommend_deductible(coverage: u64) -> u64 {
    if coverage <= LOW_DEDUCTIBLE_CEILING {
        10_000
    } else if coverage <= MID_DEDUCTIBLE_CEILING {
        25_000
    } else {
        50_000
    }
}

/// Premium derivation: industry base rate per $1M of coverage, then the
/// tier multiplier and headcount modifier, rounded half-up to whole
/// currency units. Unknown lookups fall back to documented defaults and
/// never fail.
pub fn calculate_premium(
    industry: Option<Industry>,
    coverage: u64,
    tier: RiskTier,
    employees: Option<EmployeeBracket>,
    tables: &RatingTables,
) -> PremiumBreakdown {
    let rate = tables.industry_rate(industry.unwrap_or(Industry::Other));
    let base = coverage as f64 / 1_000_000.0 * rate as f64;

    let annual = base * tables.tier_multiplier(tier) * tables.size_modifier(employees);
    let annual = annual.round() as u64;

    PremiumBreakdown {
        annual,
        monthly: (annual as f64 / 12.0).round() as u64,
        base: base.round() as u64,
    }
}

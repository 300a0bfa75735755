use serde::{Deserialize, Serialize};

use super::domain::{EmployeeBracket, Industry, RevenueBracket, RiskCategory, RiskTier};

/// Weight carried by the five majors; the remaining thirteen categories
/// split the rest of the unit weight evenly so the table always sums to 1.0.
const SECONDARY_CATEGORY_WEIGHT: f64 = 0.45 / 13.0;

/// Premium adjustment applied per risk tier. Medium is the anchor at 1.0;
/// the discount and penalty are configurable because deployed variants have
/// shipped with both 0.85/1.25 and 0.8/1.3.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierMultipliers {
    pub low: f64,
    pub high: f64,
}

impl Default for TierMultipliers {
    fn default() -> Self {
        Self {
            low: 0.85,
            high: 1.25,
        }
    }
}

/// Immutable rating configuration: category weights, industry base rates,
/// size modifiers, coverage maps, and tier multipliers. Built once at
/// startup and shared read-only by the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingTables {
    pub tier_multipliers: TierMultipliers,
}

impl RatingTables {
    /// Weight of a category in the aggregate score, in (0, 1].
    pub fn category_weight(&self, category: RiskCategory) -> f64 {
        match category {
            RiskCategory::Mfa => 0.15,
            RiskCategory::Backup => 0.12,
            RiskCategory::VulnerabilityManagement => 0.10,
            RiskCategory::IncidentResponse => 0.10,
            RiskCategory::EmployeeTraining => 0.08,
            _ => SECONDARY_CATEGORY_WEIGHT,
        }
    }

    /// Annual base rate per $1M of coverage for an industry.
    pub fn industry_rate(&self, industry: Industry) -> u64 {
        match industry {
            Industry::Healthcare => 1200,
            Industry::FinancialServices => 1100,
            Industry::Technology => 800,
            Industry::Education => 900,
            Industry::Manufacturing => 700,
            Industry::Retail => 750,
            Industry::ProfessionalServices => 650,
            Industry::Government => 1000,
            Industry::Other => 750,
        }
    }

    /// Headcount modifier applied to the premium; missing bracket is neutral.
    pub fn size_modifier(&self, bracket: Option<EmployeeBracket>) -> f64 {
        match bracket {
            Some(EmployeeBracket::UpTo10) => 0.9,
            Some(EmployeeBracket::From11To50) => 0.95,
            Some(EmployeeBracket::From51To250) => 1.0,
            Some(EmployeeBracket::From251To1000) => 1.05,
            Some(EmployeeBracket::Over1000) => 1.1,
            None => 1.0,
        }
    }

    pub fn tier_multiplier(&self, tier: RiskTier) -> f64 {
        match tier {
            RiskTier::Low => self.tier_multipliers.low,
            RiskTier::Medium => 1.0,
            RiskTier::High => self.tier_multipliers.high,
        }
    }

    /// Recommended coverage by annual revenue, the preferred axis.
    pub fn coverage_for_revenue(&self, bracket: RevenueBracket) -> u64 {
        match bracket {
            RevenueBracket::UnderOneMillion => 1_000_000,
            RevenueBracket::OneToTenMillion => 5_000_000,
            RevenueBracket::TenToHundredMillion => 25_000_000,
            RevenueBracket::OverHundredMillion => 50_000_000,
        }
    }

    /// Recommended coverage by headcount, used when revenue is unknown.
    pub fn coverage_for_employees(&self, bracket: EmployeeBracket) -> u64 {
        match bracket {
            EmployeeBracket::UpTo10 => 1_000_000,
            EmployeeBracket::From11To50 => 5_000_000,
            EmployeeBracket::From51To250 => 10_000_000,
            EmployeeBracket::From251To1000 => 25_000_000,
            EmployeeBracket::Over1000 => 50_000_000,
        }
    }
}

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for assessment sessions (opaque to the engine).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The fixed set of security categories an assessment covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    #[serde(rename = "MFA")]
    Mfa,
    Backup,
    #[serde(rename = "Vulnerability Management")]
    VulnerabilityManagement,
    #[serde(rename = "Incident Response")]
    IncidentResponse,
    #[serde(rename = "Employee Training")]
    EmployeeTraining,
    #[serde(rename = "Network Security")]
    NetworkSecurity,
    #[serde(rename = "Data Protection")]
    DataProtection,
    #[serde(rename = "Endpoint Protection")]
    EndpointProtection,
    #[serde(rename = "Security Monitoring")]
    SecurityMonitoring,
    #[serde(rename = "Physical Security")]
    PhysicalSecurity,
    #[serde(rename = "Vendor Risk")]
    VendorRisk,
    #[serde(rename = "Business Continuity")]
    BusinessContinuity,
    Compliance,
    #[serde(rename = "Identity Management")]
    IdentityManagement,
    #[serde(rename = "Payment Security")]
    PaymentSecurity,
    #[serde(rename = "Healthcare Data")]
    HealthcareData,
    #[serde(rename = "Security Testing")]
    SecurityTesting,
    #[serde(rename = "Insurance History")]
    InsuranceHistory,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 18] = [
        RiskCategory::Mfa,
        RiskCategory::Backup,
        RiskCategory::VulnerabilityManagement,
        RiskCategory::IncidentResponse,
        RiskCategory::EmployeeTraining,
        RiskCategory::NetworkSecurity,
        RiskCategory::DataProtection,
        RiskCategory::EndpointProtection,
        RiskCategory::SecurityMonitoring,
        RiskCategory::PhysicalSecurity,
        RiskCategory::VendorRisk,
        RiskCategory::BusinessContinuity,
        RiskCategory::Compliance,
        RiskCategory::IdentityManagement,
        RiskCategory::PaymentSecurity,
        RiskCategory::HealthcareData,
        RiskCategory::SecurityTesting,
        RiskCategory::InsuranceHistory,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            RiskCategory::Mfa => "MFA",
            RiskCategory::Backup => "Backup",
            RiskCategory::VulnerabilityManagement => "Vulnerability Management",
            RiskCategory::IncidentResponse => "Incident Response",
            RiskCategory::EmployeeTraining => "Employee Training",
            RiskCategory::NetworkSecurity => "Network Security",
            RiskCategory::DataProtection => "Data Protection",
            RiskCategory::EndpointProtection => "Endpoint Protection",
            RiskCategory::SecurityMonitoring => "Security Monitoring",
            RiskCategory::PhysicalSecurity => "Physical Security",
            RiskCategory::VendorRisk => "Vendor Risk",
            RiskCategory::BusinessContinuity => "Business Continuity",
            RiskCategory::Compliance => "Compliance",
            RiskCategory::IdentityManagement => "Identity Management",
            RiskCategory::PaymentSecurity => "Payment Security",
            RiskCategory::HealthcareData => "Healthcare Data",
            RiskCategory::SecurityTesting => "Security Testing",
            RiskCategory::InsuranceHistory => "Insurance History",
        }
    }

    pub fn from_label(raw: &str) -> Option<Self> {
        let needle = raw.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(needle))
    }
}

/// A validated answer score: Poor=1 through Excellent=4.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct ScoreValue(u8);

impl ScoreValue {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 4;

    pub fn new(raw: u8) -> Result<Self, InvalidScore> {
        if (Self::MIN..=Self::MAX).contains(&raw) {
            Ok(Self(raw))
        } else {
            Err(InvalidScore(raw))
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for ScoreValue {
    type Error = InvalidScore;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<ScoreValue> for u8 {
    fn from(score: ScoreValue) -> Self {
        score.0
    }
}

/// Raised when a raw answer falls outside the Poor..Excellent range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("score {0} is outside the accepted range 1-4")]
pub struct InvalidScore(pub u8);

/// Industry segment used for base-rate lookup. Unknown labels fold into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Industry {
    Healthcare,
    FinancialServices,
    Technology,
    Education,
    Manufacturing,
    Retail,
    ProfessionalServices,
    Government,
    Other,
}

impl Industry {
    pub const fn label(self) -> &'static str {
        match self {
            Industry::Healthcare => "Healthcare",
            Industry::FinancialServices => "Financial Services",
            Industry::Technology => "Technology",
            Industry::Education => "Education",
            Industry::Manufacturing => "Manufacturing",
            Industry::Retail => "Retail",
            Industry::ProfessionalServices => "Professional Services",
            Industry::Government => "Government",
            Industry::Other => "Other",
        }
    }

    /// Lenient parse used for wire and CLI input; anything unrecognized is `Other`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "healthcare" => Industry::Healthcare,
            "financial services" | "finance" => Industry::FinancialServices,
            "technology" | "tech" => Industry::Technology,
            "education" => Industry::Education,
            "manufacturing" => Industry::Manufacturing,
            "retail" => Industry::Retail,
            "professional services" => Industry::ProfessionalServices,
            "government" => Industry::Government,
            _ => Industry::Other,
        }
    }
}

impl From<String> for Industry {
    fn from(raw: String) -> Self {
        Industry::parse(&raw)
    }
}

impl From<Industry> for String {
    fn from(industry: Industry) -> Self {
        industry.label().to_string()
    }
}

/// Employee headcount bracket; drives the size modifier and fallback coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmployeeBracket {
    #[serde(rename = "1-10")]
    UpTo10,
    #[serde(rename = "11-50")]
    From11To50,
    #[serde(rename = "51-250")]
    From51To250,
    #[serde(rename = "251-1000")]
    From251To1000,
    #[serde(rename = "1000+")]
    Over1000,
}

impl EmployeeBracket {
    pub const ALL: [EmployeeBracket; 5] = [
        EmployeeBracket::UpTo10,
        EmployeeBracket::From11To50,
        EmployeeBracket::From51To250,
        EmployeeBracket::From251To1000,
        EmployeeBracket::Over1000,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            EmployeeBracket::UpTo10 => "1-10",
            EmployeeBracket::From11To50 => "11-50",
            EmployeeBracket::From51To250 => "51-250",
            EmployeeBracket::From251To1000 => "251-1000",
            EmployeeBracket::Over1000 => "1000+",
        }
    }

    pub fn from_label(raw: &str) -> Option<Self> {
        let needle = raw.trim();
        Self::ALL
            .into_iter()
            .find(|bracket| bracket.label() == needle)
    }
}

/// Annual revenue bracket; the preferred axis for coverage recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevenueBracket {
    #[serde(rename = "<$1M")]
    UnderOneMillion,
    #[serde(rename = "$1M-$10M")]
    OneToTenMillion,
    #[serde(rename = "$10M-$100M")]
    TenToHundredMillion,
    #[serde(rename = "$100M+")]
    OverHundredMillion,
}

impl RevenueBracket {
    pub const ALL: [RevenueBracket; 4] = [
        RevenueBracket::UnderOneMillion,
        RevenueBracket::OneToTenMillion,
        RevenueBracket::TenToHundredMillion,
        RevenueBracket::OverHundredMillion,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            RevenueBracket::UnderOneMillion => "<$1M",
            RevenueBracket::OneToTenMillion => "$1M-$10M",
            RevenueBracket::TenToHundredMillion => "$10M-$100M",
            RevenueBracket::OverHundredMillion => "$100M+",
        }
    }

    pub fn from_label(raw: &str) -> Option<Self> {
        let needle = raw.trim();
        Self::ALL
            .into_iter()
            .find(|bracket| bracket.label() == needle)
    }
}

/// Company attributes collected during the conversation. Every field is
/// optional; pricing falls back to documented defaults when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<Industry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employees: Option<EmployeeBracket>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue: Option<RevenueBracket>,
}

impl CompanyProfile {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.industry.is_none()
            && self.employees.is_none()
            && self.revenue.is_none()
    }

    /// Merge non-empty fields from `patch`, leaving the rest untouched.
    pub fn merge(&mut self, patch: CompanyProfile) {
        if patch.name.is_some() {
            self.name = patch.name;
        }
        if patch.industry.is_some() {
            self.industry = patch.industry;
        }
        if patch.employees.is_some() {
            self.employees = patch.employees;
        }
        if patch.revenue.is_some() {
            self.revenue = patch.revenue;
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }
}

/// Lifecycle of an assessment as answers trickle in one category at a time.
///
/// Quoting is permitted from any state because unanswered categories score
/// as Poor; `Ready` only records that a quote was requested, and `Quoted`
/// records that one was assembled. A quoted session still accepts further
/// answers, and re-quoting recomputes from current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentState {
    Empty,
    PartiallyAnswered,
    Ready,
    Quoted,
}

impl AssessmentState {
    pub const fn label(self) -> &'static str {
        match self {
            AssessmentState::Empty => "empty",
            AssessmentState::PartiallyAnswered => "partially_answered",
            AssessmentState::Ready => "ready",
            AssessmentState::Quoted => "quoted",
        }
    }

    pub fn on_answer(self) -> Self {
        match self {
            AssessmentState::Empty => AssessmentState::PartiallyAnswered,
            other => other,
        }
    }

    pub fn on_quote_requested(self) -> Self {
        match self {
            AssessmentState::Quoted => AssessmentState::Quoted,
            _ => AssessmentState::Ready,
        }
    }

    pub fn on_quoted(self) -> Self {
        AssessmentState::Quoted
    }
}

/// Mutable per-session record the engine reads as a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub session_id: SessionId,
    pub company: CompanyProfile,
    pub scores: BTreeMap<RiskCategory, ScoreValue>,
    pub state: AssessmentState,
}

impl AssessmentRecord {
    pub fn empty(session_id: SessionId) -> Self {
        Self {
            session_id,
            company: CompanyProfile::default(),
            scores: BTreeMap::new(),
            state: AssessmentState::Empty,
        }
    }

    /// Record an answer for a category. Later writes overwrite earlier ones.
    pub fn record_score(&mut self, category: RiskCategory, score: ScoreValue) {
        self.scores.insert(category, score);
        self.state = self.state.on_answer();
    }

    pub fn apply_company(&mut self, patch: CompanyProfile) {
        let had_content = !patch.is_empty();
        self.company.merge(patch);
        if had_content {
            self.state = self.state.on_answer();
        }
    }

    pub fn answered_categories(&self) -> usize {
        self.scores.len()
    }
}

/// Discrete risk tier derived from the aggregate score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub const fn label(self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Medium => "Medium",
            RiskTier::High => "High",
        }
    }
}

/// Immutable quote output. Constructed once per request, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub quote_id: String,
    pub session_id: SessionId,
    pub company_name: String,
    pub industry: Industry,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employees: Option<EmployeeBracket>,
    /// Weighted aggregate rounded to one decimal, in [1.0, 4.0].
    pub risk_score: f64,
    pub risk_tier: RiskTier,
    pub coverage_limit: u64,
    pub annual_premium: u64,
    pub monthly_premium: u64,
    pub base_premium: u64,
    pub deductible: u64,
    pub generated_at: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
}

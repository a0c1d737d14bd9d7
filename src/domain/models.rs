use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Serialize)]
pub struct JsonErr {
    pub ok: bool,
    pub error: ErrorBody,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(thiserror::Error, Debug)]
pub enum PortfolioError {
    #[error("contract not found: {0}")]
    ContractNotFound(String),
    #[error("reporting period not found: {0}@{1}")]
    PeriodNotFound(String, NaiveDate),
    #[error("contract already has reporting periods: {0}")]
    DuplicatePeriods(String),
    #[error("invalid period reference: {0} (expected contract@YYYY-MM-DD)")]
    BadPeriodRef(String),
}

impl PortfolioError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::ContractNotFound(_) => "CONTRACT_NOT_FOUND",
            Self::PeriodNotFound(_, _) => "PERIOD_NOT_FOUND",
            Self::DuplicatePeriods(_) => "DUPLICATE_PERIODS",
            Self::BadPeriodRef(_) => "BAD_PERIOD_REF",
        }
    }
}

/// Root of the portfolio file. Contracts own their periods, SLA nodes,
/// measurements and reports; tenants and SLIs are shared lookups.
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Portfolio {
    #[serde(default)]
    pub tenants: Vec<Tenant>,
    #[serde(default)]
    pub slis: Vec<ServiceLevelIndicator>,
    #[serde(default)]
    pub contracts: Vec<Contract>,
}

impl Portfolio {
    pub fn contract(&self, name: &str) -> Result<&Contract, PortfolioError> {
        self.contracts
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| PortfolioError::ContractNotFound(name.to_string()))
    }

    pub fn contract_mut(&mut self, name: &str) -> Result<&mut Contract, PortfolioError> {
        self.contracts
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| PortfolioError::ContractNotFound(name.to_string()))
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Tenant {
    pub name: String,
}

/// A named, unit-tagged metric definition, shared across contracts/tenants.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServiceLevelIndicator {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub unit: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContractStatus {
    #[default]
    Draft,
    Active,
    Expired,
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReportingFrequency {
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ThresholdType {
    Min,
    Max,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Contract {
    pub name: String,
    pub tenant: String,
    #[serde(default)]
    pub status: ContractStatus,
    #[serde(default)]
    pub effective_date: Option<NaiveDate>,
    #[serde(default)]
    pub expiration_date: Option<NaiveDate>,
    #[serde(default)]
    pub reporting_frequency: ReportingFrequency,
    #[serde(default)]
    pub periods: Vec<ReportingPeriod>,
    #[serde(default)]
    pub slas: Vec<SlaNode>,
    #[serde(default)]
    pub measurements: Vec<Measurement>,
    #[serde(default)]
    pub reports: Vec<ComplianceReport>,
}

impl Contract {
    pub fn period(&self, start_date: NaiveDate) -> Result<&ReportingPeriod, PortfolioError> {
        self.periods
            .iter()
            .find(|p| p.start_date == start_date)
            .ok_or_else(|| PortfolioError::PeriodNotFound(self.name.clone(), start_date))
    }

    pub fn report(&self, period_start: NaiveDate) -> Option<&ComplianceReport> {
        self.reports.iter().find(|r| r.period_start == period_start)
    }
}

/// A contiguous date range of one contract; created only by the period
/// generator and never updated afterwards.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ReportingPeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// One node of a contract's SLA hierarchy. Nodes without a binding are
/// purely organizational; they group children but produce no verdicts.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SlaNode {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub binding: Option<SlaBinding>,
}

/// An SLI bound to a threshold rule. A node either carries a full binding
/// or none, so a "bound SLI without a threshold" state cannot exist.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SlaBinding {
    pub sli: String,
    pub threshold_type: ThresholdType,
    pub threshold_value: f64,
}

/// Uniquely keyed by (period_start, sli). `calculated_value` is the value
/// compared against thresholds; `reported_value` is the raw figure as
/// delivered. The dispute flag is informational only.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Measurement {
    pub period_start: NaiveDate,
    pub sli: String,
    pub reported_value: f64,
    pub calculated_value: f64,
    #[serde(default)]
    pub is_disputed: bool,
}

/// At most one per reporting period. The item set is replaced wholesale on
/// every generation; `checksum` is a SHA-256 digest over the canonical item
/// set, recorded for audit verification.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ComplianceReport {
    pub period_start: NaiveDate,
    pub generated_at: DateTime<Utc>,
    #[serde(default)]
    pub checksum: String,
    #[serde(default)]
    pub items: Vec<ComplianceReportItem>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ComplianceReportItem {
    pub sla: String,
    pub sli: String,
    pub is_compliant: bool,
}

// ---- command output structs (JSON schema surface) ----

#[derive(Serialize)]
pub struct PeriodsGenerated {
    pub contract: String,
    pub created: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub periods: Vec<ReportingPeriod>,
}

#[derive(Serialize)]
pub struct ActivationReport {
    pub contract: String,
    pub status: ContractStatus,
    pub periods_created: usize,
}

#[derive(Serialize)]
pub struct ReportGenerated {
    pub contract: String,
    pub period_start: NaiveDate,
    pub items: usize,
    pub checksum: String,
}

#[derive(Serialize)]
pub struct SlaTreeNode {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binding: Option<SlaBinding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<ComplianceReportItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurement: Option<Measurement>,
    pub children: Vec<SlaTreeNode>,
}

#[derive(Serialize)]
pub struct ReportView {
    pub contract: String,
    pub period: ReportingPeriod,
    pub generated_at: DateTime<Utc>,
    pub checksum: String,
    pub compliant_items: usize,
    pub total_items: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compliance_percentage: Option<f64>,
    pub tree: Vec<SlaTreeNode>,
}

#[derive(Serialize)]
pub struct TenantSummary {
    pub name: String,
    pub contract_count: usize,
    pub active_contract_count: usize,
}

#[derive(Serialize)]
pub struct ContractSummary {
    pub name: String,
    pub tenant: String,
    pub status: ContractStatus,
    pub reporting_frequency: ReportingFrequency,
    pub period_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_period: Option<ReportingPeriod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_report_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compliance_percentage: Option<f64>,
}

#[derive(Serialize)]
pub struct StatusReport {
    pub tenants: Vec<TenantSummary>,
    pub contracts: Vec<ContractSummary>,
    pub total_contracts: usize,
    pub total_active_contracts: usize,
}

#[derive(Serialize)]
pub struct ValidationIssue {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract: Option<String>,
    pub detail: String,
}

// ---- config file (~/.config/pacta/config.toml) ----

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub generation: GenerationConfig,
}

#[derive(Debug, Deserialize)]
pub struct GenerationConfig {
    /// Horizon used as the generation boundary for contracts without an
    /// expiration date, in days from today.
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,
}

pub const DEFAULT_HORIZON_DAYS: u32 = 365;

fn default_horizon_days() -> u32 {
    DEFAULT_HORIZON_DAYS
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
        }
    }
}

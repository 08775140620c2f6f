/// Store record and filter types
///
/// The filter enums double as query-parameter values; `FromStr` is the
/// validation the routes rely on.
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// FILTER ENUMS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Monthly,
    Quarterly,
    Yearly,
}

impl Period {
    pub const ALLOWED: &'static [&'static str] = &["monthly", "quarterly", "yearly"];
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monthly" => Ok(Period::Monthly),
            "quarterly" => Ok(Period::Quarterly),
            "yearly" => Ok(Period::Yearly),
            _ => Err(format!(
                "period must be one of: {}",
                Period::ALLOWED.join(", ")
            )),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Monthly => write!(f, "monthly"),
            Period::Quarterly => write!(f, "quarterly"),
            Period::Yearly => write!(f, "yearly"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Department {
    Sales,
    Marketing,
    Engineering,
    Operations,
    Finance,
    Hr,
}

impl Department {
    pub const ALLOWED: &'static [&'static str] = &[
        "sales",
        "marketing",
        "engineering",
        "operations",
        "finance",
        "hr",
    ];
}

impl FromStr for Department {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sales" => Ok(Department::Sales),
            "marketing" => Ok(Department::Marketing),
            "engineering" => Ok(Department::Engineering),
            "operations" => Ok(Department::Operations),
            "finance" => Ok(Department::Finance),
            "hr" => Ok(Department::Hr),
            _ => Err(format!(
                "department must be one of: {}",
                Department::ALLOWED.join(", ")
            )),
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Department::Sales => "sales",
            Department::Marketing => "marketing",
            Department::Engineering => "engineering",
            Department::Operations => "operations",
            Department::Finance => "finance",
            Department::Hr => "hr",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    NorthAmerica,
    Europe,
    AsiaPacific,
    LatinAmerica,
}

impl Region {
    pub const ALLOWED: &'static [&'static str] =
        &["north-america", "europe", "asia-pacific", "latin-america"];
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "north-america" => Ok(Region::NorthAmerica),
            "europe" => Ok(Region::Europe),
            "asia-pacific" => Ok(Region::AsiaPacific),
            "latin-america" => Ok(Region::LatinAmerica),
            _ => Err(format!(
                "region must be one of: {}",
                Region::ALLOWED.join(", ")
            )),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Region::NorthAmerica => "north-america",
            Region::Europe => "europe",
            Region::AsiaPacific => "asia-pacific",
            Region::LatinAmerica => "latin-america",
        };
        write!(f, "{}", s)
    }
}

// ============================================================================
// RECORDS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiRecord {
    pub id: String,
    pub name: String,
    pub value: f64,
    pub unit: String,
    /// Change versus the previous period, in percent
    pub change_pct: f64,
    pub period: Period,
    pub department: Department,
    pub region: Region,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetItem {
    pub id: String,
    pub category: String,
    pub allocated: f64,
    pub spent: f64,
    pub period: Period,
    pub department: Department,
}

impl BudgetItem {
    pub fn remaining(&self) -> f64 {
        self.allocated - self.spent
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRecord {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub period: Period,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    pub id: String,
    pub user: String,
    pub action: String,
    pub detail: String,
    pub timestamp: DateTime<Utc>,
}

/// Creator payload for activities
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewActivity {
    pub user: String,
    pub action: String,
    #[serde(default)]
    pub detail: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueRow {
    pub period_label: String,
    pub amount: f64,
    pub period: Period,
    pub region: Region,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRow {
    pub period_label: String,
    pub amount: f64,
    pub category: String,
    pub period: Period,
    pub department: Department,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRow {
    pub period_label: String,
    pub projected: f64,
    pub lower: f64,
    pub upper: f64,
    pub period: Period,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowRow {
    pub period_label: String,
    pub inflow: f64,
    pub outflow: f64,
    pub period: Period,
}

impl CashFlowRow {
    pub fn net(&self) -> f64 {
        self.inflow - self.outflow
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use utoipa::ToSchema;

/// Whether a report line came from a persisted slip (authoritative) or was
/// recomputed on the fly because no slip exists for the period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, ToSchema)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReportSource {
    Slip,
    Computed,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EmployeeReportEntry {
    #[schema(example = 1001)]
    pub employee_id: u64,

    #[schema(example = "Nguyen Van A")]
    pub name: String,

    pub source: ReportSource,

    pub gross_salary: f64,
    pub total_deductions: f64,
    pub net_salary: f64,
}

/// Company-wide aggregate for one month, cached under its `"YYYY-MM"` key.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MonthlyReport {
    #[schema(example = 3)]
    pub month: u32,

    #[schema(example = 2026)]
    pub year: i32,

    pub total_gross: f64,
    pub total_deductions: f64,
    pub total_net: f64,

    pub entries: Vec<EmployeeReportEntry>,

    #[schema(value_type = String, format = "date-time")]
    pub generated_at: DateTime<Utc>,
}

impl MonthlyReport {
    pub fn key(month: u32, year: i32) -> String {
        format!("{year:04}-{month:02}")
    }
}

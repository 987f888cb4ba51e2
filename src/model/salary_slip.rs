use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

use super::attendance::AttendanceSummary;
use super::employee::SalaryType;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SlipStatus {
    Pending,
    Approved,
    Paid,
}

/// One named pay line: an allowance, bonus, deduction or advance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Adjustment {
    #[schema(example = "Meal allowance")]
    pub name: String,

    #[schema(example = 500000.0)]
    pub amount: f64,
}

impl Adjustment {
    /// Builds an adjustment from the loosely-typed `{name, amount}` records
    /// the back-office screens submit. Amounts arrive as JSON numbers,
    /// numeric strings, or garbage; anything that does not coerce to a
    /// finite number becomes zero instead of poisoning the totals.
    pub fn from_loose(name: impl Into<String>, amount: &Value) -> Self {
        let amount = match amount {
            Value::Number(n) => n.as_f64().unwrap_or(0.0),
            Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
            _ => 0.0,
        };
        let amount = if amount.is_finite() { amount } else { 0.0 };
        Self {
            name: name.into(),
            amount,
        }
    }
}

/// The pure-computation part of a slip, before auto-deductions are folded in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SalaryBreakdown {
    pub base_salary: f64,
    pub overtime_pay_normal: f64,
    pub overtime_pay_rest_day: f64,
    pub overtime_pay_holiday: f64,
    pub total_overtime_pay: f64,
    pub total_allowances: f64,
    pub total_bonuses: f64,
    pub gross_salary: f64,
    /// Manual deductions plus advance payments.
    pub total_manual_deductions: f64,
}

/// Immutable once committed. Snapshots the compensation profile and the full
/// attendance summary so the slip stays reproducible after the employee's
/// record changes.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SalarySlip {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = 1001)]
    pub employee_id: u64,

    #[schema(example = 3)]
    pub month: u32,

    #[schema(example = 2026)]
    pub year: i32,

    pub status: SlipStatus,

    pub salary_type: SalaryType,
    pub daily_salary: f64,
    pub monthly_salary: f64,

    pub summary: AttendanceSummary,

    pub allowances: Vec<Adjustment>,
    pub bonuses: Vec<Adjustment>,
    pub deductions: Vec<Adjustment>,
    pub advance_payments: Vec<Adjustment>,
    pub auto_deductions: Vec<Adjustment>,

    pub breakdown: SalaryBreakdown,

    pub total_auto_deductions: f64,
    pub total_deductions: f64,
    pub net_salary: f64,

    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
}

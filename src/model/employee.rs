use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SalaryType {
    Daily,
    Monthly,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Employee {
    #[schema(example = 1001)]
    pub id: u64,

    #[schema(example = "Nguyen Van A")]
    pub name: String,

    #[schema(example = "Welder", nullable = true)]
    pub position: Option<String>,

    pub salary_type: SalaryType,

    #[schema(example = 300000.0)]
    pub daily_salary: f64,

    #[schema(example = 9000000.0)]
    pub monthly_salary: f64,

    /// Contribution base for the statutory insurance deductions. Zero or
    /// negative means the employee is not enrolled.
    #[schema(example = 7000000.0)]
    pub insurance_base: f64,

    /// Remaining paid-leave days. Decremented only when a salary slip that
    /// consumed paid leave is committed.
    #[schema(example = 12.0)]
    pub annual_leave_balance: f64,
}

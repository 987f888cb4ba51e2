use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Company-wide pay policy. A single row, edited from the back office a few
/// times a year at most; read-only to the payroll engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct SystemSettings {
    /// Divisor when prorating a monthly salary, typically 26 for a
    /// six-day week.
    #[schema(example = 26.0)]
    pub standard_working_days: f64,

    #[schema(example = 1.5)]
    pub overtime_multiplier_normal: f64,

    /// Present in the settings row but not consulted: rest-day overtime is
    /// paid at the normal multiplier. Kept so the stored shape matches the
    /// back-office settings screen.
    #[schema(example = 2.0)]
    pub overtime_multiplier_rest_day: f64,

    #[schema(example = 3.0)]
    pub overtime_multiplier_holiday: f64,
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use utoipa::ToSchema;

/// Overtime marker as the attendance screens recorded it over the years.
/// Old rows carry a plain boolean; manually corrected rows store the hours
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OvertimeValue {
    Flag(bool),
    Hours(f64),
}

/// One clock-in/out row per employee per day. The clock columns hold raw
/// "HH:MM" strings from the shop-floor terminals and are parsed lazily;
/// nothing upstream guarantees they are well formed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub employee_id: u64,
    pub date: NaiveDate,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub overtime: Option<OvertimeValue>,
    pub overtime_end: Option<String>,
    /// Older rows used a different column for the same end time.
    pub overtime_out: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, ToSchema)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OvertimeBucket {
    Normal,
    RestDay,
    Holiday,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OvertimeHours {
    pub normal: f64,
    pub rest_day: f64,
    pub holiday: f64,
}

impl OvertimeHours {
    pub fn add(&mut self, bucket: OvertimeBucket, hours: f64) {
        match bucket {
            OvertimeBucket::Normal => self.normal += hours,
            OvertimeBucket::RestDay => self.rest_day += hours,
            OvertimeBucket::Holiday => self.holiday += hours,
        }
    }
}

/// Per-day overtime line kept on the summary for audit.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OvertimeDetail {
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
    pub bucket: OvertimeBucket,
    pub hours: f64,
}

/// Derived per-employee month view; never persisted on its own, but
/// snapshotted into the salary slip.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct AttendanceSummary {
    #[schema(example = 24)]
    pub actual_work_days: u32,

    #[schema(example = 2)]
    pub paid_leave_days: u32,

    /// Always `actual_work_days + paid_leave_days`; the proration base.
    #[schema(example = 26)]
    pub effective_working_days: u32,

    pub overtime: OvertimeHours,

    pub details: Vec<OvertimeDetail>,
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::leave_request::ApprovalStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvancePayment {
    pub id: u64,
    pub employee_id: u64,
    pub status: ApprovalStatus,
    pub request_date: NaiveDate,
    pub amount: f64,
}

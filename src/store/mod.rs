#[cfg(test)]
pub mod memory;
pub mod mysql;

use anyhow::Result;
use chrono::NaiveDate;

use crate::model::advance_payment::AdvancePayment;
use crate::model::attendance::AttendanceRecord;
use crate::model::employee::Employee;
use crate::model::leave_request::LeaveRequest;
use crate::model::report::MonthlyReport;
use crate::model::salary_slip::SalarySlip;
use crate::model::settings::SystemSettings;

/// Read/write contracts the payroll engine depends on. Everything else in
/// the back office (quotes, inventory, purchasing, the screens) talks to the
/// store on its own; the engine only ever goes through these.
pub trait PayrollStore: Send + Sync {
    /// Attendance rows for one employee with `first <= date <= last`.
    async fn list_attendance(
        &self,
        employee_id: u64,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>>;

    /// Company holidays with `first <= date <= last`.
    async fn list_holidays(&self, first: NaiveDate, last: NaiveDate) -> Result<Vec<NaiveDate>>;

    /// Approved, paid leave requests for the employee, unfiltered by date.
    async fn list_approved_paid_leave(&self, employee_id: u64) -> Result<Vec<LeaveRequest>>;

    /// Approved advance requests for the employee, unfiltered by date.
    async fn list_approved_advances(&self, employee_id: u64) -> Result<Vec<AdvancePayment>>;

    async fn get_employee(&self, employee_id: u64) -> Result<Option<Employee>>;

    async fn get_settings(&self) -> Result<Option<SystemSettings>>;

    async fn list_employees(&self) -> Result<Vec<Employee>>;

    /// Oldest slip for the employee/period, if any.
    async fn find_finalized_slip(
        &self,
        employee_id: u64,
        month: u32,
        year: i32,
    ) -> Result<Option<SalarySlip>>;

    /// Atomically persists the slip and, when `paid_leave_days > 0`,
    /// decrements the employee's annual leave balance by that amount.
    /// On any failure neither write is visible.
    async fn commit_slip(&self, slip: SalarySlip, paid_leave_days: f64) -> Result<SalarySlip>;

    async fn get_cached_report(&self, month: u32, year: i32) -> Result<Option<MonthlyReport>>;

    async fn put_cached_report(&self, report: &MonthlyReport) -> Result<()>;
}

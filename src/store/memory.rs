//! In-memory store double for engine tests, with failure injection for the
//! atomicity and degradation properties.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use anyhow::{Result, bail};
use chrono::NaiveDate;

use crate::model::advance_payment::AdvancePayment;
use crate::model::attendance::AttendanceRecord;
use crate::model::employee::Employee;
use crate::model::leave_request::{ApprovalStatus, LeaveRequest, LeaveType};
use crate::model::report::MonthlyReport;
use crate::model::salary_slip::SalarySlip;
use crate::model::settings::SystemSettings;

use super::PayrollStore;

#[derive(Default)]
pub struct MemStore {
    pub employees: Mutex<Vec<Employee>>,
    pub attendance: Mutex<Vec<AttendanceRecord>>,
    pub holidays: Mutex<Vec<NaiveDate>>,
    pub leaves: Mutex<Vec<LeaveRequest>>,
    pub advances: Mutex<Vec<AdvancePayment>>,
    pub settings: Mutex<Option<SystemSettings>>,
    pub slips: Mutex<Vec<SalarySlip>>,
    pub reports: Mutex<HashMap<String, MonthlyReport>>,

    next_slip_id: AtomicU64,
    /// Commit fails after the slip write has been staged; nothing sticks.
    pub fail_commit: AtomicBool,
    pub fail_advances: AtomicBool,
    /// Attendance reads fail for these employee ids.
    pub fail_attendance_for: Mutex<Vec<u64>>,
}

impl PayrollStore for MemStore {
    async fn list_attendance(
        &self,
        employee_id: u64,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>> {
        if self
            .fail_attendance_for
            .lock()
            .unwrap()
            .contains(&employee_id)
        {
            bail!("injected attendance read failure");
        }
        Ok(self
            .attendance
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.employee_id == employee_id && r.date >= first && r.date <= last)
            .cloned()
            .collect())
    }

    async fn list_holidays(&self, first: NaiveDate, last: NaiveDate) -> Result<Vec<NaiveDate>> {
        Ok(self
            .holidays
            .lock()
            .unwrap()
            .iter()
            .copied()
            .filter(|d| *d >= first && *d <= last)
            .collect())
    }

    async fn list_approved_paid_leave(&self, employee_id: u64) -> Result<Vec<LeaveRequest>> {
        Ok(self
            .leaves
            .lock()
            .unwrap()
            .iter()
            .filter(|l| {
                l.employee_id == employee_id
                    && l.status == ApprovalStatus::Approved
                    && l.leave_type == LeaveType::Paid
            })
            .cloned()
            .collect())
    }

    async fn list_approved_advances(&self, employee_id: u64) -> Result<Vec<AdvancePayment>> {
        if self.fail_advances.load(Ordering::SeqCst) {
            bail!("injected advance read failure");
        }
        Ok(self
            .advances
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.employee_id == employee_id && a.status == ApprovalStatus::Approved)
            .cloned()
            .collect())
    }

    async fn get_employee(&self, employee_id: u64) -> Result<Option<Employee>> {
        Ok(self
            .employees
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == employee_id)
            .cloned())
    }

    async fn get_settings(&self) -> Result<Option<SystemSettings>> {
        Ok(*self.settings.lock().unwrap())
    }

    async fn list_employees(&self) -> Result<Vec<Employee>> {
        Ok(self.employees.lock().unwrap().clone())
    }

    async fn find_finalized_slip(
        &self,
        employee_id: u64,
        month: u32,
        year: i32,
    ) -> Result<Option<SalarySlip>> {
        Ok(self
            .slips
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.employee_id == employee_id && s.month == month && s.year == year)
            .cloned())
    }

    async fn commit_slip(&self, mut slip: SalarySlip, paid_leave_days: f64) -> Result<SalarySlip> {
        slip.id = self.next_slip_id.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_commit.load(Ordering::SeqCst) {
            // Nothing staged so far becomes visible.
            bail!("injected commit failure");
        }
        if paid_leave_days > 0.0 {
            let mut employees = self.employees.lock().unwrap();
            if let Some(employee) = employees.iter_mut().find(|e| e.id == slip.employee_id) {
                employee.annual_leave_balance -= paid_leave_days;
            }
        }
        self.slips.lock().unwrap().push(slip.clone());
        Ok(slip)
    }

    async fn get_cached_report(&self, month: u32, year: i32) -> Result<Option<MonthlyReport>> {
        Ok(self
            .reports
            .lock()
            .unwrap()
            .get(&MonthlyReport::key(month, year))
            .cloned())
    }

    async fn put_cached_report(&self, report: &MonthlyReport) -> Result<()> {
        self.reports
            .lock()
            .unwrap()
            .insert(MonthlyReport::key(report.month, report.year), report.clone());
        Ok(())
    }
}

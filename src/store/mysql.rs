use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::MySqlPool;

use crate::model::advance_payment::AdvancePayment;
use crate::model::attendance::{AttendanceRecord, OvertimeValue};
use crate::model::employee::Employee;
use crate::model::leave_request::{LeaveRequest, LeaveType};
use crate::model::report::MonthlyReport;
use crate::model::salary_slip::SalarySlip;
use crate::model::settings::SystemSettings;

use super::PayrollStore;

/// MySQL-backed store. All queries are runtime-checked so the crate builds
/// without a live database; `schema.sql` documents the expected tables.
#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct EmployeeRow {
    id: u64,
    name: String,
    position: Option<String>,
    salary_type: String,
    daily_salary: f64,
    monthly_salary: f64,
    insurance_base: f64,
    annual_leave_balance: f64,
}

impl EmployeeRow {
    fn into_model(self) -> Result<Employee> {
        Ok(Employee {
            id: self.id,
            name: self.name,
            position: self.position,
            salary_type: self.salary_type.parse()?,
            daily_salary: self.daily_salary,
            monthly_salary: self.monthly_salary,
            insurance_base: self.insurance_base,
            annual_leave_balance: self.annual_leave_balance,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AttendanceRow {
    employee_id: u64,
    date: NaiveDate,
    check_in: Option<String>,
    check_out: Option<String>,
    overtime_flag: Option<bool>,
    overtime_hours: Option<f64>,
    overtime_end: Option<String>,
    overtime_out: Option<String>,
}

impl AttendanceRow {
    fn into_model(self) -> AttendanceRecord {
        // The hours column is the newer, more specific marker.
        let overtime = match (self.overtime_hours, self.overtime_flag) {
            (Some(h), _) => Some(OvertimeValue::Hours(h)),
            (None, Some(f)) => Some(OvertimeValue::Flag(f)),
            (None, None) => None,
        };
        AttendanceRecord {
            employee_id: self.employee_id,
            date: self.date,
            check_in: self.check_in,
            check_out: self.check_out,
            overtime,
            overtime_end: self.overtime_end,
            overtime_out: self.overtime_out,
        }
    }
}

#[derive(sqlx::FromRow)]
struct LeaveRow {
    id: u64,
    employee_id: u64,
    leave_type: String,
    status: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

#[derive(sqlx::FromRow)]
struct AdvanceRow {
    id: u64,
    employee_id: u64,
    status: String,
    request_date: NaiveDate,
    amount: f64,
}

#[derive(sqlx::FromRow)]
struct SlipRow {
    id: u64,
    payload: String,
}

impl SlipRow {
    fn into_model(self) -> Result<SalarySlip> {
        let mut slip: SalarySlip =
            serde_json::from_str(&self.payload).context("corrupt salary slip payload")?;
        // The payload is written before the id is known; the column is
        // authoritative.
        slip.id = self.id;
        Ok(slip)
    }
}

impl PayrollStore for MySqlStore {
    async fn list_attendance(
        &self,
        employee_id: u64,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>> {
        let rows = sqlx::query_as::<_, AttendanceRow>(
            r#"
            SELECT employee_id, date, check_in, check_out,
                   overtime_flag, overtime_hours, overtime_end, overtime_out
            FROM attendance_records
            WHERE employee_id = ? AND date BETWEEN ? AND ?
            ORDER BY date
            "#,
        )
        .bind(employee_id)
        .bind(first)
        .bind(last)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(AttendanceRow::into_model).collect())
    }

    async fn list_holidays(&self, first: NaiveDate, last: NaiveDate) -> Result<Vec<NaiveDate>> {
        let dates = sqlx::query_scalar::<_, NaiveDate>(
            "SELECT date FROM holidays WHERE date BETWEEN ? AND ?",
        )
        .bind(first)
        .bind(last)
        .fetch_all(&self.pool)
        .await?;
        Ok(dates)
    }

    async fn list_approved_paid_leave(&self, employee_id: u64) -> Result<Vec<LeaveRequest>> {
        let rows = sqlx::query_as::<_, LeaveRow>(
            r#"
            SELECT id, employee_id, leave_type, status, start_date, end_date
            FROM leave_requests
            WHERE employee_id = ? AND status = 'approved' AND leave_type = 'paid'
            "#,
        )
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter()
            .map(|r| {
                Ok(LeaveRequest {
                    id: r.id,
                    employee_id: r.employee_id,
                    leave_type: r.leave_type.parse::<LeaveType>()?,
                    status: r.status.parse()?,
                    start_date: r.start_date,
                    end_date: r.end_date,
                })
            })
            .collect()
    }

    async fn list_approved_advances(&self, employee_id: u64) -> Result<Vec<AdvancePayment>> {
        let rows = sqlx::query_as::<_, AdvanceRow>(
            r#"
            SELECT id, employee_id, status, request_date, amount
            FROM advance_payments
            WHERE employee_id = ? AND status = 'approved'
            "#,
        )
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter()
            .map(|r| {
                Ok(AdvancePayment {
                    id: r.id,
                    employee_id: r.employee_id,
                    status: r.status.parse()?,
                    request_date: r.request_date,
                    amount: r.amount,
                })
            })
            .collect()
    }

    async fn get_employee(&self, employee_id: u64) -> Result<Option<Employee>> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT id, name, position, salary_type, daily_salary, monthly_salary,
                   insurance_base, annual_leave_balance
            FROM employees
            WHERE id = ?
            "#,
        )
        .bind(employee_id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(EmployeeRow::into_model).transpose()
    }

    async fn get_settings(&self) -> Result<Option<SystemSettings>> {
        let settings = sqlx::query_as::<_, SystemSettings>(
            r#"
            SELECT standard_working_days, overtime_multiplier_normal,
                   overtime_multiplier_rest_day, overtime_multiplier_holiday
            FROM system_settings
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(settings)
    }

    async fn list_employees(&self) -> Result<Vec<Employee>> {
        let rows = sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT id, name, position, salary_type, daily_salary, monthly_salary,
                   insurance_base, annual_leave_balance
            FROM employees
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(EmployeeRow::into_model).collect()
    }

    async fn find_finalized_slip(
        &self,
        employee_id: u64,
        month: u32,
        year: i32,
    ) -> Result<Option<SalarySlip>> {
        let row = sqlx::query_as::<_, SlipRow>(
            r#"
            SELECT id, payload
            FROM salary_slips
            WHERE employee_id = ? AND month = ? AND year = ?
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(employee_id)
        .bind(month)
        .bind(year)
        .fetch_optional(&self.pool)
        .await?;
        row.map(SlipRow::into_model).transpose()
    }

    async fn commit_slip(&self, mut slip: SalarySlip, paid_leave_days: f64) -> Result<SalarySlip> {
        let payload = serde_json::to_string(&slip)?;

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO salary_slips
                (employee_id, month, year, status, gross_salary,
                 total_deductions, net_salary, payload, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(slip.employee_id)
        .bind(slip.month)
        .bind(slip.year)
        .bind(slip.status.to_string())
        .bind(slip.breakdown.gross_salary)
        .bind(slip.total_deductions)
        .bind(slip.net_salary)
        .bind(&payload)
        .bind(slip.created_at)
        .execute(&mut *tx)
        .await?;
        slip.id = result.last_insert_id();

        if paid_leave_days > 0.0 {
            sqlx::query(
                "UPDATE employees SET annual_leave_balance = annual_leave_balance - ? WHERE id = ?",
            )
            .bind(paid_leave_days)
            .bind(slip.employee_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(slip)
    }

    async fn get_cached_report(&self, month: u32, year: i32) -> Result<Option<MonthlyReport>> {
        let payload = sqlx::query_scalar::<_, String>(
            "SELECT payload FROM monthly_reports WHERE month_key = ?",
        )
        .bind(MonthlyReport::key(month, year))
        .fetch_optional(&self.pool)
        .await?;
        payload
            .map(|p| serde_json::from_str(&p).context("corrupt monthly report payload"))
            .transpose()
    }

    async fn put_cached_report(&self, report: &MonthlyReport) -> Result<()> {
        let payload = serde_json::to_string(report)?;
        sqlx::query(
            r#"
            INSERT INTO monthly_reports (month_key, payload, generated_at)
            VALUES (?, ?, ?)
            ON DUPLICATE KEY UPDATE payload = VALUES(payload),
                                    generated_at = VALUES(generated_at)
            "#,
        )
        .bind(MonthlyReport::key(report.month, report.year))
        .bind(&payload)
        .bind(report.generated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

use anyhow::{Context, Result};
use chrono::Utc;
use futures::try_join;
use tracing::{info, warn};

use crate::model::salary_slip::{Adjustment, SalarySlip, SlipStatus};
use crate::store::PayrollStore;

use super::computer::{self, CompensationProfile, ManualAdjustments};
use super::error::{EmployeeNotFound, SettingsMissing};
use super::{attendance, deductions};

/// Caller-supplied inputs for one slip. Advances and the statutory
/// deductions are engine-supplied and deliberately absent here.
#[derive(Debug)]
pub struct SlipRequest {
    pub employee_id: u64,
    pub month: u32,
    pub year: i32,
    pub allowances: Vec<Adjustment>,
    pub bonuses: Vec<Adjustment>,
    pub deductions: Vec<Adjustment>,
}

/// Collects inputs, computes the breakdown and commits the slip together
/// with the leave-balance decrement as one atomic store operation. On any
/// failure nothing is persisted; the caller retries the whole call.
pub async fn issue_slip<S: PayrollStore>(store: &S, request: SlipRequest) -> Result<SalarySlip> {
    let SlipRequest {
        employee_id,
        month,
        year,
        allowances,
        bonuses,
        deductions: manual_deductions,
    } = request;

    let (settings, employee, summary) = try_join!(
        store.get_settings(),
        store.get_employee(employee_id),
        attendance::summarize(store, employee_id, month, year),
    )?;
    let settings = settings.ok_or(SettingsMissing)?;
    let employee = employee.ok_or(EmployeeNotFound { employee_id })?;

    // Nothing stops a second slip for the same period; flag it loudly so the
    // back office can clean up, but do not refuse.
    match store.find_finalized_slip(employee_id, month, year).await {
        Ok(Some(existing)) => warn!(
            employee_id,
            month,
            year,
            existing_slip = existing.id,
            "issuing a second slip for the same period"
        ),
        Ok(None) => {}
        Err(e) => warn!(error = %e, employee_id, "duplicate-slip check failed"),
    }

    let advances: Vec<Adjustment> = deductions::advance_payments(store, employee_id, month, year)
        .await
        .into_iter()
        .map(|a| Adjustment {
            name: format!("Advance ({})", a.request_date),
            amount: a.amount,
        })
        .collect();
    let auto_deductions = deductions::auto_deductions(employee.insurance_base);

    let profile = CompensationProfile {
        salary_type: employee.salary_type,
        daily_salary: employee.daily_salary,
        monthly_salary: employee.monthly_salary,
    };
    let manual = ManualAdjustments {
        allowances,
        bonuses,
        deductions: manual_deductions,
        advance_payments: advances,
    };
    let breakdown = computer::compute(&profile, &summary, &settings, &manual);

    let total_auto_deductions: f64 = auto_deductions.iter().map(|a| a.amount).sum();
    let total_deductions = breakdown.total_manual_deductions + total_auto_deductions;
    let net_salary = breakdown.gross_salary - total_deductions;

    let paid_leave_days = f64::from(summary.paid_leave_days);
    let slip = SalarySlip {
        id: 0,
        employee_id,
        month,
        year,
        status: SlipStatus::Pending,
        salary_type: employee.salary_type,
        daily_salary: employee.daily_salary,
        monthly_salary: employee.monthly_salary,
        summary,
        allowances: manual.allowances,
        bonuses: manual.bonuses,
        deductions: manual.deductions,
        advance_payments: manual.advance_payments,
        auto_deductions,
        breakdown,
        total_auto_deductions,
        total_deductions,
        net_salary,
        created_at: Utc::now(),
    };

    let slip = store
        .commit_slip(slip, paid_leave_days)
        .await
        .context("failed to commit salary slip")?;
    info!(
        employee_id,
        month,
        year,
        slip_id = slip.id,
        net_salary = slip.net_salary,
        "salary slip issued"
    );
    Ok(slip)
}

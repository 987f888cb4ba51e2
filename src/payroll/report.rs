use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use moka::future::Cache;
use once_cell::sync::Lazy;
use tracing::{info, warn};

use crate::model::employee::Employee;
use crate::model::report::{EmployeeReportEntry, MonthlyReport, ReportSource};
use crate::model::settings::SystemSettings;
use crate::store::PayrollStore;

use super::computer::{self, CompensationProfile, ManualAdjustments};
use super::error::SettingsMissing;
use super::{attendance, deductions};

/// How far gross − deductions may drift from net before the entry is
/// repaired, in currency units.
const NET_TOLERANCE: f64 = 1.0;

/// Process-wide report cache, shared by the HTTP handlers.
pub static REPORTS: Lazy<ReportCache> = Lazy::new(ReportCache::new);

/// Read-through cache over the company-wide monthly aggregate. Lookup order:
/// in-process moka entry, then the durable `"YYYY-MM"` cache row, then a
/// full recomputation that refreshes both.
pub struct ReportCache {
    inner: Cache<String, Arc<MonthlyReport>>,
}

impl Default for ReportCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportCache {
    pub fn new() -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(256)
                .time_to_live(Duration::from_secs(6 * 3600))
                .build(),
        }
    }

    pub async fn get<S: PayrollStore>(
        &self,
        store: &S,
        month: u32,
        year: i32,
        force_refresh: bool,
    ) -> Result<Arc<MonthlyReport>> {
        let key = MonthlyReport::key(month, year);

        if !force_refresh {
            if let Some(report) = self.inner.get(&key).await {
                return Ok(report);
            }
            match store.get_cached_report(month, year).await {
                Ok(Some(report)) => {
                    let report = Arc::new(report);
                    self.inner.insert(key, report.clone()).await;
                    return Ok(report);
                }
                Ok(None) => {}
                // A broken cache read just means recomputing.
                Err(e) => warn!(error = %e, %key, "cached report read failed"),
            }
        }

        let report = Arc::new(build_report(store, month, year).await?);
        if let Err(e) = store.put_cached_report(&report).await {
            warn!(error = %e, %key, "failed to persist monthly report");
        }
        self.inner.insert(key, report.clone()).await;
        Ok(report)
    }
}

/// Recomputes the aggregate from scratch. One employee failing is logged and
/// skipped; the report is best-effort by design, unlike slip issuance.
async fn build_report<S: PayrollStore>(store: &S, month: u32, year: i32) -> Result<MonthlyReport> {
    let settings = store.get_settings().await?.ok_or(SettingsMissing)?;
    let employees = store.list_employees().await?;

    let mut entries = Vec::with_capacity(employees.len());
    for employee in &employees {
        match employee_entry(store, employee, &settings, month, year).await {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                warn!(error = %e, employee_id = employee.id, "skipping employee in monthly report");
            }
        }
    }

    let mut report = MonthlyReport {
        month,
        year,
        total_gross: 0.0,
        total_deductions: 0.0,
        total_net: 0.0,
        entries,
        generated_at: Utc::now(),
    };
    for entry in &report.entries {
        report.total_gross += entry.gross_salary;
        report.total_deductions += entry.total_deductions;
        report.total_net += entry.net_salary;
    }
    info!(
        month,
        year,
        employees = report.entries.len(),
        total_net = report.total_net,
        "monthly report computed"
    );
    Ok(report)
}

async fn employee_entry<S: PayrollStore>(
    store: &S,
    employee: &Employee,
    settings: &SystemSettings,
    month: u32,
    year: i32,
) -> Result<EmployeeReportEntry> {
    // A persisted slip is ground truth for the period.
    if let Some(slip) = store.find_finalized_slip(employee.id, month, year).await? {
        return Ok(normalize(EmployeeReportEntry {
            employee_id: employee.id,
            name: employee.name.clone(),
            source: ReportSource::Slip,
            gross_salary: slip.breakdown.gross_salary,
            total_deductions: slip.total_deductions,
            net_salary: slip.net_salary,
        }));
    }

    // No slip yet: estimate from raw attendance, persisting nothing.
    let summary = attendance::summarize(store, employee.id, month, year).await?;
    let advances = deductions::advance_payments(store, employee.id, month, year)
        .await
        .into_iter()
        .map(|a| crate::model::salary_slip::Adjustment {
            name: format!("Advance ({})", a.request_date),
            amount: a.amount,
        })
        .collect();
    let auto = deductions::auto_deductions(employee.insurance_base);

    let profile = CompensationProfile {
        salary_type: employee.salary_type,
        daily_salary: employee.daily_salary,
        monthly_salary: employee.monthly_salary,
    };
    let manual = ManualAdjustments {
        advance_payments: advances,
        ..ManualAdjustments::default()
    };
    let breakdown = computer::compute(&profile, &summary, settings, &manual);

    let total_auto: f64 = auto.iter().map(|a| a.amount).sum();
    let total_deductions = breakdown.total_manual_deductions + total_auto;
    let net_salary = breakdown.gross_salary - total_deductions;

    Ok(normalize(EmployeeReportEntry {
        employee_id: employee.id,
        name: employee.name.clone(),
        source: ReportSource::Computed,
        gross_salary: breakdown.gross_salary,
        total_deductions,
        net_salary,
    }))
}

/// Keeps gross/deductions/net internally consistent: negative net clamps to
/// zero, and when the three figures disagree beyond the tolerance the
/// deduction total is re-derived from gross and net.
fn normalize(mut entry: EmployeeReportEntry) -> EmployeeReportEntry {
    entry.net_salary = entry.net_salary.max(0.0);
    if (entry.gross_salary - entry.total_deductions - entry.net_salary).abs() > NET_TOLERANCE {
        entry.total_deductions = (entry.gross_salary - entry.net_salary).max(0.0);
    }
    entry
}

use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::model::report::MonthlyReport;
use crate::model::salary_slip::{Adjustment, SalarySlip};
use crate::payroll::error::{EmployeeNotFound, SettingsMissing};
use crate::payroll::report::REPORTS;
use crate::payroll::slip::{self, SlipRequest};
use crate::store::mysql::MySqlStore;

#[derive(Deserialize, ToSchema)]
pub struct AdjustmentInput {
    #[schema(example = "Meal allowance")]
    pub name: String,

    /// Any JSON scalar; the screens send numbers, numeric strings and the
    /// occasional garbage. Non-numeric amounts count as zero.
    #[schema(value_type = Object, example = 500000)]
    pub amount: Value,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateSlip {
    #[schema(example = 1001)]
    pub employee_id: u64,

    #[schema(example = 3)]
    pub month: u32,

    #[schema(example = 2026)]
    pub year: i32,

    #[serde(default)]
    pub allowances: Vec<AdjustmentInput>,

    #[serde(default)]
    pub bonuses: Vec<AdjustmentInput>,

    #[serde(default)]
    pub deductions: Vec<AdjustmentInput>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct ReportQuery {
    /// Skip both cache layers and recompute the aggregate.
    #[schema(example = false)]
    pub force_refresh: Option<bool>,
}

fn coerced(items: Vec<AdjustmentInput>) -> Vec<Adjustment> {
    items
        .into_iter()
        .map(|item| Adjustment::from_loose(item.name, &item.amount))
        .collect()
}

/// Issue a salary slip
#[utoipa::path(
    post,
    path = "/api/v1/payroll/slips",
    request_body = CreateSlip,
    responses(
        (status = 201, description = "Slip created", body = SalarySlip),
        (status = 400, description = "Invalid month"),
        (status = 404, description = "Employee or settings missing", body = Object, example = json!({
            "message": "employee 1001 not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Payroll"
)]
pub async fn create_salary_slip(
    store: web::Data<MySqlStore>,
    payload: web::Json<CreateSlip>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();

    if !(1..=12).contains(&payload.month) {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "month must be between 1 and 12"
        })));
    }

    let employee_id = payload.employee_id;
    let request = SlipRequest {
        employee_id,
        month: payload.month,
        year: payload.year,
        allowances: coerced(payload.allowances),
        bonuses: coerced(payload.bonuses),
        deductions: coerced(payload.deductions),
    };

    match slip::issue_slip(store.get_ref(), request).await {
        Ok(slip) => Ok(HttpResponse::Created().json(slip)),
        Err(e)
            if e.downcast_ref::<EmployeeNotFound>().is_some()
                || e.downcast_ref::<SettingsMissing>().is_some() =>
        {
            Ok(HttpResponse::NotFound().json(serde_json::json!({
                "message": e.to_string()
            })))
        }
        Err(e) => {
            tracing::error!(error = %e, employee_id, "failed to issue salary slip");
            Err(actix_web::error::ErrorInternalServerError(
                "Internal Server Error",
            ))
        }
    }
}

/// Company-wide payroll report for one month
#[utoipa::path(
    get,
    path = "/api/v1/payroll/reports/{year}/{month}",
    params(
        ("year" = i32, Path, description = "Calendar year"),
        ("month" = u32, Path, description = "Month, 1-12"),
        ReportQuery
    ),
    responses(
        (status = 200, description = "Aggregate report", body = MonthlyReport),
        (status = 400, description = "Invalid month"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Payroll"
)]
pub async fn get_monthly_report(
    store: web::Data<MySqlStore>,
    path: web::Path<(i32, u32)>,
    query: web::Query<ReportQuery>,
) -> actix_web::Result<impl Responder> {
    let (year, month) = path.into_inner();

    if !(1..=12).contains(&month) {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "month must be between 1 and 12"
        })));
    }

    let force_refresh = query.force_refresh.unwrap_or(false);
    match REPORTS.get(store.get_ref(), month, year, force_refresh).await {
        Ok(report) => Ok(HttpResponse::Ok().json(report.as_ref())),
        Err(e) => {
            tracing::error!(error = %e, month, year, "failed to build monthly report");
            Err(actix_web::error::ErrorInternalServerError(
                "Internal Server Error",
            ))
        }
    }
}

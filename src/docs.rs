use crate::api::payroll::{AdjustmentInput, CreateSlip, ReportQuery};
use crate::model::attendance::{AttendanceSummary, OvertimeBucket, OvertimeDetail, OvertimeHours};
use crate::model::employee::{Employee, SalaryType};
use crate::model::report::{EmployeeReportEntry, MonthlyReport, ReportSource};
use crate::model::salary_slip::{Adjustment, SalaryBreakdown, SalarySlip, SlipStatus};
use crate::model::settings::SystemSettings;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Fabpay Payroll API",
        version = "1.0.0",
        description = r#"
## Payroll engine for the fabrication back office

Converts raw attendance, leave and advance records into per-employee salary
slips and a cached company-wide monthly report.

### 🔹 Operations
- **Issue a salary slip**
  - Aggregates the month's attendance, prices overtime by bucket, applies
    statutory and manual deductions, and commits the slip together with the
    leave-balance decrement in one transaction
- **Monthly report**
  - Cache-first aggregate over all employees; persisted slips are ground
    truth, everything else is recomputed on the fly

### 📦 Response Format
JSON-based RESTful responses.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::payroll::create_salary_slip,
        crate::api::payroll::get_monthly_report
    ),
    components(
        schemas(
            AdjustmentInput,
            CreateSlip,
            ReportQuery,
            Adjustment,
            SalaryBreakdown,
            SalarySlip,
            SlipStatus,
            SalaryType,
            Employee,
            SystemSettings,
            AttendanceSummary,
            OvertimeBucket,
            OvertimeDetail,
            OvertimeHours,
            MonthlyReport,
            EmployeeReportEntry,
            ReportSource
        )
    ),
    tags(
        (name = "Payroll", description = "Salary slips and monthly reports"),
    )
)]
pub struct ApiDoc;

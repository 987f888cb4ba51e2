use crate::{api::payroll, config::Config};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    cfg.service(
        web::scope(&config.api_prefix).service(
            web::scope("/v1/payroll")
                // /v1/payroll/slips
                .service(
                    web::resource("/slips").route(web::post().to(payroll::create_salary_slip)),
                )
                // /v1/payroll/reports/{year}/{month}
                .service(
                    web::resource("/reports/{year}/{month}")
                        .route(web::get().to(payroll::get_monthly_report)),
                ),
        ),
    );
}

use crate::model::attendance::AttendanceSummary;
use crate::model::employee::SalaryType;
use crate::model::salary_slip::{Adjustment, SalaryBreakdown};
use crate::model::settings::SystemSettings;

pub const HOURS_PER_DAY: f64 = 8.0;

/// Compensation snapshot taken from the employee at computation time.
#[derive(Debug, Clone, Copy)]
pub struct CompensationProfile {
    pub salary_type: SalaryType,
    pub daily_salary: f64,
    pub monthly_salary: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ManualAdjustments {
    pub allowances: Vec<Adjustment>,
    pub bonuses: Vec<Adjustment>,
    pub deductions: Vec<Adjustment>,
    pub advance_payments: Vec<Adjustment>,
}

pub fn round_currency(value: f64) -> f64 {
    value.round()
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

fn sum(items: &[Adjustment]) -> f64 {
    items.iter().map(|a| sanitize(a.amount)).sum()
}

/// Pure pay computation, no I/O and no failure path: bad numeric inputs are
/// coerced to zero. Every figure in the returned breakdown is rounded to
/// whole currency units.
///
/// Base pay is always prorated by effective working days, for monthly as
/// well as daily salary types.
pub fn compute(
    profile: &CompensationProfile,
    summary: &AttendanceSummary,
    settings: &SystemSettings,
    manual: &ManualAdjustments,
) -> SalaryBreakdown {
    let daily_salary = sanitize(profile.daily_salary);
    let monthly_salary = sanitize(profile.monthly_salary);
    let standard_days = sanitize(settings.standard_working_days);
    let effective_days = f64::from(summary.effective_working_days);

    let day_rate = match profile.salary_type {
        SalaryType::Daily => daily_salary,
        SalaryType::Monthly => {
            if standard_days > 0.0 {
                monthly_salary / standard_days
            } else {
                0.0
            }
        }
    };
    let hourly_rate = day_rate / HOURS_PER_DAY;

    let normal_rate = hourly_rate * sanitize(settings.overtime_multiplier_normal);
    // Rest-day overtime is paid at the normal multiplier; the distinct
    // rest-day multiplier in settings has never been read by payroll.
    let rest_day_rate = normal_rate;
    let holiday_rate = hourly_rate * sanitize(settings.overtime_multiplier_holiday);

    let overtime_pay_normal = round_currency(summary.overtime.normal * normal_rate);
    let overtime_pay_rest_day = round_currency(summary.overtime.rest_day * rest_day_rate);
    let overtime_pay_holiday = round_currency(summary.overtime.holiday * holiday_rate);
    let total_overtime_pay = overtime_pay_normal + overtime_pay_rest_day + overtime_pay_holiday;

    let base_salary = round_currency(day_rate * effective_days);
    let total_allowances = round_currency(sum(&manual.allowances));
    let total_bonuses = round_currency(sum(&manual.bonuses));
    let gross_salary = base_salary + total_overtime_pay + total_allowances + total_bonuses;

    let total_manual_deductions =
        round_currency(sum(&manual.deductions)) + round_currency(sum(&manual.advance_payments));

    SalaryBreakdown {
        base_salary,
        overtime_pay_normal,
        overtime_pay_rest_day,
        overtime_pay_holiday,
        total_overtime_pay,
        total_allowances,
        total_bonuses,
        gross_salary,
        total_manual_deductions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::attendance::OvertimeHours;

    fn settings() -> SystemSettings {
        SystemSettings {
            standard_working_days: 26.0,
            overtime_multiplier_normal: 1.5,
            overtime_multiplier_rest_day: 2.0,
            overtime_multiplier_holiday: 3.0,
        }
    }

    fn summary(days: u32) -> AttendanceSummary {
        AttendanceSummary {
            actual_work_days: days,
            paid_leave_days: 0,
            effective_working_days: days,
            overtime: OvertimeHours::default(),
            details: Vec::new(),
        }
    }

    fn monthly(salary: f64) -> CompensationProfile {
        CompensationProfile {
            salary_type: SalaryType::Monthly,
            daily_salary: 0.0,
            monthly_salary: salary,
        }
    }

    #[test]
    fn full_month_pays_full_monthly_salary() {
        let b = compute(
            &monthly(9_000_000.0),
            &summary(26),
            &settings(),
            &ManualAdjustments::default(),
        );
        assert_eq!(b.base_salary, 9_000_000.0);
        assert_eq!(b.gross_salary, 9_000_000.0);
    }

    #[test]
    fn monthly_salary_is_prorated_by_effective_days() {
        let b = compute(
            &monthly(9_000_000.0),
            &summary(13),
            &settings(),
            &ManualAdjustments::default(),
        );
        assert_eq!(b.base_salary, 4_500_000.0);
    }

    #[test]
    fn daily_wage_multiplies_effective_days() {
        let profile = CompensationProfile {
            salary_type: SalaryType::Daily,
            daily_salary: 300_000.0,
            monthly_salary: 0.0,
        };
        let b = compute(
            &profile,
            &summary(22),
            &settings(),
            &ManualAdjustments::default(),
        );
        assert_eq!(b.base_salary, 6_600_000.0);
    }

    #[test]
    fn rest_day_bucket_uses_the_normal_multiplier() {
        let mut s = summary(26);
        s.overtime = OvertimeHours {
            normal: 2.0,
            rest_day: 2.0,
            holiday: 2.0,
        };
        let b = compute(
            &monthly(9_000_000.0),
            &s,
            &settings(),
            &ManualAdjustments::default(),
        );
        // hourly = 9,000,000 / 26 / 8
        let hourly: f64 = 9_000_000.0 / 26.0 / 8.0;
        assert_eq!(b.overtime_pay_normal, (2.0 * hourly * 1.5).round());
        assert_eq!(b.overtime_pay_rest_day, b.overtime_pay_normal);
        assert_eq!(b.overtime_pay_holiday, (2.0 * hourly * 3.0).round());
        assert_eq!(
            b.total_overtime_pay,
            b.overtime_pay_normal + b.overtime_pay_rest_day + b.overtime_pay_holiday
        );
    }

    #[test]
    fn manual_lists_feed_gross_and_deductions() {
        let manual = ManualAdjustments {
            allowances: vec![Adjustment {
                name: "Meal".into(),
                amount: 500_000.0,
            }],
            bonuses: vec![Adjustment {
                name: "Output".into(),
                amount: 1_000_000.0,
            }],
            deductions: vec![Adjustment {
                name: "Uniform".into(),
                amount: 200_000.0,
            }],
            advance_payments: vec![Adjustment {
                name: "Advance".into(),
                amount: 300_000.0,
            }],
        };
        let b = compute(&monthly(9_000_000.0), &summary(26), &settings(), &manual);
        assert_eq!(b.total_allowances, 500_000.0);
        assert_eq!(b.total_bonuses, 1_000_000.0);
        assert_eq!(b.gross_salary, 10_500_000.0);
        assert_eq!(b.total_manual_deductions, 500_000.0);
    }

    #[test]
    fn non_finite_amounts_count_as_zero() {
        let manual = ManualAdjustments {
            allowances: vec![Adjustment {
                name: "bad".into(),
                amount: f64::NAN,
            }],
            ..Default::default()
        };
        let b = compute(&monthly(9_000_000.0), &summary(26), &settings(), &manual);
        assert_eq!(b.total_allowances, 0.0);
        assert_eq!(b.gross_salary, 9_000_000.0);
    }

    #[test]
    fn zero_standard_days_does_not_blow_up() {
        let mut s = settings();
        s.standard_working_days = 0.0;
        let b = compute(
            &monthly(9_000_000.0),
            &summary(26),
            &s,
            &ManualAdjustments::default(),
        );
        assert_eq!(b.base_salary, 0.0);
        assert_eq!(b.gross_salary, 0.0);
    }
}

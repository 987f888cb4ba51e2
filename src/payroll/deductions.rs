use tracing::warn;

use crate::model::advance_payment::AdvancePayment;
use crate::model::salary_slip::Adjustment;
use crate::store::PayrollStore;

use super::calendar;
use super::computer::round_currency;

// Statutory withholding rates on the insurance contribution base. These are
// policy, not data; changing them is a deploy.
const SOCIAL_INSURANCE_RATE: f64 = 0.08;
const HEALTH_INSURANCE_RATE: f64 = 0.015;
const UNEMPLOYMENT_INSURANCE_RATE: f64 = 0.01;

/// The three statutory line items for a given insurance base, each rounded
/// to whole currency units. A non-positive base means the employee is not
/// enrolled and yields no lines at all.
pub fn auto_deductions(insurance_base: f64) -> Vec<Adjustment> {
    if insurance_base <= 0.0 {
        return Vec::new();
    }
    [
        ("Social insurance (8%)", SOCIAL_INSURANCE_RATE),
        ("Health insurance (1.5%)", HEALTH_INSURANCE_RATE),
        ("Unemployment insurance (1%)", UNEMPLOYMENT_INSURANCE_RATE),
    ]
    .into_iter()
    .map(|(name, rate)| Adjustment {
        name: name.to_string(),
        amount: round_currency(insurance_base * rate),
    })
    .collect()
}

/// Approved advances whose request date falls inside the pay period.
///
/// A read failure degrades to an empty list: a broken advance lookup must
/// not block the rest of the slip.
pub async fn advance_payments<S: PayrollStore>(
    store: &S,
    employee_id: u64,
    month: u32,
    year: i32,
) -> Vec<AdvancePayment> {
    let Some((first, last)) = calendar::month_bounds(month, year) else {
        return Vec::new();
    };
    match store.list_approved_advances(employee_id).await {
        Ok(advances) => advances
            .into_iter()
            .filter(|a| a.request_date >= first && a.request_date <= last)
            .collect(),
        Err(e) => {
            warn!(error = %e, employee_id, "advance lookup failed, deducting none");
            Vec::new()
        }
    }
}

use derive_more::{Display, Error};

/// Hard failure: the slip target does not exist. Mapped to 404 at the API
/// boundary.
#[derive(Debug, Display, Error)]
#[display(fmt = "employee {} not found", employee_id)]
pub struct EmployeeNotFound {
    pub employee_id: u64,
}

/// Hard failure: the pay-policy settings row has never been created.
#[derive(Debug, Display, Error)]
#[display(fmt = "system settings are not configured")]
pub struct SettingsMissing;

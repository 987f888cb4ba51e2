pub mod advance_payment;
pub mod attendance;
pub mod employee;
pub mod leave_request;
pub mod report;
pub mod salary_slip;
pub mod settings;

pub mod attendance;
pub mod calendar;
pub mod computer;
pub mod deductions;
pub mod error;
pub mod overtime;
pub mod report;
pub mod slip;
pub mod timeparse;

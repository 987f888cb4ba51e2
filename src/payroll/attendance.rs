use std::collections::HashSet;

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;

use crate::model::attendance::{AttendanceSummary, OvertimeDetail};
use crate::store::PayrollStore;

use super::{calendar, overtime};

/// Builds the per-employee month view: worked days, paid-leave days and the
/// three overtime buckets. Any read failure propagates; a partial summary is
/// worse than none, because slips are computed from it.
pub async fn summarize<S: PayrollStore>(
    store: &S,
    employee_id: u64,
    month: u32,
    year: i32,
) -> Result<AttendanceSummary> {
    let (first, last) =
        calendar::month_bounds(month, year).ok_or_else(|| anyhow!("invalid month {year}-{month}"))?;

    let records = store
        .list_attendance(employee_id, first, last)
        .await
        .context("failed to load attendance")?;
    let holidays: HashSet<NaiveDate> = store
        .list_holidays(first, last)
        .await
        .context("failed to load holidays")?
        .into_iter()
        .collect();

    let mut summary = AttendanceSummary {
        actual_work_days: records.len() as u32,
        ..AttendanceSummary::default()
    };

    for record in &records {
        let kind = calendar::classify(record.date, &holidays);
        if let Some((bucket, hours)) = overtime::resolve(record, kind) {
            summary.overtime.add(bucket, hours);
            summary.details.push(OvertimeDetail {
                date: record.date,
                bucket,
                hours,
            });
        }
    }

    let leaves = store
        .list_approved_paid_leave(employee_id)
        .await
        .context("failed to load leave requests")?;
    for leave in &leaves {
        summary.paid_leave_days += days_within(leave.start_date, leave.end_date, first, last);
    }

    summary.effective_working_days = summary.actual_work_days + summary.paid_leave_days;
    Ok(summary)
}

/// Inclusive walk over the request range, counting days inside the period.
fn days_within(start: NaiveDate, end: NaiveDate, first: NaiveDate, last: NaiveDate) -> u32 {
    let mut days = 0;
    let mut day = start;
    while day <= end {
        if day >= first && day <= last {
            days += 1;
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::attendance::{AttendanceRecord, OvertimeValue};
    use crate::model::leave_request::{ApprovalStatus, LeaveRequest, LeaveType};
    use crate::store::memory::MemStore;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn record(employee_id: u64, date: NaiveDate) -> AttendanceRecord {
        AttendanceRecord {
            employee_id,
            date,
            check_in: Some("07:30".into()),
            check_out: Some("17:30".into()),
            overtime: None,
            overtime_end: None,
            overtime_out: None,
        }
    }

    #[test]
    fn leave_days_clip_to_the_month() {
        // Request spans March into April; only the March days count.
        assert_eq!(
            days_within(d(2026, 3, 30), d(2026, 4, 2), d(2026, 3, 1), d(2026, 3, 31)),
            2
        );
        // Entirely outside.
        assert_eq!(
            days_within(d(2026, 4, 1), d(2026, 4, 3), d(2026, 3, 1), d(2026, 3, 31)),
            0
        );
        // Single day inside.
        assert_eq!(
            days_within(d(2026, 3, 10), d(2026, 3, 10), d(2026, 3, 1), d(2026, 3, 31)),
            1
        );
    }

    #[actix_web::test]
    async fn sums_work_days_leave_and_overtime_buckets() {
        let store = MemStore::default();
        {
            let mut attendance = store.attendance.lock().unwrap();
            // Two plain weekdays.
            attendance.push(record(1, d(2026, 3, 2)));
            attendance.push(record(1, d(2026, 3, 3)));
            // Weekday with the overtime flag and no end time: 3h normal.
            let mut flagged = record(1, d(2026, 3, 4));
            flagged.overtime = Some(OvertimeValue::Flag(true));
            attendance.push(flagged);
            // Sunday without clocks: 8h rest-day credit.
            let mut sunday = record(1, d(2026, 3, 8));
            sunday.check_in = None;
            sunday.check_out = None;
            attendance.push(sunday);
            // Holiday worked 08:00-12:00: 4h holiday bucket.
            attendance.push(record_with_window(1, d(2026, 3, 10)));

            store.holidays.lock().unwrap().push(d(2026, 3, 10));

            store.leaves.lock().unwrap().push(LeaveRequest {
                id: 1,
                employee_id: 1,
                leave_type: LeaveType::Paid,
                status: ApprovalStatus::Approved,
                start_date: d(2026, 3, 30),
                end_date: d(2026, 4, 2),
            });
        }

        let summary = summarize(&store, 1, 3, 2026).await.unwrap();
        assert_eq!(summary.actual_work_days, 5);
        assert_eq!(summary.paid_leave_days, 2);
        assert_eq!(summary.effective_working_days, 7);
        assert_eq!(summary.overtime.normal, 3.0);
        assert_eq!(summary.overtime.rest_day, 8.0);
        assert_eq!(summary.overtime.holiday, 4.0);
        assert_eq!(summary.details.len(), 3);
    }

    fn record_with_window(employee_id: u64, date: NaiveDate) -> AttendanceRecord {
        AttendanceRecord {
            employee_id,
            date,
            check_in: Some("08:00".into()),
            check_out: Some("12:00".into()),
            overtime: None,
            overtime_end: None,
            overtime_out: None,
        }
    }

    #[actix_web::test]
    async fn read_failures_propagate() {
        let store = MemStore::default();
        store.fail_attendance_for.lock().unwrap().push(1);
        assert!(summarize(&store, 1, 3, 2026).await.is_err());
    }

    #[actix_web::test]
    async fn other_employees_records_are_ignored() {
        let store = MemStore::default();
        store
            .attendance
            .lock()
            .unwrap()
            .push(record(2, d(2026, 3, 2)));
        let summary = summarize(&store, 1, 3, 2026).await.unwrap();
        assert_eq!(summary.actual_work_days, 0);
        assert_eq!(summary.effective_working_days, 0);
    }
}

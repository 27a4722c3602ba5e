//! Attendance analytics: classification, work hours, ISO weeks and the report pass.
//!
//! Everything here is pure and total: malformed rows degrade to zero hours or a
//! `Missing` status instead of failing the whole month.
//!
//! # Example
//!
//! ```
//! use worktime_dashboard::analytics::{analyze, calc_work_hours};
//!
//! assert_eq!(calc_work_hours("09:00", "18:00"), 8.0);
//! let report = analyze(&[]);
//! assert_eq!(report.total_employees(), 0);
//! ```

mod classify;
mod hours;
mod report;
mod week;

#[cfg(test)]
mod tests;

pub use classify::{
    AttendanceStatus, MISSING_LABEL, NORMAL_LABEL, StatusKind, UNEXCUSED_ABSENCE, WORKED_REMARKS,
    classify_attendance,
};
pub use hours::{BREAK_MINUTES, calc_work_hours};
pub use report::{
    DailyAggregate, DepartmentAggregate, OvertimeEntry, Report, WEEKEND_LABELS, WEEKLY_HOURS_LIMIT, analyze,
    is_weekend_label,
};
pub use week::{iso_week_number, parse_record_date, week_of};

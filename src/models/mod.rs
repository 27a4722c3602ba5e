//! Data models for work-time rows and report periods.

pub mod period;
pub mod work_time;

pub use period::ReportPeriod;
pub use work_time::{AttendanceRecord, DetailRecord, TimedRecord, UNASSIGNED_DEPARTMENT};

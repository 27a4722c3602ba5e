//! Attendance status classification.

use serde::{Deserialize, Serialize};

use crate::models::AttendanceRecord;

/// Remark written for an unexcused absence.
pub const UNEXCUSED_ABSENCE: &str = "결근(무단결근)";

/// Remarks that still count as a worked day (normal, early leave, late arrival).
pub const WORKED_REMARKS: [&str; 3] = ["정상", "조퇴", "지각"];

/// Label for a clean, fully clocked day.
pub const NORMAL_LABEL: &str = "정상";

/// Label for a day with a missing clock-in or clock-out.
pub const MISSING_LABEL: &str = "미체크";

/// Status kind of one attendance record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusKind {
    Normal,
    Missing,
    Absent,
    OffDuty,
}

/// Classified status with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceStatus {
    pub kind: StatusKind,
    pub label: String,
}

impl AttendanceStatus {
    fn new(kind: StatusKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
        }
    }
}

/// Classify one record by its remark and clock times.
///
/// Order matters:
/// 1. no remark: normal when both times are present, otherwise missing
/// 2. the unexcused-absence marker: absent
/// 3. a worked remark (normal / early leave / late): normal
/// 4. anything else (leave, holiday, ...): off duty
pub fn classify_attendance(record: &AttendanceRecord) -> AttendanceStatus {
    let remark = record.remark.trim();

    if remark.is_empty() {
        return if !record.clock_in.is_empty() && !record.clock_out.is_empty() {
            AttendanceStatus::new(StatusKind::Normal, NORMAL_LABEL)
        } else {
            AttendanceStatus::new(StatusKind::Missing, MISSING_LABEL)
        };
    }

    if remark == UNEXCUSED_ABSENCE {
        return AttendanceStatus::new(StatusKind::Absent, remark);
    }

    if WORKED_REMARKS.contains(&remark) {
        return AttendanceStatus::new(StatusKind::Normal, remark);
    }

    AttendanceStatus::new(StatusKind::OffDuty, remark)
}

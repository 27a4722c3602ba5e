//! Raw work-time rows as stored in the HR warehouse table.

use sea_orm::FromQueryResult;
use serde::{Deserialize, Deserializer, Serialize};

/// Department name used when a row carries no department.
pub const UNASSIGNED_DEPARTMENT: &str = "미지정";

/// One employee's attendance for one calendar day.
///
/// Field names on the wire match the warehouse columns (`ORGAID`, `EMPNUM`, ...).
/// Missing or null string columns decode to an empty string, which is also how
/// an absent clock time is represented.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromQueryResult)]
pub struct AttendanceRecord {
    /// Department code.
    #[serde(rename = "ORGAID", default, deserialize_with = "null_as_empty")]
    pub department_code: String,
    /// Department name.
    #[serde(rename = "ORGTXT", default, deserialize_with = "null_as_empty")]
    pub department_name: String,
    /// Employee number.
    #[serde(rename = "EMPNUM", default, deserialize_with = "null_as_empty")]
    pub employee_id: String,
    /// Employee display name.
    #[serde(rename = "NAMEKO", default, deserialize_with = "null_as_empty")]
    pub employee_name: String,
    /// Job title.
    #[serde(rename = "TITEXT", default, deserialize_with = "null_as_empty")]
    pub title: String,
    /// Rank / grade.
    #[serde(rename = "LETEXT", default, deserialize_with = "null_as_empty")]
    pub rank: String,
    /// Calendar day, `YYYY-MM-DD`.
    #[serde(rename = "TMDATE", default, deserialize_with = "null_as_empty")]
    pub date: String,
    /// Short weekday label (월..일).
    #[serde(rename = "WEEKTX", default, deserialize_with = "null_as_empty")]
    pub weekday: String,
    /// Shift type label.
    #[serde(rename = "WKSCTX", default, deserialize_with = "null_as_empty")]
    pub shift_type: String,
    /// Clock-in time, `HH:MM` or empty.
    #[serde(rename = "BETIME", default, deserialize_with = "null_as_empty")]
    pub clock_in: String,
    /// Clock-out time, `HH:MM` or empty.
    #[serde(rename = "EDTIME", default, deserialize_with = "null_as_empty")]
    pub clock_out: String,
    /// Free-text remark (leave type, absence marker, ...).
    #[serde(rename = "RETEXT", default, deserialize_with = "null_as_empty")]
    pub remark: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl AttendanceRecord {
    /// Department name with the unassigned fallback applied.
    pub fn department_or_unassigned(&self) -> &str {
        if self.department_name.is_empty() {
            UNASSIGNED_DEPARTMENT
        } else {
            &self.department_name
        }
    }

    /// Key used for explanation notes: `<employee>-<date>`.
    pub fn note_key(&self) -> String {
        format!("{}-{}", self.employee_id, self.date)
    }

    /// True when neither clock-in nor clock-out was recorded.
    pub fn has_no_clock_times(&self) -> bool {
        self.clock_in.is_empty() && self.clock_out.is_empty()
    }
}

/// A record annotated with its computed work hours.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimedRecord {
    #[serde(flatten)]
    pub record: AttendanceRecord,
    pub hours: f64,
}

/// A record annotated with its computed work hours and status label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailRecord {
    #[serde(flatten)]
    pub record: AttendanceRecord,
    pub hours: f64,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_warehouse_row() {
        let json = r#"{
            "ORGAID": "D100", "ORGTXT": "생산팀", "EMPNUM": "102001", "NAMEKO": "김철수",
            "TITEXT": "팀원", "LETEXT": "사원", "TMDATE": "2026-01-05", "WEEKTX": "월",
            "WKSCTX": "주간", "BETIME": "08:55", "EDTIME": null
        }"#;

        let record: AttendanceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.employee_id, "102001");
        assert_eq!(record.weekday, "월");
        assert_eq!(record.clock_in, "08:55");
        assert_eq!(record.clock_out, "");
        assert_eq!(record.remark, "");
    }

    #[test]
    fn test_department_fallback() {
        let mut record = AttendanceRecord::default();
        assert_eq!(record.department_or_unassigned(), UNASSIGNED_DEPARTMENT);

        record.department_name = "영업팀".to_string();
        assert_eq!(record.department_or_unassigned(), "영업팀");
    }

    #[test]
    fn test_note_key() {
        let record = AttendanceRecord {
            employee_id: "102001".to_string(),
            date: "2026-01-05".to_string(),
            ..Default::default()
        };
        assert_eq!(record.note_key(), "102001-2026-01-05");
    }
}

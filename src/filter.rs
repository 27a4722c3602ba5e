//! Search and department filters applied before the report pass.

use std::collections::BTreeSet;

use crate::models::AttendanceRecord;

/// Dashboard filter: free-text search plus an optional department.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    /// Case-insensitive substring matched against employee or department name.
    pub search: String,
    /// Exact department name to keep.
    pub department: Option<String>,
}

impl RecordFilter {
    pub fn new(search: Option<String>, department: Option<String>) -> Self {
        Self {
            search: search.unwrap_or_default(),
            department: department.filter(|d| !d.is_empty()),
        }
    }

    /// True when the filter would keep every row.
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty() && self.department.is_none()
    }

    /// Whether one row passes the filter.
    pub fn matches(&self, record: &AttendanceRecord) -> bool {
        if !self.search.trim().is_empty() {
            let needle = self.search.to_lowercase();
            let hit = record.employee_name.to_lowercase().contains(&needle)
                || record.department_name.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }

        match &self.department {
            Some(department) => record.department_name == *department,
            None => true,
        }
    }

    /// Rows passing the filter, cloned in input order.
    pub fn apply(&self, records: &[AttendanceRecord]) -> Vec<AttendanceRecord> {
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

/// Sorted distinct department names, blank names shown as unassigned.
pub fn department_list(records: &[AttendanceRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.department_or_unassigned().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UNASSIGNED_DEPARTMENT;

    fn record(name: &str, dept: &str) -> AttendanceRecord {
        AttendanceRecord {
            employee_name: name.to_string(),
            department_name: dept.to_string(),
            ..Default::default()
        }
    }

    fn sample() -> Vec<AttendanceRecord> {
        vec![
            record("Kim Minji", "Production"),
            record("Lee Jun", "Sales"),
            record("Park Sora", "production line 2"),
            record("Choi Yuna", ""),
        ]
    }

    #[test]
    fn test_empty_filter_keeps_all() {
        let filter = RecordFilter::new(Some("   ".to_string()), None);
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&sample()).len(), 4);
    }

    #[test]
    fn test_search_is_case_insensitive_on_name_or_department() {
        let filter = RecordFilter::new(Some("PRODUCTION".to_string()), None);
        let names: Vec<String> = filter.apply(&sample()).into_iter().map(|r| r.employee_name).collect();
        assert_eq!(names, vec!["Kim Minji", "Park Sora"]);

        let filter = RecordFilter::new(Some("jun".to_string()), None);
        assert_eq!(filter.apply(&sample()).len(), 1);
    }

    #[test]
    fn test_department_is_exact_match() {
        let filter = RecordFilter::new(None, Some("Production".to_string()));
        let rows = filter.apply(&sample());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].employee_name, "Kim Minji");
    }

    #[test]
    fn test_search_and_department_combined() {
        let filter = RecordFilter::new(Some("kim".to_string()), Some("Sales".to_string()));
        assert!(filter.apply(&sample()).is_empty());
    }

    #[test]
    fn test_department_list_sorted_with_fallback() {
        let list = department_list(&sample());
        assert_eq!(
            list,
            vec![
                "Production".to_string(),
                "Sales".to_string(),
                "production line 2".to_string(),
                UNASSIGNED_DEPARTMENT.to_string(),
            ]
        );
    }
}

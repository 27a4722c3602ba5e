//! Dashboard summary: KPI block for one month.

use crate::analytics::Report;
use crate::filter::RecordFilter;
use crate::models::ReportPeriod;

use super::components::{hours, panel_header};

/// Render the KPI summary.
pub fn show(report: &Report, period: ReportPeriod, filter: &RecordFilter) -> String {
    let mut out = vec![panel_header(&format!("Attendance Dashboard {period}"))];

    if !filter.is_empty() {
        let mut scope = Vec::new();
        if !filter.search.trim().is_empty() {
            scope.push(format!("search \"{}\"", filter.search.trim()));
        }
        if let Some(dept) = &filter.department {
            scope.push(format!("department {dept}"));
        }
        out.push(format!("Filter: {}", scope.join(", ")));
    }

    let average = if report.working == 0 {
        0.0
    } else {
        report.total_work_hours / f64::from(report.working)
    };

    out.push(String::new());
    out.push(format!("{:<20}{}", "Employees", report.total_employees()));
    out.push(format!("{:<20}{}", "Working days", report.working));
    out.push(format!("{:<20}{}", "Off duty", report.off_duty));
    out.push(format!("{:<20}{}", "Missing checks", report.missing));
    out.push(format!("{:<20}{}", "Unexcused absences", report.absent));
    out.push(format!("{:<20}{}", "Total work hours", hours(report.total_work_hours)));
    out.push(format!("{:<20}{}", "Avg hours / day", hours(average)));
    out.push(format!("{:<20}{}", "Weekend work", report.weekend_work));
    out.push(format!("{:<20}{}", "Over 50h weeks", report.long_work_list.len()));

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::analyze;
    use crate::models::AttendanceRecord;

    #[test]
    fn test_summary_lines() {
        let report = analyze(&[AttendanceRecord {
            employee_id: "1".to_string(),
            date: "2026-01-05".to_string(),
            weekday: "월".to_string(),
            clock_in: "09:00".to_string(),
            clock_out: "18:00".to_string(),
            ..Default::default()
        }]);
        let filter = RecordFilter::new(Some("kim".to_string()), None);
        let text = show(&report, ReportPeriod::new(2026, 1).unwrap(), &filter);

        assert!(text.starts_with("Attendance Dashboard 2026-01\n"));
        assert!(text.contains("Filter: search \"kim\""));
        assert!(text.contains("Employees           1"));
        assert!(text.contains("Total work hours    8.0"));
        assert!(text.contains("Over 50h weeks      0"));
    }
}

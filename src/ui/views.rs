//! Table views of the report: daily, departments, flagged lists and detail.

use crate::analytics::Report;
use crate::models::AttendanceRecord;
use crate::notes::ExplanationNotes;

use super::components::{TextTable, hours, panel_header};

fn with_header(title: &str, table: &TextTable, empty: &str) -> String {
    if table.is_empty() {
        format!("{}\n{empty}", panel_header(title))
    } else {
        format!("{}\n{}", panel_header(title), table.render())
    }
}

/// Daily counts, newest date first.
pub fn daily(report: &Report) -> String {
    let mut table =
        TextTable::new(&["Date", "Day", "Total", "Working", "Off", "Missing", "Absent"]).right(&[2, 3, 4, 5, 6]);
    for day in report.daily_rows_desc() {
        let label = if day.is_weekend {
            format!("{}*", day.weekday)
        } else {
            day.weekday.clone()
        };
        table.push_row(vec![
            day.date.clone(),
            label,
            day.total.to_string(),
            day.working.to_string(),
            day.off_duty.to_string(),
            day.missing.to_string(),
            day.absent.to_string(),
        ]);
    }
    with_header("Daily", &table, "No records.")
}

/// Department summary over weekdays, largest first.
pub fn departments(report: &Report) -> String {
    let mut table = TextTable::new(&["Department", "Staff", "Total", "Normal", "Missing", "Absent", "Hours", "Avg"])
        .right(&[1, 2, 3, 4, 5, 6, 7]);
    for dept in report.department_rows_by_total() {
        table.push_row(vec![
            dept.name.clone(),
            dept.employee_count().to_string(),
            dept.total.to_string(),
            dept.normal.to_string(),
            dept.missing.to_string(),
            dept.absent.to_string(),
            hours(dept.work_sum),
            hours(dept.average_hours()),
        ]);
    }
    with_header("Departments (weekdays)", &table, "No weekday records.")
}

fn flagged_table(rows: &[AttendanceRecord], notes: &ExplanationNotes) -> TextTable {
    let mut table = TextTable::new(&["Date", "Day", "Department", "Emp No", "Name", "In", "Out", "Note"]);
    for row in rows {
        table.push_row(vec![
            row.date.clone(),
            row.weekday.clone(),
            row.department_name.clone(),
            row.employee_id.clone(),
            row.employee_name.clone(),
            row.clock_in.clone(),
            row.clock_out.clone(),
            notes.get(row).unwrap_or("-").to_string(),
        ]);
    }
    table
}

/// Rows with a missing clock-in or clock-out.
pub fn missing(report: &Report, notes: &ExplanationNotes) -> String {
    with_header("Missing checks", &flagged_table(&report.missing_list, notes), "No missing checks.")
}

/// Unexcused absences.
pub fn absent(report: &Report, notes: &ExplanationNotes) -> String {
    with_header("Unexcused absences", &flagged_table(&report.absent_list, notes), "No unexcused absences.")
}

/// Employee-weeks over the weekly limit.
pub fn overtime(report: &Report) -> String {
    let mut table = TextTable::new(&["Emp No", "Name", "Department", "Week", "Hours"]).right(&[4]);
    for entry in &report.long_work_list {
        table.push_row(vec![
            entry.employee_id.clone(),
            entry.name.clone(),
            entry.department.clone(),
            entry.week.clone(),
            hours(entry.hours),
        ]);
    }
    with_header("Weeks over 50 hours", &table, "No employee-week over the limit.")
}

/// Normal days worked on a weekend.
pub fn weekend(report: &Report) -> String {
    let mut table = TextTable::new(&["Date", "Day", "Department", "Emp No", "Name", "In", "Out", "Hours"]).right(&[7]);
    for timed in &report.weekend_list {
        let row = &timed.record;
        table.push_row(vec![
            row.date.clone(),
            row.weekday.clone(),
            row.department_name.clone(),
            row.employee_id.clone(),
            row.employee_name.clone(),
            row.clock_in.clone(),
            row.clock_out.clone(),
            hours(timed.hours),
        ]);
    }
    with_header("Weekend work", &table, "No weekend work.")
}

/// Every row with its hours and status.
pub fn detail(report: &Report) -> String {
    let mut table =
        TextTable::new(&["Date", "Day", "Department", "Emp No", "Name", "Shift", "In", "Out", "Hours", "Status"])
            .right(&[8]);
    for detail in &report.individual_records {
        let row = &detail.record;
        table.push_row(vec![
            row.date.clone(),
            row.weekday.clone(),
            row.department_name.clone(),
            row.employee_id.clone(),
            row.employee_name.clone(),
            row.shift_type.clone(),
            row.clock_in.clone(),
            row.clock_out.clone(),
            hours(detail.hours),
            detail.status.clone(),
        ]);
    }
    with_header("Detail", &table, "No records.")
}

/// Sorted department names, one per line.
pub fn department_list(names: &[String]) -> String {
    if names.is_empty() {
        return format!("{}\nNo departments.", panel_header("Departments"));
    }
    format!("{}\n{}", panel_header("Departments"), names.join("\n"))
}

//! Report pass tests.

use super::*;
use crate::models::AttendanceRecord;

const WEEK_OF_2026_01_05: [(&str, &str); 7] = [
    ("2026-01-05", "월"),
    ("2026-01-06", "화"),
    ("2026-01-07", "수"),
    ("2026-01-08", "목"),
    ("2026-01-09", "금"),
    ("2026-01-10", "토"),
    ("2026-01-11", "일"),
];

fn row(emp: &str, dept: &str, date: &str, weekday: &str, clock_in: &str, clock_out: &str, remark: &str) -> AttendanceRecord {
    AttendanceRecord {
        department_code: format!("C-{dept}"),
        department_name: dept.to_string(),
        employee_id: emp.to_string(),
        employee_name: format!("직원{emp}"),
        date: date.to_string(),
        weekday: weekday.to_string(),
        clock_in: clock_in.to_string(),
        clock_out: clock_out.to_string(),
        remark: remark.to_string(),
        ..Default::default()
    }
}

/// Seven days for one employee: six 7.0h days plus a last day ending at `last_out`.
fn full_week(emp: &str, last_out: &str) -> Vec<AttendanceRecord> {
    WEEK_OF_2026_01_05
        .iter()
        .enumerate()
        .map(|(i, (date, weekday))| {
            let out = if i == 6 { last_out } else { "17:00" };
            row(emp, "생산팀", date, weekday, "09:00", out, "")
        })
        .collect()
}

fn mixed_batch() -> Vec<AttendanceRecord> {
    vec![
        row("1", "생산팀", "2026-01-05", "월", "09:00", "18:00", ""),
        row("2", "생산팀", "2026-01-05", "월", "09:00", "", ""),
        row("3", "영업팀", "2026-01-05", "월", "", "", UNEXCUSED_ABSENCE),
        row("4", "", "2026-01-05", "월", "", "", "연차"),
        row("1", "생산팀", "2026-01-10", "토", "10:00", "15:00", ""),
        row("2", "생산팀", "2026-01-10", "토", "", "", ""),
        row("3", "영업팀", "2026-01-11", "일", "", "", "휴일"),
        row("4", "", "2026-01-06", "화", "08:30", "17:30", "지각"),
    ]
}

#[test]
fn test_empty_input() {
    let report = analyze(&[]);
    assert_eq!(report.total_employees(), 0);
    assert_eq!(report.working, 0);
    assert_eq!(report.off_duty, 0);
    assert_eq!(report.missing, 0);
    assert_eq!(report.absent, 0);
    assert_eq!(report.weekend_work, 0);
    assert_eq!(report.total_work_hours, 0.0);
    assert!(report.missing_list.is_empty());
    assert!(report.absent_list.is_empty());
    assert!(report.weekend_list.is_empty());
    assert!(report.long_work_list.is_empty());
    assert!(report.individual_records.is_empty());
    assert!(report.daily.is_empty());
    assert!(report.dept.is_empty());
    assert_eq!(report, Report::default());
}

#[test]
fn test_overall_counts() {
    let report = analyze(&mixed_batch());

    assert_eq!(report.total_employees(), 4);
    assert_eq!(report.working, 3);
    assert_eq!(report.missing, 2);
    assert_eq!(report.absent, 1);
    assert_eq!(report.off_duty, 2);
    // 8.0 + 4.0 + 8.0
    assert_eq!(report.total_work_hours, 20.0);

    assert_eq!(report.missing_list.len(), 2);
    assert_eq!(report.missing_list[0].employee_id, "2");
    assert_eq!(report.absent_list.len(), 1);
    assert_eq!(report.absent_list[0].employee_id, "3");
}

#[test]
fn test_weekend_list_only_normal_rows() {
    let report = analyze(&mixed_batch());

    assert_eq!(report.weekend_work, 1);
    assert_eq!(report.weekend_list.len(), 1);
    assert_eq!(report.weekend_list[0].record.employee_id, "1");
    assert_eq!(report.weekend_list[0].hours, 4.0);
}

#[test]
fn test_daily_totals_cover_every_row() {
    let records = mixed_batch();
    let report = analyze(&records);

    let total: u32 = report.daily.values().map(|d| d.total).sum();
    assert_eq!(total as usize, records.len());

    let monday = &report.daily["2026-01-05"];
    assert_eq!(monday.weekday, "월");
    assert!(!monday.is_weekend);
    assert_eq!((monday.total, monday.working, monday.missing, monday.absent, monday.off_duty), (4, 1, 1, 1, 1));

    let saturday = &report.daily["2026-01-10"];
    assert!(saturday.is_weekend);
    assert_eq!((saturday.total, saturday.working, saturday.missing), (2, 1, 1));
}

#[test]
fn test_department_totals_weekdays_only() {
    let records = mixed_batch();
    let report = analyze(&records);

    let weekday_rows = records.iter().filter(|r| !is_weekend_label(&r.weekday)).count();
    let total: u32 = report.dept.values().map(|d| d.total).sum();
    assert_eq!(total as usize, weekday_rows);

    let production = &report.dept["생산팀"];
    assert_eq!((production.total, production.normal, production.missing), (2, 1, 1));
    assert_eq!(production.work_sum, 8.0);
    assert_eq!(production.employee_count(), 2);
    assert_eq!(production.average_hours(), 8.0);

    let unassigned = &report.dept[crate::models::UNASSIGNED_DEPARTMENT];
    assert_eq!((unassigned.total, unassigned.normal), (2, 1));
    assert_eq!(unassigned.work_sum, 8.0);

    let sales = &report.dept["영업팀"];
    assert_eq!((sales.total, sales.absent), (1, 1));
    assert_eq!(sales.average_hours(), 0.0);
}

#[test]
fn test_malformed_weekday_counts_as_weekday() {
    let records = vec![row("1", "생산팀", "2026-01-10", "Sat", "09:00", "18:00", "")];
    let report = analyze(&records);

    assert_eq!(report.weekend_work, 0);
    assert!(!report.daily["2026-01-10"].is_weekend);
    assert_eq!(report.dept["생산팀"].total, 1);
}

#[test]
fn test_individual_records_annotated() {
    let report = analyze(&mixed_batch());

    assert_eq!(report.individual_records.len(), 8);
    let first = &report.individual_records[0];
    assert_eq!(first.hours, 8.0);
    assert_eq!(first.status, NORMAL_LABEL);

    let second = &report.individual_records[1];
    assert_eq!(second.hours, 0.0);
    assert_eq!(second.status, MISSING_LABEL);

    let leave = &report.individual_records[3];
    assert_eq!(leave.status, "연차");
}

#[test]
fn test_weekly_hours_at_limit_not_flagged() {
    // 6 x 7.0 + 8.0 = 50.0
    let report = analyze(&full_week("7", "18:00"));
    assert!(report.long_work_list.is_empty());
}

#[test]
fn test_weekly_hours_over_limit_flagged_once() {
    // 6 x 7.0 + 8.1 = 50.1
    let report = analyze(&full_week("7", "18:06"));

    assert_eq!(report.long_work_list.len(), 1);
    let entry = &report.long_work_list[0];
    assert_eq!(entry.employee_id, "7");
    assert_eq!(entry.name, "직원7");
    assert_eq!(entry.department, "생산팀");
    assert_eq!(entry.week_number, 2);
    assert_eq!(entry.week, "2주차");
    assert!(entry.hours > WEEKLY_HOURS_LIMIT);
    assert!((entry.hours - 50.1).abs() < 1e-9);
}

#[test]
fn test_overtime_is_per_employee_week() {
    let mut records = full_week("7", "18:06");
    records.extend(full_week("8", "18:00"));
    // Same employee, the following week: only 8 hours.
    records.push(row("7", "생산팀", "2026-01-12", "월", "09:00", "18:00", ""));

    let report = analyze(&records);
    assert_eq!(report.long_work_list.len(), 1);
    assert_eq!(report.long_work_list[0].employee_id, "7");
}

#[test]
fn test_overtime_ignores_non_normal_hours() {
    let mut records = full_week("7", "18:06");
    // Clock times on an off-duty day must not count.
    records[0].remark = "연차".to_string();

    let report = analyze(&records);
    assert!(report.long_work_list.is_empty());
}

#[test]
fn test_overtime_display_fields_from_first_row_of_week() {
    let mut records = full_week("7", "18:06");
    for record in records.iter_mut().skip(3) {
        record.department_name = "물류팀".to_string();
        record.employee_name = "이동".to_string();
    }

    let report = analyze(&records);
    assert_eq!(report.long_work_list.len(), 1);
    assert_eq!(report.long_work_list[0].department, "생산팀");
    assert_eq!(report.long_work_list[0].name, "직원7");
}

#[test]
fn test_unparseable_date_has_no_week_bucket() {
    let mut records = full_week("7", "18:06");
    records[6].date = "not-a-date".to_string();

    let report = analyze(&records);
    assert!(report.long_work_list.is_empty());
    assert_eq!(report.daily["not-a-date"].total, 1);
    assert_eq!(report.working, 7);
}

#[test]
fn test_sorted_views() {
    let report = analyze(&mixed_batch());

    let dates: Vec<&str> = report.daily_rows_desc().iter().map(|d| d.date.as_str()).collect();
    assert_eq!(dates, vec!["2026-01-11", "2026-01-10", "2026-01-06", "2026-01-05"]);

    let depts = report.department_rows_by_total();
    assert_eq!(depts[0].total, 2);
    assert_eq!(depts.last().map(|d| d.name.as_str()), Some("영업팀"));
}

#[test]
fn test_analyze_is_idempotent() {
    let mut records = mixed_batch();
    records.extend(full_week("7", "18:06"));

    let first = analyze(&records);
    let second = analyze(&records);
    assert_eq!(first, second);
}

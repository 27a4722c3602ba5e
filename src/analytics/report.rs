//! Monthly attendance report: one pass over the rows builds every view.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use serde::Serialize;

use super::classify::{StatusKind, classify_attendance};
use super::hours::calc_work_hours;
use super::week::week_of;
use crate::models::{AttendanceRecord, DetailRecord, TimedRecord};

/// Weekday labels that mark a weekend record.
pub const WEEKEND_LABELS: [&str; 2] = ["토", "일"];

/// Weekly normal hours above which an employee-week is flagged.
pub const WEEKLY_HOURS_LIMIT: f64 = 50.0;

/// True when the weekday label is a weekend label. The date is not consulted.
pub fn is_weekend_label(weekday: &str) -> bool {
    WEEKEND_LABELS.contains(&weekday)
}

/// Per-date counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyAggregate {
    pub date: String,
    pub weekday: String,
    pub is_weekend: bool,
    pub total: u32,
    pub working: u32,
    pub off_duty: u32,
    pub missing: u32,
    pub absent: u32,
}

impl DailyAggregate {
    fn new(record: &AttendanceRecord, is_weekend: bool) -> Self {
        Self {
            date: record.date.clone(),
            weekday: record.weekday.clone(),
            is_weekend,
            total: 0,
            working: 0,
            off_duty: 0,
            missing: 0,
            absent: 0,
        }
    }

    fn add(&mut self, kind: StatusKind) {
        self.total += 1;
        match kind {
            StatusKind::Normal => self.working += 1,
            StatusKind::OffDuty => self.off_duty += 1,
            StatusKind::Missing => self.missing += 1,
            StatusKind::Absent => self.absent += 1,
        }
    }
}

/// Per-department counts over weekday records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentAggregate {
    pub name: String,
    pub total: u32,
    pub normal: u32,
    pub missing: u32,
    pub absent: u32,
    /// Cumulative hours of normal records.
    pub work_sum: f64,
    pub employees: BTreeSet<String>,
}

impl DepartmentAggregate {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            total: 0,
            normal: 0,
            missing: 0,
            absent: 0,
            work_sum: 0.0,
            employees: BTreeSet::new(),
        }
    }

    fn add(&mut self, employee_id: &str, kind: StatusKind, hours: f64) {
        self.total += 1;
        if !self.employees.contains(employee_id) {
            self.employees.insert(employee_id.to_string());
        }
        match kind {
            StatusKind::Normal => {
                self.normal += 1;
                self.work_sum += hours;
            }
            StatusKind::Missing => self.missing += 1,
            StatusKind::Absent => self.absent += 1,
            StatusKind::OffDuty => {}
        }
    }

    /// Number of distinct employees seen in this department.
    pub fn employee_count(&self) -> usize {
        self.employees.len()
    }

    /// Average hours per normal record, 0 when there are none.
    pub fn average_hours(&self) -> f64 {
        if self.normal == 0 {
            0.0
        } else {
            self.work_sum / f64::from(self.normal)
        }
    }
}

/// One employee-week whose normal hours exceed the weekly limit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OvertimeEntry {
    pub employee_id: String,
    pub name: String,
    pub department: String,
    /// Display label, e.g. `3주차`.
    pub week: String,
    pub week_number: u32,
    pub hours: f64,
}

/// Everything the dashboard shows for one batch of records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    pub total_emp: BTreeSet<String>,
    pub working: u32,
    pub off_duty: u32,
    pub missing: u32,
    pub absent: u32,
    pub total_work_hours: f64,
    pub weekend_work: u32,

    pub missing_list: Vec<AttendanceRecord>,
    pub absent_list: Vec<AttendanceRecord>,
    pub weekend_list: Vec<TimedRecord>,
    pub long_work_list: Vec<OvertimeEntry>,
    pub individual_records: Vec<DetailRecord>,

    pub daily: BTreeMap<String, DailyAggregate>,
    pub dept: BTreeMap<String, DepartmentAggregate>,
}

impl Report {
    /// Number of distinct employees in the batch.
    pub fn total_employees(&self) -> usize {
        self.total_emp.len()
    }

    /// Daily rows, newest date first.
    pub fn daily_rows_desc(&self) -> Vec<&DailyAggregate> {
        self.daily.values().rev().collect()
    }

    /// Department rows, largest total first. Ties keep name order.
    pub fn department_rows_by_total(&self) -> Vec<&DepartmentAggregate> {
        let mut rows: Vec<&DepartmentAggregate> = self.dept.values().collect();
        rows.sort_by(|a, b| b.total.cmp(&a.total));
        rows
    }
}

type WeekKey = (String, u32);

/// Build the report for a batch of records.
///
/// The first pass classifies every row and feeds all aggregates, including the
/// per employee-week hour buckets. The second pass walks the rows again and
/// emits one overtime entry per employee-week over the limit; the name and
/// department shown are those of the first row met for that employee-week.
pub fn analyze(records: &[AttendanceRecord]) -> Report {
    let mut report = Report::default();
    let mut weekly_work: HashMap<WeekKey, f64> = HashMap::new();

    for row in records {
        if !report.total_emp.contains(&row.employee_id) {
            report.total_emp.insert(row.employee_id.clone());
        }

        let is_weekend = is_weekend_label(&row.weekday);
        let status = classify_attendance(row);
        let kind = status.kind;
        let hours = calc_work_hours(&row.clock_in, &row.clock_out);

        report.individual_records.push(DetailRecord {
            record: row.clone(),
            hours,
            status: status.label,
        });

        match kind {
            StatusKind::Normal => {
                report.working += 1;
                report.total_work_hours += hours;
                // Weekend hours count toward the weekly total too.
                if let Some(week) = week_of(&row.date) {
                    *weekly_work.entry((row.employee_id.clone(), week)).or_insert(0.0) += hours;
                }
            }
            StatusKind::OffDuty => report.off_duty += 1,
            StatusKind::Missing => {
                report.missing += 1;
                report.missing_list.push(row.clone());
            }
            StatusKind::Absent => {
                report.absent += 1;
                report.absent_list.push(row.clone());
            }
        }

        if is_weekend && kind == StatusKind::Normal {
            report.weekend_work += 1;
            report.weekend_list.push(TimedRecord {
                record: row.clone(),
                hours,
            });
        }

        report
            .daily
            .entry(row.date.clone())
            .or_insert_with(|| DailyAggregate::new(row, is_weekend))
            .add(kind);

        if !is_weekend {
            let dept = row.department_or_unassigned();
            report
                .dept
                .entry(dept.to_string())
                .or_insert_with(|| DepartmentAggregate::new(dept))
                .add(&row.employee_id, kind, hours);
        }
    }

    let mut processed: HashSet<WeekKey> = HashSet::new();
    for row in records {
        let Some(week_number) = week_of(&row.date) else {
            continue;
        };
        let key = (row.employee_id.clone(), week_number);
        if processed.contains(&key) {
            continue;
        }

        let hours = weekly_work.get(&key).copied().unwrap_or(0.0);
        if hours > WEEKLY_HOURS_LIMIT {
            report.long_work_list.push(OvertimeEntry {
                employee_id: row.employee_id.clone(),
                name: row.employee_name.clone(),
                department: row.department_name.clone(),
                week: format!("{week_number}주차"),
                week_number,
                hours,
            });
            processed.insert(key);
        }
    }

    report
}

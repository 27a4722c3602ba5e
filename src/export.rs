//! CSV and Excel export of the monthly report.

use crate::analytics::Report;
use crate::error::{AppError, Result};
use crate::models::{AttendanceRecord, ReportPeriod};
use crate::notes::ExplanationNotes;
use chrono::Local;
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, Worksheet, XlsxError};
use std::io::Write;
use std::path::Path;

/// UTF-8 byte order mark so spreadsheet tools pick the right encoding.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

const EXPLANATION_HEADERS: [&str; 11] = [
    "날짜",
    "요일",
    "부서",
    "사번",
    "이름",
    "직책",
    "출근시간",
    "퇴근시간",
    "누락유형",
    "소명상태",
    "소명내용",
];

/// Write missing then absent rows, each joined with its explanation note.
///
/// Returns the number of data rows written.
pub fn write_explanation_csv<W: Write>(mut writer: W, report: &Report, notes: &ExplanationNotes) -> Result<usize> {
    ensure_explanation_rows(report)?;

    writer.write_all(UTF8_BOM)?;
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(EXPLANATION_HEADERS)?;

    let mut rows = 0;
    for row in report.missing_list.iter().chain(&report.absent_list) {
        let explanation = notes.get(row).unwrap_or("");
        wtr.write_record([
            row.date.as_str(),
            row.weekday.as_str(),
            row.department_name.as_str(),
            row.employee_id.as_str(),
            row.employee_name.as_str(),
            row.title.as_str(),
            row.clock_in.as_str(),
            row.clock_out.as_str(),
            gap_type(row),
            if explanation.is_empty() { "미작성" } else { "작성완료" },
            explanation,
        ])?;
        rows += 1;
    }

    wtr.flush()?;
    Ok(rows)
}

/// Missing-kind label: no clock times at all reads as an absence.
fn gap_type(row: &AttendanceRecord) -> &'static str {
    if row.has_no_clock_times() { "무단결근" } else { "체크누락" }
}

fn ensure_explanation_rows(report: &Report) -> Result<()> {
    if report.missing_list.is_empty() && report.absent_list.is_empty() {
        return Err(AppError::NothingToExport);
    }
    Ok(())
}

/// Export the explanation CSV to a file. No file is created when there is
/// nothing to export.
pub fn export_explanations_csv(report: &Report, notes: &ExplanationNotes, path: &Path) -> Result<usize> {
    ensure_explanation_rows(report)?;
    let file = std::fs::File::create(path)?;
    write_explanation_csv(file, report, notes)
}

/// Default explanation CSV filename: `근태소명서_<month>_<unix millis>.csv`.
pub fn explanation_csv_filename(period: ReportPeriod) -> String {
    format!("근태소명서_{period}_{ts}.csv", ts = Local::now().timestamp_millis())
}

/// Generate default filename for export.
pub fn generate_export_filename(prefix: &str, period: ReportPeriod) -> String {
    let now = Local::now();
    format!("{prefix}_{period}_{ts}.xlsx", ts = now.format("%Y%m%d_%H%M%S"))
}

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x4472C4))
        .set_font_color(Color::White)
        .set_border(FormatBorder::Thin)
}

/// Add a sheet with styled headers and column widths.
fn add_sheet<'a>(
    workbook: &'a mut Workbook,
    name: &str,
    columns: &[(&str, f64)],
) -> std::result::Result<&'a mut Worksheet, XlsxError> {
    let header_format = header_format();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(name)?;

    for (col, (header, width)) in columns.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
        worksheet.set_column_width(col as u16, *width)?;
    }
    Ok(worksheet)
}

/// Autofilter over the data and freeze the header row.
fn finish_sheet(worksheet: &mut Worksheet, rows: usize, columns: usize) -> std::result::Result<(), XlsxError> {
    if rows > 0 {
        worksheet.autofilter(0, 0, rows as u32, (columns - 1) as u16)?;
    }
    worksheet.set_freeze_panes(1, 0)?;
    Ok(())
}

const RECORD_COLUMNS: [(&str, f64); 9] = [
    ("Date", 12.0),
    ("Weekday", 8.0),
    ("Department", 25.0),
    ("Employee No", 14.0),
    ("Name", 20.0),
    ("Title", 14.0),
    ("Clock In", 10.0),
    ("Clock Out", 10.0),
    ("Remark", 20.0),
];

fn write_record_cells(worksheet: &mut Worksheet, row: u32, record: &AttendanceRecord) -> std::result::Result<(), XlsxError> {
    worksheet.write_string(row, 0, &record.date)?;
    worksheet.write_string(row, 1, &record.weekday)?;
    worksheet.write_string(row, 2, &record.department_name)?;
    worksheet.write_string(row, 3, &record.employee_id)?;
    worksheet.write_string(row, 4, &record.employee_name)?;
    worksheet.write_string(row, 5, &record.title)?;
    worksheet.write_string(row, 6, &record.clock_in)?;
    worksheet.write_string(row, 7, &record.clock_out)?;
    worksheet.write_string(row, 8, &record.remark)?;
    Ok(())
}

/// Export every dashboard view to one Excel workbook.
pub fn export_report_to_excel(report: &Report, notes: &ExplanationNotes, path: &Path) -> Result<()> {
    let mut workbook = build_report_workbook(report, notes)?;
    workbook.save(path)?;
    Ok(())
}

fn build_report_workbook(report: &Report, notes: &ExplanationNotes) -> std::result::Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let hours_format = Format::new().set_num_format("0.0");

    // Daily
    let columns = [
        ("Date", 12.0),
        ("Weekday", 8.0),
        ("Weekend", 8.0),
        ("Total", 8.0),
        ("Working", 8.0),
        ("Off Duty", 8.0),
        ("Missing", 8.0),
        ("Absent", 8.0),
    ];
    let sheet = add_sheet(&mut workbook, "Daily", &columns)?;
    let daily = report.daily_rows_desc();
    for (idx, day) in daily.iter().enumerate() {
        let row = (idx + 1) as u32;
        sheet.write_string(row, 0, &day.date)?;
        sheet.write_string(row, 1, &day.weekday)?;
        sheet.write_string(row, 2, if day.is_weekend { "Yes" } else { "No" })?;
        sheet.write_number(row, 3, day.total)?;
        sheet.write_number(row, 4, day.working)?;
        sheet.write_number(row, 5, day.off_duty)?;
        sheet.write_number(row, 6, day.missing)?;
        sheet.write_number(row, 7, day.absent)?;
    }
    finish_sheet(sheet, daily.len(), columns.len())?;

    // Departments
    let columns = [
        ("Department", 25.0),
        ("Employees", 10.0),
        ("Total", 8.0),
        ("Normal", 8.0),
        ("Missing", 8.0),
        ("Absent", 8.0),
        ("Work Hours", 12.0),
        ("Avg Hours", 10.0),
    ];
    let sheet = add_sheet(&mut workbook, "Departments", &columns)?;
    let depts = report.department_rows_by_total();
    for (idx, dept) in depts.iter().enumerate() {
        let row = (idx + 1) as u32;
        sheet.write_string(row, 0, &dept.name)?;
        sheet.write_number(row, 1, dept.employee_count() as f64)?;
        sheet.write_number(row, 2, dept.total)?;
        sheet.write_number(row, 3, dept.normal)?;
        sheet.write_number(row, 4, dept.missing)?;
        sheet.write_number(row, 5, dept.absent)?;
        sheet.write_number_with_format(row, 6, dept.work_sum, &hours_format)?;
        sheet.write_number_with_format(row, 7, dept.average_hours(), &hours_format)?;
    }
    finish_sheet(sheet, depts.len(), columns.len())?;

    // Missing / Absent with notes
    for (name, list) in [("Missing", &report.missing_list), ("Absent", &report.absent_list)] {
        let mut columns = RECORD_COLUMNS.to_vec();
        columns.push(("Explanation", 40.0));
        let sheet = add_sheet(&mut workbook, name, &columns)?;
        for (idx, record) in list.iter().enumerate() {
            let row = (idx + 1) as u32;
            write_record_cells(sheet, row, record)?;
            sheet.write_string(row, 9, notes.get(record).unwrap_or(""))?;
        }
        finish_sheet(sheet, list.len(), columns.len())?;
    }

    // Overtime
    let columns = [
        ("Employee No", 14.0),
        ("Name", 20.0),
        ("Department", 25.0),
        ("Week", 10.0),
        ("Hours", 10.0),
    ];
    let sheet = add_sheet(&mut workbook, "Overtime", &columns)?;
    for (idx, entry) in report.long_work_list.iter().enumerate() {
        let row = (idx + 1) as u32;
        sheet.write_string(row, 0, &entry.employee_id)?;
        sheet.write_string(row, 1, &entry.name)?;
        sheet.write_string(row, 2, &entry.department)?;
        sheet.write_string(row, 3, &entry.week)?;
        sheet.write_number_with_format(row, 4, entry.hours, &hours_format)?;
    }
    finish_sheet(sheet, report.long_work_list.len(), columns.len())?;

    // Weekend work
    let mut columns = RECORD_COLUMNS.to_vec();
    columns.push(("Hours", 10.0));
    let sheet = add_sheet(&mut workbook, "Weekend", &columns)?;
    for (idx, timed) in report.weekend_list.iter().enumerate() {
        let row = (idx + 1) as u32;
        write_record_cells(sheet, row, &timed.record)?;
        sheet.write_number_with_format(row, 9, timed.hours, &hours_format)?;
    }
    finish_sheet(sheet, report.weekend_list.len(), columns.len())?;

    // Detail
    let mut columns = RECORD_COLUMNS.to_vec();
    columns.push(("Hours", 10.0));
    columns.push(("Status", 14.0));
    let sheet = add_sheet(&mut workbook, "Detail", &columns)?;
    for (idx, detail) in report.individual_records.iter().enumerate() {
        let row = (idx + 1) as u32;
        write_record_cells(sheet, row, &detail.record)?;
        sheet.write_number_with_format(row, 9, detail.hours, &hours_format)?;
        sheet.write_string(row, 10, &detail.status)?;
    }
    finish_sheet(sheet, report.individual_records.len(), columns.len())?;

    Ok(workbook)
}

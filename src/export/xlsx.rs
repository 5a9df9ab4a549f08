// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::excel_date::{TIMESTAMP_NUM_FORMAT, to_excel_serial};
use crate::export::model::{Report, ReportRow};
use crate::export::notify_export_success;
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

const HEADER_ROW: u32 = 5;
const MAX_COL_WIDTH: usize = 50;

/// Report as XLSX: bold preamble, styled header, banded rows, status totals
/// below the table and auto column widths.
pub(crate) fn export_xlsx(report: &Report, path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(if report.with_record {
            "Event Report"
        } else {
            "Record Report"
        })
        .map_err(to_app_error)?;

    // ---------------------------
    // Preamble
    // ---------------------------
    let title_format = Format::new().set_bold().set_font_size(12);

    let mut preamble = vec![format!("{} - {}", report.kind, report.title)];
    preamble.extend(report.meta.iter().map(|(k, v)| format!("{k}: {v}")));
    preamble.push(format!("Generated: {}", report.generated));
    preamble.push(format!("Total Students: {}", report.rows.len()));

    for (i, line) in preamble.iter().take(HEADER_ROW as usize - 1).enumerate() {
        worksheet
            .write_with_format(i as u32, 0, line.as_str(), &title_format)
            .map_err(to_app_error)?;
    }

    // ---------------------------
    // Header
    // ---------------------------
    let headers = report.headers();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_with_format(HEADER_ROW, col as u16, *header, &header_format)
            .map_err(to_app_error)?;
    }

    worksheet.set_freeze_panes(HEADER_ROW + 1, 0).ok();

    let mut col_widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    // ---------------------------
    // Rows
    // ---------------------------
    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    for (row_index, r) in report.rows.iter().enumerate() {
        let row = HEADER_ROW + 1 + row_index as u32;
        let band_color = if row_index % 2 == 0 { band1 } else { band2 };

        write_row(worksheet, row, r, report.with_record, band_color)?;

        for (col, value) in r.cells(report.with_record).iter().enumerate() {
            col_widths[col] = col_widths[col].max(UnicodeWidthStr::width(value.as_str()));
        }
    }

    // ---------------------------
    // Totals
    // ---------------------------
    let totals_row = HEADER_ROW + 2 + report.rows.len() as u32;
    let label_format = Format::new().set_bold();
    let totals = [
        ("Present", report.summary.present),
        ("Absent", report.summary.absent),
        ("Excused", report.summary.excused),
        ("Total", report.summary.total()),
    ];
    for (i, (label, n)) in totals.iter().enumerate() {
        let row = totals_row + i as u32;
        worksheet
            .write_with_format(row, 0, *label, &label_format)
            .map_err(to_app_error)?;
        worksheet
            .write(row, 1, *n as f64)
            .map_err(to_app_error)?;
    }

    for (c, w) in col_widths.iter().enumerate() {
        let w = (*w + 2).min(MAX_COL_WIDTH);
        worksheet
            .set_column_width(c as u16, w as f64)
            .map_err(to_app_error)?;
    }

    workbook.save(path).map_err(to_app_error)?;

    notify_export_success("XLSX", path);
    Ok(())
}

/// One data row. Every field is text except the timestamp, which becomes a
/// real Excel date so it sorts and filters correctly.
fn write_row(
    worksheet: &mut Worksheet,
    row: u32,
    r: &ReportRow,
    with_record: bool,
    bg: Color,
) -> AppResult<()> {
    let text_fmt = Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    const TIMESTAMP_COL: usize = 5;

    for (col, value) in r.cells(with_record).iter().enumerate() {
        let c = col as u16;

        if col == TIMESTAMP_COL
            && let Some(ts) = r.stamped
        {
            let date_fmt = text_fmt.clone().set_num_format(TIMESTAMP_NUM_FORMAT);
            worksheet
                .write_with_format(row, c, to_excel_serial(&ts), &date_fmt)
                .map_err(to_app_error)?;
            continue;
        }

        worksheet
            .write_with_format(row, c, value.as_str(), &text_fmt)
            .map_err(to_app_error)?;
    }

    Ok(())
}

fn to_app_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}

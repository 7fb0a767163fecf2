use anyhow::{Context, Result};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Image, Url, Workbook, Worksheet};
use std::path::Path;
use tracing::warn;

use crate::constants::{DEFAULT_THUMBNAIL_SIZE, HEADER_FILL_RGB, REPORT_HEADERS, REPORT_SHEET_NAME};
use crate::image_processing::create_thumbnail_in_memory;
use crate::record::{PhotoRecord, RecordStatus};

const COL_FILE: u16 = 0;
const COL_FILENAME: u16 = 1;
const COL_LATITUDE: u16 = 2;
const COL_LONGITUDE: u16 = 3;
const COL_ADDRESS: u16 = 4;
const COL_THUMBNAIL: u16 = REPORT_HEADERS.len() as u16;

#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    /// Longest side of embedded thumbnails, in pixels.
    pub thumbnail_size: u32,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self { thumbnail_size: DEFAULT_THUMBNAIL_SIZE }
    }
}

/// Writes the records into an in-memory XLSX workbook, one row per record in
/// input order.
pub fn assemble(records: &[PhotoRecord], options: &ReportOptions) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(REPORT_SHEET_NAME)?;

    write_header(worksheet)?;
    let failure_format = Format::new().set_italic().set_font_color(Color::Red);
    worksheet.set_column_width(COL_FILE, 24)?;
    worksheet.set_column_width(COL_FILENAME, 24)?;
    worksheet.set_column_width(COL_LATITUDE, 14)?;
    worksheet.set_column_width(COL_LONGITUDE, 14)?;
    worksheet.set_column_width(COL_ADDRESS, 48)?;
    worksheet.set_column_width_pixels(COL_THUMBNAIL, pixels(options.thumbnail_size + 8))?;

    for (index, record) in records.iter().enumerate() {
        let row = u32::try_from(index + 1).context("Too many rows for one worksheet")?;
        write_row(worksheet, row, record, options, &failure_format)?;
    }

    workbook
        .save_to_buffer()
        .context("Failed to serialize workbook")
}

fn write_header(worksheet: &mut Worksheet) -> Result<()> {
    let header_format = Format::new()
        .set_bold()
        .set_text_wrap()
        .set_align(FormatAlign::Top)
        .set_background_color(Color::RGB(HEADER_FILL_RGB))
        .set_border(FormatBorder::Thin);

    for (col, title) in REPORT_HEADERS.iter().enumerate() {
        worksheet.write_with_format(0, col as u16, *title, &header_format)?;
    }
    Ok(())
}

fn write_row(
    worksheet: &mut Worksheet,
    row: u32,
    record: &PhotoRecord,
    options: &ReportOptions,
    failure_format: &Format,
) -> Result<()> {
    let link = Url::new(file_url(record.source_path())).set_text(record.filename());
    worksheet.write_url(row, COL_FILE, link)?;
    worksheet.write_string(row, COL_FILENAME, record.filename())?;

    if let Some(coords) = record.coordinates() {
        worksheet.write_number(row, COL_LATITUDE, coords.latitude)?;
        worksheet.write_number(row, COL_LONGITUDE, coords.longitude)?;
    }
    if let Some(address) = record.address() {
        worksheet.write_string(row, COL_ADDRESS, address)?;
    } else if let RecordStatus::Failed(reason) = record.status() {
        let note = format!("Error: {reason}");
        worksheet.write_string_with_format(row, COL_ADDRESS, &note, failure_format)?;
    }

    match create_thumbnail_in_memory(record.source_path(), options.thumbnail_size)
        .and_then(|jpeg| Image::new_from_buffer(&jpeg).map_err(Into::into))
    {
        Ok(thumbnail) => {
            worksheet.set_row_height_pixels(row, pixels(options.thumbnail_size + 4))?;
            worksheet.insert_image(row, COL_THUMBNAIL, &thumbnail)?;
        }
        Err(e) => {
            warn!(file = %record.filename(), error = %e, "No thumbnail for photo");
        }
    }
    Ok(())
}

/// `file:///` link to an absolute path. A Unix path keeps its leading slash,
/// otherwise the workbook stores it as relative. `#` would start an anchor.
fn file_url(path: &Path) -> String {
    let path = path.to_string_lossy().replace('\\', "/");
    let mut url = String::with_capacity(path.len() + 8);
    url.push_str("file:///");
    for ch in path.chars() {
        match ch {
            '%' => url.push_str("%25"),
            ' ' => url.push_str("%20"),
            '"' => url.push_str("%22"),
            '#' => url.push_str("%23"),
            _ => url.push(ch),
        }
    }
    url
}

fn pixels(value: u32) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

use crate::domain::model::{CellValue, RawTable, SourceFormat};
use crate::utils::error::{ImportError, Result};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::io::Cursor;
use std::path::Path;

/// Candidate delimiters for `.csv`, tried in this fixed order.
const DELIMITER_CANDIDATES: [u8; 3] = [b',', b';', b'\t'];

/// Synthetic header for single-column line-mode tables.
const LINE_MODE_HEADER: &str = "Text";

/// Decides the parse mode from the file extension, case-insensitively.
/// Anything unrecognized is rejected before any parse attempt.
pub fn detect_format(path: &str) -> Result<SourceFormat> {
    let extension = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match extension.as_str() {
        "xlsx" | "xls" => Ok(SourceFormat::Spreadsheet),
        "csv" => Ok(SourceFormat::Delimited),
        "txt" => Ok(SourceFormat::Lines),
        _ => Err(ImportError::UnsupportedFormat { extension }),
    }
}

/// Parses file contents into a [`RawTable`] according to the detected
/// format. Fails with `EmptyFile` when nothing but a header (or nothing at
/// all) comes out.
pub fn parse(format: SourceFormat, data: &[u8]) -> Result<RawTable> {
    let table = match format {
        SourceFormat::Spreadsheet => parse_spreadsheet(data)?,
        SourceFormat::Delimited => parse_delimited(decode_utf8(data)?)?,
        SourceFormat::Lines => parse_lines(decode_utf8(data)?),
    };

    if table.data_row_count() == 0 {
        return Err(ImportError::EmptyFile);
    }
    Ok(table)
}

fn decode_utf8(data: &[u8]) -> Result<&str> {
    std::str::from_utf8(data).map_err(|e| ImportError::ParseError {
        message: format!("file is not valid UTF-8: {}", e),
    })
}

/// First sheet only, raw cell values. Numeric cells stay numeric so that
/// 11-digit numbers survive untouched.
fn parse_spreadsheet(data: &[u8]) -> Result<RawTable> {
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(data.to_vec())).map_err(|e| {
            ImportError::ParseError {
                message: e.to_string(),
            }
        })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ImportError::EmptyFile)??;

    let rows = range
        .rows()
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect();
    Ok(RawTable::new(rows))
}

fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => text_cell(s),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => text_cell(s),
    }
}

/// Delimiter is chosen by whichever candidate yields the most columns on
/// line 1; quoting is handled by the cell-cleaning rule, not the reader.
fn parse_delimited(text: &str) -> Result<RawTable> {
    let first_line = text.lines().next().unwrap_or("");
    let delimiter = detect_delimiter(first_line);
    tracing::debug!("Detected delimiter: {:?}", delimiter as char);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(clean_cell).collect());
    }
    Ok(RawTable::new(rows))
}

fn detect_delimiter(first_line: &str) -> u8 {
    let mut best = DELIMITER_CANDIDATES[0];
    let mut best_columns = 0;
    for candidate in DELIMITER_CANDIDATES {
        let columns = first_line.split(candidate as char).count();
        if columns > best_columns {
            best = candidate;
            best_columns = columns;
        }
    }
    best
}

/// Trims the cell and strips one matching pair of surrounding single or
/// double quotes.
fn clean_cell(raw: &str) -> CellValue {
    let mut value = raw.trim();
    if value.len() >= 2 {
        let bytes = value.as_bytes();
        let first = bytes[0];
        if first == bytes[value.len() - 1] && (first == b'"' || first == b'\'') {
            value = &value[1..value.len() - 1];
        }
    }
    text_cell(value)
}

/// Every non-empty trimmed line becomes a single-column row under a
/// synthetic header.
fn parse_lines(text: &str) -> RawTable {
    let mut rows = vec![vec![CellValue::Text(LINE_MODE_HEADER.to_string())]];
    for line in text.lines() {
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            rows.push(vec![CellValue::Text(trimmed.to_string())]);
        }
    }
    RawTable::new(rows)
}

fn text_cell(s: &str) -> CellValue {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        CellValue::Empty
    } else {
        CellValue::Text(trimmed.to_string())
    }
}

//! File ingestion: delimited text and workbook input parsed into a [`Table`].
//!
//! The two variants share one output contract but differ in row acceptance,
//! carried explicitly in [`ParsePolicy`]:
//!
//! - **Delimited text** is strict: a data line whose field count does not
//!   match the header line is dropped (and counted on the table).
//! - **Workbooks** are lenient: short rows are padded with empty cells and
//!   only rows that are entirely blank are dropped.
//!
//! The text tokenizer accepts `,` and `;` on the same line without caring
//! which one the file actually uses, and treats `"` as a bare quote-mode
//! toggle. Survey exports do not escape embedded quotes, so neither do we.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use encoding_rs::Encoding;
use log::{debug, warn};
use thiserror::Error;

use crate::{
    dataset::{Row, Table},
    io_utils,
};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("unsupported file extension {0:?}; expected .csv, .xls or .xlsx")]
    InvalidFormat(String),
    #[error("input contains no usable rows")]
    EmptyInput,
    #[error("input is not valid {0} text")]
    Decode(&'static str),
    #[error("could not open workbook")]
    Workbook(#[from] calamine::Error),
    #[error("could not read input")]
    Read(#[from] std::io::Error),
}

/// Input variant, derived from the filename extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    DelimitedText,
    Workbook,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Result<Self, IngestError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        match extension.to_ascii_lowercase().as_str() {
            "csv" => Ok(SourceFormat::DelimitedText),
            "xlsx" | "xlsm" | "xlsb" | "xls" => Ok(SourceFormat::Workbook),
            other => Err(IngestError::InvalidFormat(other.to_string())),
        }
    }
}

/// Row-acceptance policy; see the module docs for the per-variant defaults.
#[derive(Debug, Clone, Copy)]
pub struct ParsePolicy {
    pub strict_field_count: bool,
}

impl ParsePolicy {
    pub fn for_format(format: SourceFormat) -> Self {
        Self {
            strict_field_count: matches!(format, SourceFormat::DelimitedText),
        }
    }
}

/// Read and parse `path` according to its extension. The `-` path reads
/// delimited text from stdin.
pub fn load_table(
    path: &Path,
    encoding: &'static Encoding,
) -> Result<(Table, SourceFormat), IngestError> {
    let format = if io_utils::is_dash(path) {
        SourceFormat::DelimitedText
    } else {
        SourceFormat::from_path(path)?
    };
    let table = match format {
        SourceFormat::DelimitedText => {
            let bytes = io_utils::read_input_bytes(path)?;
            let text = decode_text(&bytes, encoding)?;
            parse_delimited_text(&text)?
        }
        SourceFormat::Workbook => parse_workbook(path)?,
    };
    if table.dropped_rows() > 0 {
        warn!(
            "Dropped {} malformed row(s) while parsing {:?}",
            table.dropped_rows(),
            path
        );
    }
    debug!(
        "Parsed {} row(s) across {} column(s) from {:?}",
        table.row_count(),
        table.headers().len(),
        path
    );
    Ok((table, format))
}

fn decode_text(bytes: &[u8], encoding: &'static Encoding) -> Result<String, IngestError> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(IngestError::Decode(encoding.name()));
    }
    Ok(text.into_owned())
}

/// Parse delimited survey text with the default strict policy.
pub fn parse_delimited_text(text: &str) -> Result<Table, IngestError> {
    parse_delimited_text_with(text, ParsePolicy::for_format(SourceFormat::DelimitedText))
}

pub fn parse_delimited_text_with(text: &str, policy: ParsePolicy) -> Result<Table, IngestError> {
    let mut lines = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty());

    let Some(header_line) = lines.next() else {
        return Err(IngestError::EmptyInput);
    };
    let headers = tokenize_line(header_line);

    let mut rows = Vec::new();
    let mut dropped = 0usize;
    for line in lines {
        let mut fields = tokenize_line(line);
        if fields.len() != headers.len() {
            if policy.strict_field_count {
                dropped += 1;
                continue;
            }
            fields.resize(headers.len(), String::new());
        }
        rows.push(Row::new(fields));
    }
    Ok(Table::new(headers, rows, dropped))
}

/// Split one physical line into trimmed fields. A `"` flips the in-quotes
/// state without being emitted; outside quotes both `,` and `;` terminate
/// the current field. The final field is emitted unconditionally, so every
/// line yields at least one field.
pub fn tokenize_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' | ';' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            other => current.push(other),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

/// Parse the first worksheet of a workbook with the default lenient policy.
/// Subsequent sheets are ignored.
pub fn parse_workbook(path: &Path) -> Result<Table, IngestError> {
    parse_workbook_with(path, ParsePolicy::for_format(SourceFormat::Workbook))
}

pub fn parse_workbook_with(path: &Path, policy: ParsePolicy) -> Result<Table, IngestError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(IngestError::EmptyInput)??;

    let mut cell_rows = range.rows();
    let Some(header_cells) = cell_rows.next() else {
        return Err(IngestError::EmptyInput);
    };
    let headers: Vec<String> = header_cells.iter().map(cell_text).collect();

    let mut rows = Vec::new();
    let mut dropped = 0usize;
    for cells in cell_rows {
        let mut fields: Vec<String> = cells.iter().map(cell_text).collect();
        if fields.iter().all(String::is_empty) {
            dropped += 1;
            continue;
        }
        if policy.strict_field_count && fields.len() != headers.len() {
            dropped += 1;
            continue;
        }
        fields.resize(headers.len(), String::new());
        rows.push(Row::new(fields));
    }
    Ok(Table::new(headers, rows, dropped))
}

fn cell_text(cell: &Data) -> String {
    calamine::DataType::as_string(cell)
        .unwrap_or_else(|| cell.to_string())
        .trim()
        .to_string()
}

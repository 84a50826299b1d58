//! In-memory survey table model.
//!
//! A [`Table`] is an ordered header list plus rows whose cells are stored
//! positionally, aligned to the header indexes. All reads route through
//! [`Table::value`], which maps an unknown header or a missing trailing cell
//! to the empty string, so consumers never observe an absent key.

use serde::Serialize;

/// One survey response. Cells are positional; the owning [`Table`]'s header
/// list gives them names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<String>,
}

impl Row {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Cell at `index`, or `""` past the end of the row.
    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_empty())
    }
}

/// Parsed tabular input: ordered headers, well-formed rows, and the number
/// of malformed rows the parser discarded on the way here.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Row>,
    dropped_rows: usize,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Row>, dropped_rows: usize) -> Self {
        Self {
            headers,
            rows,
            dropped_rows,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Rows the parser dropped as malformed (field-count mismatch in
    /// delimited text, all-blank rows in workbooks).
    pub fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }

    /// Position of `header`, by exact match. Header uniqueness is not
    /// enforced; with duplicates the first occurrence wins and later ones
    /// stay reachable only by index.
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// Value of `header` in `row`. Unknown headers and missing trailing
    /// cells read as `""`.
    pub fn value<'a>(&self, row: &'a Row, header: &str) -> &'a str {
        match self.column_index(header) {
            Some(index) => row.cell(index),
            None => "",
        }
    }
}

/// Which facet a header was classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnFacet {
    Role,
    School,
    Question,
    Metadata,
}

impl ColumnFacet {
    pub fn label(self) -> &'static str {
        match self {
            ColumnFacet::Role => "role",
            ColumnFacet::School => "school",
            ColumnFacet::Question => "question",
            ColumnFacet::Metadata => "metadata (excluded)",
        }
    }
}

/// A [`Table`] annotated with the role/school/question column designations.
///
/// `role_column` and `school_column` may name the same header when the input
/// has a single column or a pathological match; consumers tolerate that.
#[derive(Debug, Clone)]
pub struct ClassifiedTable {
    pub table: Table,
    pub role_column: String,
    pub school_column: String,
    pub question_columns: Vec<String>,
}

impl ClassifiedTable {
    pub fn facet_of(&self, header: &str) -> ColumnFacet {
        if header == self.role_column {
            ColumnFacet::Role
        } else if header == self.school_column {
            ColumnFacet::School
        } else if self.question_columns.iter().any(|q| q == header) {
            ColumnFacet::Question
        } else {
            ColumnFacet::Metadata
        }
    }
}

//! One loaded survey and its filter state.

use std::path::Path;

use encoding_rs::Encoding;

use crate::{
    aggregate::{self, FrequencyTable},
    classify::{self, DEFAULT_RULES},
    dataset::{ClassifiedTable, Row},
    filter::{Facet, Selection},
    ingest::{self, IngestError},
};

/// A parsed, classified survey plus the active filter selection.
///
/// The table is an immutable snapshot: loading a new file replaces it
/// wholesale and discards the selection. Classification runs only after
/// parsing fully succeeds, so a failed load never leaves a partial table
/// behind.
#[derive(Debug, Clone)]
pub struct Session {
    data: ClassifiedTable,
    selection: Selection,
}

impl Session {
    pub fn load(path: &Path, encoding: &'static Encoding) -> Result<Self, IngestError> {
        let (table, format) = ingest::load_table(path, encoding)?;
        Ok(Self::new(classify::classify_table(table, format, &DEFAULT_RULES)))
    }

    pub fn new(data: ClassifiedTable) -> Self {
        Self {
            data,
            selection: Selection::new(),
        }
    }

    pub fn data(&self) -> &ClassifiedTable {
        &self.data
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Swap in a newly loaded survey; the old table and selection are gone.
    pub fn replace_table(&mut self, data: ClassifiedTable) {
        self.data = data;
        self.selection = Selection::new();
    }

    pub fn toggle_filter(&mut self, facet: Facet, value: &str) {
        self.selection.toggle(facet, value);
    }

    pub fn clear_filters(&mut self) {
        self.selection.clear();
    }

    pub fn replace_filter<I, S>(&mut self, facet: Facet, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selection.replace(facet, values);
    }

    pub fn filtered_rows(&self) -> Vec<&Row> {
        self.selection.apply(&self.data)
    }

    /// Frequency table for `column` over the filtered rows.
    pub fn tally(&self, column: &str) -> FrequencyTable {
        aggregate::count_values(&self.data.table, &self.filtered_rows(), column)
    }

    /// Distinct values for `column` over the filtered rows.
    pub fn unique(&self, column: &str) -> Vec<String> {
        aggregate::unique_values(&self.data.table, &self.filtered_rows(), column)
    }

    /// Every role present in the survey, ignoring the active filters. This
    /// is what a filter picker offers.
    pub fn available_roles(&self) -> Vec<String> {
        let rows: Vec<&Row> = self.data.table.rows().iter().collect();
        aggregate::unique_values(&self.data.table, &rows, &self.data.role_column)
    }

    /// Every school present in the survey, ignoring the active filters.
    pub fn available_schools(&self) -> Vec<String> {
        let rows: Vec<&Row> = self.data.table.rows().iter().collect();
        aggregate::unique_values(&self.data.table, &rows, &self.data.school_column)
    }
}

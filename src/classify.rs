//! Header classification: which column carries the respondent role, which
//! the school unit, and which are chartable questions.
//!
//! Classification is a pure function of the header list, the source format,
//! and a [`FacetRules`] marker table. Keeping the markers in data rather
//! than inline keeps the policy auditable and extensible without touching
//! the parsers.

use crate::{
    dataset::{ClassifiedTable, Table},
    ingest::SourceFormat,
};

/// Case-insensitive substring markers per facet.
#[derive(Debug, Clone, Copy)]
pub struct FacetRules {
    pub role_markers: &'static [&'static str],
    pub school_markers: &'static [&'static str],
    pub metadata_markers: &'static [&'static str],
}

/// Markers for the Portuguese institutional-survey exports this tool
/// targets. Forms exports label the respondent function "Você atua como"
/// and the unit "Unidade Escolar", and prepend a "Carimbo de data/hora"
/// timestamp column.
pub const DEFAULT_RULES: FacetRules = FacetRules {
    role_markers: &["você atua como", "atua como"],
    school_markers: &["unidade escolar", "escola"],
    metadata_markers: &["carimbo", "data/hora", "timestamp"],
};

fn matches_any(header: &str, markers: &[&str]) -> bool {
    let lowered = header.to_lowercase();
    markers.iter().any(|marker| lowered.contains(marker))
}

/// Designate role, school, and question columns for `table`.
///
/// Role falls back to the first header and school to the second when no
/// marker matches; with a single header both facets name it. Metadata
/// markers only exclude headers for workbook input: text exports of these
/// surveys carry no timestamp column, so a matching header in a CSV stays
/// a question.
pub fn classify_table(table: Table, format: SourceFormat, rules: &FacetRules) -> ClassifiedTable {
    let headers = table.headers();

    let role_column = headers
        .iter()
        .find(|h| matches_any(h, rules.role_markers))
        .or_else(|| headers.first())
        .cloned()
        .unwrap_or_default();

    let school_column = headers
        .iter()
        .find(|h| matches_any(h, rules.school_markers))
        .or_else(|| headers.get(1))
        .or_else(|| headers.first())
        .cloned()
        .unwrap_or_default();

    let question_columns = headers
        .iter()
        .filter(|h| **h != role_column && **h != school_column)
        .filter(|h| {
            format != SourceFormat::Workbook || !matches_any(h, rules.metadata_markers)
        })
        .cloned()
        .collect();

    ClassifiedTable {
        table,
        role_column,
        school_column,
        question_columns,
    }
}

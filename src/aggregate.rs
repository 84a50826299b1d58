//! Frequency aggregation over row subsets.

use itertools::Itertools;

use crate::dataset::{Row, Table};

/// Bucket label substituted for blank or missing answers.
pub const NOT_INFORMED: &str = "Não informado";

/// Answer frequencies for one column. Entries keep first-seen order; display
/// layers sort however they need to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<(String, u64)>,
}

impl FrequencyTable {
    pub fn entries(&self) -> &[(String, u64)] {
        &self.entries
    }

    pub fn count(&self, value: &str) -> u64 {
        self.entries
            .iter()
            .find(|(v, _)| v == value)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted lexicographically by value, for stable display.
    pub fn sorted_entries(&self) -> Vec<(String, u64)> {
        self.entries
            .iter()
            .cloned()
            .sorted_by(|a, b| a.0.cmp(&b.0))
            .collect()
    }

    fn bump(&mut self, value: &str) {
        match self.entries.iter_mut().find(|(v, _)| v == value) {
            Some(entry) => entry.1 += 1,
            None => self.entries.push((value.to_string(), 1)),
        }
    }
}

/// Count answers for `column` across `rows`. Blank cells land in the
/// [`NOT_INFORMED`] bucket, so the counts always sum to `rows.len()`.
pub fn count_values(table: &Table, rows: &[&Row], column: &str) -> FrequencyTable {
    let mut frequencies = FrequencyTable::default();
    for row in rows {
        let value = table.value(row, column).trim();
        frequencies.bump(if value.is_empty() { NOT_INFORMED } else { value });
    }
    frequencies
}

/// Distinct non-blank answers for `column`, sorted ascending. Blank cells
/// are excluded entirely, unlike [`count_values`].
pub fn unique_values(table: &Table, rows: &[&Row], column: &str) -> Vec<String> {
    rows.iter()
        .map(|row| table.value(row, column).trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .unique()
        .sorted()
        .collect()
}

/// Percentage share of `count` against `total`, rounded to one decimal
/// place. Callers guard `total > 0`; a share of nothing is undefined.
pub fn percent(count: u64, total: u64) -> f64 {
    debug_assert!(total > 0);
    (count as f64 * 1000.0 / total as f64).round() / 10.0
}

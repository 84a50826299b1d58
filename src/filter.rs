//! Role/school selection state and the row predicate it induces.

use std::collections::BTreeSet;

use crate::dataset::{ClassifiedTable, Row};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    Role,
    School,
}

/// Current filter selection. An empty set places no restriction on its
/// facet; a row must satisfy both facets to pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    roles: BTreeSet<String>,
    schools: BTreeSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn roles(&self) -> &BTreeSet<String> {
        &self.roles
    }

    pub fn schools(&self) -> &BTreeSet<String> {
        &self.schools
    }

    pub fn is_unrestricted(&self) -> bool {
        self.roles.is_empty() && self.schools.is_empty()
    }

    fn set_mut(&mut self, facet: Facet) -> &mut BTreeSet<String> {
        match facet {
            Facet::Role => &mut self.roles,
            Facet::School => &mut self.schools,
        }
    }

    /// Add `value` to the facet's selection, or remove it if already there.
    pub fn toggle(&mut self, facet: Facet, value: &str) {
        let set = self.set_mut(facet);
        if !set.remove(value) {
            set.insert(value.to_string());
        }
    }

    /// Drop every restriction on both facets.
    pub fn clear(&mut self) {
        self.roles.clear();
        self.schools.clear();
    }

    /// Replace one facet's selection wholesale.
    pub fn replace<I, S>(&mut self, facet: Facet, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self.set_mut(facet) = values.into_iter().map(Into::into).collect();
    }

    /// Row predicate: every restricted facet must match its cell value.
    pub fn matches(&self, data: &ClassifiedTable, row: &Row) -> bool {
        let role = data.table.value(row, &data.role_column).trim();
        let school = data.table.value(row, &data.school_column).trim();
        (self.roles.is_empty() || self.roles.contains(role))
            && (self.schools.is_empty() || self.schools.contains(school))
    }

    /// Rows of `data` passing the current selection, in table order.
    /// Recomputed from scratch on every call; survey inputs are small
    /// enough that no incremental indexing is warranted.
    pub fn apply<'a>(&self, data: &'a ClassifiedTable) -> Vec<&'a Row> {
        data.table
            .rows()
            .iter()
            .filter(|row| self.matches(data, row))
            .collect()
    }
}

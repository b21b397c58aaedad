use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// FilterSelection – which values are selected per dimension
// ---------------------------------------------------------------------------

/// Multi-select state for the two filterable columns.
///
/// An empty set means "no filter" on that dimension, not "exclude all".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub countries: BTreeSet<String>,
    pub categories: BTreeSet<String>,
}

impl FilterSelection {
    /// Selection from any two lists of values; empty lists mean no filter.
    pub fn new<C, K>(countries: C, categories: K) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        K: IntoIterator,
        K::Item: Into<String>,
    {
        Self {
            countries: countries.into_iter().map(Into::into).collect(),
            categories: categories.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether a record passes both dimensions.
    pub fn matches(&self, record: &Record) -> bool {
        passes(&self.countries, record.country.as_deref())
            && passes(&self.categories, record.category.as_deref())
    }

    /// True when neither dimension constrains anything.
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty() && self.categories.is_empty()
    }
}

/// A null cell never matches a non-empty selection.
fn passes(selected: &BTreeSet<String>, value: Option<&str>) -> bool {
    if selected.is_empty() {
        return true;
    }
    value.is_some_and(|v| selected.contains(v))
}

// ---------------------------------------------------------------------------
// FilteredView – ordered subset of dataset rows
// ---------------------------------------------------------------------------

/// Borrowed, ordered subset of a dataset's records. Recomputed on every
/// filter change and never stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredView<'a> {
    rows: Vec<&'a Record>,
}

impl<'a> FilteredView<'a> {
    pub fn from_rows(rows: Vec<&'a Record>) -> Self {
        Self { rows }
    }

    /// Every record of the dataset, in file order.
    pub fn all(dataset: &'a Dataset) -> Self {
        Self::from_rows(dataset.records.iter().collect())
    }

    pub fn rows(&self) -> &[&'a Record] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.rows.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Return the records that pass `selection`, preserving file order.
pub fn filter<'a>(dataset: &'a Dataset, selection: &FilterSelection) -> FilteredView<'a> {
    FilteredView::from_rows(
        dataset
            .records
            .iter()
            .filter(|r| selection.matches(r))
            .collect(),
    )
}

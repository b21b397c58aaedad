use std::collections::HashSet;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Record – one row of the source table
// ---------------------------------------------------------------------------

/// A single person from the dataset with the four columns the dashboard uses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// `personName` column.
    pub name: String,
    /// `country` column; `None` when blank.
    pub country: Option<String>,
    /// `category` (industry) column; `None` when blank.
    pub category: Option<String>,
    /// `finalWorth` in $M; `None` when the cell could not be read as a number.
    pub net_worth: Option<f64>,
}

impl Record {
    /// Build a record from borrowed cells; `None` marks a blank cell.
    pub fn new(
        name: impl Into<String>,
        country: Option<&str>,
        category: Option<&str>,
        net_worth: Option<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            country: country.map(str::to_string),
            category: category.map(str::to_string),
            net_worth,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset. Immutable once built; shared behind an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// All records in file order.
    pub records: Vec<Record>,
    countries: Vec<String>,
    categories: Vec<String>,
}

impl Dataset {
    /// Build the filter option lists from the loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let countries = distinct(records.iter().map(|r| r.country.as_deref()));
        let categories = distinct(records.iter().map(|r| r.category.as_deref()));
        Dataset {
            records,
            countries,
            categories,
        }
    }

    /// Distinct non-null countries, in first-encountered order.
    pub fn country_options(&self) -> &[String] {
        &self.countries
    }

    /// Distinct non-null categories, in first-encountered order.
    pub fn category_options(&self) -> &[String] {
        &self.categories
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn distinct<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .flatten()
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_skip_nulls_and_keep_first_seen_order() {
        let ds = Dataset::from_records(vec![
            Record::new("A", Some("US"), Some("Tech"), Some(1.0)),
            Record::new("B", None, Some("Finance"), None),
            Record::new("C", Some("China"), None, Some(2.0)),
            Record::new("D", Some("US"), Some("Tech"), Some(3.0)),
        ]);

        assert_eq!(ds.country_options(), ["US", "China"]);
        assert_eq!(ds.category_options(), ["Tech", "Finance"]);
        assert_eq!(ds.len(), 4);
        assert!(!ds.is_empty());
    }
}

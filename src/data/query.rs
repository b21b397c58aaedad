use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::filter::{filter, FilterSelection, FilteredView};
use super::model::{Dataset, Record};

/// Rows shown in the "top titans" view.
pub const TOP_TITANS: usize = 10;
/// Countries shown in the country wealth view.
pub const TOP_COUNTRIES: usize = 15;
/// Modal country of a view with no countries.
pub const NOT_AVAILABLE: &str = "N/A";

// ---------------------------------------------------------------------------
// KPIs
// ---------------------------------------------------------------------------

/// Scalar summaries of a view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    /// Rows in the view, including rows with missing worth.
    pub count: usize,
    /// Sum of non-missing worth; 0 when there is none.
    pub total_worth: f64,
    /// Mean of non-missing worth; NaN when there is none.
    pub avg_worth: f64,
    /// Most frequent non-null country, first-seen wins ties; "N/A" when none.
    pub modal_country: String,
}

pub fn kpis(view: &FilteredView<'_>) -> Kpis {
    let (sum, n) = view
        .iter()
        .filter_map(|r| r.net_worth)
        .fold((0.0, 0usize), |(sum, n), w| (sum + w, n + 1));

    Kpis {
        count: view.len(),
        total_worth: sum,
        avg_worth: if n == 0 { f64::NAN } else { sum / n as f64 },
        modal_country: modal_country(view).unwrap_or(NOT_AVAILABLE).to_string(),
    }
}

fn modal_country<'a>(view: &FilteredView<'a>) -> Option<&'a str> {
    let mut counts: Vec<(&'a str, usize)> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    for country in view.iter().filter_map(|r| r.country.as_deref()) {
        let i = *index.entry(country).or_insert_with(|| {
            counts.push((country, 0));
            counts.len() - 1
        });
        counts[i].1 += 1;
    }

    let mut best: Option<(&'a str, usize)> = None;
    for (country, n) in counts {
        // strict `>` keeps the first-seen country on ties
        if best.map_or(true, |(_, top)| n > top) {
            best = Some((country, n));
        }
    }
    best.map(|(country, _)| country)
}

// ---------------------------------------------------------------------------
// Top-N by worth
// ---------------------------------------------------------------------------

/// The `n` richest rows, descending. Missing worth sorts last and equal
/// worth keeps view order.
pub fn top_by_worth<'a>(view: &FilteredView<'a>, n: usize) -> FilteredView<'a> {
    let mut rows = view.rows().to_vec();
    rows.sort_by(|a, b| worth_descending(a, b));
    rows.truncate(n);
    FilteredView::from_rows(rows)
}

fn worth_descending(a: &Record, b: &Record) -> Ordering {
    match (a.net_worth, b.net_worth) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// ---------------------------------------------------------------------------
// Grouped sums
// ---------------------------------------------------------------------------

/// Summed worth of one group. `key` is `None` for the null group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupTotal {
    pub key: Option<String>,
    pub total: f64,
}

/// Group totals in first-encountered order. Missing worth counts as 0.
fn group_totals<'a>(
    view: &FilteredView<'a>,
    key: impl Fn(&'a Record) -> Option<&'a str>,
) -> Vec<GroupTotal> {
    let mut groups: Vec<GroupTotal> = Vec::new();
    let mut index: HashMap<Option<&'a str>, usize> = HashMap::new();
    for record in view.iter() {
        let k = key(record);
        let i = *index.entry(k).or_insert_with(|| {
            groups.push(GroupTotal {
                key: k.map(str::to_string),
                total: 0.0,
            });
            groups.len() - 1
        });
        groups[i].total += record.net_worth.unwrap_or(0.0);
    }
    groups
}

/// Total worth per category, including a `None` group for blank categories.
pub fn aggregate_by_category(view: &FilteredView<'_>) -> BTreeMap<Option<String>, f64> {
    group_totals(view, |r| r.category.as_deref())
        .into_iter()
        .map(|g| (g.key, g.total))
        .collect()
}

/// Countries by total worth, descending, truncated to `top_n`. Equal totals
/// keep first-encountered order.
pub fn aggregate_by_country(view: &FilteredView<'_>, top_n: usize) -> Vec<GroupTotal> {
    let mut groups = group_totals(view, |r| r.country.as_deref());
    sort_descending(&mut groups);
    groups.truncate(top_n);
    groups
}

fn sort_descending(groups: &mut [GroupTotal]) {
    groups.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(Ordering::Equal));
}

// ---------------------------------------------------------------------------
// ViewModel – everything the renderer needs for one pass
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub country_options: Vec<String>,
    pub category_options: Vec<String>,
    pub selection: FilterSelection,
    pub kpis: Kpis,
    pub top_titans: Vec<Record>,
    /// Category totals, largest first.
    pub category_totals: Vec<GroupTotal>,
    pub country_totals: Vec<GroupTotal>,
}

/// One full synchronous pass: filter, KPIs, aggregates.
pub fn recompute(dataset: &Dataset, selection: &FilterSelection) -> ViewModel {
    let view = filter(dataset, selection);
    log::debug!(
        "Recomputed view: {} of {} rows pass {:?}",
        view.len(),
        dataset.len(),
        selection
    );

    let mut category_totals: Vec<GroupTotal> = aggregate_by_category(&view)
        .into_iter()
        .map(|(key, total)| GroupTotal { key, total })
        .collect();
    sort_descending(&mut category_totals);
    let top_titans: Vec<Record> = top_by_worth(&view, TOP_TITANS)
        .rows()
        .iter()
        .map(|r| (*r).clone())
        .collect();

    ViewModel {
        country_options: dataset.country_options().to_vec(),
        category_options: dataset.category_options().to_vec(),
        selection: selection.clone(),
        kpis: kpis(&view),
        top_titans,
        category_totals,
        country_totals: aggregate_by_country(&view, TOP_COUNTRIES),
    }
}

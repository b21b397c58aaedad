//! Property tests for the filtering and aggregation core.
//!
//! Uses proptest to verify:
//! 1. Filtering returns an ordered subset whose rows all match the selection
//! 2. An empty selection on a dimension leaves that dimension unfiltered
//! 3. KPI count and total agree with the view
//! 4. Top-N is sorted, bounded by n, and idempotent
//! 5. Category group sums add up to the KPI total

use billionaire_os::data::filter::{filter, FilterSelection, FilteredView};
use billionaire_os::data::model::{Dataset, Record};
use billionaire_os::data::query::{aggregate_by_category, aggregate_by_country, kpis, top_by_worth};
use proptest::prelude::*;

const COUNTRIES: [&str; 4] = ["United States", "China", "India", "Germany"];
const CATEGORIES: [&str; 3] = ["Technology", "Finance & Investments", "Automotive"];

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_label(pool: &'static [&'static str]) -> impl Strategy<Value = Option<String>> {
    prop::option::weighted(0.85, prop::sample::select(pool).prop_map(str::to_string))
}

/// Whole-number worths keep floating point sums exact.
fn arb_worth() -> impl Strategy<Value = Option<f64>> {
    prop::option::weighted(0.8, (1u32..250_000).prop_map(f64::from))
}

fn arb_record() -> impl Strategy<Value = Record> {
    (
        "[A-Z][a-z]{2,8}",
        arb_label(&COUNTRIES),
        arb_label(&CATEGORIES),
        arb_worth(),
    )
        .prop_map(|(name, country, category, net_worth)| Record {
            name,
            country,
            category,
            net_worth,
        })
}

fn arb_dataset() -> impl Strategy<Value = Dataset> {
    prop::collection::vec(arb_record(), 0..60).prop_map(Dataset::from_records)
}

fn arb_selection() -> impl Strategy<Value = FilterSelection> {
    (
        prop::sample::subsequence(COUNTRIES.to_vec(), 0..=COUNTRIES.len()),
        prop::sample::subsequence(CATEGORIES.to_vec(), 0..=CATEGORIES.len()),
    )
        .prop_map(|(countries, categories)| FilterSelection::new(countries, categories))
}

fn names(view: &FilteredView<'_>) -> Vec<String> {
    view.iter().map(|r| r.name.clone()).collect()
}

// ── 1-2. Filtering ───────────────────────────────────────────────────

proptest! {
    /// Every returned row comes from the dataset, in order, and matches.
    #[test]
    fn filter_is_an_ordered_matching_subset(ds in arb_dataset(), sel in arb_selection()) {
        let view = filter(&ds, &sel);
        let mut source = ds.records.iter();
        for row in view.iter() {
            prop_assert!(source.any(|r| std::ptr::eq(r, row)), "row not in dataset order");
            if !sel.countries.is_empty() {
                prop_assert!(row.country.as_ref().is_some_and(|c| sel.countries.contains(c)));
            }
            if !sel.categories.is_empty() {
                prop_assert!(row.category.as_ref().is_some_and(|c| sel.categories.contains(c)));
            }
        }
        prop_assert_eq!(
            view.len(),
            ds.records.iter().filter(|r| sel.matches(r)).count()
        );
    }

    /// Clearing one dimension equals filtering on the other dimension alone.
    #[test]
    fn empty_dimension_is_identity(ds in arb_dataset(), sel in arb_selection()) {
        let countries_only = FilterSelection {
            countries: sel.countries.clone(),
            categories: Default::default(),
        };
        let expected: Vec<String> = ds
            .records
            .iter()
            .filter(|r| sel.countries.is_empty()
                || r.country.as_ref().is_some_and(|c| sel.countries.contains(c)))
            .map(|r| r.name.clone())
            .collect();
        prop_assert_eq!(names(&filter(&ds, &countries_only)), expected);

        prop_assert_eq!(filter(&ds, &FilterSelection::default()), FilteredView::all(&ds));
    }
}

// ── 3. KPIs ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn kpis_agree_with_view(ds in arb_dataset(), sel in arb_selection()) {
        let view = filter(&ds, &sel);
        let k = kpis(&view);
        let worths: Vec<f64> = view.iter().filter_map(|r| r.net_worth).collect();

        prop_assert_eq!(k.count, view.len());
        prop_assert_eq!(k.total_worth, worths.iter().sum::<f64>());
        if worths.is_empty() {
            prop_assert!(k.avg_worth.is_nan());
        } else {
            prop_assert!((k.avg_worth - k.total_worth / worths.len() as f64).abs() < 1e-9);
        }
        if view.is_empty() {
            prop_assert_eq!(k.modal_country, "N/A");
        }
    }
}

// ── 4. Top-N ─────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn top_by_worth_sorted_bounded_idempotent(ds in arb_dataset(), n in 0usize..20) {
        let view = FilteredView::all(&ds);
        let top = top_by_worth(&view, n);

        prop_assert_eq!(top.len(), n.min(view.len()));
        for pair in top.rows().windows(2) {
            match (pair[0].net_worth, pair[1].net_worth) {
                (Some(a), Some(b)) => prop_assert!(a >= b),
                (None, Some(_)) => prop_assert!(false, "missing worth sorted before a value"),
                _ => {}
            }
        }
        prop_assert_eq!(top_by_worth(&top, n), top);
    }
}

// ── 5. Grouped sums ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn group_sums_match_total(ds in arb_dataset(), sel in arb_selection()) {
        let view = filter(&ds, &sel);
        let total = kpis(&view).total_worth;

        let by_category: f64 = aggregate_by_category(&view).values().sum();
        prop_assert_eq!(by_category, total);

        let by_country = aggregate_by_country(&view, usize::MAX);
        prop_assert_eq!(by_country.iter().map(|g| g.total).sum::<f64>(), total);
        for pair in by_country.windows(2) {
            prop_assert!(pair[0].total >= pair[1].total);
        }
    }
}

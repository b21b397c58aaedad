/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  Billionaires Statistics Dataset.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + coerce → Arc<Dataset>, cached per path
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterSelection → FilteredView (borrowed rows)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  query    │  KPIs, top-N, grouped sums → ViewModel
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod query;

pub use filter::{filter, FilterSelection, FilteredView};
pub use loader::{DataError, DatasetLoader};
pub use model::{Dataset, Record};
pub use query::{
    aggregate_by_category, aggregate_by_country, kpis, recompute, top_by_worth, GroupTotal,
    Kpis, ViewModel,
};

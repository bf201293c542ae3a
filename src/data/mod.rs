/// Data layer: core types, loading, aggregation and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  validate rows → Dataset (or DataLoadError)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset  │  Arc<[LaunchRecord]>, sites, payload bounds
///   └──────────┘
///      │     │
///      ▼     ▼
///  aggregate  filter    (site) → OutcomeSummary
///                       (site, payload range) → FilteredSubset
/// ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;

/// Data layer: survey types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RawTable → clean → SurveyDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  age / hours ranges → row indices
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  group by genre → mean anxiety / depression
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;

/// Data layer: table model, loading, cleaning stages and writing.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize │  slugify + de-duplicate column labels
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ missing  │  classify columns, fill prices, drop rows without quantity
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  optional: quantity > 0 and price >= 0
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  writer   │  Table → .csv
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod missing;
pub mod model;
pub mod normalize;
pub mod writer;

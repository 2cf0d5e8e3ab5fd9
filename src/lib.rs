//! Sales table cleaning: standardized column names, missing-value handling
//! for price and quantity columns, and an optional positivity filter.

pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;

pub use config::CleanerConfig;
pub use pipeline::{clean, run, CleaningSummary};

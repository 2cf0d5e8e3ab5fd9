use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::data::missing::{DualClassPolicy, Keywords, ResolverConfig};

pub const DEFAULT_INPUT: &str = "data/raw/sales_data_raw.csv";
pub const DEFAULT_OUTPUT: &str = "data/processed/sales_data_clean.csv";

/// Settings for one cleaning run.
///
/// Layered as: built-in defaults, then an optional TOML file, then CLI flags.
///
/// ```toml
/// input = "data/raw/sales_data_raw.csv"
/// output = "data/processed/sales_data_clean.csv"
/// positive_only = true
/// dual_class = "price-only"
///
/// [keywords]
/// price = ["price", "amount", "cost", "total", "mrp"]
/// quantity = ["quantity", "qty", "units", "unit"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CleanerConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Run the quantity/price positivity filter after resolving missing values.
    pub positive_only: bool,
    pub dual_class: DualClassPolicy,
    pub keywords: Keywords,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            positive_only: false,
            dual_class: DualClassPolicy::default(),
            keywords: Keywords::default(),
        }
    }
}

/// Values given on the command line; `None`/`false` leaves the config as is.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub positive_only: bool,
    pub dual_class: Option<DualClassPolicy>,
}

impl CleanerConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("parsing config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Defaults, or the file at `path` when given, with `overrides` on top.
    pub fn resolve(path: Option<&Path>, overrides: Overrides) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::load(p)?,
            None => Self::default(),
        };
        config.apply(overrides);
        Ok(config)
    }

    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(input) = overrides.input {
            self.input = input;
        }
        if let Some(output) = overrides.output {
            self.output = output;
        }
        if overrides.positive_only {
            self.positive_only = true;
        }
        if let Some(policy) = overrides.dual_class {
            self.dual_class = policy;
        }
    }

    pub fn resolver(&self) -> ResolverConfig {
        ResolverConfig {
            keywords: self.keywords.clone(),
            dual_class: self.dual_class,
        }
    }
}

impl FromStr for DualClassPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "both" => Ok(DualClassPolicy::Both),
            "price-only" => Ok(DualClassPolicy::PriceOnly),
            "quantity-only" => Ok(DualClassPolicy::QuantityOnly),
            other => bail!("unknown dual-class policy '{other}' (expected both, price-only or quantity-only)"),
        }
    }
}

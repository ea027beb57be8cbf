// src/config.rs

use anyhow::{bail, Context, Result};
use chrono::Month;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

use crate::data::parse_month_label;

pub const DEFAULT_CONFIG_PATH: &str = "dashboard.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub dataset_path: PathBuf,
    /// Month labels to keep; empty means every month in the dataset.
    pub selected_months: Vec<String>,
    pub histogram_bins: usize,
    pub preview_rows: usize,
    pub currency_symbol: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("retail_sales_dataset.csv"),
            selected_months: Vec::new(),
            histogram_bins: 15,
            preview_rows: 5,
            currency_symbol: "₹".to_string(),
        }
    }
}

impl DashboardConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: DashboardConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`load`](Self::load), but falls back to defaults when `path` does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.histogram_bins == 0 {
            bail!("histogram_bins must be at least 1");
        }
        self.months()?;
        Ok(())
    }

    /// The configured month filter, parsed. `None` when unset (all months).
    pub fn months(&self) -> Result<Option<Vec<Month>>> {
        if self.selected_months.is_empty() {
            return Ok(None);
        }
        let months = self
            .selected_months
            .iter()
            .map(|label| parse_month_label(label))
            .collect::<Result<Vec<_>, _>>()
            .context("invalid selected_months")?;
        Ok(Some(months))
    }
}

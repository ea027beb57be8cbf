// src/aggregate/distribution.rs

use serde::Serialize;

use super::group::{group_sum, GroupKey, SortOrder, ValueField};
use crate::data::{loader, Transaction};
use crate::error::EmptyResultError;

/// Equal-width histogram bin. `upper` is exclusive except for the last bin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// A category's slice of total revenue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Share {
    pub category: String,
    pub revenue: f64,
    pub percent: f64,
}

/// Value type of a dataset column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnType {
    Integer,
    Float,
    Text,
    Date,
}

/// Type and missing-value count of one known column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnInfo {
    pub column: &'static str,
    pub dtype: ColumnType,
    pub missing: usize,
}

/// Count / mean / spread / quartiles of one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: &'static str,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; undefined below two values.
    pub std: Option<f64>,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

/// Histogram of customer ages over `[min age, max age]` split into `bins`.
///
/// When every age is equal the range is widened to `age ± 0.5`.
pub fn age_histogram<'a, I>(records: I, bins: usize) -> Vec<HistogramBin>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let ages: Vec<f64> = records.into_iter().map(|r| r.age as f64).collect();
    histogram(&ages, bins)
}

fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let (mut lo, mut hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;
    let mut edges: Vec<f64> = (0..bins).map(|i| lo + width * i as f64).collect();
    edges.push(hi);

    let mut counts = vec![0usize; bins];
    for &v in values {
        // the division can land one bin off an edge; settle against the reported edges
        let mut idx = (((v - lo) / width) as usize).min(bins - 1);
        if idx > 0 && v < edges[idx] {
            idx -= 1;
        } else if idx + 1 < bins && v >= edges[idx + 1] {
            idx += 1;
        }
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: edges[i],
            upper: edges[i + 1],
            count,
        })
        .collect()
}

/// Percentage of total revenue per category, categories in name order.
/// Empty when there is no revenue to share.
pub fn revenue_share<'a, I>(records: I) -> Vec<Share>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let by_category = group_sum(records, GroupKey::Category, ValueField::TotalAmount)
        .sorted(SortOrder::KeyAscending);
    let total: f64 = by_category.entries.iter().map(|e| e.value).sum();
    if total <= 0.0 {
        return Vec::new();
    }
    by_category
        .entries
        .into_iter()
        .map(|e| Share {
            percent: e.value / total * 100.0,
            revenue: e.value,
            category: e.key,
        })
        .collect()
}

/// Type and missing count of every known column. Required columns never have
/// gaps; an optional column that is absent from the file counts as all missing.
pub fn column_info(records: &[Transaction]) -> Vec<ColumnInfo> {
    let missing = |f: fn(&Transaction) -> bool| records.iter().filter(|r| f(r)).count();
    let info = |column, dtype, missing| ColumnInfo {
        column,
        dtype,
        missing,
    };
    vec![
        info(
            loader::COL_TRANSACTION_ID,
            ColumnType::Text,
            missing(|r| r.transaction_id.is_none()),
        ),
        info(loader::COL_DATE, ColumnType::Date, 0),
        info(
            loader::COL_CUSTOMER_ID,
            ColumnType::Text,
            missing(|r| r.customer_id.is_none()),
        ),
        info(loader::COL_GENDER, ColumnType::Text, 0),
        info(loader::COL_AGE, ColumnType::Integer, 0),
        info(loader::COL_CATEGORY, ColumnType::Text, 0),
        info(loader::COL_QUANTITY, ColumnType::Integer, 0),
        info(
            loader::COL_PRICE_PER_UNIT,
            ColumnType::Float,
            missing(|r| r.price_per_unit.is_none()),
        ),
        info(loader::COL_TOTAL_AMOUNT, ColumnType::Float, 0),
    ]
}

/// Summary statistics of the numeric columns. `Price per Unit` is included
/// only when every record carries it.
pub fn describe(records: &[Transaction]) -> Result<Vec<ColumnSummary>, EmptyResultError> {
    if records.is_empty() {
        return Err(EmptyResultError::new("column statistics"));
    }

    let mut out = Vec::with_capacity(4);
    out.push(summarize(
        loader::COL_AGE,
        records.iter().map(|r| r.age as f64).collect(),
    ));
    out.push(summarize(
        loader::COL_QUANTITY,
        records.iter().map(|r| r.quantity as f64).collect(),
    ));
    let prices: Option<Vec<f64>> = records.iter().map(|r| r.price_per_unit).collect();
    if let Some(prices) = prices {
        out.push(summarize(loader::COL_PRICE_PER_UNIT, prices));
    }
    out.push(summarize(
        loader::COL_TOTAL_AMOUNT,
        records.iter().map(|r| r.total_amount).collect(),
    ));
    Ok(out)
}

/// `values` must be non-empty.
fn summarize(column: &'static str, mut values: Vec<f64>) -> ColumnSummary {
    values.sort_by(f64::total_cmp);
    let n = values.len();
    let mean = values.iter().sum::<f64>() / n as f64;
    let std = (n > 1).then(|| {
        let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (n - 1) as f64).sqrt()
    });

    ColumnSummary {
        column,
        count: n,
        mean,
        std,
        min: values[0],
        p25: quantile(&values, 0.25),
        p50: quantile(&values, 0.50),
        p75: quantile(&values, 0.75),
        max: values[n - 1],
    }
}

/// Linear-interpolated quantile of sorted, non-empty `sorted`.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let below = pos.floor() as usize;
    let above = pos.ceil() as usize;
    let frac = pos - below as f64;
    sorted[below] + (sorted[above] - sorted[below]) * frac
}

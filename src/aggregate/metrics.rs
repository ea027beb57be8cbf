use serde::Serialize;
use std::collections::BTreeMap;

use crate::data::Transaction;
use crate::error::EmptyResultError;

/// Headline KPIs of a record set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryMetrics {
    pub total_revenue: f64,
    pub total_units: u64,
    pub top_category: String,
    pub transactions: usize,
}

/// Total revenue, total units and the highest-revenue category.
///
/// Categories tied on revenue resolve to the first in ascending name order.
pub fn summary_metrics<'a, I>(records: I) -> Result<SummaryMetrics, EmptyResultError>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut total_revenue = 0.0;
    let mut total_units: u64 = 0;
    let mut transactions = 0usize;
    let mut by_category: BTreeMap<&str, f64> = BTreeMap::new();

    for r in records {
        total_revenue += r.total_amount;
        total_units += u64::from(r.quantity);
        transactions += 1;
        *by_category.entry(r.category.as_str()).or_insert(0.0) += r.total_amount;
    }

    let mut top: Option<(&str, f64)> = None;
    for (category, revenue) in by_category {
        match top {
            Some((_, best)) if revenue <= best => {}
            _ => top = Some((category, revenue)),
        }
    }
    let (top_category, _) = top.ok_or(EmptyResultError::new("top category"))?;

    Ok(SummaryMetrics {
        total_revenue,
        total_units,
        top_category: top_category.to_string(),
        transactions,
    })
}

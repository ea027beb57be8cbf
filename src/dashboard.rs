// src/dashboard.rs

use chrono::Month;
use serde::Serialize;
use tracing::debug;

use crate::aggregate::{
    age_histogram, available_months, column_info, describe, filter_by_months, group_count,
    group_sum, revenue_share, summary_metrics, ColumnInfo, ColumnSummary, GroupKey, GroupedSums,
    HistogramBin, Share, SortOrder, SummaryMetrics, ValueField,
};
use crate::config::DashboardConfig;
use crate::data::{month_abbrev, Transaction};
use crate::error::EmptyResultError;

/// Exploratory sections, always computed over the whole dataset.
#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub rows: usize,
    pub preview: Vec<Transaction>,
    pub column_info: Vec<ColumnInfo>,
    pub columns: Vec<ColumnSummary>,
    pub category_counts: GroupedSums,
    pub gender_counts: GroupedSums,
    pub age_histogram: Vec<HistogramBin>,
    pub revenue_by_category: GroupedSums,
}

/// Chart series over the month-filtered records.
#[derive(Debug, Clone, Serialize)]
pub struct Charts {
    pub units_by_category: GroupedSums,
    pub monthly_revenue: GroupedSums,
    pub revenue_share: Vec<Share>,
}

/// Everything one page render needs.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub available_months: Vec<&'static str>,
    pub selected_months: Vec<&'static str>,
    pub kpis: SummaryMetrics,
    pub overview: Overview,
    pub charts: Charts,
}

impl Dashboard {
    /// Build a snapshot for `selected` months. Fails when the selection leaves
    /// no records, since the KPIs are undefined then.
    pub fn build(
        records: &[Transaction],
        selected: &[Month],
        config: &DashboardConfig,
    ) -> Result<Self, EmptyResultError> {
        let filtered = filter_by_months(records, selected);
        debug!(
            total = records.len(),
            kept = filtered.len(),
            "applied month filter"
        );

        let kpis = summary_metrics(filtered.iter().copied())?;

        let overview = Overview {
            rows: records.len(),
            preview: records.iter().take(config.preview_rows).cloned().collect(),
            column_info: column_info(records),
            columns: describe(records)?,
            category_counts: group_count(records, GroupKey::Category),
            gender_counts: group_count(records, GroupKey::Gender),
            age_histogram: age_histogram(records, config.histogram_bins),
            revenue_by_category: group_sum(records, GroupKey::Category, ValueField::TotalAmount)
                .sorted(SortOrder::Ascending),
        };

        let charts = Charts {
            units_by_category: group_sum(
                filtered.iter().copied(),
                GroupKey::Category,
                ValueField::Quantity,
            ),
            monthly_revenue: group_sum(
                filtered.iter().copied(),
                GroupKey::Month,
                ValueField::TotalAmount,
            ),
            revenue_share: revenue_share(filtered.iter().copied()),
        };

        Ok(Self {
            available_months: available_months(records)
                .into_iter()
                .map(month_abbrev)
                .collect(),
            selected_months: sorted_labels(selected),
            kpis,
            overview,
            charts,
        })
    }
}

/// Month filter to apply: the configured one, or every month present in `records`.
pub fn resolve_selection(records: &[Transaction], configured: Option<Vec<Month>>) -> Vec<Month> {
    configured.unwrap_or_else(|| available_months(records))
}

fn sorted_labels(months: &[Month]) -> Vec<&'static str> {
    let mut months = months.to_vec();
    months.sort_by_key(|m| m.number_from_month());
    months.dedup();
    months.into_iter().map(month_abbrev).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tx(m: u32, category: &str, quantity: u32, amount: f64, age: u32, gender: &str) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2023, m, 10).unwrap();
        Transaction::new(date, category, quantity, amount, age, gender)
    }

    fn sample() -> Vec<Transaction> {
        vec![
            tx(1, "Beauty", 2, 100.0, 25, "Female"),
            tx(2, "Clothing", 1, 500.0, 40, "Male"),
            tx(2, "Electronics", 3, 900.0, 33, "Female"),
            tx(5, "Beauty", 4, 200.0, 58, "Male"),
            tx(1, "Clothing", 2, 60.0, 19, "Female"),
            tx(11, "Electronics", 1, 300.0, 47, "Female"),
        ]
    }

    #[test]
    fn test_full_selection() {
        let records = sample();
        let config = DashboardConfig::default();
        let months = resolve_selection(&records, None);
        let dash = Dashboard::build(&records, &months, &config).unwrap();

        assert_eq!(dash.available_months, vec!["Jan", "Feb", "May", "Nov"]);
        assert_eq!(dash.selected_months, dash.available_months);
        assert_eq!(dash.kpis.total_revenue, 2060.0);
        assert_eq!(dash.kpis.total_units, 13);
        assert_eq!(dash.kpis.top_category, "Electronics");

        assert_eq!(dash.overview.rows, 6);
        assert_eq!(dash.overview.preview.len(), 5);
        assert_eq!(dash.overview.age_histogram.len(), 15);
        assert_eq!(
            dash.overview.revenue_by_category.keys(),
            vec!["Beauty", "Clothing", "Electronics"]
        );
        assert_eq!(dash.charts.monthly_revenue.keys(), vec!["Jan", "Feb", "May", "Nov"]);
    }

    #[test]
    fn test_filtered_selection_only_affects_kpis_and_charts() {
        let records = sample();
        let config = DashboardConfig::default();
        let dash = Dashboard::build(&records, &[Month::February, Month::January], &config).unwrap();

        assert_eq!(dash.selected_months, vec!["Jan", "Feb"]);
        assert_eq!(dash.kpis.total_revenue, 1560.0);
        assert_eq!(dash.kpis.transactions, 4);
        assert_eq!(dash.charts.monthly_revenue.keys(), vec!["Jan", "Feb"]);
        assert_eq!(dash.charts.monthly_revenue.get("Feb"), Some(1400.0));
        assert_eq!(
            dash.charts.units_by_category.keys(),
            vec!["Clothing", "Electronics", "Beauty"]
        );
        // overview still spans all months
        assert_eq!(dash.overview.rows, 6);
        assert_eq!(dash.overview.category_counts.get("Beauty"), Some(2.0));
    }

    #[test]
    fn test_empty_selection_is_error() {
        let records = sample();
        let config = DashboardConfig::default();
        assert!(Dashboard::build(&records, &[], &config).is_err());
        assert!(Dashboard::build(&records, &[Month::July], &config).is_err());
    }

    #[test]
    fn test_basic_information_spans_whole_dataset() {
        let mut records = sample();
        records[4].price_per_unit = Some(30.0);
        let config = DashboardConfig::default();
        let dash = Dashboard::build(&records, &[Month::May], &config).unwrap();

        let info = &dash.overview.column_info;
        assert_eq!(info.len(), 9);
        let price = info.iter().find(|c| c.column == "Price per Unit").unwrap();
        assert_eq!(price.missing, 5);
        let date = info.iter().find(|c| c.column == "Date").unwrap();
        assert_eq!(date.missing, 0);
    }

    #[test]
    fn test_serializes_to_json() {
        let records = sample();
        let config = DashboardConfig::default();
        let dash = Dashboard::build(&records, &[Month::May], &config).unwrap();
        let json = serde_json::to_value(&dash).unwrap();
        assert_eq!(json["kpis"]["top_category"], "Beauty");
        assert_eq!(json["overview"]["preview"][0]["month"], "Jan");
        assert_eq!(json["charts"]["monthly_revenue"]["key"], "Month");
        assert_eq!(json["overview"]["column_info"][1]["dtype"], "Date");
    }
}

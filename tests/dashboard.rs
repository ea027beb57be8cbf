use chrono::Month;
use retail_dashboard::{
    aggregate::{filter_by_months, group_sum, summary_metrics, GroupKey, ValueField},
    cache::DatasetCache,
    config::DashboardConfig,
    dashboard::{resolve_selection, Dashboard},
    load_dataset,
};

const SAMPLE: &str = "tests/data/retail_sample.csv";

#[test]
fn test_sample_dataset_end_to_end() {
    let records = load_dataset(SAMPLE).expect("Failed to load sample data");
    assert_eq!(records.len(), 12);

    let all = resolve_selection(&records, None);
    assert_eq!(all.len(), 8);

    let metrics = summary_metrics(&records).unwrap();
    assert_eq!(metrics.total_revenue, 2935.0);
    assert_eq!(metrics.total_units, 27);
    assert_eq!(metrics.top_category, "Clothing");

    let feb = filter_by_months(&records, &[Month::February]);
    assert_eq!(feb.len(), 3);
    let feb_metrics = summary_metrics(feb.iter().copied()).unwrap();
    assert_eq!(feb_metrics.total_revenue, 1200.0);
    assert_eq!(feb_metrics.top_category, "Clothing");

    let trend = group_sum(&records, GroupKey::Month, ValueField::TotalAmount);
    assert_eq!(
        trend.keys(),
        vec!["Jan", "Feb", "Mar", "Apr", "May", "Oct", "Nov", "Dec"]
    );
    assert_eq!(trend.get("May"), Some(600.0));
}

#[test]
fn test_cached_dashboard_json() {
    let records = DatasetCache::global().get_or_load(SAMPLE).unwrap();
    let again = DatasetCache::global().get_or_load(SAMPLE).unwrap();
    assert_eq!(records, again);

    let config = DashboardConfig::default();
    let dash = Dashboard::build(&records, &[Month::May, Month::October], &config).unwrap();
    assert_eq!(dash.kpis.total_revenue, 875.0);
    assert_eq!(dash.overview.columns.len(), 4);
    assert!(dash.overview.column_info.iter().all(|c| c.missing == 0));

    let json = serde_json::to_value(&dash).unwrap();
    assert_eq!(json["selected_months"], serde_json::json!(["May", "Oct"]));
    assert_eq!(json["charts"]["monthly_revenue"]["entries"][1]["key"], "Oct");
}

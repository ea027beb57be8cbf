pub mod distribution;
pub mod filter;
pub mod group;
pub mod metrics;

pub use distribution::{
    age_histogram, column_info, describe, revenue_share, ColumnInfo, ColumnSummary, ColumnType,
    HistogramBin, Share,
};
pub use filter::{available_months, filter_by_months};
pub use group::{group_count, group_sum, GroupEntry, GroupKey, GroupedSums, SortOrder, ValueField};
pub use metrics::{summary_metrics, SummaryMetrics};

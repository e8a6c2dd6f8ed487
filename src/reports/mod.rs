//! Statistics for the money tracker
//!
//! Pure aggregations over repository query results: period selection,
//! income/expense/balance totals, category and month breakdowns, daily
//! grouping and search.

pub mod daily;
pub mod period;
pub mod search;
pub mod summary;

pub use daily::{daily_groups, DailyGroup};
pub use period::{is_multi_month, transactions_for_period, Granularity};
pub use search::{search, SearchFilter};
pub use summary::{
    category_breakdown, filter_by_summary_type, monthly_series, percentages, totals,
    CategoryTotal, MonthTotal, SummaryType, Totals,
};

pub mod ad;
pub mod dataset;
pub mod filter;
pub mod result;
pub mod sales;
pub mod store_key;

pub use ad::{AdClickRecord, AdDailyRecord, AdSummaryRecord};
pub use dataset::Dataset;
pub use filter::{FilterContext, MonthSelection, ALL_MONTHS};
pub use result::{
    ClickTrendPoint, Dashboard, ExtractKind, Insight, KpiDisplay, KpiSummary, PlatformShare,
    RankingEntry, RoasHealth, RoasPoint, RoasReport, SelectionOptions, Shortfall, StoreTrendPoint,
};
pub use sales::{DongSalesRecord, MenuSalesRecord, SalesRecord};
pub use store_key::{KeyKind, StoreKeyed};

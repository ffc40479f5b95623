pub mod canonicalizer;
pub mod currency;
pub mod dashboard;
pub mod filter;
pub mod joiner;
pub mod kpi;
pub mod ranking;

pub use canonicalizer::{AliasTable, StoreAlias};
pub use dashboard::DashboardService;
pub use filter::{ContainmentMatch, StoreMatcher, TableFilter};
pub use joiner::CrossSourceJoiner;
pub use ranking::MenuDenylist;

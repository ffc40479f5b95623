pub mod api;
pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod service;

pub use config::AppConfig;
pub use error::{AnalyticsError, IngestError};
pub use ingest::load_dataset;
pub use service::{AliasTable, DashboardService};

pub mod handlers;

pub use handlers::*;

use crate::service::DashboardService;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;

/// 构建路由
pub fn router(service: Arc<DashboardService>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/options", get(options))
        .route("/api/dashboard", post(dashboard))
        .with_state(service)
        .layer(ServiceBuilder::new())
}

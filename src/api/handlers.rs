use crate::error::AnalyticsError;
use crate::models::{Dashboard, FilterContext, MonthSelection, SelectionOptions};
use crate::service::DashboardService;
use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 请求体: 当前筛选
///
/// 字段在处理函数里校验, 校验失败统一返回 400 和 `DashboardResponse`。
#[derive(Debug, Deserialize)]
pub struct DashboardRequest {
    #[serde(default)]
    pub stores: Vec<String>,
    /// "all" / 缺省 表示全部月份
    #[serde(default)]
    pub month: Option<String>,
    #[serde(default)]
    pub platforms: Vec<String>,
}

impl DashboardRequest {
    pub fn into_context(self) -> Result<FilterContext, AnalyticsError> {
        let month = match self.month.as_deref() {
            Some(raw) => MonthSelection::parse(raw)?,
            None => MonthSelection::All,
        };
        FilterContext::new(self.stores, month, self.platforms)
    }
}

/// 响应体
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub success: bool,
    pub message: String,
    pub dashboard: Option<Dashboard>,
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// 筛选项候选值
pub async fn options(State(service): State<Arc<DashboardService>>) -> Json<SelectionOptions> {
    Json(service.options())
}

/// 看板计算接口: 每次请求完整重算
pub async fn dashboard(
    State(service): State<Arc<DashboardService>>,
    Json(req): Json<DashboardRequest>,
) -> Response {
    let ctx = match req.into_context() {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::warn!("筛选条件无效: {}", e);
            let response = DashboardResponse {
                success: false,
                message: format!("Error: {}", e),
                dashboard: None,
            };
            return (StatusCode::BAD_REQUEST, Json(response)).into_response();
        }
    };

    let dashboard = service.compute(&ctx);
    let response = DashboardResponse {
        success: true,
        message: format!(
            "Computed dashboard for {} stores ({})",
            ctx.selected_stores().len(),
            ctx.selected_month()
        ),
        dashboard: Some(dashboard),
    };
    (StatusCode::OK, Json(response)).into_response()
}

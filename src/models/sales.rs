use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 日销售明细 (门店 × 日期 × 平台)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub store: String,
    pub order_date: NaiveDate,
    pub platform: String,
    pub month: String, // YYYY-MM
    pub total_sales: i64,
    pub order_count: i64,
}

/// 菜单销售 (门店 × 月份 × 菜品)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuSalesRecord {
    pub store: String,
    pub month: String,
    pub item_name: String,
    pub total_sales: i64,
}

/// 行政洞(区域)外卖销售
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DongSalesRecord {
    pub store: String,
    pub month: String,
    pub dong: String,
    pub total_sales: i64,
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 广告 "Now" 汇总: 近期复购率
///
/// 复购率保留原始文本 ("12.5%" 或 "12.5"), 聚合时再转换,
/// 无法转换的值在均值中被排除。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdSummaryRecord {
    pub store_label: String,
    pub recent_reorder_rate: Option<String>,
}

/// 广告 "Click" 汇总
///
/// 数值列为 `None` 表示源数据无法解析, 不等同于 0。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdClickRecord {
    pub store_label: String,
    pub total_ad_spend: Option<i64>,
    pub total_ad_sales: Option<i64>,
    pub total_clicks: Option<i64>,
}

/// 广告日粒度明细
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdDailyRecord {
    pub store_label: String,
    pub date: NaiveDate,
    pub clicks: Option<i64>,
    pub ad_spend: Option<i64>,
}

impl AdDailyRecord {
    /// 由日期推导的月份 (YYYY-MM)
    pub fn month(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }
}

use super::{
    AdClickRecord, AdDailyRecord, AdSummaryRecord, DongSalesRecord, MenuSalesRecord, SalesRecord,
};
use serde::{Deserialize, Serialize};

/// 会话级数据集: 六类导出表, 加载后只读
///
/// 缺失的导出表即空表, 所有下游计算对空表退化为空结果。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub daily_sales: Vec<SalesRecord>,
    pub menu_sales: Vec<MenuSalesRecord>,
    pub dong_sales: Vec<DongSalesRecord>,
    pub ad_summary: Vec<AdSummaryRecord>,
    pub ad_click: Vec<AdClickRecord>,
    pub ad_daily: Vec<AdDailyRecord>,
}

impl Dataset {
    pub fn is_empty(&self) -> bool {
        self.daily_sales.is_empty()
            && self.menu_sales.is_empty()
            && self.dong_sales.is_empty()
            && self.ad_summary.is_empty()
            && self.ad_click.is_empty()
            && self.ad_daily.is_empty()
    }
}

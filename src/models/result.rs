use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 六类导出表
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractKind {
    DailySales,
    MenuSales,
    DongSales,
    AdSummary,
    AdClick,
    AdDaily,
}

impl fmt::Display for ExtractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DailySales => "daily_sales",
            Self::MenuSales => "menu_sales",
            Self::DongSales => "dong_sales",
            Self::AdSummary => "ad_summary",
            Self::AdClick => "ad_click",
            Self::AdDaily => "ad_daily",
        };
        f.write_str(name)
    }
}

/// 数据不足的原因 (用于展示层给出具体提示, 而非笼统报错)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Shortfall {
    /// 导出表缺失或为空
    MissingExtract { extract: ExtractKind },
    /// 导出表存在, 但筛选后没有行
    NoMatchingRows { extract: ExtractKind },
    /// 有行, 但目标列全部无法解析
    UnparseableValues { extract: ExtractKind, field: String },
    /// 跨源关联结果为空
    NoJoinMatches,
}

/// 单个分析区块的结果: 有数据 或 数据不足
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum Insight<T> {
    Ready(T),
    Insufficient(Shortfall),
}

impl<T> Insight<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(v) => Some(v),
            Self::Insufficient(_) => None,
        }
    }

    pub fn shortfall(&self) -> Option<&Shortfall> {
        match self {
            Self::Ready(_) => None,
            Self::Insufficient(s) => Some(s),
        }
    }
}

/// 核心指标
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct KpiSummary {
    pub total_sales: i64,
    pub total_orders: i64,
    pub average_ticket: f64,
}

/// 核心指标的展示文本
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiDisplay {
    pub total_sales: String,
    pub total_orders: String,
    pub average_ticket: String,
}

/// 门店日销售趋势点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreTrendPoint {
    pub date: NaiveDate,
    pub store: String,
    pub total_sales: i64,
    pub display: String,
}

/// 平台占比
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformShare {
    pub platform: String,
    pub total_sales: i64,
    pub share_pct: f64,
    pub display: String,
}

/// ROAS 健康度标签 (仅用于展示)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoasHealth {
    Healthy,
    NeedsAttention,
    /// 广告费为 0, ROAS 无定义
    Undetermined,
}

/// 门店级 ROAS 关联结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoasPoint {
    pub store_label: String,
    pub store: String,
    pub ad_spend: i64,
    pub pos_sales: i64,
    /// POS 销售 / 广告费 × 100
    pub roas: Option<f64>,
    pub health: RoasHealth,
    pub ad_spend_display: String,
    pub pos_sales_display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoasReport {
    pub points: Vec<RoasPoint>,
    pub total_ad_spend: i64,
    pub total_pos_sales: i64,
    pub overall_roas: Option<f64>,
}

/// 按日对齐的点击量与 POS 销售
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickTrendPoint {
    pub date: NaiveDate,
    pub clicks: i64,
    pub pos_sales: i64,
}

/// 排名条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub name: String,
    pub total_sales: i64,
    pub display: String,
}

/// 筛选项候选值
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionOptions {
    pub stores: Vec<String>,
    /// 首项为 "all", 其后按月份倒序
    pub months: Vec<String>,
    pub platforms: Vec<String>,
}

/// 一次完整计算的输出
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    /// 日销售表缺失或筛选后为空时给出原因, 此时 KPI 与趋势均为零值
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales_shortfall: Option<Shortfall>,
    pub kpis: KpiSummary,
    pub kpi_display: KpiDisplay,
    /// 复购率均值 (%)
    pub reorder_rate: Insight<f64>,
    pub store_trend: Vec<StoreTrendPoint>,
    pub platform_share: Vec<PlatformShare>,
    pub roas: Insight<RoasReport>,
    pub click_trend: Insight<Vec<ClickTrendPoint>>,
    pub top_menus: Insight<Vec<RankingEntry>>,
    pub top_dongs: Insight<Vec<RankingEntry>>,
}

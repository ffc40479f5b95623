use crate::service::canonicalizer::StoreAlias;
use crate::service::joiner::DEFAULT_HEALTHY_ROAS;
use crate::service::ranking::{DEFAULT_DONG_TOP_N, DEFAULT_MENU_TOP_N};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub data: DataConfig,
    pub analytics: AnalyticsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// 导出表目录与文件名, 文件不存在时对应表为空
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub dir: PathBuf,
    pub daily_sales: String,
    pub menu_sales: String,
    pub dong_sales: String,
    pub ad_summary: String,
    pub ad_click: String,
    pub ad_daily: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("streamlit_data"),
            daily_sales: "mart_daily_sales.csv".to_string(),
            menu_sales: "mart_menu_sales.csv".to_string(),
            dong_sales: "mart_dong_sales.csv".to_string(),
            ad_summary: "mart_baemin_now.csv".to_string(),
            ad_click: "mart_baemin_click.csv".to_string(),
            ad_daily: "mart_baemin_click_daily.csv".to_string(),
        }
    }
}

/// 分析参数
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// 广告所属平台 (POS 侧对账时只取该平台销售)
    pub ad_platform: String,
    /// ROAS 健康阈值 (%)
    pub roas_healthy_threshold: f64,
    pub menu_top_n: usize,
    pub dong_top_n: usize,
    pub menu_denylist: Vec<String>,
    /// 追加到内置别名表之后
    pub aliases: Vec<StoreAlias>,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            ad_platform: "배달의민족".to_string(),
            roas_healthy_threshold: DEFAULT_HEALTHY_ROAS,
            menu_top_n: DEFAULT_MENU_TOP_N,
            dong_top_n: DEFAULT_DONG_TOP_N,
            menu_denylist: vec!["배달팁".to_string(), "쇼핑백".to_string()],
            aliases: Vec::new(),
        }
    }
}

impl AppConfig {
    /// 依次加载: 默认值 → franchise-insight.toml (可选) → 环境变量
    ///
    /// 环境变量以 `INSIGHT_` 为前缀, 层级用 `__` 分隔, 例如 `INSIGHT_SERVER__PORT=9000`。
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name("franchise-insight").required(false))
            .add_source(
                config::Environment::with_prefix("INSIGHT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

use std::path::PathBuf;
use thiserror::Error;

/// 分析引擎错误 (仅用于输入校验, 计算本身不会失败)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    /// 门店或平台选择为空
    #[error("selection `{field}` must contain at least one value")]
    EmptySelection { field: &'static str },

    /// 月份不是 YYYY-MM 格式
    #[error("invalid month `{0}`, expected YYYY-MM")]
    InvalidMonth(String),

    /// 别名表冲突 (会破坏幂等性)
    #[error("alias `{alias}` conflicts with canonical name `{canonical}`")]
    AliasConflict { alias: String, canonical: String },
}

/// 数据导入错误
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed csv in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// 所有候选编码均无法解码
    #[error("{path} is not decodable with any candidate encoding")]
    Encoding { path: PathBuf },
}

use crate::error::AnalyticsError;
use chrono::NaiveDate;
use indexmap::IndexSet;
use serde::Serialize;
use std::fmt;

/// "全部月份" 的外部写法
pub const ALL_MONTHS: &str = "all";

/// 月份选择: 全部 或 指定 YYYY-MM
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MonthSelection {
    #[default]
    All,
    Month(String),
}

impl MonthSelection {
    /// 解析 "all"/"전체"/空串 或 YYYY-MM
    pub fn parse(raw: &str) -> Result<Self, AnalyticsError> {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case(ALL_MONTHS) || raw == "전체" {
            return Ok(Self::All);
        }
        if raw.len() != 7
            || NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d").is_err()
        {
            return Err(AnalyticsError::InvalidMonth(raw.to_string()));
        }
        Ok(Self::Month(raw.to_string()))
    }

    /// 该月份谓词是否接受给定月份
    pub fn accepts(&self, month: &str) -> bool {
        match self {
            Self::All => true,
            Self::Month(selected) => selected == month,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl fmt::Display for MonthSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_MONTHS),
            Self::Month(m) => f.write_str(m),
        }
    }
}

impl Serialize for MonthSelection {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// 当前筛选条件
///
/// 只能通过 [`FilterContext::new`] 构造, 保证门店和平台集合非空。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterContext {
    selected_stores: IndexSet<String>,
    selected_month: MonthSelection,
    selected_platforms: IndexSet<String>,
}

impl FilterContext {
    pub fn new<S, P>(stores: S, month: MonthSelection, platforms: P) -> Result<Self, AnalyticsError>
    where
        S: IntoIterator,
        S::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        let selected_stores: IndexSet<String> = stores.into_iter().map(Into::into).collect();
        if selected_stores.is_empty() {
            return Err(AnalyticsError::EmptySelection { field: "stores" });
        }
        let selected_platforms: IndexSet<String> = platforms.into_iter().map(Into::into).collect();
        if selected_platforms.is_empty() {
            return Err(AnalyticsError::EmptySelection { field: "platforms" });
        }
        Ok(Self {
            selected_stores,
            selected_month: month,
            selected_platforms,
        })
    }

    pub fn selected_stores(&self) -> &IndexSet<String> {
        &self.selected_stores
    }

    pub fn selected_month(&self) -> &MonthSelection {
        &self.selected_month
    }

    pub fn selected_platforms(&self) -> &IndexSet<String> {
        &self.selected_platforms
    }

    pub fn has_store(&self, store: &str) -> bool {
        self.selected_stores.contains(store)
    }

    pub fn has_platform(&self, platform: &str) -> bool {
        self.selected_platforms.contains(platform)
    }
}

use crate::models::{DongSalesRecord, MenuSalesRecord, RankingEntry};
use crate::service::currency::format_krw;
use indexmap::IndexMap;

pub const DEFAULT_MENU_TOP_N: usize = 10;
pub const DEFAULT_DONG_TOP_N: usize = 15;

/// 非商品行 (配送费、购物袋等), 仅从菜单排名中排除
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuDenylist {
    patterns: Vec<String>,
}

impl MenuDenylist {
    pub fn new<I>(patterns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .map(Into::into)
                .filter(|p: &String| !p.is_empty())
                .collect(),
        }
    }

    /// 品名包含任一模式即视为非商品
    pub fn is_denied(&self, item_name: &str) -> bool {
        self.patterns.iter().any(|p| item_name.contains(p.as_str()))
    }
}

impl Default for MenuDenylist {
    fn default() -> Self {
        Self::new(["배달팁", "쇼핑백"])
    }
}

/// 分组求和 → 降序稳定排序 → 排除 → 截断
///
/// 并列时保持首次出现的顺序。
fn top_n<'a, I, F>(entries: I, n: usize, exclude: F) -> Vec<RankingEntry>
where
    I: IntoIterator<Item = (&'a str, i64)>,
    F: Fn(&str) -> bool,
{
    let mut grouped: IndexMap<&str, i64> = IndexMap::new();
    for (name, sales) in entries {
        *grouped.entry(name).or_insert(0) += sales;
    }

    let mut ranked: Vec<(&str, i64)> = grouped.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .into_iter()
        .filter(|entry| !exclude(entry.0))
        .take(n)
        .map(|(name, total_sales)| RankingEntry {
            name: name.to_string(),
            total_sales,
            display: format_krw(total_sales),
        })
        .collect()
}

/// 菜单 TOP N
pub fn rank_menus<'a, I>(rows: I, denylist: &MenuDenylist, n: usize) -> Vec<RankingEntry>
where
    I: IntoIterator<Item = &'a MenuSalesRecord>,
{
    top_n(
        rows.into_iter().map(|r| (r.item_name.as_str(), r.total_sales)),
        n,
        |name| denylist.is_denied(name),
    )
}

/// 配送区域(洞) TOP N
pub fn rank_dongs<'a, I>(rows: I, n: usize) -> Vec<RankingEntry>
where
    I: IntoIterator<Item = &'a DongSalesRecord>,
{
    top_n(
        rows.into_iter().map(|r| (r.dong.as_str(), r.total_sales)),
        n,
        |_| false,
    )
}

use crate::models::{
    AdClickRecord, AdDailyRecord, AdSummaryRecord, DongSalesRecord, FilterContext, KeyKind,
    MenuSalesRecord, SalesRecord, StoreKeyed,
};

/// 门店匹配策略
///
/// 广告导出的标签是自由文本, 与规范门店名不保证相等。
/// 等广告导出带上规范门店标识后, 可替换为精确匹配。
pub trait StoreMatcher {
    fn matches(&self, label: &str, store: &str) -> bool;

    fn matches_any<'a, I>(&self, label: &str, stores: I) -> bool
    where
        I: IntoIterator<Item = &'a String>,
    {
        stores.into_iter().any(|s| self.matches(label, s))
    }
}

/// 子串包含匹配: 任一选中门店名出现在标签中即匹配
///
/// 当一个门店名是另一个门店标签的子串时会产生误匹配, 目前不做消歧。
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainmentMatch;

impl StoreMatcher for ContainmentMatch {
    fn matches(&self, label: &str, store: &str) -> bool {
        !store.is_empty() && label.contains(store)
    }
}

/// 按 [`FilterContext`] 过滤各类导出表
///
/// 所有方法返回源数据的引用视图, 不修改源表。
#[derive(Debug, Clone, Default)]
pub struct TableFilter<M = ContainmentMatch> {
    matcher: M,
}

impl TableFilter<ContainmentMatch> {
    pub fn new() -> Self {
        Self {
            matcher: ContainmentMatch,
        }
    }
}

impl<M: StoreMatcher> TableFilter<M> {
    pub fn with_matcher(matcher: M) -> Self {
        Self { matcher }
    }

    /// 门店谓词: 严格列用集合成员判断, 标签列走匹配策略
    pub fn store_selected<T: StoreKeyed>(&self, row: &T, ctx: &FilterContext) -> bool {
        match T::KEY_KIND {
            KeyKind::Store => ctx.has_store(row.store_key()),
            KeyKind::Label => self
                .matcher
                .matches_any(row.store_key(), ctx.selected_stores()),
        }
    }

    /// 门店 + 平台 + 月份
    pub fn sales<'a>(&self, rows: &'a [SalesRecord], ctx: &FilterContext) -> Vec<&'a SalesRecord> {
        rows.iter()
            .filter(|r| {
                self.store_selected(*r, ctx)
                    && ctx.has_platform(&r.platform)
                    && ctx.selected_month().accepts(&r.month)
            })
            .collect()
    }

    /// 门店 + 月份 + 指定平台 (不受平台选择影响, 用于广告渠道对账)
    pub fn sales_on_platform<'a>(
        &self,
        rows: &'a [SalesRecord],
        ctx: &FilterContext,
        platform: &str,
    ) -> Vec<&'a SalesRecord> {
        rows.iter()
            .filter(|r| {
                r.platform == platform
                    && self.store_selected(*r, ctx)
                    && ctx.selected_month().accepts(&r.month)
            })
            .collect()
    }

    pub fn menu_sales<'a>(
        &self,
        rows: &'a [MenuSalesRecord],
        ctx: &FilterContext,
    ) -> Vec<&'a MenuSalesRecord> {
        rows.iter()
            .filter(|r| self.store_selected(*r, ctx) && ctx.selected_month().accepts(&r.month))
            .collect()
    }

    pub fn dong_sales<'a>(
        &self,
        rows: &'a [DongSalesRecord],
        ctx: &FilterContext,
    ) -> Vec<&'a DongSalesRecord> {
        rows.iter()
            .filter(|r| self.store_selected(*r, ctx) && ctx.selected_month().accepts(&r.month))
            .collect()
    }

    /// 仅门店标签 (汇总表没有月份列)
    pub fn ad_summary<'a>(
        &self,
        rows: &'a [AdSummaryRecord],
        ctx: &FilterContext,
    ) -> Vec<&'a AdSummaryRecord> {
        rows.iter().filter(|r| self.store_selected(*r, ctx)).collect()
    }

    pub fn ad_click<'a>(
        &self,
        rows: &'a [AdClickRecord],
        ctx: &FilterContext,
    ) -> Vec<&'a AdClickRecord> {
        rows.iter().filter(|r| self.store_selected(*r, ctx)).collect()
    }

    /// 门店标签 + 由日期推导的月份
    pub fn ad_daily<'a>(
        &self,
        rows: &'a [AdDailyRecord],
        ctx: &FilterContext,
    ) -> Vec<&'a AdDailyRecord> {
        let month = ctx.selected_month();
        rows.iter()
            .filter(|r| self.store_selected(*r, ctx) && (month.is_all() || month.accepts(&r.month())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MonthSelection;
    use chrono::NaiveDate;

    fn sale(store: &str, day: u32, month: u32, platform: &str, amount: i64) -> SalesRecord {
        SalesRecord {
            store: store.to_string(),
            order_date: NaiveDate::from_ymd_opt(2024, month, day).unwrap(),
            platform: platform.to_string(),
            month: format!("2024-{:02}", month),
            total_sales: amount,
            order_count: 1,
        }
    }

    fn ctx(stores: &[&str], month: MonthSelection, platforms: &[&str]) -> FilterContext {
        FilterContext::new(stores.iter().copied(), month, platforms.iter().copied()).unwrap()
    }

    #[test]
    fn test_containment_match() {
        let m = ContainmentMatch;
        assert!(m.matches("[배민] 부평점 1호", "부평점"));
        assert!(!m.matches("부평점", "부평역점"));
        assert!(!m.matches("부평점", ""));
    }

    #[test]
    fn test_sales_filter_is_subset_and_satisfies_predicates() {
        let rows = vec![
            sale("A점", 1, 1, "배달의민족", 100),
            sale("A점", 2, 1, "쿠팡이츠", 200),
            sale("B점", 3, 1, "배달의민족", 300),
            sale("A점", 1, 2, "배달의민족", 400),
            sale("C점", 1, 1, "배달의민족", 500),
        ];
        let c = ctx(
            &["A점", "B점"],
            MonthSelection::Month("2024-01".to_string()),
            &["배달의민족"],
        );

        let out = TableFilter::new().sales(&rows, &c);
        assert_eq!(out.len(), 2);
        for r in &out {
            assert!(rows.contains(*r));
            assert!(c.has_store(&r.store));
            assert!(c.has_platform(&r.platform));
            assert_eq!(r.month, "2024-01");
        }
        // 源表不受影响
        assert_eq!(rows.len(), 5);
    }

    #[test]
    fn test_store_column_is_not_substring_matched() {
        let rows = vec![MenuSalesRecord {
            store: "A점 본점".to_string(),
            month: "2024-01".to_string(),
            item_name: "양념".to_string(),
            total_sales: 10,
        }];
        let c = ctx(&["A점"], MonthSelection::All, &["배달의민족"]);
        assert!(TableFilter::new().menu_sales(&rows, &c).is_empty());
    }

    #[test]
    fn test_label_filters_use_containment() {
        let rows = vec![
            AdClickRecord {
                store_label: "[우리가게클릭] A점".to_string(),
                total_ad_spend: Some(1),
                total_ad_sales: None,
                total_clicks: None,
            },
            AdClickRecord {
                store_label: "[우리가게클릭] D점".to_string(),
                total_ad_spend: Some(1),
                total_ad_sales: None,
                total_clicks: None,
            },
        ];
        let c = ctx(&["A점", "B점"], MonthSelection::Month("2024-05".to_string()), &["x"]);
        let out = TableFilter::new().ad_click(&rows, &c);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].store_label, "[우리가게클릭] A점");
    }

    #[test]
    fn test_ad_daily_derives_month_from_date() {
        let rows = vec![
            AdDailyRecord {
                store_label: "A점".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
                clicks: Some(3),
                ad_spend: None,
            },
            AdDailyRecord {
                store_label: "A점".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                clicks: Some(4),
                ad_spend: None,
            },
        ];
        let c = ctx(&["A점"], MonthSelection::Month("2024-02".to_string()), &["x"]);
        let out = TableFilter::new().ad_daily(&rows, &c);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].clicks, Some(4));

        let all = ctx(&["A점"], MonthSelection::All, &["x"]);
        assert_eq!(TableFilter::new().ad_daily(&rows, &all).len(), 2);
    }

    #[test]
    fn test_empty_extract_yields_empty_view() {
        let c = ctx(&["A점"], MonthSelection::All, &["x"]);
        let f = TableFilter::new();
        assert!(f.sales(&[], &c).is_empty());
        assert!(f.dong_sales(&[], &c).is_empty());
        assert!(f.ad_summary(&[], &c).is_empty());
    }
}

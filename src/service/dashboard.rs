use crate::config::AnalyticsConfig;
use crate::models::{
    Dashboard, Dataset, ExtractKind, FilterContext, Insight, SelectionOptions, Shortfall,
    ALL_MONTHS,
};
use crate::service::filter::TableFilter;
use crate::service::joiner::CrossSourceJoiner;
use crate::service::kpi;
use crate::service::ranking::{self, MenuDenylist};
use std::collections::BTreeSet;
use std::sync::Arc;

/// 看板服务: 持有只读数据集, 每次筛选变化时完整地同步重算一遍
///
/// 数据集应已做过门店别名统一。
pub struct DashboardService {
    dataset: Arc<Dataset>,
    filter: TableFilter,
    joiner: CrossSourceJoiner,
    denylist: MenuDenylist,
    settings: AnalyticsConfig,
}

impl DashboardService {
    pub fn new(dataset: Arc<Dataset>, settings: AnalyticsConfig) -> Self {
        Self {
            filter: TableFilter::new(),
            joiner: CrossSourceJoiner::new(settings.roas_healthy_threshold),
            denylist: MenuDenylist::new(settings.menu_denylist.iter().cloned()),
            dataset,
            settings,
        }
    }

    /// 筛选项候选值 (来自日销售表)
    pub fn options(&self) -> SelectionOptions {
        let sales = &self.dataset.daily_sales;
        let stores: BTreeSet<&str> = sales.iter().map(|r| r.store.as_str()).collect();
        let months: BTreeSet<&str> = sales.iter().map(|r| r.month.as_str()).collect();
        let platforms: BTreeSet<&str> = sales.iter().map(|r| r.platform.as_str()).collect();

        SelectionOptions {
            stores: stores.into_iter().map(str::to_string).collect(),
            months: std::iter::once(ALL_MONTHS.to_string())
                .chain(months.into_iter().rev().map(str::to_string))
                .collect(),
            platforms: platforms.into_iter().map(str::to_string).collect(),
        }
    }

    /// 计算完整看板
    pub fn compute(&self, ctx: &FilterContext) -> Dashboard {
        let ds = &*self.dataset;
        let f = &self.filter;

        let sales = f.sales(&ds.daily_sales, ctx);
        let ad_platform_sales = f.sales_on_platform(&ds.daily_sales, ctx, &self.settings.ad_platform);

        tracing::info!(
            "看板计算: 门店 {:?}, 月份 {}, 平台 {:?}, 销售行 {}",
            ctx.selected_stores(),
            ctx.selected_month(),
            ctx.selected_platforms(),
            sales.len()
        );

        let sales_shortfall = if ds.daily_sales.is_empty() {
            Some(Shortfall::MissingExtract {
                extract: ExtractKind::DailySales,
            })
        } else if sales.is_empty() {
            Some(Shortfall::NoMatchingRows {
                extract: ExtractKind::DailySales,
            })
        } else {
            None
        };

        let kpis = kpi::summarize(sales.iter().copied());
        let kpi_display = kpi::display(&kpis);

        let reorder_rate = require(&ds.ad_summary, ExtractKind::AdSummary, |rows| {
            kpi::reorder_rate(f.ad_summary(rows, ctx))
        });

        let roas = require(&ds.ad_click, ExtractKind::AdClick, |rows| {
            self.joiner
                .roas(f.ad_click(rows, ctx), ad_platform_sales.iter().copied())
        });

        let click_trend = require(&ds.ad_daily, ExtractKind::AdDaily, |rows| {
            self.joiner
                .click_trend(f.ad_daily(rows, ctx), ad_platform_sales.iter().copied())
        });

        let top_menus = require(&ds.menu_sales, ExtractKind::MenuSales, |rows| {
            let filtered = f.menu_sales(rows, ctx);
            if filtered.is_empty() {
                return Insight::Insufficient(Shortfall::NoMatchingRows {
                    extract: ExtractKind::MenuSales,
                });
            }
            Insight::Ready(ranking::rank_menus(
                filtered,
                &self.denylist,
                self.settings.menu_top_n,
            ))
        });

        let top_dongs = require(&ds.dong_sales, ExtractKind::DongSales, |rows| {
            let filtered = f.dong_sales(rows, ctx);
            if filtered.is_empty() {
                return Insight::Insufficient(Shortfall::NoMatchingRows {
                    extract: ExtractKind::DongSales,
                });
            }
            Insight::Ready(ranking::rank_dongs(filtered, self.settings.dong_top_n))
        });

        Dashboard {
            sales_shortfall,
            kpis,
            kpi_display,
            reorder_rate,
            store_trend: kpi::store_daily_trend(sales.iter().copied()),
            platform_share: kpi::platform_share(sales.iter().copied()),
            roas,
            click_trend,
            top_menus,
            top_dongs,
        }
    }
}

/// 导出表缺失时直接给出 MissingExtract, 否则执行计算
fn require<T, R, F>(rows: &[T], extract: ExtractKind, compute: F) -> Insight<R>
where
    F: FnOnce(&[T]) -> Insight<R>,
{
    if rows.is_empty() {
        tracing::debug!("导出表 {} 缺失, 跳过", extract);
        return Insight::Insufficient(Shortfall::MissingExtract { extract });
    }
    compute(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MonthSelection, SalesRecord};
    use chrono::NaiveDate;

    fn sale(store: &str, month: u32, platform: &str) -> SalesRecord {
        SalesRecord {
            store: store.to_string(),
            order_date: NaiveDate::from_ymd_opt(2024, month, 1).unwrap(),
            platform: platform.to_string(),
            month: format!("2024-{:02}", month),
            total_sales: 10_000,
            order_count: 1,
        }
    }

    #[test]
    fn test_options() {
        let dataset = Dataset {
            daily_sales: vec![
                sale("B점", 1, "요기요"),
                sale("A점", 3, "배달의민족"),
                sale("A점", 2, "요기요"),
            ],
            ..Dataset::default()
        };
        let service = DashboardService::new(Arc::new(dataset), AnalyticsConfig::default());
        let options = service.options();
        assert_eq!(options.stores, vec!["A점", "B점"]);
        assert_eq!(options.months, vec!["all", "2024-03", "2024-02", "2024-01"]);
        assert_eq!(options.platforms, vec!["배달의민족", "요기요"]);
    }

    #[test]
    fn test_missing_extracts_degrade() {
        let dataset = Dataset {
            daily_sales: vec![sale("A점", 1, "배달의민족")],
            ..Dataset::default()
        };
        let service = DashboardService::new(Arc::new(dataset), AnalyticsConfig::default());
        let ctx = FilterContext::new(["A점"], MonthSelection::All, ["배달의민족"]).unwrap();
        let dash = service.compute(&ctx);

        assert_eq!(dash.kpis.total_sales, 10_000);
        assert_eq!(dash.sales_shortfall, None);
        assert_eq!(
            dash.roas,
            Insight::Insufficient(Shortfall::MissingExtract {
                extract: ExtractKind::AdClick
            })
        );
        assert_eq!(
            dash.top_menus,
            Insight::Insufficient(Shortfall::MissingExtract {
                extract: ExtractKind::MenuSales
            })
        );
        assert!(dash.reorder_rate.shortfall().is_some());
        assert!(dash.click_trend.shortfall().is_some());
    }

    #[test]
    fn test_empty_dataset() {
        let service = DashboardService::new(Arc::new(Dataset::default()), AnalyticsConfig::default());
        let ctx = FilterContext::new(["A점"], MonthSelection::All, ["배달의민족"]).unwrap();
        let dash = service.compute(&ctx);
        assert_eq!(dash.kpis.total_orders, 0);
        assert_eq!(dash.kpi_display.total_sales, "0원");
        assert!(dash.store_trend.is_empty());
        assert!(dash.platform_share.is_empty());
        assert_eq!(
            dash.sales_shortfall,
            Some(Shortfall::MissingExtract {
                extract: ExtractKind::DailySales
            })
        );
    }

    #[test]
    fn test_sales_filtered_to_nothing() {
        let dataset = Dataset {
            daily_sales: vec![sale("A점", 1, "배달의민족")],
            ..Dataset::default()
        };
        let service = DashboardService::new(Arc::new(dataset), AnalyticsConfig::default());
        let ctx = FilterContext::new(["A점"], MonthSelection::All, ["요기요"]).unwrap();
        let dash = service.compute(&ctx);
        assert_eq!(dash.kpis.total_sales, 0);
        assert_eq!(
            dash.sales_shortfall,
            Some(Shortfall::NoMatchingRows {
                extract: ExtractKind::DailySales
            })
        );
    }
}

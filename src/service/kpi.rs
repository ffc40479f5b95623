use crate::models::{
    AdSummaryRecord, ExtractKind, Insight, KpiDisplay, KpiSummary, PlatformShare, SalesRecord,
    Shortfall, StoreTrendPoint,
};
use crate::service::currency::{format_count, format_krw, format_krw_f64};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// 总销售额 / 总订单数 / 客单价
pub fn summarize<'a, I>(rows: I) -> KpiSummary
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    let (total_sales, total_orders) = rows
        .into_iter()
        .fold((0i64, 0i64), |(sales, orders), r| {
            (sales + r.total_sales, orders + r.order_count)
        });

    let average_ticket = if total_orders > 0 {
        total_sales as f64 / total_orders as f64
    } else {
        0.0
    };

    KpiSummary {
        total_sales,
        total_orders,
        average_ticket,
    }
}

pub fn display(kpis: &KpiSummary) -> KpiDisplay {
    KpiDisplay {
        total_sales: format_krw(kpis.total_sales),
        total_orders: format_count(kpis.total_orders),
        average_ticket: format_krw_f64(kpis.average_ticket),
    }
}

/// 解析 "12.5%" / " 12.5 " / "12" 形式的百分比
pub fn parse_rate(raw: &str) -> Option<f64> {
    let cleaned = raw.replace('%', "");
    let value: f64 = cleaned.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

/// 复购率简单平均 (不按订单量加权)
///
/// 无法解析的值被排除而不是按 0 计。
pub fn reorder_rate<'a, I>(rows: I) -> Insight<f64>
where
    I: IntoIterator<Item = &'a AdSummaryRecord>,
{
    let mut row_count = 0usize;
    let mut sum = 0.0;
    let mut parsed = 0usize;

    for r in rows {
        row_count += 1;
        match r.recent_reorder_rate.as_deref().and_then(parse_rate) {
            Some(v) => {
                sum += v;
                parsed += 1;
            }
            None => {
                tracing::debug!(
                    "复购率无法解析, 已排除: {} -> {:?}",
                    r.store_label, r.recent_reorder_rate
                );
            }
        }
    }

    if row_count == 0 {
        return Insight::Insufficient(Shortfall::NoMatchingRows {
            extract: ExtractKind::AdSummary,
        });
    }
    if parsed == 0 {
        return Insight::Insufficient(Shortfall::UnparseableValues {
            extract: ExtractKind::AdSummary,
            field: "recent_reorder_rate".to_string(),
        });
    }
    Insight::Ready(sum / parsed as f64)
}

/// 门店日销售趋势, 按日期、门店升序
pub fn store_daily_trend<'a, I>(rows: I) -> Vec<StoreTrendPoint>
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    let mut grouped: BTreeMap<(NaiveDate, &str), i64> = BTreeMap::new();
    for r in rows {
        *grouped.entry((r.order_date, r.store.as_str())).or_insert(0) += r.total_sales;
    }

    grouped
        .into_iter()
        .map(|((date, store), total_sales)| StoreTrendPoint {
            date,
            store: store.to_string(),
            total_sales,
            display: format_krw(total_sales),
        })
        .collect()
}

/// 平台销售占比, 按平台名排序
pub fn platform_share<'a, I>(rows: I) -> Vec<PlatformShare>
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    let mut grouped: BTreeMap<&str, i64> = BTreeMap::new();
    for r in rows {
        *grouped.entry(r.platform.as_str()).or_insert(0) += r.total_sales;
    }
    let total: i64 = grouped.values().sum();

    grouped
        .into_iter()
        .map(|(platform, total_sales)| PlatformShare {
            platform: platform.to_string(),
            total_sales,
            share_pct: if total > 0 {
                total_sales as f64 / total as f64 * 100.0
            } else {
                0.0
            },
            display: format_krw(total_sales),
        })
        .collect()
}

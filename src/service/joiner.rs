use crate::models::{
    AdClickRecord, AdDailyRecord, ClickTrendPoint, ExtractKind, Insight, RoasHealth, RoasPoint,
    RoasReport, SalesRecord, Shortfall,
};
use crate::service::currency::format_krw;
use crate::service::filter::{ContainmentMatch, StoreMatcher};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

/// ROAS 默认健康阈值 (%)
pub const DEFAULT_HEALTHY_ROAS: f64 = 300.0;

/// 跨源关联: 广告数据 × POS 数据
///
/// 调用方传入已过滤的视图; POS 视图应已限定为广告所属平台。
#[derive(Debug, Clone)]
pub struct CrossSourceJoiner<M = ContainmentMatch> {
    matcher: M,
    healthy_threshold: f64,
}

impl CrossSourceJoiner<ContainmentMatch> {
    pub fn new(healthy_threshold: f64) -> Self {
        Self {
            matcher: ContainmentMatch,
            healthy_threshold,
        }
    }
}

impl Default for CrossSourceJoiner<ContainmentMatch> {
    fn default() -> Self {
        Self::new(DEFAULT_HEALTHY_ROAS)
    }
}

/// POS 销售 / 广告费 × 100, 广告费为 0 时无定义
pub fn roas_pct(pos_sales: i64, ad_spend: i64) -> Option<f64> {
    (ad_spend > 0).then(|| pos_sales as f64 / ad_spend as f64 * 100.0)
}

pub fn classify(roas: Option<f64>, healthy_threshold: f64) -> RoasHealth {
    match roas {
        None => RoasHealth::Undetermined,
        Some(r) if r > healthy_threshold => RoasHealth::Healthy,
        Some(_) => RoasHealth::NeedsAttention,
    }
}

impl<M: StoreMatcher> CrossSourceJoiner<M> {
    pub fn with_matcher(matcher: M, healthy_threshold: f64) -> Self {
        Self {
            matcher,
            healthy_threshold,
        }
    }

    /// 门店级 ROAS: 广告费按标签汇总, POS 销售按门店汇总, 标签包含门店名即关联
    ///
    /// 任一侧没有对应行的门店被丢弃, 不补 0。
    pub fn roas<'a, 'b, A, S>(&self, clicks: A, pos: S) -> Insight<RoasReport>
    where
        A: IntoIterator<Item = &'a AdClickRecord>,
        S: IntoIterator<Item = &'b SalesRecord>,
    {
        let mut ad_by_label: BTreeMap<&str, i64> = BTreeMap::new();
        for r in clicks {
            let spend = ad_by_label.entry(r.store_label.as_str()).or_insert(0);
            match r.total_ad_spend {
                Some(v) => *spend += v,
                None => tracing::debug!("广告费无法解析, 已排除: {}", r.store_label),
            }
        }
        if ad_by_label.is_empty() {
            return Insight::Insufficient(Shortfall::NoMatchingRows {
                extract: ExtractKind::AdClick,
            });
        }

        let mut pos_by_store: BTreeMap<&str, i64> = BTreeMap::new();
        for r in pos {
            *pos_by_store.entry(r.store.as_str()).or_insert(0) += r.total_sales;
        }
        if pos_by_store.is_empty() {
            return Insight::Insufficient(Shortfall::NoMatchingRows {
                extract: ExtractKind::DailySales,
            });
        }

        let mut points = Vec::new();
        let mut matched_labels: BTreeSet<&str> = BTreeSet::new();
        let mut matched_stores: BTreeSet<&str> = BTreeSet::new();

        for (&label, &ad_spend) in &ad_by_label {
            for (&store, &pos_sales) in &pos_by_store {
                if !self.matcher.matches(label, store) {
                    continue;
                }
                let new_label = matched_labels.insert(label);
                let new_store = matched_stores.insert(store);
                if !new_label || !new_store {
                    tracing::warn!("ROAS 关联存在多重匹配: 标签 {} / 门店 {}", label, store);
                }
                let roas = roas_pct(pos_sales, ad_spend);
                points.push(RoasPoint {
                    store_label: label.to_string(),
                    store: store.to_string(),
                    ad_spend,
                    pos_sales,
                    roas,
                    health: classify(roas, self.healthy_threshold),
                    ad_spend_display: format_krw(ad_spend),
                    pos_sales_display: format_krw(pos_sales),
                });
            }
        }

        if points.is_empty() {
            tracing::info!(
                "ROAS 关联为空: {} 个广告标签, {} 个 POS 门店",
                ad_by_label.len(),
                pos_by_store.len()
            );
            return Insight::Insufficient(Shortfall::NoJoinMatches);
        }

        // 多重匹配时合计按去重后的标签/门店计算, 避免重复累加
        let total_ad_spend: i64 = matched_labels.iter().map(|l| ad_by_label[l]).sum();
        let total_pos_sales: i64 = matched_stores.iter().map(|s| pos_by_store[s]).sum();

        Insight::Ready(RoasReport {
            points,
            total_ad_spend,
            total_pos_sales,
            overall_roas: roas_pct(total_pos_sales, total_ad_spend),
        })
    }

    /// 按日对齐点击量与 POS 销售: 日期全外连接, 缺失补 0, 日期升序
    ///
    /// 只包含输入中出现过的日期, 不补齐日历空档。
    pub fn click_trend<'a, 'b, D, S>(&self, daily: D, pos: S) -> Insight<Vec<ClickTrendPoint>>
    where
        D: IntoIterator<Item = &'a AdDailyRecord>,
        S: IntoIterator<Item = &'b SalesRecord>,
    {
        let mut by_date: BTreeMap<NaiveDate, (i64, i64)> = BTreeMap::new();

        for r in daily {
            let entry = by_date.entry(r.date).or_insert((0, 0));
            if let Some(clicks) = r.clicks {
                entry.0 += clicks;
            }
        }
        for r in pos {
            by_date.entry(r.order_date).or_insert((0, 0)).1 += r.total_sales;
        }

        if by_date.is_empty() {
            return Insight::Insufficient(Shortfall::NoMatchingRows {
                extract: ExtractKind::AdDaily,
            });
        }

        Insight::Ready(
            by_date
                .into_iter()
                .map(|(date, (clicks, pos_sales))| ClickTrendPoint {
                    date,
                    clicks,
                    pos_sales,
                })
                .collect(),
        )
    }
}

use crate::error::AnalyticsError;
use crate::models::{Dataset, StoreKeyed};
use serde::{Deserialize, Serialize};

/// 单条别名映射: 旧名 -> 规范名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreAlias {
    pub from: String,
    pub to: String,
}

/// 门店别名表
///
/// 规则按插入顺序依次做子串替换, 反复执行直到结果不再变化,
/// 因此规则顺序、旧名与规范名部分重叠都不影响幂等性。
/// 插入时拒绝规范名含有旧名、或替换无法收敛的规则。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTable {
    aliases: Vec<StoreAlias>,
}

impl AliasTable {
    pub fn empty() -> Self {
        Self { aliases: Vec::new() }
    }

    /// 内置别名 + 额外别名
    pub fn with_extra(extra: &[StoreAlias]) -> Result<Self, AnalyticsError> {
        let mut table = Self::default();
        for alias in extra {
            table.insert(&alias.from, &alias.to)?;
        }
        Ok(table)
    }

    pub fn insert(&mut self, from: &str, to: &str) -> Result<(), AnalyticsError> {
        if from.is_empty() || from == to {
            return Ok(());
        }
        let conflict = |alias: &str, canonical: &str| AnalyticsError::AliasConflict {
            alias: alias.to_string(),
            canonical: canonical.to_string(),
        };
        if to.contains(from) {
            return Err(conflict(from, to));
        }
        for existing in &self.aliases {
            if existing.from == from && existing.to == to {
                return Ok(());
            }
            if existing.to.contains(from) {
                return Err(conflict(from, &existing.to));
            }
            if to.contains(existing.from.as_str()) {
                return Err(conflict(&existing.from, to));
            }
        }
        self.aliases.push(StoreAlias {
            from: from.to_string(),
            to: to.to_string(),
        });
        let diverges = self
            .aliases
            .iter()
            .any(|a| self.converge(&a.from).is_none() || self.converge(&a.to).is_none());
        if diverges {
            self.aliases.pop();
            return Err(conflict(from, to));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// 对单个名字做别名替换, 无匹配时原样返回
    pub fn canonicalize(&self, name: &str) -> String {
        match self.converge(name) {
            Some(out) => out,
            None => {
                tracing::warn!("门店别名替换未收敛: {}", name);
                self.rewrite_once(name)
            }
        }
    }

    /// 按顺序把每条规则应用一遍
    fn rewrite_once(&self, name: &str) -> String {
        let mut out = name.to_string();
        for alias in &self.aliases {
            if out.contains(alias.from.as_str()) {
                out = out.replace(alias.from.as_str(), &alias.to);
            }
        }
        out
    }

    /// 反复替换直到不动点, 超过轮数上限返回 None
    fn converge(&self, name: &str) -> Option<String> {
        let max_passes = name.len() + self.aliases.len() + 1;
        let mut current = name.to_string();
        for _ in 0..max_passes {
            let next = self.rewrite_once(&current);
            if next == current {
                return Some(current);
            }
            current = next;
        }
        None
    }

    /// 对一张导出表的门店列做替换, 返回新的工作副本
    pub fn canonicalize_rows<T: StoreKeyed>(&self, mut rows: Vec<T>) -> Vec<T> {
        let mut rewritten = 0usize;
        for row in rows.iter_mut() {
            let canonical = self.canonicalize(row.store_key());
            if canonical != row.store_key() {
                *row.store_key_mut() = canonical;
                rewritten += 1;
            }
        }
        if rewritten > 0 {
            tracing::debug!("门店别名替换: {} 行 ({:?})", rewritten, T::KEY_KIND);
        }
        rows
    }

    /// 对整个数据集做替换 (严格门店列与广告标签列各自独立处理)
    pub fn canonicalize_dataset(&self, dataset: Dataset) -> Dataset {
        Dataset {
            daily_sales: self.canonicalize_rows(dataset.daily_sales),
            menu_sales: self.canonicalize_rows(dataset.menu_sales),
            dong_sales: self.canonicalize_rows(dataset.dong_sales),
            ad_summary: self.canonicalize_rows(dataset.ad_summary),
            ad_click: self.canonicalize_rows(dataset.ad_click),
            ad_daily: self.canonicalize_rows(dataset.ad_daily),
        }
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        Self {
            aliases: vec![StoreAlias {
                from: "간석구월점".to_string(),
                to: "경기광주점".to_string(),
            }],
        }
    }
}

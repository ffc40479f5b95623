use crate::config::DataConfig;
use crate::error::IngestError;
use crate::ingest::decode::{decode_text, default_encodings};
use crate::models::{
    AdClickRecord, AdDailyRecord, AdSummaryRecord, Dataset, DongSalesRecord, MenuSalesRecord,
    SalesRecord,
};
use chrono::{NaiveDate, NaiveDateTime};
use encoding_rs::Encoding;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 解析金额: 整数或小数 (四舍五入)
///
/// 金额、订单数、点击数都不能为负, 负值和无法解析的值一样返回 None。
pub fn parse_amount(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let value = match raw.parse::<i64>() {
        Ok(v) => v,
        Err(_) => raw
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(|v| v.round() as i64)?,
    };
    if value < 0 {
        tracing::debug!("负数金额按无效值处理: {}", raw);
        return None;
    }
    Some(value)
}

/// 解析日期, 兼容带时间部分的写法
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.len() == 8 && raw.bytes().all(|b| b.is_ascii_digit()) {
        let y: i32 = raw[..4].parse().ok()?;
        let m: u32 = raw[4..6].parse().ok()?;
        let d: u32 = raw[6..].parse().ok()?;
        return NaiveDate::from_ymd_opt(y, m, d);
    }
    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(d);
        }
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    None
}

fn opt_amount(raw: &Option<String>) -> Option<i64> {
    raw.as_deref().and_then(parse_amount)
}

#[derive(Debug, Deserialize)]
struct RawSalesRow {
    #[serde(rename = "h_strnm", alias = "store")]
    store: String,
    #[serde(rename = "h_orderdt", alias = "order_date")]
    order_date: String,
    platform: String,
    #[serde(default)]
    month: Option<String>,
    total_sales: String,
    order_count: String,
}

impl RawSalesRow {
    fn into_record(self) -> Option<SalesRecord> {
        let order_date = parse_date(&self.order_date)?;
        let month = match self.month {
            Some(m) if !m.trim().is_empty() => m.trim().to_string(),
            _ => order_date.format("%Y-%m").to_string(),
        };
        Some(SalesRecord {
            store: self.store,
            order_date,
            platform: self.platform,
            month,
            total_sales: parse_amount(&self.total_sales)?,
            order_count: parse_amount(&self.order_count)?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct RawMenuRow {
    #[serde(rename = "h_strnm", alias = "store")]
    store: String,
    month: String,
    #[serde(rename = "i_itemnm", alias = "item_name")]
    item_name: String,
    total_sales: String,
}

impl RawMenuRow {
    fn into_record(self) -> Option<MenuSalesRecord> {
        Some(MenuSalesRecord {
            store: self.store,
            month: self.month,
            item_name: self.item_name,
            total_sales: parse_amount(&self.total_sales)?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct RawDongRow {
    #[serde(rename = "h_strnm", alias = "store")]
    store: String,
    month: String,
    dong: String,
    total_sales: String,
}

impl RawDongRow {
    fn into_record(self) -> Option<DongSalesRecord> {
        Some(DongSalesRecord {
            store: self.store,
            month: self.month,
            dong: self.dong,
            total_sales: parse_amount(&self.total_sales)?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct RawAdSummaryRow {
    #[serde(rename = "매장명", alias = "store_label")]
    store_label: String,
    #[serde(rename = "최근재주문율_수치", alias = "recent_reorder_rate", default)]
    recent_reorder_rate: Option<String>,
}

impl RawAdSummaryRow {
    fn into_record(self) -> Option<AdSummaryRecord> {
        Some(AdSummaryRecord {
            store_label: self.store_label,
            recent_reorder_rate: self.recent_reorder_rate,
        })
    }
}

#[derive(Debug, Deserialize)]
struct RawAdClickRow {
    #[serde(rename = "매장명", alias = "store_label")]
    store_label: String,
    #[serde(rename = "총_광고비", alias = "total_ad_spend", default)]
    total_ad_spend: Option<String>,
    #[serde(rename = "총_광고매출", alias = "total_ad_sales", default)]
    total_ad_sales: Option<String>,
    #[serde(rename = "총_클릭수", alias = "total_clicks", default)]
    total_clicks: Option<String>,
}

impl RawAdClickRow {
    fn into_record(self) -> Option<AdClickRecord> {
        Some(AdClickRecord {
            total_ad_spend: opt_amount(&self.total_ad_spend),
            total_ad_sales: opt_amount(&self.total_ad_sales),
            total_clicks: opt_amount(&self.total_clicks),
            store_label: self.store_label,
        })
    }
}

#[derive(Debug, Deserialize)]
struct RawAdDailyRow {
    #[serde(rename = "매장명", alias = "store_label")]
    store_label: String,
    #[serde(rename = "일자", alias = "date")]
    date: String,
    #[serde(rename = "클릭수", alias = "clicks", default)]
    clicks: Option<String>,
    #[serde(rename = "광고비", alias = "ad_spend", default)]
    ad_spend: Option<String>,
}

impl RawAdDailyRow {
    fn into_record(self) -> Option<AdDailyRecord> {
        Some(AdDailyRecord {
            date: parse_date(&self.date)?,
            clicks: opt_amount(&self.clicks),
            ad_spend: opt_amount(&self.ad_spend),
            store_label: self.store_label,
        })
    }
}

/// 从目录读取导出 CSV
///
/// 文件不存在视为空表; 无法解析的行跳过并记录警告。
pub struct ExtractLoader {
    dir: PathBuf,
    encodings: Vec<&'static Encoding>,
}

impl ExtractLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            encodings: default_encodings(),
        }
    }

    pub fn with_encodings(mut self, encodings: Vec<&'static Encoding>) -> Self {
        self.encodings = encodings;
        self
    }

    /// 读取并解码文件, 不存在时返回 None
    fn read_text(&self, file_name: &str) -> Result<Option<(PathBuf, String)>, IngestError> {
        let path = self.dir.join(file_name);
        if !path.exists() {
            tracing::info!("导出文件不存在, 按空表处理: {}", path.display());
            return Ok(None);
        }
        let bytes = std::fs::read(&path).map_err(|source| IngestError::Io {
            path: path.clone(),
            source,
        })?;
        let text = decode_text(&bytes, &self.encodings)
            .ok_or_else(|| IngestError::Encoding { path: path.clone() })?
            .into_owned();
        Ok(Some((path, text)))
    }

    fn load<Raw, T, F>(&self, file_name: &str, convert: F) -> Result<Vec<T>, IngestError>
    where
        Raw: DeserializeOwned,
        F: Fn(Raw) -> Option<T>,
    {
        let Some((path, text)) = self.read_text(file_name)? else {
            return Ok(Vec::new());
        };
        let rows = parse_rows(&path, &text, convert)?;
        tracing::info!("已加载 {}: {} 行", path.display(), rows.len());
        Ok(rows)
    }

    pub fn load_dataset(&self, files: &DataConfig) -> Result<Dataset, IngestError> {
        Ok(Dataset {
            daily_sales: self.load(&files.daily_sales, RawSalesRow::into_record)?,
            menu_sales: self.load(&files.menu_sales, RawMenuRow::into_record)?,
            dong_sales: self.load(&files.dong_sales, RawDongRow::into_record)?,
            ad_summary: self.load(&files.ad_summary, RawAdSummaryRow::into_record)?,
            ad_click: self.load(&files.ad_click, RawAdClickRow::into_record)?,
            ad_daily: self.load(&files.ad_daily, RawAdDailyRow::into_record)?,
        })
    }
}

/// 按配置目录加载全部导出表
pub fn load_dataset(config: &DataConfig) -> Result<Dataset, IngestError> {
    ExtractLoader::new(&config.dir).load_dataset(config)
}

fn parse_rows<Raw, T, F>(path: &Path, text: &str, convert: F) -> Result<Vec<T>, IngestError>
where
    Raw: DeserializeOwned,
    F: Fn(Raw) -> Option<T>,
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    // 表头读取失败说明整个文件不可用
    reader.headers().map_err(|source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for (line_num, result) in reader.deserialize::<Raw>().enumerate() {
        match result.ok().and_then(&convert) {
            Some(row) => rows.push(row),
            None => {
                skipped += 1;
                tracing::debug!("{} 第 {} 行无法解析, 已跳过", path.display(), line_num + 2);
            }
        }
    }
    if skipped > 0 {
        tracing::warn!("{}: 跳过 {} 行无法解析的数据", path.display(), skipped);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse<Raw, T, F>(text: &str, convert: F) -> Vec<T>
    where
        Raw: DeserializeOwned,
        F: Fn(Raw) -> Option<T>,
    {
        parse_rows(Path::new("test.csv"), text, convert).unwrap()
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12000"), Some(12000));
        assert_eq!(parse_amount(" 12000.0 "), Some(12000));
        assert_eq!(parse_amount("1,000"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("nan"), None);
        assert_eq!(parse_amount("0"), Some(0));
        assert_eq!(parse_amount("-50000"), None);
        assert_eq!(parse_amount("-0.4"), Some(0));
        assert_eq!(parse_amount("-12.5"), None);
    }

    #[test]
    fn test_negative_amounts_rejected() {
        let csv = "\
h_strnm,h_orderdt,platform,month,total_sales,order_count
A점,2024-01-05,배달의민족,2024-01,-50000,2
A점,2024-01-06,배달의민족,2024-01,30000,-1
A점,2024-01-07,배달의민족,2024-01,30000,1
";
        let rows = parse(csv, RawSalesRow::into_record);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total_sales, 30000);

        let csv = "h_strnm,month,i_itemnm,total_sales\nA점,2024-01,후라이드,-18000\n";
        assert!(parse(csv, RawMenuRow::into_record).is_empty());

        let csv = "\
매장명,총_광고비,총_클릭수
[배민] A점,-150000,320
";
        let rows = parse(csv, RawAdClickRow::into_record);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total_ad_spend, None);
        assert_eq!(rows[0].total_clicks, Some(320));
    }

    #[test]
    fn test_parse_date() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(parse_date("2024-01-05"), Some(d));
        assert_eq!(parse_date("2024-01-05 00:00:00"), Some(d));
        assert_eq!(parse_date("20240105"), Some(d));
        assert_eq!(parse_date("어제"), None);
    }

    #[test]
    fn test_sales_rows_skip_unparseable() {
        let csv = "\
h_strnm,h_orderdt,platform,month,total_sales,order_count
A점,2024-01-05,배달의민족,2024-01,30000,2
A점,2024-01-06,배달의민족,,15000.0,1
B점,bad-date,요기요,2024-01,1000,1
B점,2024-01-07,요기요,2024-01,-,1
";
        let rows = parse(csv, RawSalesRow::into_record);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].total_sales, 30000);
        assert_eq!(rows[1].month, "2024-01");
    }

    #[test]
    fn test_ad_click_lenient_numerics() {
        let csv = "\
매장명,총_광고비,총_클릭수
[배민] A점,150000,320
[배민] B점,집계중,
";
        let rows = parse(csv, RawAdClickRow::into_record);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].total_ad_spend, Some(150000));
        assert_eq!(rows[0].total_clicks, Some(320));
        assert_eq!(rows[0].total_ad_sales, None);
        assert_eq!(rows[1].total_ad_spend, None);
        assert_eq!(rows[1].total_clicks, None);
    }

    #[test]
    fn test_ad_summary_without_rate_column() {
        let csv = "매장명,기타\nA점,x\n";
        let rows = parse(csv, RawAdSummaryRow::into_record);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].recent_reorder_rate, None);
    }

    #[test]
    fn test_missing_file_is_empty_extract() {
        let loader = ExtractLoader::new("/nonexistent/franchise-insight");
        let dataset = loader.load_dataset(&DataConfig::default()).unwrap();
        assert!(dataset.is_empty());
    }
}

const MAN: i64 = 10_000;
const EOK: i64 = 100_000_000;

/// 金额转韩文万/亿分段文本
///
/// # 示例
/// ```
/// use franchise_insight::service::currency::format_krw;
/// assert_eq!(format_krw(0), "0원");
/// assert_eq!(format_krw(15_000), "1만 원");
/// assert_eq!(format_krw(150_040_000), "1억 5004만 원");
/// ```
pub fn format_krw(amount: i64) -> String {
    if amount == 0 {
        return "0원".to_string();
    }
    if amount >= EOK {
        let eok = amount / EOK;
        let man = (amount % EOK) / MAN;
        return if man > 0 {
            format!("{}억 {}만 원", eok, man)
        } else {
            format!("{}억 원", eok)
        };
    }
    if amount >= MAN {
        return format!("{}만 원", amount / MAN);
    }
    format!("{}원", amount)
}

/// 可能缺失的金额, 缺失按 0 处理
pub fn format_krw_opt(amount: Option<i64>) -> String {
    format_krw(amount.unwrap_or(0))
}

/// 小数金额 (如客单价) 先截断再格式化
pub fn format_krw_f64(amount: f64) -> String {
    if !amount.is_finite() {
        return format_krw(0);
    }
    format_krw(amount.trunc() as i64)
}

/// 订单数: 千分位 + "건"
pub fn format_count(n: i64) -> String {
    let s = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(s.len() + s.len() / 3);
    for (i, ch) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if n < 0 {
        grouped.insert(0, '-');
    }
    format!("{}건", grouped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_krw_boundaries() {
        assert_eq!(format_krw(0), "0원");
        assert_eq!(format_krw(1), "1원");
        assert_eq!(format_krw(9_999), "9999원");
        assert_eq!(format_krw(10_000), "1만 원");
        assert_eq!(format_krw(19_999), "1만 원");
        assert_eq!(format_krw(99_999_999), "9999만 원");
        assert_eq!(format_krw(100_000_000), "1억 원");
        assert_eq!(format_krw(100_009_999), "1억 원");
        assert_eq!(format_krw(100_010_000), "1억 1만 원");
        assert_eq!(format_krw(150_040_000), "1억 5004만 원");
        assert_eq!(format_krw(1_230_000_000), "12억 3000만 원");
    }

    #[test]
    fn test_format_krw_undefined() {
        assert_eq!(format_krw_opt(None), "0원");
        assert_eq!(format_krw_f64(f64::NAN), "0원");
        assert_eq!(format_krw_f64(23_456.9), "2만 원");
        assert_eq!(format_krw_f64(9_999.99), "9999원");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0건");
        assert_eq!(format_count(999), "999건");
        assert_eq!(format_count(1_000), "1,000건");
        assert_eq!(format_count(1_234_567), "1,234,567건");
    }
}

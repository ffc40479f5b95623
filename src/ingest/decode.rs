use encoding_rs::{Encoding, EUC_KR, UTF_8};
use std::borrow::Cow;

/// 候选编码, 按顺序尝试: UTF-8 → CP949 (EUC-KR 超集)
pub fn default_encodings() -> Vec<&'static Encoding> {
    vec![UTF_8, EUC_KR]
}

/// 解码导出文件
///
/// 有 BOM 时以 BOM 为准, 否则依次尝试候选编码, 不允许替换字符。
pub fn decode_text<'a>(bytes: &'a [u8], candidates: &[&'static Encoding]) -> Option<Cow<'a, str>> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        return encoding.decode_without_bom_handling_and_without_replacement(&bytes[bom_len..]);
    }
    candidates.iter().find_map(|encoding| {
        let decoded = encoding.decode_without_bom_handling_and_without_replacement(bytes);
        if decoded.is_some() {
            tracing::debug!("使用编码 {} 解码", encoding.name());
        }
        decoded
    })
}

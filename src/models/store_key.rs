/// 门店标识列的语义
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// 严格门店名 (POS 导出, 经别名统一后可直接比较)
    Store,
    /// 自由文本标签 (广告导出, 可能夹带额外描述)
    Label,
}

/// 带门店标识列的记录
pub trait StoreKeyed {
    const KEY_KIND: KeyKind;

    fn store_key(&self) -> &str;

    fn store_key_mut(&mut self) -> &mut String;
}

macro_rules! impl_store_keyed {
    ($ty:ty, $field:ident, $kind:expr) => {
        impl StoreKeyed for $ty {
            const KEY_KIND: KeyKind = $kind;

            fn store_key(&self) -> &str {
                &self.$field
            }

            fn store_key_mut(&mut self) -> &mut String {
                &mut self.$field
            }
        }
    };
}

impl_store_keyed!(super::SalesRecord, store, KeyKind::Store);
impl_store_keyed!(super::MenuSalesRecord, store, KeyKind::Store);
impl_store_keyed!(super::DongSalesRecord, store, KeyKind::Store);
impl_store_keyed!(super::AdSummaryRecord, store_label, KeyKind::Label);
impl_store_keyed!(super::AdClickRecord, store_label, KeyKind::Label);
impl_store_keyed!(super::AdDailyRecord, store_label, KeyKind::Label);

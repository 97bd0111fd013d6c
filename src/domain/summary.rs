// ==========================================
// POS销售汇总引擎 - 销售汇总领域模型
// ==========================================
// 职责: 三级嵌套聚合 (日期 → 商品 → 配送方式)
//       与扁平汇总记录（下游统一交换格式）
// 红线: 每个键恰好一个累加器,不跨配送方式合并
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// Totals - 累加器
// ==========================================

/// 单个聚合键的累计值
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    /// 累计数量
    pub quantity: i64,
    /// 累计金额
    pub amount: f64,
}

impl Totals {
    pub fn add(&mut self, quantity: i64, amount: f64) {
        self.quantity += quantity;
        self.amount += amount;
    }
}

// ==========================================
// SalesSummary - 嵌套聚合
// ==========================================

/// 三级嵌套销售聚合
///
/// 键: (日期, 商品名, 配送方式) → 累计数量/金额。
/// BTreeMap 保证输出顺序稳定: 日期优先,其次商品名,
/// 最后配送方式（字典序,与输入行顺序无关）。
#[derive(Debug, Clone, Default)]
pub struct SalesSummary {
    entries: BTreeMap<NaiveDate, BTreeMap<String, BTreeMap<String, Totals>>>,
}

impl SalesSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// 向 (日期, 商品名, 配送方式) 键累加数量与金额
    ///
    /// 聚合满足交换律与结合律,行处理顺序不影响结果
    pub fn accumulate(
        &mut self,
        date: NaiveDate,
        name: &str,
        shipping_method: &str,
        quantity: i64,
        amount: f64,
    ) {
        self.entries
            .entry(date)
            .or_default()
            .entry(name.to_string())
            .or_default()
            .entry(shipping_method.to_string())
            .or_default()
            .add(quantity, amount);
    }

    /// 展开为扁平汇总记录
    ///
    /// 每个聚合键恰好产生一条记录,无遗漏、无合并
    pub fn flatten(&self) -> Vec<FlatSummaryRecord> {
        let mut records = Vec::new();
        for (date, products) in &self.entries {
            for (name, shipping_methods) in products {
                for (shipping_method, totals) in shipping_methods {
                    records.push(FlatSummaryRecord {
                        date: *date,
                        product_name: name.clone(),
                        shipping_method: shipping_method.clone(),
                        total_quantity: totals.quantity,
                        total_amount: totals.amount,
                    });
                }
            }
        }
        records
    }

    /// 聚合键总数
    pub fn key_count(&self) -> usize {
        self.entries
            .values()
            .flat_map(|products| products.values())
            .map(|shipping| shipping.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ==========================================
// FlatSummaryRecord - 扁平汇总记录
// ==========================================

/// 扁平汇总记录 - 所有下游消费者的稳定交换格式
///
/// serde 列名与汇总 CSV 表头一一对应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatSummaryRecord {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Product Name")]
    pub product_name: String,
    #[serde(rename = "Shipping Method")]
    pub shipping_method: String,
    #[serde(rename = "Total Quantity")]
    pub total_quantity: i64,
    #[serde(rename = "Total Amount")]
    pub total_amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_accumulate_same_key() {
        let mut summary = SalesSummary::new();
        summary.accumulate(date(2024, 3, 1), "Widget", "Courier", 2, 10.0);
        summary.accumulate(date(2024, 3, 1), "Widget", "Courier", 1, 5.0);

        let records = summary.flatten();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].total_quantity, 3);
        assert!((records[0].total_amount - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_no_merge_across_shipping_methods() {
        let mut summary = SalesSummary::new();
        summary.accumulate(date(2024, 3, 1), "Widget", "Courier", 2, 10.0);
        summary.accumulate(date(2024, 3, 1), "Widget", "In-Store", 1, 5.0);

        // 同日期同商品不同配送方式,必须产生两条记录
        let records = summary.flatten();
        assert_eq!(records.len(), 2);
        assert_eq!(summary.key_count(), 2);
    }

    #[test]
    fn test_flatten_order_is_stable() {
        let mut a = SalesSummary::new();
        a.accumulate(date(2024, 3, 2), "Gadget", "Courier", 1, 5.0);
        a.accumulate(date(2024, 3, 1), "Widget", "Courier", 2, 10.0);

        let mut b = SalesSummary::new();
        b.accumulate(date(2024, 3, 1), "Widget", "Courier", 2, 10.0);
        b.accumulate(date(2024, 3, 2), "Gadget", "Courier", 1, 5.0);

        // 插入顺序不同,输出顺序一致（日期优先）
        assert_eq!(a.flatten(), b.flatten());
        assert_eq!(a.flatten()[0].date, date(2024, 3, 1));
    }
}

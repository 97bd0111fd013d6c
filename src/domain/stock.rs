// ==========================================
// POS销售汇总引擎 - 库存领域模型
// ==========================================
// 职责: 库存/价格记录与增强汇总记录
// 用途: 库存增强阶段按商品名左连接汇总表
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// StockRecord - 库存记录
// ==========================================

/// 库存表的一行
///
/// Price / Supplier Price 已清洗为纯小数;
/// 清洗后无法解析的值视为缺失（None）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    /// 商品名称（连接键）
    pub name: String,
    /// 商品分类
    pub categories: String,
    /// 库存数量（源表可能不含该列）
    pub stock_quantity: Option<String>,
    /// 售价
    pub price: Option<f64>,
    /// 进价
    pub supplier_price: Option<f64>,
}

// ==========================================
// AugmentedRecord - 增强汇总记录
// ==========================================

/// 库存增强后的汇总记录
///
/// 左连接: 每条汇总记录都保留,即使无库存匹配。
/// 缺失价格时 margin / margin_percentage 为 0,
/// 不传播未定义值。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AugmentedRecord {
    pub product_name: String,
    pub categories: String,
    pub stock_quantity: Option<String>,
    pub price: Option<f64>,
    pub supplier_price: Option<f64>,
    /// 毛利 = 售价 - 进价（缺失价格时为 0）
    pub margin: f64,
    /// 毛利率 = ceil(100 × 毛利 / 售价)（缺失价格时为 0）
    pub margin_percentage: i64,
}

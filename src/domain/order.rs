// ==========================================
// POS销售汇总引擎 - 订单领域模型
// ==========================================
// 职责: 订单原始记录与行项目实体
// 用途: 导入层写入,引擎层只读
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// RawOrderRecord - 订单原始记录
// ==========================================
// 订单导出文件的一行,按表头列名索引
// 列名由 ImportConfig 配置,不在此处硬编码
pub type RawOrderRecord = HashMap<String, String>;

// ==========================================
// LineItem - 行项目
// ==========================================

/// 单个行项目（一条购买明细）
///
/// 由行项目解析器从订单行的自由文本字段中提取
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// 商品名称
    pub name: String,
    /// 购买数量
    pub quantity: i64,
    /// 行项目总金额
    pub total: f64,
}

impl LineItem {
    pub fn new(name: impl Into<String>, quantity: i64, total: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
            total,
        }
    }
}

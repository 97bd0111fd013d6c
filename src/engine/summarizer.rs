// ==========================================
// POS销售汇总引擎 - 订单汇总器
// ==========================================
// 职责: 将订单原始记录折叠为三级嵌套聚合
//       (日期 → 商品 → 配送方式)
// 红线: 行级失败跳过并记录,绝不中止批处理
// ==========================================

use crate::config::ImportConfig;
use crate::domain::{RawOrderRecord, SalesSummary};
use crate::importer::LineItemParser;
use chrono::NaiveDateTime;
use tracing::warn;

// ==========================================
// SummarizeOutcome - 汇总结果
// ==========================================

/// 一次汇总的结果与行级统计
#[derive(Debug)]
pub struct SummarizeOutcome {
    pub summary: SalesSummary,
    /// 参与汇总的行数
    pub rows_total: usize,
    /// 因日期解析失败被跳过的行数
    pub rows_skipped: usize,
}

// ==========================================
// OrderSummarizer - 订单汇总器
// ==========================================
pub struct OrderSummarizer {
    config: ImportConfig,
    parser: LineItemParser,
}

impl OrderSummarizer {
    pub fn new(config: ImportConfig) -> Self {
        Self {
            config,
            parser: LineItemParser,
        }
    }

    /// 汇总订单原始记录
    ///
    /// - 日期按配置格式解析,失败的行跳过并记录
    /// - 配送方式为空/缺失 → 哨兵值（默认 "In-Store"）
    /// - 每行经行项目解析器产出零或多个三元组,
    ///   逐个累加到 (日期, 商品, 配送方式) 键
    pub fn summarize(&self, rows: &[RawOrderRecord]) -> SummarizeOutcome {
        let mut summary = SalesSummary::new();
        let mut rows_skipped = 0usize;

        for (row_idx, row) in rows.iter().enumerate() {
            let date_text = row
                .get(&self.config.date_column)
                .map(String::as_str)
                .unwrap_or("");

            let date = match NaiveDateTime::parse_from_str(date_text, &self.config.date_format) {
                Ok(dt) => dt.date(),
                Err(e) => {
                    warn!(
                        "跳过订单行 {} （日期无法解析）: {:?}, 错误: {}",
                        row_idx + 1,
                        date_text,
                        e
                    );
                    rows_skipped += 1;
                    continue;
                }
            };

            let shipping_method = self.normalize_shipping_method(row);

            let line_items_text = row
                .get(&self.config.line_items_column)
                .map(String::as_str)
                .unwrap_or("");

            for item in self.parser.parse(line_items_text) {
                summary.accumulate(date, &item.name, &shipping_method, item.quantity, item.total);
            }
        }

        SummarizeOutcome {
            summary,
            rows_total: rows.len(),
            rows_skipped,
        }
    }

    /// 配送方式标准化: 空白/缺失 → 哨兵值
    fn normalize_shipping_method(&self, row: &RawOrderRecord) -> String {
        match row.get(&self.config.shipping_column) {
            Some(value) if !value.trim().is_empty() => value.trim().to_string(),
            _ => self.config.default_shipping_method.clone(),
        }
    }
}

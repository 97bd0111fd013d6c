// ==========================================
// POS销售汇总引擎 - 库存增强
// ==========================================
// 职责: 将库存/价格表按商品名左连接到扁平汇总,
//       派生毛利与毛利率字段
// 红线: 左连接保留每条汇总记录;缺失价格派生为 0,
//       不传播未定义值
// ==========================================

use crate::domain::{AugmentedRecord, StockRecord};
use crate::engine::summary_writer::load_flat_summary;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::CsvParser;
use csv::WriterBuilder;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

// ===== 库存表列名 =====
const STOCK_NAME_COLUMN: &str = "Name";
const STOCK_CATEGORIES_COLUMN: &str = "Categories";
const STOCK_QUANTITY_COLUMN: &str = "Stock quantity";
const STOCK_PRICE_COLUMN: &str = "Price";
const STOCK_SUPPLIER_PRICE_COLUMN: &str = "Supplier Price";

/// 增强输出表头
const AUGMENTED_HEADERS: [&str; 7] = [
    "Product Name",
    "Categories",
    "Stock quantity",
    "Price",
    "Supplier Price",
    "Margin",
    "Margin Percentage",
];

// ==========================================
// 价格清洗
// ==========================================

/// 清洗价格字段为纯小数
///
/// 去除货币符号与千分位分隔符（保留数字、小数点、负号）;
/// 清洗后无法解析的值视为缺失
pub fn clean_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

// ==========================================
// StockAugmenter - 库存增强器
// ==========================================
pub struct StockAugmenter;

impl StockAugmenter {
    /// 读取库存表,按商品名建立索引
    ///
    /// 必需列: Name / Categories / Price / Supplier Price;
    /// Stock quantity 列可选
    pub fn load_stock_table(&self, stock_path: &Path) -> ImportResult<HashMap<String, StockRecord>> {
        let parser = CsvParser;
        parser.verify_required_columns(
            stock_path,
            &[
                STOCK_NAME_COLUMN,
                STOCK_CATEGORIES_COLUMN,
                STOCK_PRICE_COLUMN,
                STOCK_SUPPLIER_PRICE_COLUMN,
            ],
        )?;

        let rows = parser.parse_to_raw_records(stock_path)?;
        let mut table = HashMap::new();

        for row in rows {
            let name = match row.get(STOCK_NAME_COLUMN) {
                Some(n) if !n.is_empty() => n.clone(),
                _ => continue, // 无名称的库存行无法参与连接
            };

            let record = StockRecord {
                categories: row
                    .get(STOCK_CATEGORIES_COLUMN)
                    .cloned()
                    .unwrap_or_default(),
                stock_quantity: row.get(STOCK_QUANTITY_COLUMN).cloned(),
                price: row.get(STOCK_PRICE_COLUMN).and_then(|v| clean_price(v)),
                supplier_price: row
                    .get(STOCK_SUPPLIER_PRICE_COLUMN)
                    .and_then(|v| clean_price(v)),
                name: name.clone(),
            };

            if record.price.is_none() {
                warn!("库存记录价格缺失或无法解析: {}", name);
            }

            table.insert(name, record);
        }

        Ok(table)
    }

    /// 连接单条汇总记录,派生毛利字段
    pub fn augment_record(
        &self,
        product_name: &str,
        stock: Option<&StockRecord>,
    ) -> AugmentedRecord {
        let (categories, stock_quantity, price, supplier_price) = match stock {
            Some(s) => (
                s.categories.clone(),
                s.stock_quantity.clone(),
                s.price,
                s.supplier_price,
            ),
            None => (String::new(), None, None, None),
        };

        // 缺失价格 → 毛利/毛利率为 0
        let (margin, margin_percentage) = match (price, supplier_price) {
            (Some(p), Some(s)) => {
                let margin = p - s;
                let pct = if p != 0.0 {
                    (margin / p * 100.0).ceil() as i64
                } else {
                    0
                };
                (margin, pct)
            }
            _ => (0.0, 0),
        };

        AugmentedRecord {
            product_name: product_name.to_string(),
            categories,
            stock_quantity,
            price,
            supplier_price,
            margin,
            margin_percentage,
        }
    }

    /// 增强整张汇总表并写出
    ///
    /// 左连接: 每条汇总记录恰好产生一条增强记录。
    /// 输出在内存中构建完成后一次性落盘。
    pub fn augment(
        &self,
        summary_path: &Path,
        stock_path: &Path,
        output_path: &Path,
    ) -> ImportResult<usize> {
        let summary = load_flat_summary(summary_path)?;
        let stock_table = self.load_stock_table(stock_path)?;

        let augmented: Vec<AugmentedRecord> = summary
            .iter()
            .map(|record| {
                self.augment_record(&record.product_name, stock_table.get(&record.product_name))
            })
            .collect();

        let buffer = self.render(&augmented)?;
        std::fs::write(output_path, buffer).map_err(|e| ImportError::FileWriteError {
            path: output_path.display().to_string(),
            message: e.to_string(),
        })?;

        info!(
            "库存增强汇总已写出: {} （{} 条记录）",
            output_path.display(),
            augmented.len()
        );
        Ok(augmented.len())
    }

    fn render(&self, records: &[AugmentedRecord]) -> ImportResult<Vec<u8>> {
        let mut buffer = Vec::from("\u{feff}".as_bytes());
        {
            let mut writer = WriterBuilder::new().from_writer(&mut buffer);
            writer.write_record(AUGMENTED_HEADERS)?;

            for record in records {
                writer.write_record([
                    record.product_name.clone(),
                    record.categories.clone(),
                    record.stock_quantity.clone().unwrap_or_default(),
                    record.price.map(|p| format!("{:.2}", p)).unwrap_or_default(),
                    record
                        .supplier_price
                        .map(|p| format!("{:.2}", p))
                        .unwrap_or_default(),
                    format!("{:.2}", record.margin),
                    record.margin_percentage.to_string(),
                ])?;
            }

            writer
                .flush()
                .map_err(|e| ImportError::CsvParseError(e.to_string()))?;
        }
        Ok(buffer)
    }
}

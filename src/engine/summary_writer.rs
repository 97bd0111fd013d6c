// ==========================================
// POS销售汇总引擎 - 汇总表读写
// ==========================================
// 职责: 扁平汇总表的序列化与反序列化
// 格式: UTF-8 + BOM CSV（电子表格兼容）
// 红线: 输出全量写入,失败的批处理不留下半成品文件
// ==========================================

use crate::domain::{FlatSummaryRecord, SalesSummary};
use crate::importer::error::{ImportError, ImportResult};
use csv::{ReaderBuilder, WriterBuilder};
use std::path::Path;
use tracing::info;

/// 扁平汇总表表头（稳定交换格式,下游消费者依赖）
pub const SUMMARY_HEADERS: [&str; 5] = [
    "Date",
    "Product Name",
    "Shipping Method",
    "Total Quantity",
    "Total Amount",
];

/// UTF-8 BOM（电子表格兼容）
const UTF8_BOM: &str = "\u{feff}";

// ==========================================
// SummaryWriter - 汇总表写入器
// ==========================================
pub struct SummaryWriter;

impl SummaryWriter {
    /// 将嵌套聚合写出为扁平汇总 CSV
    ///
    /// 先在内存中构建完整输出,再一次性落盘:
    /// 任何序列化失败都不会产生部分写入的文件。
    /// 返回写出的记录条数。
    pub fn write_summary(&self, summary: &SalesSummary, path: &Path) -> ImportResult<usize> {
        let records = summary.flatten();
        let buffer = self.render(&records)?;

        std::fs::write(path, buffer).map_err(|e| ImportError::FileWriteError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        info!("汇总已写出: {} （{} 条记录）", path.display(), records.len());
        Ok(records.len())
    }

    /// 渲染扁平记录为带 BOM 的 CSV 字节
    fn render(&self, records: &[FlatSummaryRecord]) -> ImportResult<Vec<u8>> {
        let mut buffer = Vec::from(UTF8_BOM.as_bytes());
        {
            let mut writer = WriterBuilder::new().from_writer(&mut buffer);
            writer.write_record(SUMMARY_HEADERS)?;

            for record in records {
                writer.write_record([
                    record.date.format("%Y-%m-%d").to_string(),
                    record.product_name.clone(),
                    record.shipping_method.clone(),
                    record.total_quantity.to_string(),
                    format!("{:.2}", record.total_amount),
                ])?;
            }

            writer
                .flush()
                .map_err(|e| ImportError::CsvParseError(e.to_string()))?;
        }
        Ok(buffer)
    }
}

// ==========================================
// 汇总表读取
// ==========================================

/// 读取扁平汇总 CSV（容忍 BOM）
///
/// 库存增强与时间分桶聚合共用此入口
pub fn load_flat_summary(path: &Path) -> ImportResult<Vec<FlatSummaryRecord>> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(&content);

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut records = Vec::new();
    for result in reader.deserialize() {
        let record: FlatSummaryRecord = result?;
        records.push(record);
    }
    Ok(records)
}

// ==========================================
// POS销售汇总引擎 - 批处理API
// ==========================================
// 职责: 封装订单导出文件 → 扁平汇总表的批处理,
//       以及汇总表的库存增强
// 红线: 每次请求独立、无共享状态;
//       输出要么全量写出,要么不写
// ==========================================

use crate::api::error::ApiResult;
use crate::config::ImportConfig;
use crate::engine::{OrderSummarizer, StockAugmenter, SummaryWriter};
use crate::importer::{CsvParser, RowFilter};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

// ==========================================
// ProcessReport - 批处理报告
// ==========================================

/// 批处理API响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessReport {
    /// 读入的订单行数（过滤后）
    pub rows_total: usize,
    /// 因行级错误被跳过的行数
    pub rows_skipped: usize,
    /// 写出的汇总记录条数
    pub records_written: usize,
}

// ==========================================
// ProcessApi - 批处理API
// ==========================================
pub struct ProcessApi {
    config: ImportConfig,
}

impl ProcessApi {
    /// 创建新的ProcessApi实例
    pub fn new(config: ImportConfig) -> Self {
        Self { config }
    }

    /// 处理订单导出文件,写出扁平汇总表
    ///
    /// # 参数
    /// - input: 订单导出 CSV 路径
    /// - output: 汇总 CSV 输出路径
    ///
    /// # 返回
    /// - Ok(ProcessReport): 批处理统计
    /// - Err(ApiError): 文件缺失/缺列等请求致命错误
    pub fn process_summary(&self, input: &Path, output: &Path) -> ApiResult<ProcessReport> {
        self.run(input, output, None)
    }

    /// 处理订单导出文件的 filtered 变体
    ///
    /// 先应用行过滤器（排除取消订单与配置的商品系列），
    /// 再走相同的汇总流程
    pub fn process_filtered_summary(&self, input: &Path, output: &Path) -> ApiResult<ProcessReport> {
        let filter = RowFilter::from_config(&self.config);
        self.run(input, output, Some(&filter))
    }

    /// 一次调用同时产出汇总与过滤汇总
    /// （上传入口的标准流程）
    pub fn process_all(
        &self,
        input: &Path,
        summary_output: &Path,
        filtered_output: &Path,
    ) -> ApiResult<(ProcessReport, ProcessReport)> {
        let summary_report = self.process_summary(input, summary_output)?;
        let filtered_report = self.process_filtered_summary(input, filtered_output)?;
        Ok((summary_report, filtered_report))
    }

    /// 库存增强: 汇总表左连接库存表,派生毛利字段
    pub fn augment_with_stock(
        &self,
        summary: &Path,
        stock: &Path,
        output: &Path,
    ) -> ApiResult<usize> {
        let written = StockAugmenter.augment(summary, stock, output)?;
        Ok(written)
    }

    // ==========================================
    // 内部流程: 读取 → 校验表头 → (过滤) → 汇总 → 写出
    // ==========================================
    fn run(
        &self,
        input: &Path,
        output: &Path,
        filter: Option<&RowFilter>,
    ) -> ApiResult<ProcessReport> {
        let parser = CsvParser;

        // 表头缺列对整个请求致命
        parser.verify_required_columns(input, &self.config.required_columns())?;

        let mut rows = parser.parse_to_raw_records(input)?;
        info!("订单导出文件已读取: {} （{} 行）", input.display(), rows.len());

        if let Some(filter) = filter {
            let before = rows.len();
            rows = filter.apply(rows);
            info!("行过滤: {} → {} 行", before, rows.len());
        }

        // 汇总完成后才写出,失败的批处理不产生半成品文件
        let outcome = OrderSummarizer::new(self.config.clone()).summarize(&rows);
        let records_written = SummaryWriter.write_summary(&outcome.summary, output)?;

        Ok(ProcessReport {
            rows_total: outcome.rows_total,
            rows_skipped: outcome.rows_skipped,
            records_written,
        })
    }
}

impl Default for ProcessApi {
    fn default() -> Self {
        Self::new(ImportConfig::default())
    }
}

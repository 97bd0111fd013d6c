// ==========================================
// POS销售汇总引擎 - 图表查询API
// ==========================================
// 职责: 面向外部 Web 层的聚合查询接口
// 红线: 粒度/值列参数非法 → 请求级校验错误,
//       不做部分计算
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::ImportConfig;
use crate::engine::{
    load_flat_summary, BreakdownData, Granularity, SeriesData, TimeBucketAggregator, ValueColumn,
};
use crate::importer::CsvParser;
use std::path::Path;

// ==========================================
// ChartApi - 图表查询API
// ==========================================

/// 图表查询API
///
/// 每次查询重新读取扁平汇总表,无进程级缓存:
/// 查询可任意重复且相互独立
pub struct ChartApi {
    config: ImportConfig,
    aggregator: TimeBucketAggregator,
}

impl ChartApi {
    /// 创建新的ChartApi实例
    pub fn new(config: ImportConfig) -> Self {
        Self {
            config,
            aggregator: TimeBucketAggregator,
        }
    }

    /// 时间分桶聚合查询
    ///
    /// # 参数
    /// - summary_path: 扁平汇总 CSV 路径
    /// - value_column: "Total Quantity" 或 "Total Amount"
    /// - granularity: "day" / "week" / "month" / "year"
    /// - by_product: 是否按商品分解
    ///
    /// # 返回
    /// - Ok(SeriesData): `{x, y}` 或 `{x, data}` 形状
    /// - Err(ApiError::InvalidInput): 粒度或值列无法识别
    pub fn aggregate(
        &self,
        summary_path: &Path,
        value_column: &str,
        granularity: &str,
        by_product: bool,
    ) -> ApiResult<SeriesData> {
        // 请求参数先校验,再读取数据
        let column = ValueColumn::parse(value_column).ok_or_else(|| {
            ApiError::InvalidInput(format!(
                "无效的值列: {value_column}（仅支持 Total Quantity / Total Amount）"
            ))
        })?;
        let granularity = Granularity::parse(granularity).ok_or_else(|| {
            ApiError::InvalidInput(format!(
                "无效的聚合粒度: {granularity}（仅支持 day / week / month / year）"
            ))
        })?;

        let records = load_flat_summary(summary_path)?;
        Ok(self.aggregator.aggregate(&records, column, granularity, by_product))
    }

    /// 配送方式占比查询（饼图）
    pub fn shipping_breakdown(&self, summary_path: &Path) -> ApiResult<BreakdownData> {
        let records = load_flat_summary(summary_path)?;
        Ok(self
            .aggregator
            .shipping_breakdown(&records, &self.config.default_shipping_method))
    }

    /// 分类占比查询（饼图,基于增强汇总表）
    pub fn category_breakdown(&self, augmented_path: &Path) -> ApiResult<BreakdownData> {
        let rows = CsvParser.parse_to_raw_records(augmented_path)?;
        let categories = rows
            .into_iter()
            .filter_map(|row| row.get("Categories").cloned());
        Ok(self.aggregator.category_breakdown(categories))
    }
}

impl Default for ChartApi {
    fn default() -> Self {
        Self::new(ImportConfig::default())
    }
}

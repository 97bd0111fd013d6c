// ==========================================
// POS销售汇总引擎 - 时间分桶聚合器
// ==========================================
// 职责: 将扁平汇总按日/周/月/年重新分组,
//       供图表层使用;另提供分类占比统计
// 红线: 单一聚合函数 + 按商品分组开关,
//       不维护两套近似重复的入口
// ==========================================

use crate::domain::FlatSummaryRecord;
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// Granularity - 分桶粒度
// ==========================================

/// 时间分桶粒度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    Month,
    Year,
}

impl Granularity {
    /// 解析请求参数;无法识别的粒度返回 None,
    /// 由 API 层转换为请求级校验错误
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "day" => Some(Self::Day),
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            "year" => Some(Self::Year),
            _ => None,
        }
    }

    /// 日期所属桶的起始日
    ///
    /// - day: 日期本身
    /// - week: ISO 周起始（周一）
    /// - month: 当月一日
    /// - year: 当年一月一日
    pub fn bucket_start(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Self::Day => date,
            Self::Week => date - Duration::days(date.weekday().num_days_from_monday() as i64),
            Self::Month => NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
                .unwrap_or(date),
            Self::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date),
        }
    }
}

// ==========================================
// ValueColumn - 聚合值列
// ==========================================

/// 聚合值列选择器
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueColumn {
    TotalQuantity,
    TotalAmount,
}

impl ValueColumn {
    /// 解析请求参数（接受交换格式的列名）
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Total Quantity" => Some(Self::TotalQuantity),
            "Total Amount" => Some(Self::TotalAmount),
            _ => None,
        }
    }

    fn extract(&self, record: &FlatSummaryRecord) -> f64 {
        match self {
            Self::TotalQuantity => record.total_quantity as f64,
            Self::TotalAmount => record.total_amount,
        }
    }
}

// ==========================================
// SeriesData - 聚合结果
// ==========================================

/// 时间分桶聚合结果（判别形状）
///
/// 序列化为图表层期望的 JSON 形状:
/// `{x, y}` 或 `{x, data}`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SeriesData {
    /// 单序列: 桶标签与对齐的累计值
    Single { x: Vec<String>, y: Vec<f64> },
    /// 按商品分解: 每个商品的值列表与共享桶标签对齐,
    /// 无数据的桶填 0 而非缺席
    PerProduct {
        x: Vec<String>,
        data: BTreeMap<String, Vec<f64>>,
    },
}

/// 占比统计结果（饼图形状）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownData {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
}

// ==========================================
// TimeBucketAggregator - 时间分桶聚合器
// ==========================================
pub struct TimeBucketAggregator;

impl TimeBucketAggregator {
    /// 按粒度聚合扁平汇总记录
    ///
    /// by_product = false: 单序列,桶标签升序;
    /// by_product = true: 每个商品一条序列,与共享桶标签对齐
    pub fn aggregate(
        &self,
        records: &[FlatSummaryRecord],
        column: ValueColumn,
        granularity: Granularity,
        by_product: bool,
    ) -> SeriesData {
        // BTreeMap 保证桶标签升序且确定
        let mut buckets: BTreeMap<NaiveDate, BTreeMap<String, f64>> = BTreeMap::new();
        for record in records {
            let bucket = granularity.bucket_start(record.date);
            *buckets
                .entry(bucket)
                .or_default()
                .entry(record.product_name.clone())
                .or_default() += column.extract(record);
        }

        let x: Vec<String> = buckets
            .keys()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .collect();

        if by_product {
            let mut data: BTreeMap<String, Vec<f64>> = BTreeMap::new();
            for products in buckets.values() {
                for product in products.keys() {
                    data.entry(product.clone()).or_default();
                }
            }
            // 每个商品的值与共享桶标签逐位对齐,无数据填 0
            for products in buckets.values() {
                for (product, values) in data.iter_mut() {
                    values.push(products.get(product).copied().unwrap_or(0.0));
                }
            }
            SeriesData::PerProduct { x, data }
        } else {
            let y: Vec<f64> = buckets
                .values()
                .map(|products| products.values().sum())
                .collect();
            SeriesData::Single { x, y }
        }
    }

    /// 配送方式占比: 按出现次数统计,空白替换为哨兵值
    pub fn shipping_breakdown(
        &self,
        records: &[FlatSummaryRecord],
        sentinel: &str,
    ) -> BreakdownData {
        let labels = records.iter().map(|r| {
            let trimmed = r.shipping_method.trim();
            if trimmed.is_empty() {
                sentinel.to_string()
            } else {
                trimmed.to_string()
            }
        });
        count_breakdown(labels)
    }

    /// 分类占比: 按出现次数统计,空白分类丢弃
    pub fn category_breakdown<I>(&self, categories: I) -> BreakdownData
    where
        I: IntoIterator<Item = String>,
    {
        let labels = categories
            .into_iter()
            .filter(|c| !c.trim().is_empty())
            .map(|c| c.trim().to_string());
        count_breakdown(labels)
    }
}

/// 出现次数统计,按次数降序（同次数按标签字典序,稳定）
fn count_breakdown<I>(labels: I) -> BreakdownData
where
    I: IntoIterator<Item = String>,
{
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for label in labels {
        *counts.entry(label).or_default() += 1;
    }

    let mut pairs: Vec<(String, u64)> = counts.into_iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1)); // 稳定排序保留字典序平局

    BreakdownData {
        labels: pairs.iter().map(|(label, _)| label.clone()).collect(),
        values: pairs.iter().map(|(_, count)| *count).collect(),
    }
}

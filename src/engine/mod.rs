// ==========================================
// POS销售汇总引擎 - 引擎层
// ==========================================
// 职责: 汇总、序列化、库存增强、时间分桶等
//       业务规则实现
// 红线: 引擎无共享可变状态,每次调用独占自身聚合
// ==========================================

pub mod stock;
pub mod summarizer;
pub mod summary_writer;
pub mod time_bucket;

// 重导出核心引擎
pub use stock::{clean_price, StockAugmenter};
pub use summarizer::{OrderSummarizer, SummarizeOutcome};
pub use summary_writer::{load_flat_summary, SummaryWriter, SUMMARY_HEADERS};
pub use time_bucket::{
    BreakdownData, Granularity, SeriesData, TimeBucketAggregator, ValueColumn,
};

// ==========================================
// POS销售汇总引擎 - 领域模型层
// ==========================================
// 职责: 定义领域实体与聚合结构
// 红线: 不含文件访问逻辑,不含引擎逻辑
// ==========================================

pub mod order;
pub mod stock;
pub mod summary;

// 重导出核心类型
pub use order::{LineItem, RawOrderRecord};
pub use stock::{AugmentedRecord, StockRecord};
pub use summary::{FlatSummaryRecord, SalesSummary, Totals};

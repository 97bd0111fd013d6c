// ==========================================
// POS销售汇总引擎 - 核心库
// ==========================================
// 职责: 订单行项目解析、销售汇总、库存增强、
//       时间分桶聚合
// 定位: 批处理引擎,Web/上传层作为外部调用方
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与聚合结构
pub mod domain;

// 导入层 - 外部数据读取与解析
pub mod importer;

// 引擎层 - 业务规则
pub mod engine;

// 配置层 - 导入配置
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 会话工作区
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{AugmentedRecord, FlatSummaryRecord, LineItem, SalesSummary, StockRecord, Totals};

// 导入层
pub use importer::{CsvParser, ImportError, LineItemParser, RowFilter};

// 引擎
pub use engine::{
    Granularity, OrderSummarizer, SeriesData, StockAugmenter, SummaryWriter,
    TimeBucketAggregator, ValueColumn,
};

// API
pub use api::{ApiError, ChartApi, ProcessApi, ProcessReport};

// 应用层
pub use app::{AppState, SessionWorkspace};

// 配置
pub use config::ImportConfig;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "POS销售汇总引擎";

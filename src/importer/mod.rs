// ==========================================
// POS销售汇总引擎 - 导入层
// ==========================================
// 职责: 外部订单导出文件读取、行项目解析、行过滤
// 支持: CSV
// ==========================================

// 模块声明
pub mod error;
pub mod file_parser;
pub mod filter;
pub mod line_items;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use file_parser::CsvParser;
pub use filter::RowFilter;
pub use line_items::LineItemParser;

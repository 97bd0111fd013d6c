// ==========================================
// POS销售汇总引擎 - 配置层
// ==========================================
// 职责: 导入/过滤配置管理
// 存储: JSON 配置文件（可选），默认值内置
// ==========================================

pub mod import_config;

// 重导出核心配置类型
pub use import_config::ImportConfig;

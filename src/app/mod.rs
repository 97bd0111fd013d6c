// ==========================================
// POS销售汇总引擎 - 应用层
// ==========================================
// 职责: 请求作用域的应用状态与会话工作区
// ==========================================

pub mod state;

// 重导出核心类型
pub use state::{default_sessions_root, AppState, SessionWorkspace};

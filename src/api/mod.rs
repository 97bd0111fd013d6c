// ==========================================
// POS销售汇总引擎 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供外部 Web 层调用
// 红线: 请求之间无共享可变状态
// ==========================================

pub mod chart_api;
pub mod error;
pub mod process_api;

// 重导出核心类型
pub use chart_api::ChartApi;
pub use error::{ApiError, ApiResult};
pub use process_api::{ProcessApi, ProcessReport};
